//! Tests for building trees from level-order descriptions

use bintree::{BinaryTree, TraversalOrder, TreeBuilder, TreeError};
use rstest::rstest;

fn values(tree: &BinaryTree<i64>, order: TraversalOrder) -> Vec<i64> {
    tree.traverse(order).map(|node| *node.value()).collect()
}

#[rstest]
#[case("1,2,3,4,5", vec![1, 2, 3, 4, 5])]
#[case("[1, 2, 3, 4, 5]", vec![1, 2, 3, 4, 5])]
#[case("1,null,2,3", vec![1, 2, 3])]
#[case("1,,2", vec![1, 2])]
#[case("5", vec![5])]
#[case("-1,NULL,-2", vec![-1, -2])]
fn given_description_when_parsing_then_breadth_first_matches(
    #[case] input: &str,
    #[case] expected: Vec<i64>,
) {
    let tree: BinaryTree<i64> = TreeBuilder::new().parse(input).unwrap();
    assert_eq!(values(&tree, TraversalOrder::BreadthFirst), expected);
}

#[test]
fn given_null_left_slot_when_parsing_then_child_hangs_right() {
    let tree: BinaryTree<i64> = TreeBuilder::new().parse("1,null,2,3").unwrap();
    assert!(tree.left.is_none());
    let right = tree.right.as_deref().unwrap();
    assert_eq!(*right.value(), 2);
    assert_eq!(right.left.as_deref().map(|n| *n.value()), Some(3));
    assert_eq!(values(&tree, TraversalOrder::InOrder), vec![1, 3, 2]);
}

#[rstest]
#[case("", TreeError::EmptyInput)]
#[case("[]", TreeError::EmptyInput)]
#[case("null,1", TreeError::MissingRoot)]
#[case("1,null,null,4", TreeError::OrphanValue { position: 3 })]
fn given_bad_shape_when_parsing_then_error(#[case] input: &str, #[case] expected: TreeError) {
    let result = TreeBuilder::new().parse::<i64>(input);
    assert_eq!(result.unwrap_err(), expected);
}

#[test]
fn given_non_numeric_token_when_parsing_then_reports_position() {
    let err = TreeBuilder::new().parse::<i64>("1,two,3").unwrap_err();
    match err {
        TreeError::InvalidValue { token, position, .. } => {
            assert_eq!(token, "two");
            assert_eq!(position, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_string_values_when_parsing_then_keeps_text() {
    let tree: BinaryTree<String> = TreeBuilder::new().parse("root, left ,right").unwrap();
    let texts: Vec<&str> = tree.iter().map(|n| n.value().as_str()).collect();
    assert_eq!(texts, vec!["left", "root", "right"]);
}

#[rstest]
#[case("1,2,3,4,5")]
#[case("1,null,2,3")]
#[case("7,3,null,1,null,0")]
fn given_parsed_tree_when_formatting_then_round_trips(#[case] input: &str) {
    let builder = TreeBuilder::new();
    let tree: BinaryTree<i64> = builder.parse(input).unwrap();
    assert_eq!(builder.format(&tree), input);
    let again: BinaryTree<i64> = builder.parse(&builder.format(&tree)).unwrap();
    assert_eq!(again, tree);
}

#[test]
fn given_slots_when_building_then_same_as_manual_links() {
    let built = BinaryTree::from_level_order([Some('a'), None, Some('b')]).unwrap();
    let manual = BinaryTree::new('a').with_right(BinaryTree::new('b'));
    assert_eq!(built, manual);
    assert_eq!(built.to_level_order(), vec![Some(&'a'), None, Some(&'b')]);
}

#[test]
fn given_deep_right_spine_description_when_parsing_then_no_stack_overflow() {
    let levels = 100_000;
    let input = (0..levels)
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",null,");
    let tree: BinaryTree<i64> = TreeBuilder::new().parse(&input).unwrap();

    assert_eq!(tree.depth(), levels);
    assert_eq!(tree.size(), levels);
    assert!(tree.left.is_none());
    assert_eq!(
        values(&tree, TraversalOrder::PreOrder),
        (0..levels as i64).collect::<Vec<_>>()
    );
    assert_eq!(TreeBuilder::new().format(&tree), input);
}

#[test]
fn given_deep_left_spine_slots_when_building_then_no_stack_overflow() {
    let levels = 100_000;
    let slots = std::iter::once(Some(0)).chain((1..levels).flat_map(|v| [Some(v), None]));
    let tree = BinaryTree::from_level_order(slots).unwrap();

    assert_eq!(tree.depth(), levels);
    assert!(tree.right.is_none());
    assert_eq!(tree.iter().next().map(|n| *n.value()), Some(levels - 1));
}

/// Property tests for the diff/patch contract:
/// - patch_all(A, diff(A, B)) == B
/// - diff(A, A') is empty for a structural copy A' of A
/// - diffing is deterministic
use paperclip_diff::{diff, patch_all};
use paperclip_vdom::{
    ConditionKind, ConditionRule, Element, KeyframeStep, Node, PropertyList, Rule, StyleRule,
    Tree, DOCUMENT_TAG,
};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;

fn arb_tag() -> impl Strategy<Value = String> {
    select(vec!["div", "span", "a", "b"]).prop_map(str::to_string)
}

fn arb_text() -> impl Strategy<Value = String> {
    select(vec!["a", "b", "hello", ""]).prop_map(str::to_string)
}

fn arb_properties() -> impl Strategy<Value = PropertyList> {
    let name = select(vec!["a", "b", "c", "color", "margin"]);
    let value = select(vec!["1", "2", "red", "blue", "true"]);
    vec((name, value), 0..4).prop_map(|pairs| pairs.into_iter().collect())
}

fn arb_style_rule() -> impl Strategy<Value = Rule> {
    (select(vec![".a", ".b", "div"]), arb_properties()).prop_map(|(selector, declarations)| {
        Rule::Style(StyleRule {
            selector: selector.to_string(),
            declarations,
        })
    })
}

fn arb_keyframe_step() -> impl Strategy<Value = Rule> {
    (select(vec!["0%", "50%", "100%"]), arb_properties()).prop_map(|(offset, declarations)| {
        Rule::KeyframeStep(KeyframeStep {
            offset: offset.to_string(),
            declarations,
        })
    })
}

fn arb_rule() -> impl Strategy<Value = Rule> {
    let condition = |kind: ConditionKind, rules: Vec<Rule>, text: &str| {
        let mut rule = ConditionRule::new(kind, text);
        for nested in rules {
            rule = rule.with_rule(nested);
        }
        Rule::Condition(rule)
    };

    let media = (select(vec!["screen", "print"]), vec(arb_style_rule(), 0..3))
        .prop_map(move |(text, rules)| condition(ConditionKind::Media, rules, text));
    let keyframes = (select(vec!["fade", "spin"]), vec(arb_keyframe_step(), 0..3))
        .prop_map(move |(text, rules)| condition(ConditionKind::Keyframes, rules, text));
    let unknown = (select(vec!["A", "B"]), vec(arb_style_rule(), 0..2)).prop_map(move |(text, rules)| {
        condition(ConditionKind::Unknown("font-feature-values".into()), rules, text)
    });

    prop_oneof![3 => arb_style_rule(), 1 => media, 1 => keyframes, 1 => unknown]
}

fn build_element(
    tag: String,
    attributes: PropertyList,
    rules: Vec<Rule>,
    children: Vec<Node>,
) -> Element {
    let mut element = Element::new(tag);
    element.attributes = attributes;
    for rule in rules {
        element = element.with_rule(rule);
    }
    element.with_children(children)
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![arb_text().prop_map(Node::text), arb_tag().prop_map(Node::element)];

    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            arb_tag(),
            arb_properties(),
            vec(arb_rule(), 0..3),
            vec(inner, 0..4),
        )
            .prop_map(|(tag, attributes, rules, children)| {
                Node::Element(build_element(tag, attributes, rules, children))
            })
    })
}

fn arb_tree() -> impl Strategy<Value = Tree> {
    (arb_properties(), vec(arb_rule(), 0..2), vec(arb_node(), 0..5)).prop_map(
        |(attributes, rules, children)| {
            Tree::new(build_element(
                DOCUMENT_TAG.to_string(),
                attributes,
                rules,
                children,
            ))
        },
    )
}

/// Copy without any shared allocations.
fn deep_copy(tree: &Tree) -> Tree {
    let json = serde_json::to_string(tree).unwrap();
    serde_json::from_str(&json).unwrap()
}

proptest! {
    #[test]
    fn test_patch_reproduces_new_tree(old in arb_tree(), new in arb_tree()) {
        let mutations = diff(&old, &new);
        let patched = patch_all(&old, &mutations).unwrap();
        prop_assert_eq!(patched, new);
    }

    #[test]
    fn test_diff_against_copy_is_empty(tree in arb_tree()) {
        let copy = deep_copy(&tree);
        prop_assert!(!copy.ptr_eq(&tree));
        prop_assert!(diff(&tree, &copy).is_empty());
    }

    #[test]
    fn test_diff_is_deterministic(old in arb_tree(), new in arb_tree()) {
        let first = serde_json::to_string(&diff(&old, &new)).unwrap();
        let second = serde_json::to_string(&diff(&deep_copy(&old), &deep_copy(&new))).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_mutations_survive_serialization(old in arb_tree(), new in arb_tree()) {
        let json = serde_json::to_string(&diff(&old, &new)).unwrap();
        let mutations: Vec<paperclip_diff::Mutation> = serde_json::from_str(&json).unwrap();
        let patched = patch_all(&old, &mutations).unwrap();
        prop_assert_eq!(patched, new);
    }
}

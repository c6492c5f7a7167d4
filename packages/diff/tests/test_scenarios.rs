/// Literal diff scenarios and the diff/patch contract on hand-built documents.
use paperclip_diff::{diff, patch_all, Child, Mutation};
use paperclip_vdom::{
    Address, ConditionRule, Element, KeyframeStep, Node, Rule, StyleRule, Tree,
};

fn doc(children: Vec<Node>) -> Tree {
    Tree::document(children)
}

fn styled(rules: Vec<Rule>) -> Tree {
    let mut element = Element::new("div");
    for rule in rules {
        element = element.with_rule(rule);
    }
    doc(vec![Node::Element(element)])
}

fn assert_round_trip(old: &Tree, new: &Tree) -> Vec<Mutation> {
    let mutations = diff(old, new);
    let patched = patch_all(old, &mutations).expect("patch failed");
    assert_eq!(&patched, new, "patched tree differs; mutations: {:#?}", mutations);
    mutations
}

fn kinds(mutations: &[Mutation]) -> Vec<&'static str> {
    mutations.iter().map(Mutation::kind).collect()
}

#[test]
fn test_text_change() {
    let old = doc(vec![Node::text("a")]);
    let new = doc(vec![Node::text("b")]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(mutations.len(), 1);
    match &mutations[0] {
        Mutation::SetTextNodeValue {
            target, new_value, ..
        } => {
            assert_eq!(target, &Address::root().child(0));
            assert_eq!(new_value, "b");
        }
        other => panic!("Expected SetTextNodeValue, got {}", other),
    }
}

#[test]
fn test_element_replace() {
    let old = doc(vec![Node::element("a")]);
    let new = doc(vec![Node::element("b")]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(kinds(&mutations), vec!["REMOVE_CHILD_NODE", "INSERT_CHILD_NODE"]);
    assert!(matches!(mutations[0], Mutation::RemoveChildNode { index: 0, .. }));
    match &mutations[1] {
        Mutation::InsertChildNode {
            index: 0,
            child: Child::Node(node),
            ..
        } => assert_eq!(node.as_ref(), &Node::element("b")),
        other => panic!("Expected InsertChildNode at 0, got {}", other),
    }
}

#[test]
fn test_attribute_replace() {
    let old = doc(vec![Node::Element(Element::new("a").with_flag("b"))]);
    let new = doc(vec![Node::Element(Element::new("a").with_flag("c"))]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(kinds(&mutations), vec!["REMOVE_ATTRIBUTE", "INSERT_ATTRIBUTE"]);
    assert!(matches!(&mutations[0], Mutation::RemoveAttribute { name, .. } if name == "b"));
    assert!(matches!(&mutations[1], Mutation::InsertAttribute { name, .. } if name == "c"));
}

#[test]
fn test_attribute_value_change() {
    let old = doc(vec![Node::Element(Element::new("a").with_attr("b", "1"))]);
    let new = doc(vec![Node::Element(Element::new("a").with_attr("b", "2"))]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(mutations.len(), 1);
    assert!(matches!(
        &mutations[0],
        Mutation::SetAttribute { name, new_value, .. } if name == "b" && new_value == "2"
    ));
}

#[test]
fn test_attribute_order_independence() {
    let old = doc(vec![Node::Element(
        Element::new("a").with_attr("x", "1").with_attr("y", "2").with_flag("z"),
    )]);
    let new = doc(vec![Node::Element(
        Element::new("a").with_flag("z").with_attr("y", "2").with_attr("x", "1"),
    )]);

    assert!(diff(&old, &new).is_empty());
}

#[test]
fn test_selector_change_replaces_rule() {
    let old = styled(vec![StyleRule::new(".a").into()]);
    let new = styled(vec![StyleRule::new(".b").into()]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(kinds(&mutations), vec!["REMOVE_CHILD_NODE", "INSERT_CHILD_NODE"]);
    assert_eq!(mutations[0].target(), &Address::root().child(0).shadow());
}

#[test]
fn test_declaration_change_is_property_level() {
    let old = styled(vec![StyleRule::new(".a").with_declaration("color", "red").into()]);
    let new = styled(vec![StyleRule::new(".a").with_declaration("color", "blue").into()]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(kinds(&mutations), vec!["SET_PROPERTY"]);
}

#[test]
fn test_media_condition_change_replaces_whole_rule() {
    let old = styled(vec![ConditionRule::media("screen")
        .with_rule(StyleRule::new(".a").with_declaration("color", "red"))
        .with_rule(StyleRule::new(".b").with_declaration("color", "red"))
        .into()]);
    let new = styled(vec![ConditionRule::media("print")
        .with_rule(StyleRule::new(".a").with_declaration("color", "red"))
        .with_rule(StyleRule::new(".b").with_declaration("color", "blue"))
        .into()]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(kinds(&mutations), vec!["REMOVE_CHILD_NODE", "INSERT_CHILD_NODE"]);
}

#[test]
fn test_media_unchanged_condition_diffs_nested() {
    let old = styled(vec![ConditionRule::media("screen")
        .with_rule(StyleRule::new(".a").with_declaration("color", "red"))
        .with_rule(StyleRule::new(".b").with_declaration("color", "red"))
        .into()]);
    let new = styled(vec![ConditionRule::media("screen")
        .with_rule(StyleRule::new(".a").with_declaration("color", "red"))
        .with_rule(StyleRule::new(".b").with_declaration("color", "blue"))
        .into()]);

    let mutations = assert_round_trip(&old, &new);
    assert_eq!(kinds(&mutations), vec!["SET_PROPERTY"]);
    assert_eq!(
        mutations[0].target(),
        &Address::root().child(0).shadow().rule(0).rule(1)
    );
}

#[test]
fn test_stylesheet_added_and_removed() {
    let plain = doc(vec![Node::Element(Element::new("div").with_text("x"))]);
    let with_styles = doc(vec![Node::Element(
        Element::new("div")
            .with_rule(StyleRule::new(".a").with_declaration("color", "red"))
            .with_rule(
                ConditionRule::keyframes("spin").with_rule(
                    KeyframeStep::new("from").with_declaration("transform", "rotate(0)"),
                ),
            )
            .with_text("x"),
    )]);

    let mutations = assert_round_trip(&plain, &with_styles);
    assert!(mutations
        .iter()
        .all(|m| m.target() == &Address::root().child(0).shadow()));
    assert_round_trip(&with_styles, &plain);
}

#[test]
fn test_nested_reorder_and_growth() {
    let old = doc(vec![Node::Element(
        Element::new("ul")
            .with_child(Element::new("li").with_text("1"))
            .with_child(Element::new("li").with_text("2"))
            .with_child(Element::new("li").with_text("3")),
    )]);
    let new = doc(vec![
        Node::Element(
            Element::new("ul")
                .with_attr("class", "list")
                .with_child(Element::new("li").with_text("3"))
                .with_child(Node::text("loose"))
                .with_child(Element::new("li").with_text("1"))
                .with_child(Element::new("li").with_text("2")),
        ),
        Node::element("footer"),
    ]);

    assert_round_trip(&old, &new);
    assert_round_trip(&new, &old);
}

#[test]
fn test_mutations_target_old_shape() {
    // Every target must resolve against the tree produced by the mutations
    // before it.
    let old = doc(vec![Node::text("a"), Node::element("b"), Node::text("c")]);
    let new = doc(vec![Node::element("x")]);

    let mutations = diff(&old, &new);
    let mut current = old.clone();
    for mutation in &mutations {
        assert!(
            paperclip_vdom::resolve(&current, mutation.target()).is_ok(),
            "unresolvable target for {}",
            mutation
        );
        current = paperclip_diff::patch(&current, mutation).unwrap();
    }
    assert_eq!(current, new);
}

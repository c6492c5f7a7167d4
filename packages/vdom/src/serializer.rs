//! Text rendering of synthetic trees, for logs and the CLI.

use crate::properties::BOOLEAN_ATTRIBUTE;
use crate::stylesheet::{Rule, Stylesheet};
use crate::vdom::{Element, Node, Tree};

/// Render the document's contents as HTML. The root element is the document
/// wrapper and is not itself printed.
pub fn to_html(tree: &Tree) -> String {
    let mut out = String::new();
    write_contents(&tree.root, &mut out);
    out
}

pub fn node_to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

impl Stylesheet {
    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for rule in &self.rules {
            write_rule(rule, 0, &mut css);
        }
        css
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(&text.value, false)),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in element.attributes.iter() {
        out.push(' ');
        out.push_str(name);
        if value != BOOLEAN_ATTRIBUTE {
            out.push_str(&format!("=\"{}\"", escape(value, true)));
        }
    }
    out.push('>');
    write_contents(element, out);
    out.push_str(&format!("</{}>", element.tag));
}

fn write_contents(element: &Element, out: &mut String) {
    if let Some(sheet) = element.stylesheet.as_deref().filter(|s| !s.is_empty()) {
        out.push_str("<style>");
        out.push_str(&sheet.to_css());
        out.push_str("</style>");
    }
    for child in &element.children {
        write_node(child, out);
    }
}

fn write_rule(rule: &Rule, depth: usize, css: &mut String) {
    let indent = "  ".repeat(depth);
    match rule {
        Rule::Style(style) => {
            write_block(&indent, &style.selector, style.declarations.iter(), css);
        }
        Rule::KeyframeStep(step) => {
            write_block(&indent, &step.offset, step.declarations.iter(), css);
        }
        Rule::Condition(condition) => {
            css.push_str(&format!(
                "{}{} {} {{\n",
                indent, condition.kind, condition.condition
            ));
            for nested in &condition.rules {
                write_rule(nested, depth + 1, css);
            }
            css.push_str(&format!("{}}}\n", indent));
        }
    }
}

fn write_block<'a>(
    indent: &str,
    header: &str,
    declarations: impl Iterator<Item = (&'a str, &'a str)>,
    css: &mut String,
) {
    css.push_str(&format!("{}{} {{\n", indent, header));
    for (name, value) in declarations {
        css.push_str(&format!("{}  {}: {};\n", indent, name, value));
    }
    css.push_str(&format!("{}}}\n", indent));
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

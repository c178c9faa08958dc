//! Graphviz DOT text helpers shared by both graph strategies.

use std::sync::OnceLock;

use regex::Regex;

/// Attribute list in first-insertion order; setting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrList(Vec<(String, String)>);

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn merge(&mut self, other: &AttrList) {
        for (key, value) in &other.0 {
            self.set(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE_REGEX.get_or_init(|| {
        Regex::new(r#"(\w+)=(?:"([^"]*)"|([^\s,]+))"#).expect("Invalid attribute regex")
    })
}

fn non_word_regex() -> &'static Regex {
    static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"[^0-9A-Za-z_]").expect("Invalid non-word regex"))
}

/// Parses `key=value key2="quoted value"` pairs. Text that is not a pair
/// is ignored.
pub fn parse_attributes(text: &str) -> AttrList {
    let mut attrs = AttrList::new();
    for caps in attribute_regex().captures_iter(text.trim()) {
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        attrs.set(&caps[1], value);
    }
    attrs
}

/// Renders one attribute: `<...>` values as HTML labels, values with
/// anything but word characters quoted, the rest bare.
pub fn format_attribute(key: &str, value: &str) -> String {
    if value.len() > 2 && value.starts_with('<') && value.ends_with('>') {
        format!("{key}=<{value}>")
    } else if non_word_regex().is_match(value) {
        format!("{key}=\"{value}\"")
    } else {
        format!("{key}={value}")
    }
}

/// Merges the lists (later ones win) and renders them space separated,
/// sorted by key ignoring case.
pub fn format_attributes(lists: &[&AttrList]) -> String {
    let mut merged = AttrList::new();
    for list in lists {
        merged.merge(list);
    }
    let mut pairs: Vec<_> = merged.iter().collect();
    pairs.sort_by_key(|(key, _)| key.to_lowercase());
    pairs
        .into_iter()
        .map(|(key, value)| format_attribute(key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A double-quoted DOT identifier.
pub fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\\\""))
}

/// One statement line inside the graph body.
pub fn statement(content: &str) -> String {
    format!("\t{content};\n")
}

pub fn node_statement(name: &str, attrs: &str) -> String {
    statement(&with_attributes(quote(name), attrs))
}

pub fn edge_statement(from: &str, to: &str, attrs: &str) -> String {
    statement(&with_attributes(
        format!("{} -> {}", quote(from), quote(to)),
        attrs,
    ))
}

fn with_attributes(target: String, attrs: &str) -> String {
    if attrs.is_empty() {
        target
    } else {
        format!("{target} [{attrs}]")
    }
}

pub fn open_graph(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("digraph {} {{\n", quote(name)),
        None => "digraph G {\n".to_string(),
    }
}

pub const CLOSE_GRAPH: &str = "}\n";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn parse_keeps_first_position_and_last_value() {
        let attrs = parse_attributes(r#" a=1 b="two words", a=3 junk "#);
        assert_eq!(
            attrs.iter().collect::<Vec<_>>(),
            vec![("a", "3"), ("b", "two words")]
        );
    }

    #[rstest]
    #[case::bare("style", "dashed", "style=dashed")]
    #[case::quoted_colour("color", "#FF0000", "color=\"#FF0000\"")]
    #[case::quoted_space("size", "1, 1", "size=\"1, 1\"")]
    #[case::html_label("label", "<<B>x</B>>", "label=<<<B>x</B>>>")]
    #[case::short_angle("label", "<>", "label=\"<>\"")]
    fn formats_single_attribute(#[case] key: &str, #[case] value: &str, #[case] expected: &str) {
        assert_eq!(format_attribute(key, value), expected);
    }

    #[test]
    fn format_sorts_case_insensitively_and_merges() {
        let mut base = AttrList::new();
        base.set("URL", "#h1");
        base.set("color", "#000000");
        let mut over = AttrList::new();
        over.set("color", "#FFFFFF");
        over.set("arrowhead", "vee");
        assert_eq!(
            format_attributes(&[&base, &over]),
            r##"arrowhead=vee color="#FFFFFF" URL="#h1""##
        );
    }

    #[test]
    fn statements() {
        assert_eq!(node_statement("A \"B\"", ""), "\t\"A \\\"B\\\"\";\n");
        assert_eq!(
            edge_statement("A", "B", "style=dashed"),
            "\t\"A\" -> \"B\" [style=dashed];\n"
        );
        assert_eq!(open_graph(Some("Graph")), "digraph \"Graph\" {\n");
        assert_eq!(open_graph(None), "digraph G {\n");
    }
}

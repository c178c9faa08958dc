//! Graph described by `@` directives inside HTML comments.
//!
//! ```text
//! <!-- @graph Overview: rankdir=LR -->
//! # Parser
//! <!-- @node <component>: color=blue -->
//! <!-- @edge -> Scanner <uses> -->
//! ```
//!
//! Graph, node-default and edge-default statements are written as soon as
//! the graph header is out (they are buffered until then). Nodes and edges
//! are held back until the end, since tag filtering of a node depends on
//! whether any edge refers to it.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::warn;
use regex::Regex;

use crate::graph::dot::{
    self, AttrList, CLOSE_GRAPH, edge_statement, format_attribute, format_attributes,
    node_statement, parse_attributes,
};
use crate::graph::{ExtractOptions, GraphStrategy};
use crate::parsing::{Headline, StructuralEvent};

fn command_regex() -> &'static Regex {
    static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r"^\s*@(\S+)((?:\s+#\S+)+)?(?:\s+(.*?)\s*)?$").expect("Invalid command regex")
    })
}

fn attributes_regex() -> &'static Regex {
    static ATTRIBUTES_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTES_REGEX.get_or_init(|| {
        Regex::new(r#"^\s*\w+=(?:"[^"]*"|\S+)"#).expect("Invalid attributes regex")
    })
}

fn name_regex() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    NAME_REGEX.get_or_init(|| {
        Regex::new(r"^(?:([^:<=]*?)\s*)?(?::\s*(.*?)\s*)?$").expect("Invalid name regex")
    })
}

fn name_type_regex() -> &'static Regex {
    static NAME_TYPE_REGEX: OnceLock<Regex> = OnceLock::new();
    NAME_TYPE_REGEX.get_or_init(|| {
        Regex::new(r"^(?:([^:<=]*?)\s*)?(?:<([^>]+)>\s*)?(?::\s*(.*?)\s*)?$")
            .expect("Invalid name/type regex")
    })
}

fn edge_regex() -> &'static Regex {
    static EDGE_REGEX: OnceLock<Regex> = OnceLock::new();
    EDGE_REGEX.get_or_init(|| {
        Regex::new(r"^(?:(.*?)\s*)?(->|<-)\s*([^:<=]*?)\s*(?:<([^>]+)>\s*)?(?::\s*(.*?)\s*)?$")
            .expect("Invalid edge regex")
    })
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"#(\S+)").expect("Invalid tag regex"))
}

/// A parsed `@command [#tag ...] [text]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub command: Command,
    pub tags: Vec<String>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tags,
    Graph,
    GraphAttributes,
    NodeAttributes,
    EdgeAttributes,
    NodeType,
    EdgeType,
    Node,
    Edge,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "t" | "tags" => Command::Tags,
            "g" | "graph" => Command::Graph,
            "ga" | "graph-attributes" => Command::GraphAttributes,
            "na" | "node-attributes" => Command::NodeAttributes,
            "ea" | "edge-attributes" => Command::EdgeAttributes,
            "nt" | "node-type" => Command::NodeType,
            "et" | "edge-type" => Command::EdgeType,
            "n" | "node" => Command::Node,
            "e" | "edge" => Command::Edge,
            _ => return None,
        })
    }
}

impl Directive {
    /// Parses comment text; `None` when it is not a known directive.
    pub fn parse(comment: &str) -> Option<Self> {
        let caps = command_regex().captures(comment.trim())?;
        let command = Command::from_name(&caps[1])?;
        Some(Self {
            command,
            tags: caps.get(2).map(|m| parse_tags(m.as_str())).unwrap_or_default(),
            text: caps.get(3).map_or("", |m| m.as_str()).to_string(),
        })
    }
}

fn parse_tags(text: &str) -> Vec<String> {
    tag_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn group<'t>(caps: &regex::Captures<'t>, i: usize) -> Option<&'t str> {
    caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

#[derive(Debug)]
struct StoredNode {
    name: String,
    tags: Vec<String>,
    attrs: String,
}

#[derive(Debug)]
struct StoredEdge {
    from: String,
    to: String,
    attrs: String,
}

#[derive(Debug)]
pub struct Dotex<'o> {
    opts: &'o ExtractOptions,
    graph_open: bool,
    last_headline: Option<Headline>,
    current_tags: Vec<String>,
    node_types: HashMap<String, AttrList>,
    edge_types: HashMap<String, AttrList>,
    /// Statements written before the graph header.
    pending: Vec<String>,
    nodes: Vec<StoredNode>,
    edges: Vec<StoredEdge>,
}

impl<'o> Dotex<'o> {
    pub fn new(opts: &'o ExtractOptions) -> Self {
        Self {
            opts,
            graph_open: false,
            last_headline: None,
            current_tags: Vec::new(),
            node_types: HashMap::new(),
            edge_types: HashMap::new(),
            pending: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn matches_groups(&self, tags: &[String]) -> bool {
        tags.is_empty() || tags.iter().any(|t| self.opts.groups.contains(t))
    }

    fn push(&mut self, content: String, out: &mut String) {
        if self.graph_open {
            out.push_str(&dot::statement(&content));
        } else {
            self.pending.push(content);
        }
    }

    fn open_graph(&mut self, name: Option<&str>, out: &mut String) {
        out.push_str(&dot::open_graph(name));
        self.graph_open = true;
        for content in self.pending.drain(..) {
            out.push_str(&dot::statement(&content));
        }
    }

    fn directive(&mut self, d: Directive, source: &str, out: &mut String) {
        if d.command == Command::Tags {
            self.current_tags = d.tags;
            return;
        }

        let mut tags = self.current_tags.clone();
        tags.extend(d.tags);
        // Nodes are kept regardless, an edge may still pull them in.
        if d.command != Command::Node && !self.matches_groups(&tags) {
            return;
        }

        let text = d.text.as_str();
        match d.command {
            Command::Tags => {}
            Command::Graph => self.graph(text, source, out),
            Command::GraphAttributes => {
                for (key, value) in parse_attributes(text).iter() {
                    self.push(format_attribute(key, value), out);
                }
            }
            Command::NodeAttributes => {
                let attrs = format_attributes(&[&parse_attributes(text)]);
                self.push(format!("node [{attrs}]"), out);
            }
            Command::EdgeAttributes => {
                let attrs = format_attributes(&[&parse_attributes(text)]);
                self.push(format!("edge [{attrs}]"), out);
            }
            Command::NodeType => define_type(&mut self.node_types, text),
            Command::EdgeType => define_type(&mut self.edge_types, text),
            Command::Node => self.node(text, tags, source),
            Command::Edge => self.edge(text, source),
        }
    }

    fn graph(&mut self, text: &str, source: &str, out: &mut String) {
        if self.graph_open {
            warn!("Graph already started, ignoring: {source}");
            return;
        }
        if attributes_regex().is_match(text) {
            self.open_graph(None, out);
            for (key, value) in parse_attributes(text).iter() {
                self.push(format_attribute(key, value), out);
            }
            return;
        }
        let Some(caps) = name_regex().captures(text) else {
            warn!("Malformed graph directive: {source}");
            return;
        };
        self.open_graph(group(&caps, 1), out);
        if let Some(attrs) = group(&caps, 2) {
            for (key, value) in parse_attributes(attrs).iter() {
                self.push(format_attribute(key, value), out);
            }
        }
    }

    /// `URL` pointing at the last headline, unless disabled or already set.
    fn add_headline_url(&self, name: &str, attrs: &mut AttrList) {
        if self.opts.no_auto_refs || attrs.get("URL").is_some() {
            return;
        }
        if let Some(h) = self.last_headline.as_ref().filter(|h| h.text == name) {
            attrs.set("URL", format!("{}#{}", self.opts.ref_prefix, h.anchor));
        }
    }

    fn node(&mut self, text: &str, tags: Vec<String>, source: &str) {
        let (name, type_attrs, mut attrs) = if attributes_regex().is_match(text) {
            (None, None, parse_attributes(text))
        } else if let Some(caps) = name_type_regex().captures(text) {
            (
                group(&caps, 1).map(str::to_string),
                group(&caps, 2).and_then(|t| self.node_types.get(t)).cloned(),
                parse_attributes(group(&caps, 3).unwrap_or("")),
            )
        } else {
            warn!("Malformed node directive: {source}");
            return;
        };

        let Some(name) = name.or_else(|| self.last_headline.as_ref().map(|h| h.text.clone()))
        else {
            warn!("No node name given in: {source}");
            return;
        };
        self.add_headline_url(&name, &mut attrs);

        let attrs = format_attributes(&[&type_attrs.unwrap_or_default(), &attrs]);
        self.nodes.push(StoredNode { name, tags, attrs });
    }

    fn edge(&mut self, text: &str, source: &str) {
        let Some(caps) = edge_regex().captures(text) else {
            warn!("Malformed edge directive: {source}");
            return;
        };
        let Some(here) = group(&caps, 1)
            .map(str::to_string)
            .or_else(|| self.last_headline.as_ref().map(|h| h.text.clone()))
        else {
            warn!("No source node name given in: {source}");
            return;
        };
        let there = caps.get(3).map_or("", |m| m.as_str()).to_string();
        let (from, to) = if &caps[2] == "->" {
            (here, there)
        } else {
            (there, here)
        };

        let type_attrs = group(&caps, 4)
            .and_then(|t| self.edge_types.get(t))
            .cloned()
            .unwrap_or_default();
        let attrs = parse_attributes(group(&caps, 5).unwrap_or(""));
        let attrs = format_attributes(&[&type_attrs, &attrs]);
        self.edges.push(StoredEdge { from, to, attrs });
    }

    fn finish(&mut self, out: &mut String) {
        if !self.graph_open {
            self.open_graph(None, out);
        }
        for node in &self.nodes {
            let referenced = self
                .edges
                .iter()
                .any(|e| e.from == node.name || e.to == node.name);
            if self.matches_groups(&node.tags) || referenced {
                out.push_str(&node_statement(&node.name, &node.attrs));
            }
        }
        for edge in &self.edges {
            out.push_str(&edge_statement(&edge.from, &edge.to, &edge.attrs));
        }
        out.push_str(CLOSE_GRAPH);
    }
}

/// `Name: key=value ...` adds to (or creates) the named attribute set.
fn define_type(types: &mut HashMap<String, AttrList>, text: &str) {
    let Some(caps) = name_regex().captures(text) else {
        return;
    };
    let (Some(name), Some(attrs)) = (caps.get(1), group(&caps, 2)) else {
        return;
    };
    types
        .entry(name.as_str().to_string())
        .or_default()
        .merge(&parse_attributes(attrs));
}

impl GraphStrategy for Dotex<'_> {
    fn handle(&mut self, event: &StructuralEvent, out: &mut String) {
        match event {
            StructuralEvent::Headline(h) => self.last_headline = Some(h.clone()),
            StructuralEvent::EndComment { .. } => self.current_tags.clear(),
            StructuralEvent::Comment { text, .. } => {
                if let Some(directive) = Directive::parse(text) {
                    self.directive(directive, text.trim(), out);
                }
            }
            StructuralEvent::End => self.finish(out),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::extract_str;
    use pretty_assertions::assert_eq;

    fn dotex(doc: &str) -> String {
        dotex_with(doc, ExtractOptions::dotex())
    }

    fn dotex_with(doc: &str, opts: ExtractOptions) -> String {
        extract_str(doc, &opts).unwrap()
    }

    #[test]
    fn parse_directive() {
        assert_eq!(
            Directive::parse("  @node #a #b Name <T>: x=1 "),
            Some(Directive {
                command: Command::Node,
                tags: vec!["a".into(), "b".into()],
                text: "Name <T>: x=1".into(),
            })
        );
        assert_eq!(Directive::parse("@unknown x"), None);
        assert_eq!(Directive::parse("plain comment"), None);
    }

    #[test]
    fn empty_named_graph() {
        assert_eq!(dotex("<!-- @g Graph -->"), "digraph \"Graph\" {\n}\n");
    }

    #[test]
    fn graph_attributes_without_name() {
        assert_eq!(
            dotex(r#"<!-- @g size="1, 1" -->"#),
            "digraph G {\n\tsize=\"1, 1\";\n}\n"
        );
    }

    #[test]
    fn named_graph_with_attributes() {
        assert_eq!(
            dotex(r#"<!-- @g Graph: size="1, 1" fontname=Helvetica -->"#),
            "digraph \"Graph\" {\n\tsize=\"1, 1\";\n\tfontname=Helvetica;\n}\n"
        );
    }

    #[test]
    fn node_attributes_and_types() {
        let doc = concat!(
            r##"<!-- @na fillcolor="#000000" color="#FF0000" -->"##,
            r##"<!-- @nt type1: color="#FFFFFF" -->"##,
            "<!-- @n abc <type1>: style=box -->",
        );
        assert_eq!(
            dotex(doc),
            "digraph G {\n\
             \tnode [color=\"#FF0000\" fillcolor=\"#000000\"];\n\
             \t\"abc\" [color=\"#FFFFFF\" style=box];\n\
             }\n"
        );
    }

    #[test]
    fn edge_attributes_and_types() {
        let doc = concat!(
            r##"<!-- @ea color="#FF0000" style=dashed -->"##,
            r##"<!-- @et type1: color="#FFFFFF" -->"##,
            r#"<!-- @e A -> B <type1>: arrowhead="vee" -->"#,
        );
        assert_eq!(
            dotex(doc),
            "digraph G {\n\
             \tedge [color=\"#FF0000\" style=dashed];\n\
             \t\"A\" -> \"B\" [arrowhead=vee color=\"#FFFFFF\"];\n\
             }\n"
        );
    }

    #[test]
    fn context_node_and_edges() {
        assert_eq!(
            dotex("# H1\n<!-- @node -->"),
            "digraph G {\n\t\"H1\" [URL=\"#h1\"];\n}\n"
        );
        assert_eq!(
            dotex("# H1\n<!-- @e -> H2 -->\n<!-- @e <- H0 -->"),
            "digraph G {\n\t\"H1\" -> \"H2\";\n\t\"H0\" -> \"H1\";\n}\n"
        );
    }

    #[test]
    fn node_url_respects_prefix_and_switch() {
        let doc = "# Sub Head\n<!-- @n color=red -->\n<!-- @n Sub Head -->";
        let mut opts = ExtractOptions::dotex();
        opts.ref_prefix = "doc.html".into();
        assert_eq!(
            dotex_with(doc, opts.clone()),
            "digraph G {\n\
             \t\"Sub Head\" [color=red URL=\"doc.html#sub-head\"];\n\
             \t\"Sub Head\" [URL=\"doc.html#sub-head\"];\n\
             }\n"
        );

        opts.no_auto_refs = true;
        assert_eq!(
            dotex_with(doc, opts),
            "digraph G {\n\t\"Sub Head\" [color=red];\n\t\"Sub Head\";\n}\n"
        );
    }

    #[test]
    fn context_directives_without_headline_are_skipped() {
        assert_eq!(
            dotex("<!-- @node -->\n<!-- @e -> X -->"),
            "digraph G {\n}\n"
        );
    }

    #[test]
    fn statements_before_graph_are_buffered() {
        let doc = "<!-- @ga rankdir=LR -->\n<!-- @g Late -->\n<!-- @ga center=true -->";
        assert_eq!(
            dotex(doc),
            "digraph \"Late\" {\n\trankdir=LR;\n\tcenter=true;\n}\n"
        );
    }

    #[test]
    fn second_graph_directive_is_ignored() {
        assert_eq!(
            dotex("<!-- @g One -->\n<!-- @g Two -->"),
            "digraph \"One\" {\n}\n"
        );
    }

    const TAGGED: &str = "\
# H0
<!-- @node -->
# H01
<!--
@t #b
@node
-->
# H1
<!--
@node
@edge -> H0
@edge #b -> H01
-->
# SH11
<!--
@tags #alpha
@node
@edge -> H1
-->
";

    #[test]
    fn untagged_directives_only_by_default() {
        assert_eq!(
            dotex(TAGGED),
            "digraph G {\n\
             \t\"H0\" [URL=\"#h0\"];\n\
             \t\"H1\" [URL=\"#h1\"];\n\
             \t\"H1\" -> \"H0\";\n\
             }\n"
        );
    }

    #[test]
    fn groups_select_tagged_directives() {
        let mut opts = ExtractOptions::dotex();
        opts.groups = vec!["alpha".into(), "b".into()];
        assert_eq!(
            dotex_with(TAGGED, opts),
            "digraph G {\n\
             \t\"H0\" [URL=\"#h0\"];\n\
             \t\"H01\" [URL=\"#h01\"];\n\
             \t\"H1\" [URL=\"#h1\"];\n\
             \t\"SH11\" [URL=\"#sh11\"];\n\
             \t\"H1\" -> \"H0\";\n\
             \t\"H1\" -> \"H01\";\n\
             \t\"SH11\" -> \"H1\";\n\
             }\n"
        );
    }

    #[test]
    fn tagged_node_appears_when_an_edge_needs_it() {
        let mut opts = ExtractOptions::dotex();
        opts.groups = vec!["alpha".into()];
        let out = dotex_with(TAGGED, opts);
        assert!(!out.contains("\"H01\""));
        assert!(out.contains("\t\"SH11\" -> \"H1\";\n"));
    }
}

//! Graph inferred from headlines and the internal links beneath them.

use std::collections::HashSet;

use crate::graph::dot::{self, CLOSE_GRAPH, edge_statement, format_attribute, quote, statement};
use crate::graph::{ExtractOptions, GraphStrategy};
use crate::parsing::{Headline, StructuralEvent};

#[derive(Debug)]
struct Node {
    label: String,
    skip: bool,
    statement: String,
}

#[derive(Debug)]
struct Edge {
    from: String,
    to: String,
}

/// Collects headlines and links, then emits the whole graph at `End`.
#[derive(Debug)]
pub struct Autograph<'o> {
    opts: &'o ExtractOptions,
    current: Option<String>,
    references: HashSet<String>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl<'o> Autograph<'o> {
    pub fn new(opts: &'o ExtractOptions) -> Self {
        Self {
            opts,
            current: None,
            references: HashSet::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    fn headline(&mut self, h: &Headline) {
        let levels = &self.opts.autograph.levels;
        let skip = !levels.is_empty() && !levels.contains(&h.level);

        let mut attrs = Vec::new();
        if self.opts.autograph.level_format {
            match h.level {
                1 => attrs.push(format!("label=<<B>{}</B>>", h.text)),
                2 => attrs.push(format!("label=<<I>{}</I>>", h.text)),
                _ => {}
            }
        }
        if !self.opts.no_auto_refs {
            attrs.push(format_attribute(
                "URL",
                &format!("{}#{}", self.opts.ref_prefix, h.anchor),
            ));
        }
        let body = if attrs.is_empty() {
            quote(&h.text)
        } else {
            format!("{} [{}]", quote(&h.text), attrs.join(", "))
        };

        self.current = (!skip).then(|| h.text.clone());
        self.nodes.push(Node {
            label: h.text.clone(),
            skip,
            statement: statement(&body),
        });
    }

    fn render(&self) -> String {
        let defined: HashSet<&str> = self.nodes.iter().map(|n| n.label.as_str()).collect();
        let selected: HashSet<&str> = self
            .nodes
            .iter()
            .filter(|n| !n.skip)
            .map(|n| n.label.as_str())
            .collect();
        let auto = &self.opts.autograph;

        let edges: Vec<&Edge> = self
            .edges
            .iter()
            .filter(|e| !self.references.contains(&e.to))
            .filter(|e| {
                auto.implicit_nodes
                    || (!auto.level_strict && defined.contains(e.to.as_str()))
                    || selected.contains(e.to.as_str())
            })
            .collect();
        let used: HashSet<&str> = edges
            .iter()
            .flat_map(|e| [e.from.as_str(), e.to.as_str()])
            .collect();

        let mut out = dot::open_graph(None);
        let mut emitted = HashSet::new();
        for node in &self.nodes {
            let wanted = !node.skip && (used.contains(node.label.as_str()) || auto.isolated_nodes);
            if !wanted || !emitted.insert(node.label.as_str()) {
                continue;
            }
            out.push_str(&node.statement);
            for edge in edges.iter().filter(|e| e.from == node.label) {
                out.push_str(&edge_statement(&edge.from, &edge.to, ""));
            }
        }
        out.push_str(CLOSE_GRAPH);
        out
    }
}

impl GraphStrategy for Autograph<'_> {
    fn handle(&mut self, event: &StructuralEvent, out: &mut String) {
        match event {
            StructuralEvent::Headline(h) => self.headline(h),
            StructuralEvent::InternalLink { target_text, .. } => {
                if let Some(from) = &self.current {
                    self.edges.push(Edge {
                        from: from.clone(),
                        to: target_text.clone(),
                    });
                }
            }
            StructuralEvent::Reference { label, .. } => {
                self.references.insert(label.clone());
            }
            StructuralEvent::End => out.push_str(&self.render()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AutographOptions, extract_str};
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
# 1 Hädline

See [Subßection A] and [Subsection B][].

# 2 Headline

## Subßection A

Back to [2 Headline].

## Subsection B

Up to [1 Hädline], out to [Elsewhere] and [home].

[home]: http://example.com
";

    fn run(opts: ExtractOptions) -> String {
        extract_str(DOC, &opts).unwrap()
    }

    #[test]
    fn all_levels_without_refs() {
        let out = run(ExtractOptions {
            no_auto_refs: true,
            ..Default::default()
        });
        assert_eq!(
            out,
            "digraph G {\n\
             \t\"1 Hädline\";\n\
             \t\"1 Hädline\" -> \"Subßection A\";\n\
             \t\"1 Hädline\" -> \"Subsection B\";\n\
             \t\"2 Headline\";\n\
             \t\"Subßection A\";\n\
             \t\"Subßection A\" -> \"2 Headline\";\n\
             \t\"Subsection B\";\n\
             \t\"Subsection B\" -> \"1 Hädline\";\n\
             }\n"
        );
    }

    #[test]
    fn selected_level_with_ref_prefix() {
        let out = run(ExtractOptions {
            ref_prefix: "target.html".into(),
            autograph: AutographOptions {
                levels: vec![2],
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            out,
            "digraph G {\n\
             \t\"Subßection A\" [URL=\"target.html#subßection-a\"];\n\
             \t\"Subßection A\" -> \"2 Headline\";\n\
             \t\"Subsection B\" [URL=\"target.html#subsection-b\"];\n\
             \t\"Subsection B\" -> \"1 Hädline\";\n\
             }\n"
        );
    }

    #[test]
    fn strict_level_drops_edges_leaving_the_level() {
        let out = run(ExtractOptions {
            no_auto_refs: true,
            autograph: AutographOptions {
                levels: vec![2],
                level_strict: true,
                isolated_nodes: true,
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(
            out,
            "digraph G {\n\t\"Subßection A\";\n\t\"Subsection B\";\n}\n"
        );
    }

    #[test]
    fn implicit_nodes_keep_unknown_targets() {
        let out = run(ExtractOptions {
            no_auto_refs: true,
            autograph: AutographOptions {
                implicit_nodes: true,
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(out.contains("\t\"Subsection B\" -> \"Elsewhere\";\n"));
        assert!(!out.contains("\"home\""));
    }

    #[test]
    fn level_format_labels() {
        let out = extract_str(
            "# Top\n[Mid]\n## Mid\n",
            &ExtractOptions {
                no_auto_refs: true,
                autograph: AutographOptions {
                    level_format: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            out,
            "digraph G {\n\
             \t\"Top\" [label=<<B>Top</B>>];\n\
             \t\"Top\" -> \"Mid\";\n\
             \t\"Mid\" [label=<<I>Mid</I>>];\n\
             }\n"
        );
    }

    #[test]
    fn empty_document() {
        assert_eq!(run_empty(), "digraph G {\n}\n");
    }

    fn run_empty() -> String {
        extract_str("", &ExtractOptions::default()).unwrap()
    }
}

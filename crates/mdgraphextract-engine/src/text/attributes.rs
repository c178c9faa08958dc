use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Attributes from a trailing `{#id .class key=value}` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    pub id: Option<String>,
    /// Class names in order of appearance, duplicates kept.
    pub classes: Vec<String>,
    pub pairs: BTreeMap<String, String>,
}

impl Attributes {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.classes.is_empty() && self.pairs.is_empty()
    }
}

fn block_regex() -> &'static Regex {
    static BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    BLOCK_REGEX.get_or_init(|| Regex::new(r"\{([^}]*)\}\s*$").expect("Invalid attribute block regex"))
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r#"(?:^|\s)(?:#([^\s"]+)|\.([^\s"]+)|([\w\-]+)=(?:"([^"]*)"|([^\s"]+)))"#)
            .expect("Invalid attribute token regex")
    })
}

/// Parses the optional attribute block at the end of a headline.
///
/// Tokens that are not an id, a class or a key/value pair are ignored. When
/// an id or key appears more than once the last occurrence wins.
pub fn get_attributes(text: &str) -> Attributes {
    let mut attributes = Attributes::default();
    let Some(block) = block_regex().captures(text) else {
        return attributes;
    };

    for caps in token_regex().captures_iter(&block[1]) {
        if let Some(id) = caps.get(1) {
            attributes.id = Some(id.as_str().to_string());
        } else if let Some(class) = caps.get(2) {
            attributes.classes.push(class.as_str().to_string());
        } else if let Some(key) = caps.get(3) {
            let value = caps.get(4).or_else(|| caps.get(5)).map_or("", |m| m.as_str());
            attributes
                .pairs
                .insert(key.as_str().to_string(), value.to_string());
        }
    }
    attributes
}

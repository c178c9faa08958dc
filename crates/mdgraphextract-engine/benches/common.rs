// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with a [Title] link and <http://example.com>.\n\n> A quote\n\n<!-- a comment\nspanning lines -->\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_linked_sections(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str(&format!(
            "See [Section {}] and [Section {}][].\n\n",
            (section + 1) % sections,
            (section + 7) % sections
        ));
        content.push_str(&format!(
            "<!-- @node -->\n<!-- @edge -> Section {} -->\n\n",
            (section + 3) % sections
        ));
    }

    content
}

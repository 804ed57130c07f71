use scraper::{Html, Node};

/// Elements whose content is never visible text.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Visible text of an HTML document.
/// - Parses with a browser-grade tokenizer, so stray `<` and every named entity survive
/// - Skips text under `<script>`, `<style>`, `<noscript>` and `<template>`
/// - Joins text nodes as they appear, then collapses whitespace
pub fn html_to_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let document = Html::parse_document(input);
    let mut out = String::with_capacity(input.len());
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            out.push_str(text);
        }
    }

    collapse_whitespace(&out)
}

pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

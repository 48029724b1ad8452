use assert_matches::assert_matches;

use super::*;
use crate::token::{Token, TokenTree};

const SOURCE: &str = "fn main() { let s = \"a)\"; x.y[0] += 1; } // done\n";

fn kinds(tokens: &[Token]) -> Vec<(&str, &str)> {
    tokens.iter().map(|t| (t.kind.as_str(), t.text.as_str())).collect()
}

#[test]
fn test_embedded_settings() {
    let settings = Settings::embedded().unwrap();
    let names: Vec<&str> = settings.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "comment",
            "string",
            "block",
            "group",
            "index",
            "identifier",
            "number",
            "operator",
            "punctuation"
        ]
    );
    assert!(settings.rules[2].compound);
    assert_eq!(
        settings.rules[1].markers[0],
        MarkerSettings::Bounded {
            name: "string".into(),
            start: "\"".into(),
            end: "\"".into(),
            escape: Some('\\'),
        }
    );
}

#[test]
fn test_embedded_tokenizer() {
    let mut tokenizer = Settings::embedded().unwrap().tokenizer().unwrap();
    let tokens = tokenizer.tokenize(SOURCE).unwrap();
    assert_eq!(
        kinds(&tokens),
        vec![
            ("identifier", "fn"),
            ("identifier", "main"),
            ("group", "()"),
            ("identifier", "let"),
            ("identifier", "s"),
            ("punctuation", "="),
            ("string", "\"a)\""),
            ("punctuation", ";"),
            ("identifier", "x.y"),
            ("number", "0"),
            ("index", "[]"),
            ("operator", "+="),
            ("number", "1"),
            ("punctuation", ";"),
            ("block", "{     [   }"),
            ("comment", "// done\n"),
        ]
    );

    let trees = TokenTree::build(tokens);
    let roots: Vec<&str> = trees.iter().map(|t| t.token.kind.as_str()).collect();
    assert_eq!(roots, vec!["identifier", "identifier", "group", "block", "comment"]);
    assert_eq!(trees[3].children.len(), 10);
}

#[test]
fn test_from_source() {
    let settings = Settings::from_source(
        r#"{
            "rules": [
                {
                    "name": "word",
                    "first-chars": "a-z",
                    "markers": [{ "kind": "contains", "name": "word", "first": "a-z", "chars": "a-z0-9" }]
                },
                {
                    "name": "tag",
                    "compound": true,
                    "markers": [{ "kind": "bounded", "name": "tag", "start": "<!", "end": ">" }]
                }
            ]
        }"#,
        FileFormat::Json,
    )
    .unwrap();
    assert_eq!(settings.rules.len(), 2);
    assert_eq!(settings.rules[0].first_chars, Some(CharSet::range('a', 'z')));

    let tokens = settings.tokenizer().unwrap().tokenize("<!a1 b> c").unwrap();
    assert_eq!(kinds(&tokens), vec![("word", "a1"), ("word", "b"), ("tag", "<! >"), ("word", "c")]);
}

#[test]
fn test_load() {
    let path = std::env::temp_dir().join(format!("chartok-settings-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
            [[rules]]
            name = "digits"
            markers = [{ kind = "contains", name = "digits", chars = "0-9" }]
        "#,
    )
    .unwrap();
    let settings = Settings::load(&path);
    std::fs::remove_file(&path).unwrap();

    let settings = settings.unwrap();
    assert_eq!(settings.rules.len(), 1);
    let tokens = settings.tokenizer().unwrap().tokenize("a 42").unwrap();
    assert_eq!(kinds(&tokens), vec![("digits", "42")]);
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("chartok-settings-missing.yaml");
    assert_matches!(Settings::load(path), Err(Error::Config(_)));
}

#[test]
fn test_invalid_settings() {
    let result = Settings::from_source("rules: [{name: x, markers: [{kind: regex, name: x}]}]", FileFormat::Yaml);
    assert_matches!(result, Err(Error::Config(_)));

    let result = Settings::from_source(
        "rules: [{name: x, markers: [{kind: chars, name: x, chars: z-a}]}]",
        FileFormat::Yaml,
    );
    assert_matches!(result, Err(Error::Config(e)) if e.to_string().contains("reversed"));
}

#[test]
fn test_escaped_string_marker() {
    let settings = Settings::from_source(
        "rules: [{name: x, markers: [{kind: bounded, name: raw, start: 'r\"', end: '\"', escape: '\\'}]}]",
        FileFormat::Yaml,
    )
    .unwrap();
    assert_matches!(settings.build_factories(), Err(Error::EscapedStringMarker { name }) if name == "raw");
}

use assert_matches::assert_matches;
use rstest::rstest;
use text_cursor::TextCursor;

use super::*;
use crate::condition::Condition;
use crate::error::Error;

/// Reads a token the way the driver reads simple tokens, returns completion and text.
fn read(factory: &mut Factory, input: &str) -> (bool, String) {
    let mut cond = factory.create();
    let mut cursor = TextCursor::new(input);
    while let Some(ch) = cursor.next_char() {
        if !cond.accept_next(ch, &mut cursor) || cond.is_failed() || cond.is_complete() {
            break;
        }
    }
    let result = (cond.is_complete(), cond.text().to_string());
    factory.release(cond);
    result
}

#[rstest]
#[case("[abcdef] -", "[abcdef]")]
#[case("@[] + 1", "@[]")]
#[case("<tag /> <z/>", "<tag />")]
#[case("{{start}} -", "{{start}}")]
#[case("@[@[a]b]", "@[@[a]")]
fn test_start_end(#[case] input: &str, #[case] expected: &str) {
    let mut factory = FactoryBuilder::new("markers")
        .start_end("[]", '[', ']')
        .start_end("@[]", "@[", ']')
        .start_end("</>", '<', "/>")
        .start_end("{{}}", "{{", "}}")
        .build()
        .unwrap();
    assert!(factory.is_match(input.chars().next().unwrap()));
    assert_eq!(read(&mut factory, input), (true, expected.to_string()));
}

#[rstest]
#[case(r#""a \" b \""#, false, r#""a \" b \""#)]
#[case(r#""" !"#, true, r#""""#)]
#[case("\"a \n\\\"\\\" z\" echo", true, "\"a \n\\\"\\\" z\"")]
fn test_start_end_not_preceded_by(#[case] input: &str, #[case] complete: bool, #[case] expected: &str) {
    let mut factory = FactoryBuilder::new("strings")
        .start_end_not_preceded_by("string", '"', '\\', '"')
        .build()
        .unwrap();
    assert_eq!(read(&mut factory, input), (complete, expected.to_string()));
    assert!(!factory.is_match('a'));
}

#[rstest]
#[case("@start -", "@")]
#[case("start; end;", "start")]
#[case(";", ";")]
#[case("@@", "@")]
fn test_char_literal_and_matcher(#[case] input: &str, #[case] expected: &str) {
    let mut factory = FactoryBuilder::new("chars")
        .char_literal("@;", ['@', ';'])
        .char_matcher("start", ['s', 't', 'a', 'r'])
        .build()
        .unwrap();
    assert_eq!(read(&mut factory, input), (true, expected.to_string()));
}

#[rstest]
#[case("@start -", "@")]
#[case("start; end;", "start")]
#[case("end -", "end")]
fn test_string_literal(#[case] input: &str, #[case] expected: &str) {
    let mut factory = FactoryBuilder::new("strings")
        .string_literal("@", ["@"])
        .string_literal("start", ["start", "end"])
        .build()
        .unwrap();
    assert_eq!(read(&mut factory, input), (true, expected.to_string()));
}

#[test]
fn test_identifier() {
    let mut factory = FactoryBuilder::new("path")
        .identifier("path", CharSet::range('a', 'z'), CharSet::range('a', 'z').with_range('0', '9'), ':')
        .build()
        .unwrap();
    assert_eq!(read(&mut factory, "std:io2 x"), (true, "std:io2".to_string()));
}

#[test]
fn test_compound_and_first_chars() {
    let factory = FactoryBuilder::new("block")
        .compound(true)
        .first_chars(['[', '('])
        .condition(CharCondition::literal("open", '['))
        .build()
        .unwrap();
    assert!(factory.is_compound());
    assert!(factory.is_match('('));
}

#[test]
fn test_errors_are_reported_on_build() {
    let result = FactoryBuilder::new("bad").char_literal("ok", '!').start_end("empty", "", '"').build();
    assert_matches!(result, Err(Error::EmptyCandidates { name }) if name == "empty-start");

    let result = FactoryBuilder::new("none").build();
    assert_matches!(result, Err(Error::EmptyFactory { .. }));
}

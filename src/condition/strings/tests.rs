use assert_matches::assert_matches;
use rstest::rstest;

use super::*;
use crate::condition::Cond;
use crate::condition::testing::check;

fn terminators() -> StringCondition {
    StringCondition::end("close", ["-->", "\"\"", "!#"]).unwrap()
}

#[rstest]
#[case("==", true, false, "==")]
#[case("!=", true, false, "!=")]
#[case("=", false, false, "=")]
#[case("=!", false, true, "=")]
#[case("===", false, true, "==")]
#[case("<", false, true, "")]
fn test_literal(#[case] input: &str, #[case] complete: bool, #[case] failed: bool, #[case] text: &str) {
    let mut cond = Cond::Str(StringCondition::literal("op", ["==", "!="]).unwrap());
    let outcome = check(&mut cond, input);
    assert_eq!((outcome.complete, outcome.failed, outcome.text.as_str()), (complete, failed, text));
}

#[test]
fn test_start_completes_on_shortest_candidate() {
    let mut cond = Cond::Str(StringCondition::start("op", ["<", "<="]).unwrap());
    let outcome = check(&mut cond, "<");
    assert!(outcome.complete);
    assert_eq!(outcome.range, Some((0, 0)));
    let outcome = check(&mut cond, "<=");
    assert!(outcome.failed);
    assert!(!outcome.complete);
}

#[rstest]
#[case("<", true, false, Some((0, 0)))]
#[case("<=", true, false, Some((0, 1)))]
#[case("<<", false, false, None)]
#[case("<<=", true, false, Some((0, 2)))]
#[case("<=>", false, true, None)]
fn test_literal_continues_to_longer_candidate(
    #[case] input: &str,
    #[case] complete: bool,
    #[case] failed: bool,
    #[case] range: Option<(usize, usize)>,
) {
    let mut cond = Cond::Str(StringCondition::literal("op", ["<", "<=", "<<="]).unwrap());
    let outcome = check(&mut cond, input);
    assert_eq!((outcome.complete, outcome.failed), (complete, failed));
    if complete {
        assert_eq!(outcome.range, range);
    }
}

#[rstest]
#[case("<!-- comment --->", "-->", (14, 16))]
#[case("!!#", "!#", (1, 2))]
#[case("x-y-->", "-->", (3, 5))]
#[case("--!#", "!#", (2, 3))]
#[case("abc\"\"", "\"\"", (3, 4))]
#[case("!#-->", "-->", (2, 4))]
fn test_end(#[case] input: &str, #[case] text: &str, #[case] range: (usize, usize)) {
    let mut cond = Cond::Str(terminators());
    let outcome = check(&mut cond, input);
    assert!(outcome.complete, "{input:?} should complete");
    assert_eq!(outcome.text, text);
    assert_eq!(outcome.range, Some(range));
}

#[rstest]
#[case("!#=", "")]
#[case("!#-", "-")]
#[case("abc", "")]
#[case("-- -", "-")]
fn test_end_incomplete(#[case] input: &str, #[case] text: &str) {
    let mut cond = Cond::Str(terminators());
    let outcome = check(&mut cond, input);
    assert!(!outcome.complete);
    assert!(!outcome.failed);
    assert_eq!(outcome.text, text);
}

#[rstest]
#[case("aabc", (1, 3))]
#[case("ababc", (2, 4))]
#[case("abaabc", (3, 5))]
fn test_end_restarts_at_current_char(#[case] input: &str, #[case] range: (usize, usize)) {
    let mut cond = Cond::Str(StringCondition::end("close", ["abc"]).unwrap());
    let outcome = check(&mut cond, input);
    assert!(outcome.complete);
    assert_eq!(outcome.text, "abc");
    assert_eq!(outcome.range, Some(range));
}

#[test]
fn test_end_partial_text() {
    let mut cond = Cond::Str(terminators());
    let outcome = check(&mut cond, "abc--");
    assert_eq!(outcome.text, "--");
    assert!(!outcome.complete);
}

#[test]
fn test_empty_candidates() {
    assert_matches!(
        StringCondition::literal("none", Vec::<&str>::new()),
        Err(Error::EmptyCandidates { name }) if name == "none"
    );
    assert_matches!(StringCondition::end("blank", ["a", ""]), Err(Error::EmptyCandidates { .. }));
}

#[test]
fn test_first_chars() {
    assert_eq!(terminators().first_chars(), Some(CharSet::new(['-', '"', '!'])));
    let candidates: Vec<String> = terminators().candidates().collect();
    assert_eq!(candidates, vec!["-->", "\"\"", "!#"]);
}

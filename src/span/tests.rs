use super::*;

fn span(start: usize, end: usize) -> Span {
    Span::new(Position::new(start, 1, start + 1), Position::new(end, 1, end + 1))
}

#[test]
fn test_len_and_range() {
    let s = span(3, 5);
    assert_eq!(s.len(), 3);
    assert_eq!(s.range(), 3..6);
    assert_eq!(Range::from(span(0, 0)), 0..1);
    assert_eq!(s.to_string(), "1:4-1:6");
}

#[test]
fn test_union() {
    assert_eq!(span(3, 5).union(span(1, 4)), span(1, 5));
    assert_eq!(span(1, 2).union(span(6, 7)), span(1, 7));
    assert_eq!(Span::merge(None, span(2, 2)), span(2, 2));
    assert_eq!(Span::merge(Some(span(0, 1)), span(2, 2)), span(0, 2));
}

#[test]
fn test_contains() {
    assert!(span(0, 6).contains(&span(2, 4)));
    assert!(span(2, 4).contains(&span(2, 4)));
    assert!(!span(2, 4).contains(&span(3, 5)));
}

use super::span::Span;

#[test]
fn zero_width_span_is_empty() {
    let span = Span::at(7);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
    assert!(!span.contains(7));
}

#[test]
fn merge_covers_both_spans() {
    assert_eq!(Span::new(4, 6).merge(Span::new(1, 5)), Span::new(1, 6));
}

#[test]
fn slice_is_total() {
    let text = "int Items";
    assert_eq!(Span::new(4, 9).slice(text), "Items");
    assert_eq!(Span::new(4, 90).slice(text), "");
}

#[test]
fn shift_offsets_both_ends() {
    assert_eq!(Span::new(0, 3).shift(10), Span::new(10, 13));
}

use super::*;

#[test]
fn parses_nested_tuples_in_order() {
    let doc = parse_document("(0, 30, (0, 255, 0)), (10, 5, (1, 2, 3)),").unwrap();
    assert_eq!(doc.entries.len(), 2);
    let first = doc.entries[0].as_tuple().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first[0].as_u64(), Some(0));
    assert_eq!(first[2].as_tuple().unwrap()[1].as_u64(), Some(255));
    assert_eq!(doc.fragment(&doc.entries[1]), "(10, 5, (1, 2, 3))");
}

#[test]
fn tolerates_whitespace_and_stray_commas() {
    let doc = parse_document(" ,\n( 1 ,2, ) ,, (3,4) , ").unwrap();
    assert_eq!(doc.entries.len(), 2);
    assert_eq!(doc.entries[0].as_tuple().unwrap().len(), 2);
}

#[test]
fn non_matching_text_reports_no_events() {
    for src in ["", "   ", "hello", ",,,"] {
        let err = parse_document(src).unwrap_err();
        assert!(err.to_string().contains("no events found"), "{src:?}: {err}");
    }
}

#[test]
fn structural_errors_carry_offsets() {
    let err = parse_document("(0, 1").unwrap_err();
    assert!(matches!(err, MaskError::Parse(_)));
    assert!(err.to_string().contains("byte 5"), "{err}");

    let err = parse_document("(0, 1) junk").unwrap_err();
    assert!(err.to_string().contains("'junk'"), "{err}");
}

#[test]
fn integral_accessor_rejects_fractions() {
    let doc = parse_document("(1.5, 2, name)").unwrap();
    let items = doc.entries[0].as_tuple().unwrap();
    assert_eq!(items[0].as_u64(), None);
    assert_eq!(items[0].as_f64(), Some(1.5));
    assert_eq!(items[2].as_ident(), Some("name"));
    assert!(items[2].as_f64().is_none());
}

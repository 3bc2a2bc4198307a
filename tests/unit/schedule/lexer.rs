use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn numbers_track_integrality() {
    assert_eq!(
        kinds("12 0.5 .25 3. 1e2"),
        vec![
            TokenKind::Number { value: 12.0, integral: true },
            TokenKind::Number { value: 0.5, integral: false },
            TokenKind::Number { value: 0.25, integral: false },
            TokenKind::Number { value: 3.0, integral: false },
            TokenKind::Number { value: 100.0, integral: false },
            TokenKind::Eof,
        ]
    );
}

#[test]
fn idents_keep_dashes_and_underscores() {
    assert_eq!(
        kinds("(ease-in-out, ease_in)"),
        vec![
            TokenKind::LParen,
            TokenKind::Ident("ease-in-out".into()),
            TokenKind::Comma,
            TokenKind::Ident("ease_in".into()),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_cover_source() {
    let toks = lex("  (42)").unwrap();
    assert_eq!(toks[1].span, Span { start: 3, end: 5 });
    assert_eq!(toks.last().unwrap().span, Span { start: 6, end: 6 });
}

#[test]
fn rejects_unknown_characters() {
    let err = lex("(1; 2)").unwrap_err();
    assert_eq!(err.offset, 2);
    assert!(err.message.contains("';'"));
    assert!(lex("(1e)").is_err());
}

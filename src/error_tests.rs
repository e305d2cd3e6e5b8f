use super::*;

fn key(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

#[test]
fn display_all_error_kinds() {
    let cases: Vec<(ErrorKind, &str)> = vec![
        (ErrorKind::InvalidValue, "Invalid value"),
        (ErrorKind::InvalidStatement, "Invalid statement"),
        (
            ErrorKind::InvalidKeyStart,
            "Invalid initial character for a key part",
        ),
        (
            ErrorKind::ExpectedEquals,
            "Expected '=' after a key in a key/value pair",
        ),
        (
            ErrorKind::UnclosedTableHeader,
            "Expected ']' at the end of a table declaration",
        ),
        (
            ErrorKind::UnclosedArrayHeader,
            "Expected ']]' at the end of an array declaration",
        ),
        (ErrorKind::UnclosedArray, "Unclosed array"),
        (ErrorKind::UnclosedInlineTable, "Unclosed inline table"),
        (
            ErrorKind::InvalidCharacter('\n'),
            "Found invalid character '\\n'",
        ),
        (
            ErrorKind::InvalidCharacter('\u{0}'),
            "Found invalid character '\\x00'",
        ),
        (
            ErrorKind::InvalidCharacter('\u{7f}'),
            "Found invalid character '\\x7f'",
        ),
        (ErrorKind::InvalidEscape, "Unescaped '\\' in a string"),
        (ErrorKind::InvalidHexValue, "Invalid hex value"),
        (
            ErrorKind::InvalidScalarValue(0xD800),
            "Escaped character is not a Unicode scalar value",
        ),
        (ErrorKind::UnterminatedString, "Unterminated string"),
        (ErrorKind::InvalidUnderscore, "Invalid underscore in number"),
        (ErrorKind::IntegerOutOfRange, "Integer out of range"),
        (ErrorKind::InvalidDatetime, "Invalid date or datetime"),
        (
            ErrorKind::DuplicateTable { key: key(&["a"]) },
            "Cannot declare a twice",
        ),
        (ErrorKind::OverwriteValue, "Cannot overwrite a value"),
        (
            ErrorKind::RedefineNamespace {
                key: key(&["a", "b"]),
            },
            "Cannot redefine namespace a.b",
        ),
        (
            ErrorKind::ImmutableNamespace {
                key: key(&["tbl", "x"]),
            },
            "Cannot mutate immutable namespace tbl.x",
        ),
        (
            ErrorKind::DuplicateInlineKey { key: "x".into() },
            "Duplicate inline table key x",
        ),
        (
            ErrorKind::NestingTooDeep { limit: 4 },
            "Maximum nesting depth exceeded",
        ),
        (ErrorKind::FileTooLarge, "File is too large"),
    ];

    for (kind, expected) in &cases {
        assert_eq!(kind.to_string(), *expected, "Display mismatch for {kind:?}");
    }
}

#[test]
fn key_paths_quote_non_bare_segments() {
    let cases: Vec<(Vec<String>, &str)> = vec![
        (key(&["a", "b-c", "d_1"]), "a.b-c.d_1"),
        (key(&["a.b"]), "\"a.b\""),
        (key(&[""]), "\"\""),
        (key(&["with space", "x"]), "\"with space\".x"),
        (key(&["q\"uote"]), "\"q\\\"uote\""),
        (key(&["back\\slash"]), "\"back\\\\slash\""),
        (key(&["tab\there"]), "\"tab\\there\""),
        (key(&["\u{e9}t\u{e9}"]), "\"\u{e9}t\u{e9}\""),
    ];
    for (path, expected) in &cases {
        assert_eq!(KeyPath(path).to_string(), *expected);
    }
}

#[test]
fn decode_error_display_with_position() {
    let source = "\n\nval=.";
    let err = DecodeError::new(source, ErrorKind::InvalidValue, Span::new(6, 7));
    assert_eq!(err.to_string(), "Invalid value (at line 3, column 5)");
    assert_eq!(err.position(), Some(Position { line: 3, column: 5 }));
    assert_eq!(err.message(), "Invalid value");
}

#[test]
fn decode_error_display_end_of_document() {
    let source = "\n\nfwfw=";
    let end = source.len() as u32;
    let err = DecodeError::new(source, ErrorKind::InvalidValue, Span::new(end, end));
    assert_eq!(err.to_string(), "Invalid value (at end of document)");
    assert_eq!(err.location, Location::EndOfDocument);
    assert_eq!(err.position(), None);
}

#[test]
fn escaped_character_is_surrounded_by_spaces() {
    let source = "v = '\n'";
    let err = DecodeError::new(
        source,
        ErrorKind::InvalidCharacter('\n'),
        Span::new(5, 6),
    );
    let text = err.to_string();
    assert!(text.contains(" '\\n' "), "{text}");
    assert_eq!(text, "Found invalid character '\\n' (at line 1, column 6)");
}

#[test]
fn debug_shows_code() {
    assert_eq!(format!("{:?}", ErrorKind::InvalidValue), "invalid-value");
    assert_eq!(
        format!("{:?}", ErrorKind::DuplicateTable { key: key(&["a"]) }),
        "duplicate-table"
    );
}

#[test]
fn escape_leaves_printable_characters_alone() {
    assert_eq!(Escape('a').to_string(), "a");
    assert_eq!(Escape('\u{e9}').to_string(), "\u{e9}");
    assert_eq!(Escape('\r').to_string(), "\\r");
    assert_eq!(Escape('\t').to_string(), "\\t");
}

#[test]
fn escape_control_characters_as_hex() {
    assert_eq!(Escape('\n').to_string(), "\\n");
    assert_eq!(Escape('\u{0}').to_string(), "\\x00");
    assert_eq!(Escape('\u{1b}').to_string(), "\\x1b");
    assert_eq!(Escape('\u{7f}').to_string(), "\\x7f");
    assert_eq!(Escape('\u{85}').to_string(), "\\x85");
}

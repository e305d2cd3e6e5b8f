use pretty_assertions::assert_eq;
use std::fs;
use toml_decode::{Decoder, ErrorKind, Table, Value, decode};

#[test]
fn decode_all_data_files() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|e| e == "toml") {
            let src = fs::read_to_string(&path).unwrap();
            let name = path.file_stem().unwrap().to_string_lossy();
            // files prefixed with `bad_` must fail, everything else must decode
            match decode(&src) {
                Ok(_) => assert!(!name.starts_with("bad_"), "{name} decoded"),
                Err(e) => assert!(name.starts_with("bad_"), "{name}: {e}"),
            }
        }
    }
}

#[test]
fn decoding_is_deterministic() {
    for name in ["example", "fruits", "strings"] {
        let src = integ_tests::load(name);
        let first = decode(&src).unwrap();
        let second: Table = src.parse().unwrap();
        assert_eq!(first, second, "{name}");
        assert_eq!(
            first.keys().collect::<Vec<_>>(),
            second.keys().collect::<Vec<_>>(),
            "{name}"
        );
    }
}

#[test]
fn repeated_key_is_rejected() {
    let documents = [
        ("a = 1", "a = 2"),
        ("\"a\" = 1", "a = 2"),
        ("x.y = 1", "x.y = 'two'"),
        ("[t]\nk = 1", "k = [1]"),
        ("[[arr]]\nk = 1", "k = {}"),
    ];
    for (doc, repeat) in documents {
        decode(doc).unwrap();
        let err = decode(&format!("{doc}\n{repeat}")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OverwriteValue, "{doc:?} + {repeat:?}");
        assert_eq!(err.position(), None, "{doc:?} + {repeat:?}");
    }
}

#[test]
fn string_forms() {
    let table = decode(&integ_tests::load("strings")).unwrap();
    let get = |k: &str| table.get(k).and_then(Value::as_str).unwrap();

    assert_eq!(
        get("str1"),
        "I'm a string. \"You can quote me\". Name\tJos\u{e9}\nLocation\tSF."
    );
    assert_eq!(get("str2"), "Roses are red\nViolets are blue");
    assert_eq!(get("str3"), "The quick brown fox jumps over the lazy dog.");
    assert_eq!(get("winpath"), r"C:\Users\nodejs\templates");
    assert_eq!(get("regex"), r"<\i\c*\s*>");
    assert_eq!(get("lines"), "The first newline is\ntrimmed in raw strings.\n");
    assert_eq!(
        get("quot15"),
        r#"Here are fifteen quotation marks: """"""""""""""""#
    );
    assert_eq!(get("apos15"), "Here are fifteen apostrophes: '''''''''''''''");
}

#[test]
fn diagnostics_point_at_the_error() {
    let src = "[server]\nport = 80\nport = 81\n";
    let err = decode(src).unwrap_err();
    let rendered = integ_tests::render("server", src, &err);
    assert!(rendered.contains("error[overwrite-value]: Cannot overwrite a value"), "{rendered}");
    assert!(rendered.contains("server:3:10"), "{rendered}");
}

#[test]
fn custom_depth_limit() {
    let shallow = Decoder::new().max_depth(1);
    shallow.decode("a = [1, 2]\nb = {c = 1}").unwrap();

    let err = shallow.decode("a = [{}]").unwrap_err();
    assert_eq!(err.to_string(), "Maximum nesting depth exceeded (at line 1, column 6)");
}

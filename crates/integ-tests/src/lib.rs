/// Decodes a document and asserts the JSON shape of the resulting tree.
///
/// Without a document the input is loaded from `data/<name>.toml`.
#[macro_export]
macro_rules! valid {
    ($name:ident, @$snap:literal) => {
        #[test]
        fn $name() {
            let toml_str = $crate::load(stringify!($name));
            let table = $crate::decode_or_render(stringify!($name), &toml_str);
            insta::assert_json_snapshot!(table, @$snap);
        }
    };
    ($name:ident, $toml:expr, @$snap:literal) => {
        #[test]
        fn $name() {
            let table = $crate::decode_or_render(stringify!($name), $toml);
            insta::assert_json_snapshot!(table, @$snap);
        }
    };
}

/// Decodes a malformed document and asserts the error message, including its
/// location suffix.
#[macro_export]
macro_rules! invalid {
    ($name:ident, $toml:expr, @$snap:literal) => {
        #[test]
        fn $name() {
            let toml: &str = $toml;
            let error = toml_decode::decode(toml).unwrap_err();
            let rendered = $crate::render(stringify!($name), toml, &error);
            assert!(
                rendered.contains(&error.message()),
                "diagnostic is missing the message:\n{rendered}"
            );
            insta::assert_snapshot!(error.to_string(), @$snap);
        }
    };
}

pub type File<'s> = codespan_reporting::files::SimpleFile<&'static str, &'s str>;

pub fn load(name: &str) -> String {
    let path = format!("{}/data/{name}.toml", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to load {path}: {e}"))
}

/// Decodes `src`, panicking with a rendered diagnostic on failure.
pub fn decode_or_render(name: &'static str, src: &str) -> toml_decode::Table {
    match toml_decode::decode(src) {
        Ok(table) => table,
        Err(error) => panic!("failed to decode {name}:\n{}", render(name, src, &error)),
    }
}

pub fn render(name: &'static str, src: &str, error: &toml_decode::DecodeError) -> String {
    emit_diags(&File::new(name, src), Some(error.to_diagnostic(())))
}

pub fn emit_diags(
    f: &File<'_>,
    diags: impl IntoIterator<Item = codespan_reporting::diagnostic::Diagnostic<()>>,
) -> String {
    let mut output = codespan_reporting::term::termcolor::NoColor::new(Vec::new());

    for diag in diags {
        codespan_reporting::term::emit_to_write_style(
            &mut output,
            &codespan_reporting::term::Config::default(),
            f,
            &diag,
        )
        .expect("failed to emit diagnostic");
    }

    String::from_utf8(output.into_inner()).expect("diagnostic output is utf-8")
}

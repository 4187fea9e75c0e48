use std::fmt::{self, Write};
use std::time::Duration;

const FORMAT_ERROR: &str = "format_error=true";

/// Assembles one output line: the prefix, each attribute and the trailing
/// segments, single-space separated and newline terminated. Empty pieces are
/// skipped so the line never carries doubled or trailing spaces. Line breaks
/// inside a piece are written as the escapes `\n` and `\r`, keeping every
/// call to a single line.
pub(crate) fn line<'a>(
    namespace: &'a str,
    attributes: &'a [String],
    tail: impl IntoIterator<Item = &'a str>,
) -> String {
    let mut out = String::new();
    let pieces = std::iter::once(namespace)
        .chain(attributes.iter().map(String::as_str))
        .chain(tail)
        .filter(|piece| !piece.is_empty());
    for piece in pieces {
        if !out.is_empty() {
            out.push(' ');
        }
        push_escaped(&mut out, piece);
    }
    out.push('\n');
    out
}

fn push_escaped(out: &mut String, piece: &str) {
    for c in piece.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

/// Renders caller arguments into a message segment. A failing `Display` impl
/// keeps whatever was written and flags the line instead of aborting it.
pub(crate) fn message(args: fmt::Arguments<'_>) -> String {
    let mut out = String::new();
    if out.write_fmt(args).is_err() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(FORMAT_ERROR);
    }
    out
}

pub(crate) fn error_segment(message: &str) -> String {
    format!("state=error error={:?}", message)
}

pub(crate) fn elapsed_token(elapsed: Duration) -> String {
    format!("elapsed={:?}", elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn line_joins_with_single_spaces() {
        let attrs = vec!["a=1".to_string(), "b=2".to_string()];
        assert_eq!(line("ns=x", &attrs, ["msg=hi"]), "ns=x a=1 b=2 msg=hi\n");
    }

    #[test]
    fn line_skips_empty_pieces() {
        assert_eq!(line("ns=x", &[], [""]), "ns=x\n");
        assert_eq!(line("", &["a=1".to_string()], ["m=1"]), "a=1 m=1\n");
    }

    #[test]
    fn line_escapes_embedded_line_breaks() {
        let attrs = vec!["frag\nment".to_string()];
        assert_eq!(
            line("ns=x", &attrs, ["msg=a\r\nb"]),
            "ns=x frag\\nment msg=a\\r\\nb\n"
        );
    }

    #[test]
    fn message_substitutes_arguments() {
        let rendered = message(format_args!(
            "string={:?} int={} float={:.2}",
            "foo", 42, 3.14159
        ));
        assert_eq!(rendered, r#"string="foo" int=42 float=3.14"#);
    }

    #[test]
    fn message_flags_formatting_failures() {
        assert_eq!(message(format_args!("a=1 b={}", Broken)), "a=1 b= format_error=true");
        assert_eq!(message(format_args!("{}", Broken)), "format_error=true");
    }

    #[test]
    fn error_segment_quotes_message() {
        assert_eq!(error_segment("broken"), r#"state=error error="broken""#);
        assert_eq!(
            error_segment(r#"bad "input""#),
            r#"state=error error="bad \"input\"""#
        );
    }

    #[test]
    fn elapsed_token_has_unit_suffix() {
        assert_eq!(elapsed_token(Duration::from_millis(1500)), "elapsed=1.5s");
        assert_eq!(elapsed_token(Duration::from_micros(2500)), "elapsed=2.5ms");
    }
}

//! HTML auto-escaping compatible with Jinja's MarkupSafe.
//!
//! minijinja's built-in HTML escaping also rewrites `/`, which turns every
//! `base_path` into `&#x2f;...`. Sites are written against MarkupSafe, so
//! only `& < > " '` are escaped here.

use std::fmt::Write;

use minijinja::{escape_formatter, AutoEscape, Error, Output, State, Value};

/// Formatter installed on every environment.
pub fn markup_formatter(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    let plain = value.is_safe() || value.is_undefined() || value.is_none();
    if !matches!(state.auto_escape(), AutoEscape::Html) || plain {
        return escape_formatter(out, state, value);
    }

    match value.as_str() {
        Some(text) => write_escaped(out, text)?,
        None => write_escaped(out, &value.to_string())?,
    }
    Ok(())
}

/// Write `text` with `& < > " '` replaced by entities.
pub fn write_escaped<W: Write>(out: &mut W, text: &str) -> std::fmt::Result {
    let mut last = 0;
    for (idx, byte) in text.bytes().enumerate() {
        let entity = match byte {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&#34;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.write_str(&text[last..idx])?;
        out.write_str(entity)?;
        last = idx + 1;
    }
    out.write_str(&text[last..])
}

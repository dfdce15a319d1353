//! `${path}` references inside string values.

use alloc::string::String;

use crate::BindError;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Returns the referenced path if `text` is exactly one placeholder.
///
/// `"${a.b}"` yields `Some("a.b")`; `"x${a}"` and `"${a}${b}"` yield `None`.
pub(crate) fn alias(text: &str) -> Option<&str> {
    let inner = text.strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
    if inner.is_empty() || inner.contains(OPEN) || inner.contains(CLOSE) {
        return None;
    }
    Some(inner.trim())
}

/// Returns `true` if `text` holds at least one complete placeholder.
pub(crate) fn contains(text: &str) -> bool {
    text.find(OPEN)
        .is_some_and(|start| text[start + OPEN.len()..].contains(CLOSE))
}

/// Replaces each `${path}` with `resolve(path)`.
///
/// Placeholders resolving to `None` and unterminated `${` are kept verbatim.
pub(crate) fn interpolate(
    text: &str,
    mut resolve: impl FnMut(&str) -> Result<Option<String>, BindError>,
) -> Result<String, BindError> {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            break;
        };

        output.push_str(&rest[..start]);
        let reference = &after[..end];
        match resolve(reference.trim())? {
            Some(value) => output.push_str(&value),
            None => output.push_str(&rest[start..start + OPEN.len() + end + 1]),
        }
        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

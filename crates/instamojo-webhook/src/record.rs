//! Decoding webhook form bodies and rendering log records.

use percent_encoding::percent_decode;

use crate::error::WebhookError;

/// Line written after every record.
pub const RECORD_SEPARATOR: &str = "----------";

/// Decode an `application/x-www-form-urlencoded` body into ordered pairs.
///
/// A key that repeats keeps its first value. Pieces without `=` and pairs
/// with a blank value are skipped. A body that is not UTF-8, before or after
/// percent-decoding, is rejected.
pub fn decode_form(body: &[u8]) -> Result<Vec<(String, String)>, WebhookError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| WebhookError::MalformedBody(format!("body is not UTF-8: {e}")))?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for piece in text.split(['&', ';']) {
        let Some((raw_key, raw_value)) = piece.split_once('=') else {
            continue;
        };
        let key = decode_component(raw_key)?;
        let value = decode_component(raw_value)?;
        if value.is_empty() || pairs.iter().any(|(k, _)| *k == key) {
            continue;
        }
        pairs.push((key, value));
    }
    Ok(pairs)
}

/// `+` is a space; percent-escapes must decode to UTF-8.
fn decode_component(raw: &str) -> Result<String, WebhookError> {
    let spaced = raw.replace('+', " ");
    percent_decode(spaced.as_bytes())
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| {
            WebhookError::MalformedBody(format!("field {raw:?} is not UTF-8 once decoded: {e}"))
        })
}

/// Keep one field on one log line.
fn escape_line_breaks(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Render one record: `key: value` per line, then the separator. Line breaks
/// inside a key or value are written as `\n` / `\r` (and `\` as `\\`).
pub fn format_record(pairs: &[(String, String)]) -> String {
    let mut record = String::new();
    for (key, value) in pairs {
        record.push_str(&escape_line_breaks(key));
        record.push_str(": ");
        record.push_str(&escape_line_breaks(value));
        record.push('\n');
    }
    record.push_str(RECORD_SEPARATOR);
    record.push('\n');
    record
}

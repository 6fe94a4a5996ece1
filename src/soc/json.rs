//! JSON decoding for the department and subject list endpoints.

use crate::soc::errors::{Endpoint, SocApiError};

/// Decode a JSON body, reporting the serde path and a snippet of the
/// offending line when the site serves something unexpected.
pub fn decode<T: serde::de::DeserializeOwned>(
    endpoint: Endpoint,
    body: &str,
) -> Result<T, SocApiError> {
    let jd = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(jd).map_err(|err| {
        let inner = err.inner();
        let (line, column) = (inner.line(), inner.column());
        let path = err.path().to_string();

        let msg = inner.to_string();
        let loc = format!(" at line {line} column {column}");
        let msg = msg.strip_suffix(&loc).unwrap_or(&msg);

        let mut message = String::new();
        if !path.is_empty() && path != "." {
            message.push_str(&format!("at path '{path}': "));
        }
        message.push_str(&format!(
            "{} (line {line} col {column})\n{}",
            describe_mismatch(msg),
            snippet(body, line, column, 20)
        ));

        SocApiError::Decode { endpoint, message }
    })
}

/// Rewrite "invalid type: X, expected Y" as "expected Y, got X".
fn describe_mismatch(msg: &str) -> String {
    if let Some(rest) = msg.strip_prefix("invalid type: ")
        && let Some((actual, expected)) = rest.split_once(", expected ")
    {
        return format!("expected {expected}, got {actual}");
    }
    msg.to_owned()
}

fn snippet(body: &str, line: usize, column: usize, context_len: usize) -> String {
    let target = body.lines().nth(line.saturating_sub(1)).unwrap_or("");
    if target.is_empty() {
        return "(empty line)".to_owned();
    }

    let error_idx = column.saturating_sub(1).min(target.len());
    let half = context_len / 2;
    let mut start = error_idx.saturating_sub(half);
    let mut end = (error_idx + half).min(target.len());
    while !target.is_char_boundary(start) {
        start -= 1;
    }
    while !target.is_char_boundary(end) {
        end += 1;
    }

    let indicator = " ".repeat(error_idx - start) + "^";
    format!("...{}...\n   {indicator}", &target[start..end])
}

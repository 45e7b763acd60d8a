//! Decoding of the leading `---` metadata block.
//!
//! The block is a YAML mapping. Only `title` and `author` are used; other
//! keys are skipped so that decks written for other tools still load.

use super::error::ParseError;
use super::types::Metadata;

/// Split `source` into (metadata payload, body) if it opens with a closed
/// `---` block.
///
/// Returns `None` when the first line is not exactly `---` or no closing
/// `---` line follows, in which case the whole input is body.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let first_len = source.find('\n').map_or(source.len(), |idx| idx + 1);
    if strip_line_ending(&source[..first_len]) != "---" {
        return None;
    }
    let rest = &source[first_len..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if strip_line_ending(line) == "---" {
            let payload = &rest[..offset];
            let body = skip_blank_line(&rest[offset + line.len()..]);
            return Some((payload, body));
        }
        offset += line.len();
    }
    None
}

/// Decode a metadata payload as YAML into [`Metadata`].
///
/// Keys other than `title` and `author` are ignored. A payload holding only
/// blank lines and comments decodes to empty metadata.
///
/// # Errors
///
/// Returns [`ParseError::InvalidMetadata`] when the payload is not valid YAML
/// or `title`/`author` are not plain scalars.
pub fn decode(payload: &str) -> Result<Metadata, ParseError> {
    let has_content = payload
        .lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !line.starts_with('#'));
    if !has_content {
        return Ok(Metadata::default());
    }

    serde_saphyr::from_str::<Metadata>(payload).map_err(|err| {
        let line = err
            .location()
            .and_then(|location| usize::try_from(location.line()).ok())
            .filter(|&line| line > 0);
        ParseError::InvalidMetadata {
            line,
            reason: err.to_string(),
        }
    })
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches('\n').trim_end_matches('\r')
}

fn skip_blank_line(body: &str) -> &str {
    let first_len = body.find('\n').map_or(body.len(), |idx| idx + 1);
    if first_len > 0 && strip_line_ending(&body[..first_len]).is_empty() {
        &body[first_len..]
    } else {
        body
    }
}

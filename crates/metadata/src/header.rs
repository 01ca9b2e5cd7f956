//! Header block detection for skill and adapter documents.
//!
//! A header is a region that opens on the very first line with `---` and
//! closes at the next line that is exactly `---`. Everything after the
//! closing line is the body and is never inspected.

use std::borrow::Cow;

/// Line that opens and closes a header block.
pub const HEADER_MARKER: &str = "---";

/// Converts CRLF and lone CR line endings to LF.
///
/// Returns the input untouched when it already uses LF only.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Splits LF-normalized content into its header and body.
///
/// Returns `(Some(header), body)` when the content starts with a closed
/// header block. `header` excludes both marker lines and the newline before
/// the closing marker; `body` is everything after the closing marker line,
/// byte for byte. Content without an opening marker, or whose header is
/// never closed, is returned whole as the body.
pub fn split_header(content: &str) -> (Option<&str>, &str) {
    let Some(after_open) = content
        .strip_prefix(HEADER_MARKER)
        .and_then(|rest| rest.strip_prefix('\n'))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        if bare == HEADER_MARKER {
            let header = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(header.strip_suffix('\n').unwrap_or(header)), body);
        }
        offset += line.len();
    }

    (None, content)
}

//! Content type inference for stored files.

use mime_guess::MimeGuess;

/// Best-effort MIME type for a file name, keyed on its extension.
///
/// Unknown or missing extensions fall back to `application/octet-stream`.
#[must_use]
pub fn content_type_for(file_name: &str) -> String {
    MimeGuess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_owned()
}

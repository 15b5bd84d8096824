//! Storage key generation.
//!
//! Keys are `{prefix}/{uuid}.{ext}`. The UUID makes keys independent of the
//! original filename, which is the one concurrency guarantee this system
//! makes: two simultaneous uploads of `report.pdf` get distinct keys.

use std::path::Path;
use uuid::Uuid;

/// Generate a collision-resistant storage key for an uploaded file.
///
/// The extension is taken from the original filename and lowercased; a file
/// without an extension (already rejected by validation) gets a bare UUID key.
pub fn generate_key(prefix: &str, filename: &str) -> String {
    let id = Uuid::new_v4();
    let prefix = prefix.trim_matches('/');

    match extension_of(filename) {
        Some(ext) if !prefix.is_empty() => format!("{}/{}.{}", prefix, id, ext),
        Some(ext) => format!("{}.{}", id, ext),
        None if !prefix.is_empty() => format!("{}/{}", prefix, id),
        None => id.to_string(),
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

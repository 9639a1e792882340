//! Object-key derivation and sidecar naming conventions.
//!
//! Videos live under an owner-namespaced prefix; auxiliary objects sit next
//! to their video under a derived key (`<video-key>.thumb.jpg` and, for
//! listings written by earlier revisions, `<video-key>.meta.json`). Any
//! consumer of a listing must respect these suffixes to avoid treating a
//! sidecar as a playable video.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use uuid::Uuid;

/// Suffix of a metadata sidecar object.
pub const META_SUFFIX: &str = ".meta.json";

/// Suffix of a thumbnail sidecar object.
pub const THUMB_SUFFIX: &str = ".thumb.jpg";

/// Fallback extension when a filename carries none.
const DEFAULT_EXT: &str = "mp4";

/// Length of the random key suffix.
const RANDOM_LEN: usize = 8;

/// Prefix under which all of one user's objects live.
pub fn owner_prefix(user_id: Uuid) -> String {
    format!("users/{user_id}/")
}

/// Derive a fresh storage key for an upload.
///
/// Keys are namespaced under the owner and carry a millisecond timestamp
/// plus a random suffix, so two calls never collide:
/// `users/{user_id}/{millis}-{random}.{ext}`.
pub fn derive_upload_key(user_id: Uuid, filename: &str) -> String {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, e)| e)
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_EXT.to_string());

    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_LEN)
        .map(char::from)
        .collect::<String>()
        .to_ascii_lowercase();

    format!(
        "{}{}-{}.{}",
        owner_prefix(user_id),
        Utc::now().timestamp_millis(),
        suffix,
        ext
    )
}

/// Key of the thumbnail sidecar for a video key.
pub fn thumb_key(video_key: &str) -> String {
    format!("{video_key}{THUMB_SUFFIX}")
}

/// Key of the metadata sidecar for a video key.
pub fn meta_key(video_key: &str) -> String {
    format!("{video_key}{META_SUFFIX}")
}

/// Whether a listed key is a sidecar rather than a playable video.
pub fn is_sidecar_key(key: &str) -> bool {
    key.ends_with(META_SUFFIX) || key.ends_with(THUMB_SUFFIX)
}

/// Whether `key` lives under `user_id`'s namespace.
pub fn is_owned_by(key: &str, user_id: Uuid) -> bool {
    key.starts_with(&owner_prefix(user_id))
}

//! Song title <-> file key conversion.
//!
//! Analysis files are named `<key>_audio.json` / `<key>_lyrics.json`, where the
//! key is the percent-encoded song title with every space turned into an
//! underscore. Going back from a key, underscores become spaces again after
//! decoding.

/// Turns a display title into the key used in analysis file names.
pub fn key_for_title(title: &str) -> String {
    urlencoding::encode(title).replace("%20", "_")
}

/// Turns a file-name key back into a display title.
///
/// Keys that contain invalid percent-sequences are kept verbatim (minus the
/// underscore substitution) instead of failing the whole listing.
pub fn title_for_key(key: &str) -> String {
    urlencoding::decode(key)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| key.to_owned())
        .replace('_', " ")
}

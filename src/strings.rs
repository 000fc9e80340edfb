//! Display string lookup
//!
//! The media-center host localizes display strings by numeric id. This
//! module owns the fixed semantic-key → id table and a small collaborator
//! seam for the host's resolver. Lookups never fail: an unmapped key or a
//! missing translation falls back to the key itself.

use std::collections::HashMap;

/// Semantic key → host string id.
const STRING_IDS: &[(&str, u32)] = &[
    // sections
    ("shows", 30010),
    ("search", 30011),
    ("episodes", 30012),
    ("movies", 30013),
    ("trailers", 30014),
    ("clips", 30015),
    ("next", 30016),
    ("genres", 30017),
    ("rating", 30018),
    // messages
    ("error", 30600),
    ("unknown_error", 30601),
    ("no_episodes", 30603),
    ("no_movies", 30604),
    ("no_trailers", 30605),
    ("no_clips", 30606),
    // genres
    ("action", 30700),
    ("adventure", 30701),
    ("bishonen", 30702),
    ("bishoujo", 30703),
    ("comedy", 30704),
    ("cyberpunk", 30705),
    ("drama", 30706),
    ("fan service", 30707),
    ("fantasy", 30708),
    ("harem", 30709),
    ("historical", 30710),
    ("horror", 30711),
    ("live action", 30712),
    ("magical girl", 30713),
    ("martial arts", 30714),
    ("mecha", 30715),
    ("moe", 30716),
    ("mystery", 30717),
    ("reverse harem", 30718),
    ("romance", 30719),
    ("school", 30720),
    ("sci fi", 30721),
    ("shonen", 30722),
    ("slice of life", 30723),
    ("space", 30724),
    ("sports", 30725),
    ("super power", 30726),
    ("supernatural", 30727),
    ("yuri", 30728),
];

/// Numeric id for a semantic string key, if mapped.
#[must_use]
pub fn string_id(key: &str) -> Option<u32> {
    STRING_IDS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, id)| *id)
}

/// Host-side localization collaborator: resolves a numeric string id to a
/// translated display string.
pub trait StringResolver {
    fn resolve(&self, id: u32) -> Option<String>;
}

/// A resolver with no translations; every lookup falls back to the key.
impl StringResolver for () {
    fn resolve(&self, _id: u32) -> Option<String> {
        None
    }
}

impl StringResolver for HashMap<u32, String> {
    fn resolve(&self, id: u32) -> Option<String> {
        self.get(&id).cloned()
    }
}

/// Display string lookup over an injected resolver.
pub struct StringTable<R> {
    resolver: R,
}

impl<R: StringResolver> StringTable<R> {
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Look up the display string for a semantic key, falling back to the
    /// key itself when unmapped or untranslated.
    pub fn lookup(&self, key: &str) -> String {
        let Some(id) = string_id(key) else {
            tracing::debug!(key, "string key is not mapped, using key as display text");
            return key.to_string();
        };
        match self.resolver.resolve(id) {
            Some(translated) => translated,
            None => {
                tracing::debug!(key, id, "resolver has no translation, using key as display text");
                key.to_string()
            }
        }
    }
}

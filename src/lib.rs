// Funimation Feed Client
//
// Pure HTTP client and response normalizer for Funimation's legacy video
// feeds. The feeds serve deeply nested JSON with inconsistent key
// spellings and stringly-typed values; this crate flattens each payload
// into a homogeneous batch of typed records (shows, episodes, movies,
// clips, trailers) that a list renderer can iterate directly.
//
// Architecture:
// - normalize: envelope unwrapping, key normalization, value coercion,
//   per-batch variant dispatch (pure, no I/O)
// - client: reqwest-based feed fetcher feeding the normalizer
// - service: capability trait composing fetch + string lookup for callers
// - strings / urls: host-localization lookup and query-string helpers

pub mod client;
pub mod error;
pub mod normalize;
pub mod service;
pub mod strings;
pub mod types;
pub mod urls;

// Re-export the main entry points for convenience
pub use client::{FunimationClient, DEFAULT_HOST};
pub use error::FunimationError;
pub use normalize::{process_response, NormalizeError};
pub use service::{FunimationService, MediaDirectory};
pub use strings::{string_id, StringResolver, StringTable};
pub use types::{Batch, Clip, EntityKind, Episode, Movie, Show, Trailer};

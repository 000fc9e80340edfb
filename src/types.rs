//! Typed feed entities
//!
//! One struct per record variant the feeds serve, plus [`Batch`], the
//! tagged union a normalized payload resolves to. The variant is decided
//! once per batch from the first record's discriminator key; every record
//! in a batch must carry the same discriminator.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalize::NormalizeError;

/// The record variants a feed batch can resolve to, in discriminator
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Show,
    Episode,
    Movie,
    Clip,
    Trailer,
}

impl EntityKind {
    const ALL: [Self; 5] = [
        Self::Show,
        Self::Episode,
        Self::Movie,
        Self::Clip,
        Self::Trailer,
    ];

    /// The key whose presence marks a record as this variant.
    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        match self {
            Self::Show => "maturity_rating",
            Self::Episode => "episode_number",
            Self::Movie => "tv_key_art",
            Self::Clip => "funimationid",
            Self::Trailer => "is_mature",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Episode => "episode",
            Self::Movie => "movie",
            Self::Clip => "clip",
            Self::Trailer => "trailer",
        }
    }

    /// Pick the variant for a record by discriminator presence, highest
    /// priority first. `None` when no discriminator is present.
    pub(crate) fn detect(record: &Map<String, Value>) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| record.contains_key(kind.discriminator()))
    }
}

/// A series listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub maturity_rating: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nid: Option<i64>,
    #[serde(default)]
    pub show_id: Option<i64>,
    #[serde(default)]
    pub votes: Option<i64>,
    #[serde(default)]
    pub all_terms: Vec<String>,
    #[serde(default)]
    pub similar_shows: Vec<i64>,
    #[serde(default)]
    pub video_quality: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub poster_art: Option<String>,
    // Section payloads are passed through untyped; the list renderer only
    // forwards them to follow-up feed requests.
    #[serde(default)]
    pub video_section: Vec<Value>,
    #[serde(default)]
    pub aip: Vec<Value>,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_number: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nid: Option<i64>,
    #[serde(default)]
    pub show_id: Option<i64>,
    /// Whole minutes, seconds dropped.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub post_date: Option<NaiveDate>,
    #[serde(default)]
    pub promo: bool,
    #[serde(default)]
    pub video_quality: Vec<String>,
    #[serde(default)]
    pub term: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
}

/// A feature-length title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub tv_key_art: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nid: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub post_date: Option<NaiveDate>,
    #[serde(default)]
    pub mpaa: Option<String>,
    #[serde(default)]
    pub video_quality: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// A short-form clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub funimationid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub show_id: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub post_date: Option<NaiveDate>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
}

/// A show trailer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub is_mature: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub show_id: Option<i64>,
    #[serde(default)]
    pub post_date: Option<NaiveDate>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// One normalized feed payload: a homogeneous batch of typed records, or
/// the coerced records as-is when no discriminator is present.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Shows(Vec<Show>),
    Episodes(Vec<Episode>),
    Movies(Vec<Movie>),
    Clips(Vec<Clip>),
    Trailers(Vec<Trailer>),
    Raw(Vec<Map<String, Value>>),
}

impl Batch {
    /// Build a batch from coerced records, deciding the variant once from
    /// the first record.
    pub(crate) fn from_records(records: Vec<Map<String, Value>>) -> Result<Self, NormalizeError> {
        let Some(kind) = records.first().and_then(EntityKind::detect) else {
            return Ok(Self::Raw(records));
        };
        match kind {
            EntityKind::Show => Ok(Self::Shows(collect_entities(records, kind)?)),
            EntityKind::Episode => Ok(Self::Episodes(collect_entities(records, kind)?)),
            EntityKind::Movie => Ok(Self::Movies(collect_entities(records, kind)?)),
            EntityKind::Clip => Ok(Self::Clips(collect_entities(records, kind)?)),
            EntityKind::Trailer => Ok(Self::Trailers(collect_entities(records, kind)?)),
        }
    }

    /// The variant this batch resolved to; `None` for raw batches.
    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Shows(_) => Some(EntityKind::Show),
            Self::Episodes(_) => Some(EntityKind::Episode),
            Self::Movies(_) => Some(EntityKind::Movie),
            Self::Clips(_) => Some(EntityKind::Clip),
            Self::Trailers(_) => Some(EntityKind::Trailer),
            Self::Raw(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Shows(v) => v.len(),
            Self::Episodes(v) => v.len(),
            Self::Movies(v) => v.len(),
            Self::Clips(v) => v.len(),
            Self::Trailers(v) => v.len(),
            Self::Raw(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Deserialize every record as the chosen variant, enforcing per-batch
/// homogeneity: a record missing the batch discriminator fails the batch.
fn collect_entities<T: DeserializeOwned>(
    records: Vec<Map<String, Value>>,
    kind: EntityKind,
) -> Result<Vec<T>, NormalizeError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            if !record.contains_key(kind.discriminator()) {
                return Err(NormalizeError::Shape(format!(
                    "record {i} is missing `{}` in a batch of {}s",
                    kind.discriminator(),
                    kind.as_str()
                )));
            }
            serde_json::from_value(Value::Object(record)).map_err(|e| {
                NormalizeError::Shape(format!("record {i} is not a valid {}: {e}", kind.as_str()))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_detect_priority_order() {
        // maturity_rating outranks every other discriminator.
        let rec = record(json!({
            "maturity_rating": "TV-MA",
            "episode_number": 1,
            "is_mature": true,
        }));
        assert_eq!(EntityKind::detect(&rec), Some(EntityKind::Show));

        let rec = record(json!({"episode_number": 1, "is_mature": false}));
        assert_eq!(EntityKind::detect(&rec), Some(EntityKind::Episode));

        let rec = record(json!({"title": "nothing to see"}));
        assert_eq!(EntityKind::detect(&rec), None);
    }

    #[test]
    fn test_from_records_movie() {
        let records = vec![record(json!({
            "tv_key_art": "https://img.example.com/key.jpg",
            "title": "Broly",
            "duration": 93,
            "mpaa": "PG-13",
        }))];
        let batch = Batch::from_records(records).unwrap();
        let Batch::Movies(movies) = batch else { panic!("expected movies") };
        assert_eq!(movies[0].title, "Broly");
        assert_eq!(movies[0].duration, Some(93));
        assert_eq!(movies[0].mpaa.as_deref(), Some("PG-13"));
    }

    #[test]
    fn test_from_records_clip_and_trailer() {
        let clips = Batch::from_records(vec![record(json!({
            "funimationid": "FUNI-00123",
            "title": "Outtake",
        }))])
        .unwrap();
        assert_eq!(clips.kind(), Some(EntityKind::Clip));

        let trailers = Batch::from_records(vec![record(json!({
            "is_mature": true,
            "title": "Season 2 Teaser",
        }))])
        .unwrap();
        assert_eq!(trailers.kind(), Some(EntityKind::Trailer));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let batch = Batch::from_records(vec![record(json!({
            "is_mature": false,
            "title": "Teaser",
            "brand_new_field": {"nested": true},
        }))])
        .unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_missing_discriminator_fails_batch() {
        let records = vec![
            record(json!({"maturity_rating": "TV-14"})),
            record(json!({"title": "no discriminator"})),
        ];
        let err = Batch::from_records(records).unwrap_err();
        assert!(matches!(err, NormalizeError::Shape(_)));
    }

    #[test]
    fn test_empty_records_are_raw() {
        let batch = Batch::from_records(Vec::new()).unwrap();
        assert_eq!(batch.kind(), None);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}

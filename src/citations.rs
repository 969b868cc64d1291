//! Citation marker removal
//!
//! Text copied out of wiki articles carries reference markers such as `[12]`,
//! sometimes followed by a zero-width space. This module strips them from the
//! genre list and from a few scalar fields of each record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::dataset::Record;

/// Genre list field.
pub const GENRE_FIELD: &str = "genero";

/// Scalar fields cleaned alongside the genre list. Never dropped, even when
/// they end up empty.
pub const SCALAR_FIELDS: &[&str] = &["año_debut", "año_finalizacion", "estudio"];

static MARKER_WITH_ZWSP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]\u{200B}").expect("static regex"));

static BARE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").expect("static regex"));

/// Counters for one pass over the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub records: usize,
    pub fields_changed: usize,
    pub genres_dropped: usize,
}

/// Whether `s` still contains a citation marker.
pub fn has_marker(s: &str) -> bool {
    BARE_MARKER.is_match(s)
}

/// Remove every citation marker from `s` and trim surrounding whitespace.
///
/// Markers followed by a zero-width space go first so the space goes with
/// them. Removing a marker can join the text around it into a new one
/// (`"[[1]2]"`), so both passes repeat until nothing matches.
///
/// # Examples
/// ```
/// use anime_data_tools::citations::strip_markers;
/// assert_eq!(strip_markers("Studio Ghibli[5]\u{200B}"), "Studio Ghibli");
/// assert_eq!(strip_markers("[3]Aventuras"), "Aventuras");
/// ```
pub fn strip_markers(s: &str) -> String {
    let mut result = s.to_string();
    while has_marker(&result) {
        result = MARKER_WITH_ZWSP.replace_all(&result, "").into_owned();
        result = BARE_MARKER.replace_all(&result, "").into_owned();
    }
    result.trim().to_string()
}

/// Clean one record in place. Fields that are missing or of an unexpected
/// type are left alone.
pub fn clean_record(record: &mut Record, stats: &mut CleanStats) {
    if let Some(Value::Array(genres)) = record.get_mut(GENRE_FIELD) {
        let before = genres.len();
        let mut changed = false;

        genres.retain_mut(|entry| {
            let Value::String(text) = entry else {
                return true;
            };
            let cleaned = strip_markers(text);
            if cleaned != *text {
                changed = true;
                *text = cleaned;
            }
            !text.is_empty()
        });

        let dropped = before - genres.len();
        stats.genres_dropped += dropped;
        if changed || dropped > 0 {
            stats.fields_changed += 1;
        }
    }

    for field in SCALAR_FIELDS {
        if let Some(Value::String(text)) = record.get_mut(*field) {
            let cleaned = strip_markers(text);
            if cleaned != *text {
                log::debug!("{}: {:?} -> {:?}", field, text, cleaned);
                *text = cleaned;
                stats.fields_changed += 1;
            }
        }
    }

    stats.records += 1;
}

/// Clean every record.
pub fn clean_records(records: &mut [Record]) -> CleanStats {
    let mut stats = CleanStats::default();
    for record in records.iter_mut() {
        clean_record(record, &mut stats);
    }
    stats
}

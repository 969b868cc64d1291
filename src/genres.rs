use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::citations::GENRE_FIELD;
use crate::dataset::Record;

/// Field carrying the end year, or the sentinel below for running shows.
pub const END_YEAR_FIELD: &str = "año_finalizacion";

/// Value written by the source for shows that are still airing.
pub const ONGOING_SENTINEL: &str = "No finalizado";

/// Replacement for `ONGOING_SENTINEL`.
pub const ONGOING: &str = "Ongoing";

/// Genres already in their English form. These are returned untouched, with
/// whatever casing the record had.
pub const CANONICAL_GENRES: &[&str] = &[
    "action", "adventure", "comedy", "drama", "fantasy",
    "horror", "mystery", "romance", "science fiction",
    "supernatural", "thriller", "mecha", "ecchi", "isekai",
    "slice of life", "shounen", "shoujo", "seinen", "josei",
    "harem", "yuri", "yaoi", "rpg", "dark fantasy",
    "psychological thriller", "coming of age",
];

/// Spanish genre (lower-case, trimmed) to English genre
const GENRE_TRANSLATIONS: &[(&str, &str)] = &[
    // Common genres
    ("acción", "action"),
    ("aventura", "adventure"),
    ("aventuras", "adventure"),
    ("comedia", "comedy"),
    ("drama", "drama"),
    ("fantasía", "fantasy"),
    ("terror", "horror"),
    ("misterio", "mystery"),
    ("romance", "romance"),
    ("ciencia ficción", "science fiction"),
    ("sobrenatural", "supernatural"),
    ("suspenso", "thriller"),
    ("deportes", "sports"),
    ("psicológico", "psychological"),
    ("música", "music"),
    ("histórico", "historical"),
    ("juegos", "games"),
    ("demonios", "demons"),
    ("artes marciales", "martial arts"),
    ("militar", "military"),
    ("parodia", "parody"),
    ("policíaco", "police"),
    ("post-apocalíptico", "post-apocalyptic"),
    ("escolar", "school"),
    ("espacial", "space"),
    ("vampiros", "vampires"),
    ("fantasía oscura", "dark fantasy"),
    ("harem inverso", "reverse harem"),
    ("educativo", "educational"),
    ("infantil", "kids"),
    ("automóviles", "cars"),
    ("superpoderes", "super power"),
    ("zombis", "zombies"),
    ("ficción histórica", "historical fiction"),
    ("bellas artes", "fine arts"),

    // Japanese terms and spelling variants
    ("mahō shōjo", "magical girl"),
    ("shōnen", "shounen"),
    ("shōjo", "shoujo"),
    ("coming-of-age", "coming of age"),

    // Loanwords kept as they are
    ("mecha", "mecha"),
    ("ecchi", "ecchi"),
    ("coming of age", "coming of age"),
    ("cyberpunk", "cyberpunk"),
    ("isekai", "isekai"),
    ("slice of life", "slice of life"),
    ("seinen", "seinen"),
    ("josei", "josei"),
    ("harem", "harem"),
    ("samurai", "samurai"),
    ("yuri", "yuri"),
    ("yaoi", "yaoi"),

    // Compound genres
    ("humor absurdo", "absurd humor"),
    ("comedia negra", "dark comedy"),
    ("comedia romántica", "romantic comedy"),
    ("comedia dramática", "comedy drama"),
    ("comedia fantástica", "fantasy comedy"),
    ("thriller psicológico", "psychological thriller"),
    ("videojuego de aventura", "adventure game"),
    ("videojuego de rol", "role-playing game"),
    ("humor negro", "dark humor"),
];

static TRANSLATIONS: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| GENRE_TRANSLATIONS.iter().copied().collect());

static CANONICAL: Lazy<IndexSet<&'static str>> =
    Lazy::new(|| CANONICAL_GENRES.iter().copied().collect());

/// Counters for one pass over the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateStats {
    pub records: usize,
    pub genres_translated: usize,
    pub sentinels_replaced: usize,
}

/// Normalize a genre for lookup
fn normalize_genre(genre: &str) -> String {
    genre.to_lowercase().trim().to_string()
}

/// Upper-case the first letter and lower-case the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Look up the English term for a genre, if the table has one.
pub fn lookup(genre: &str) -> Option<&'static str> {
    TRANSLATIONS.get(normalize_genre(genre).as_str()).copied()
}

/// Whether a genre is already in its English form.
pub fn is_canonical(genre: &str) -> bool {
    CANONICAL.contains(normalize_genre(genre).as_str())
}

/// Translate a single genre entry
///
/// Canonical and unknown genres come back as given. A translated genre is
/// capitalized when the original started with an upper-case letter.
///
/// # Examples
/// ```
/// use anime_data_tools::genres::translate_genre;
/// assert_eq!(translate_genre("Acción"), "Action");
/// assert_eq!(translate_genre("aventuras"), "adventure");
/// assert_eq!(translate_genre("Magia"), "Magia");
/// ```
pub fn translate_genre(genre: &str) -> String {
    if is_canonical(genre) {
        return genre.to_string();
    }

    match lookup(genre) {
        Some(translated) => {
            let starts_upper = genre.chars().next().is_some_and(char::is_uppercase);
            if starts_upper {
                capitalize(translated)
            } else {
                translated.to_string()
            }
        }
        None => genre.to_string(),
    }
}

/// Translate the genre list of one record in place and rewrite the ongoing
/// sentinel in the end year field.
pub fn translate_record(record: &mut Record, stats: &mut TranslateStats) {
    if let Some(Value::Array(genres)) = record.get_mut(GENRE_FIELD) {
        for entry in genres.iter_mut() {
            if let Value::String(genre) = entry {
                let translated = translate_genre(genre);
                if translated != *genre {
                    log::debug!("genre {:?} -> {:?}", genre, translated);
                    *genre = translated;
                    stats.genres_translated += 1;
                }
            }
        }
    }

    if let Some(end_year) = record.get_mut(END_YEAR_FIELD) {
        if end_year.as_str() == Some(ONGOING_SENTINEL) {
            *end_year = Value::String(ONGOING.to_string());
            stats.sentinels_replaced += 1;
        }
    }

    stats.records += 1;
}

/// Translate every record.
pub fn translate_records(records: &mut [Record]) -> TranslateStats {
    let mut stats = TranslateStats::default();
    for record in records.iter_mut() {
        translate_record(record, &mut stats);
    }
    stats
}

//! Line-level classification for the text importer.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Leading decorative markers: dashes and bullet glyphs.
static LEADING_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–—•*·]+\s*").expect("valid marker regex"));

static DIVIDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–—─=_]{3,}$").expect("valid divider regex"));

/// A phone-like digit run: optional `+`, digits with spaces, dashes, dots or parentheses.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{5,}\d").expect("valid phone regex"));

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(https?://\S+|www\.\S+|^[a-z0-9-]+(\.[a-z0-9-]+)*\.[a-z]{2,}(/\S*)?$)",
    )
    .expect("valid url regex")
});

/// Course provider markers, in any letter case, plus an optional colon.
static PROVIDER_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(impartido\s+por|instituci[oó]n|provided\s+by)\s*:?")
        .expect("valid provider marker regex")
});

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year regex"));

const MIN_PHONE_DIGITS: usize = 7;

const SOCIAL_DOMAINS: &[&str] = &[
    "linkedin.com",
    "github.com",
    "gitlab.com",
    "behance.net",
    "dribbble.com",
    "twitter.com",
];

/// Bilingual section labels, compared against the uppercased cleaned line.
const SECTION_LABELS: &[(&str, ParseSection)] = &[
    ("EDUCACIÓN", ParseSection::Education),
    ("EDUCACION", ParseSection::Education),
    ("EDUCATION", ParseSection::Education),
    ("FORMACIÓN", ParseSection::Education),
    ("EXPERIENCIA", ParseSection::Experience),
    ("EXPERIENCIA LABORAL", ParseSection::Experience),
    ("EXPERIENCE", ParseSection::Experience),
    ("WORK EXPERIENCE", ParseSection::Experience),
    ("HABILIDADES", ParseSection::Skills),
    ("SKILLS", ParseSection::Skills),
    ("CURSOS", ParseSection::Courses),
    ("CERTIFICACIONES", ParseSection::Courses),
    ("COURSES", ParseSection::Courses),
    ("CERTIFICATIONS", ParseSection::Courses),
    ("IDIOMAS", ParseSection::Languages),
    ("LANGUAGES", ParseSection::Languages),
    ("INTERESES", ParseSection::Interests),
    ("INTERESTS", ParseSection::Interests),
];

const TASK_LABELS: &[&str] = &["LOGROS/TAREAS", "ACHIEVEMENTS/TASKS", "LOGROS", "TAREAS"];

const MONTH_WORDS: &[&str] = &[
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic", "jan",
    "apr", "aug", "dec", "actualidad", "present",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParseSection {
    Header,
    Education,
    Experience,
    Skills,
    Courses,
    Languages,
    Interests,
}

/// Strips inline markup and leading decorative markers.
pub fn clean(line: &str) -> String {
    let untagged = TAG_RE.replace_all(line, "");
    LEADING_MARKER_RE
        .replace(untagged.trim(), "")
        .trim()
        .to_string()
}

pub fn is_divider(line: &str) -> bool {
    DIVIDER_RE.is_match(line.trim())
}

/// Section whose label this line spells, ignoring case and a trailing colon.
pub fn section_label(line: &str) -> Option<ParseSection> {
    let upper = clean(line).trim_end_matches(':').trim().to_uppercase();
    SECTION_LABELS
        .iter()
        .find(|(label, _)| *label == upper)
        .map(|(_, section)| *section)
}

/// Lines starting with a bullet marker continue the current experience entry.
pub fn is_bullet(line: &str) -> bool {
    line.trim_start()
        .starts_with(['-', '•', '*', '·', '–'])
}

pub fn is_task_label(line: &str) -> bool {
    let upper = clean(line).trim_end_matches(':').trim().to_uppercase();
    TASK_LABELS.contains(&upper.as_str())
}

pub fn is_phone(line: &str) -> bool {
    PHONE_RE.find_iter(line).any(|m| {
        m.as_str().chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
    })
}

pub fn is_url(line: &str) -> bool {
    let lower = line.to_lowercase();
    URL_RE.is_match(line.trim()) || SOCIAL_DOMAINS.iter().any(|d| lower.contains(d))
}

pub fn looks_like_date(line: &str) -> bool {
    if YEAR_RE.is_match(line) {
        return true;
    }
    let lower = line.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| MONTH_WORDS.contains(&word))
}

/// Returns the provider with any marker prefix (and following colon) removed,
/// or `None` when the line carries no marker.
pub fn strip_provider_marker(line: &str) -> Option<String> {
    let marker = PROVIDER_MARKER_RE.find(line)?;
    Some(line[marker.end()..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_tags_and_markers() {
        assert_eq!(clean("<b>Jane</b> Doe"), "Jane Doe");
        assert_eq!(clean("-- Built things"), "Built things");
        assert_eq!(clean("• Shipped"), "Shipped");
        assert_eq!(clean("   plain   "), "plain");
    }

    #[test]
    fn test_divider_detection() {
        assert!(is_divider("----------------"));
        assert!(is_divider("======"));
        assert!(!is_divider("--"));
        assert!(!is_divider("- item"));
    }

    #[test]
    fn test_section_labels_are_bilingual() {
        assert_eq!(section_label("EDUCACIÓN"), Some(ParseSection::Education));
        assert_eq!(section_label("Education:"), Some(ParseSection::Education));
        assert_eq!(section_label("idiomas"), Some(ParseSection::Languages));
        assert_eq!(section_label("Education at MIT"), None);
    }

    #[test]
    fn test_phone_needs_seven_digits() {
        assert!(is_phone("+34 600-123-456"));
        assert!(is_phone("(555) 123 4567"));
        assert!(!is_phone("12 34"));
        assert!(!is_phone("09/2018 - 06/2022"));
    }

    #[test]
    fn test_url_detection() {
        assert!(is_url("https://ana.dev"));
        assert!(is_url("www.example.org"));
        assert!(is_url("ana-perez.com"));
        assert!(is_url("linkedin.com/in/ana"));
        assert!(!is_url("Cambridge, USA"));
        assert!(!is_url("Software Engineer"));
    }

    #[test]
    fn test_provider_marker_is_stripped() {
        assert_eq!(
            strip_provider_marker("Impartido por: Platzi").as_deref(),
            Some("Platzi")
        );
        assert_eq!(
            strip_provider_marker("Institución: Universidad X").as_deref(),
            Some("Universidad X")
        );
        assert_eq!(strip_provider_marker("Coursera"), None);
    }

    #[test]
    fn test_provider_marker_after_case_changing_characters() {
        // 'İ' lowercases to a longer UTF-8 sequence than it occupies.
        assert_eq!(
            strip_provider_marker("İİ Curso - INSTITUCIÓN: Escuela Ñandú").as_deref(),
            Some("Escuela Ñandú")
        );
        assert_eq!(
            strip_provider_marker("Provided By Coursera").as_deref(),
            Some("Coursera")
        );
    }

    #[test]
    fn test_date_heuristic() {
        assert!(looks_like_date("05/2024"));
        assert!(looks_like_date("Ene 2020 - Actualidad"));
        assert!(!looks_like_date("Platzi"));
    }
}

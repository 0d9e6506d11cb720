//! Line-oriented state machine that rebuilds a document from plain text.
//!
//! # Rules
//! - The result starts as a copy of the current document. Header fields are
//!   overwritten only when detected; a collection is replaced only when its
//!   section header was recognised.
//! - A section label counts only when a divider line follows within two lines.
//! - Multi-line records (education, experience, courses) accumulate in a block
//!   and are committed on the next record boundary, a section change, or end of
//!   input. A block with fewer than two lines is dropped.
//! - Nothing here fails: unrecognised lines are skipped.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::import::lines::{
    clean, is_bullet, is_divider, is_phone, is_task_label, is_url, looks_like_date, section_label,
    strip_provider_marker, ParseSection,
};
use crate::models::{
    CourseItem, Document, EducationItem, ExperienceItem, LanguageItem, LanguageLevel, RichText,
};

/// `Español - (100/100)`, also `-Español- (4/5)`.
static LANGUAGE_SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\s*([^-(]+?)\s*-?\s*\(\s*(\d+)\s*/\s*(\d+)\s*\)").expect("valid language regex")
});

/// `Inglés - Avanzado`, `English: Native`.
static LANGUAGE_LEVEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*[-–:]\s*(\S.*)$").expect("valid language level regex"));

const SUMMARY_MIN_CHARS: usize = 120;
const LOCATION_MAX_CHARS: usize = 100;
const DIVIDER_LOOKAHEAD: usize = 2;

const EDUCATION_FIELDS: usize = 4;
const EXPERIENCE_FIELDS: usize = 4;
const COURSE_FIELDS: usize = 3;
const MIN_BLOCK_LINES: usize = 2;

/// Header fields captured so far in this parse; first match wins.
#[derive(Debug, Default)]
struct HeaderSeen {
    email: bool,
    phone: bool,
    website: bool,
    linkedin: bool,
    github: bool,
    location: bool,
    title: bool,
    summary: Vec<String>,
}

struct Parser {
    doc: Document,
    section: ParseSection,
    block: Vec<String>,
    replaced: BTreeSet<ParseSection>,
    header: HeaderSeen,
}

/// Merges whatever can be recognised in `text` into a copy of `current`.
pub fn parse_resume_text(text: &str, current: &Document) -> Document {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut parser = Parser {
        doc: current.clone(),
        section: ParseSection::Header,
        block: Vec::new(),
        replaced: BTreeSet::new(),
        header: HeaderSeen::default(),
    };

    for (i, line) in lines.iter().enumerate() {
        if is_divider(line) {
            continue;
        }
        if let Some(next) = section_label(line) {
            let confirmed = lines
                .iter()
                .skip(i + 1)
                .take(DIVIDER_LOOKAHEAD)
                .any(|l| is_divider(l));
            if confirmed {
                parser.enter(next);
                continue;
            }
            debug!(line, "section label without divider, treated as content");
        }
        parser.feed(i, line);
    }
    parser.flush();
    parser.finish()
}

impl Parser {
    fn enter(&mut self, next: ParseSection) {
        self.flush();
        debug!(from = ?self.section, to = ?next, "import section change");
        self.section = next;
        if self.replaced.insert(next) {
            match next {
                ParseSection::Header => {}
                ParseSection::Education => self.doc.education.clear(),
                ParseSection::Experience => self.doc.experience.clear(),
                ParseSection::Skills => self.doc.skills.clear(),
                ParseSection::Courses => self.doc.courses.clear(),
                ParseSection::Languages => self.doc.languages.clear(),
                ParseSection::Interests => self.doc.interests.clear(),
            }
        }
    }

    fn feed(&mut self, index: usize, line: &str) {
        match self.section {
            ParseSection::Header => self.header_line(index, line),
            ParseSection::Education => {
                if self.block.len() >= EDUCATION_FIELDS {
                    self.flush();
                }
                self.block.push(line.to_string());
            }
            ParseSection::Experience => {
                if is_task_label(line) {
                    return;
                }
                if !is_bullet(line) && self.block.len() >= EXPERIENCE_FIELDS {
                    self.flush();
                }
                self.block.push(line.to_string());
            }
            ParseSection::Courses => {
                if self.block.len() >= COURSE_FIELDS {
                    self.flush();
                }
                self.block.push(line.to_string());
            }
            ParseSection::Skills => push_clean(&mut self.doc.skills, line),
            ParseSection::Interests => push_clean(&mut self.doc.interests, line),
            ParseSection::Languages => match parse_language(line) {
                Some(item) => self.doc.languages.push(item),
                None => debug!(line, "unrecognised language line"),
            },
        }
    }

    fn header_line(&mut self, index: usize, line: &str) {
        let value = clean(line);
        if value.is_empty() {
            return;
        }
        let seen = &mut self.header;
        let contact = &mut self.doc.contact;
        let lower = value.to_lowercase();

        if index == 0 {
            self.doc.name = RichText::plain(value);
        } else if value.contains('@') {
            if !seen.email {
                seen.email = true;
                contact.email = value;
            }
        } else if is_phone(&value) {
            if !seen.phone {
                seen.phone = true;
                contact.phone = value;
            }
        } else if lower.contains("linkedin.com") && !seen.linkedin {
            seen.linkedin = true;
            contact.linkedin = Some(value);
        } else if lower.contains("github.com") && !seen.github {
            seen.github = true;
            contact.github = Some(value);
        } else if is_url(&value) {
            if !seen.website {
                seen.website = true;
                contact.website = Some(value);
            }
        } else if value.chars().count() > SUMMARY_MIN_CHARS {
            seen.summary.push(value);
        } else if value.chars().count() < LOCATION_MAX_CHARS
            && value.contains(',')
            && !value.contains('|')
        {
            if !seen.location {
                seen.location = true;
                contact.location = value;
            }
        } else if !seen.title {
            seen.title = true;
            self.doc.title = RichText::plain(value);
        }
    }

    /// Commits the pending block for the current section.
    fn flush(&mut self) {
        let block = std::mem::take(&mut self.block);
        if block.is_empty() {
            return;
        }
        if block.len() < MIN_BLOCK_LINES {
            debug!(section = ?self.section, ?block, "dropping incomplete block");
            return;
        }
        let fields: Vec<String> = block.iter().map(|l| clean(l)).collect();
        let field = |i: usize| fields.get(i).cloned().unwrap_or_default();

        match self.section {
            ParseSection::Education => self.doc.education.push(EducationItem {
                degree: field(0),
                institution: field(1),
                period: field(2),
                location: field(3),
            }),
            ParseSection::Experience => self.doc.experience.push(ExperienceItem {
                role: field(0),
                company: field(1),
                period: field(2),
                location: field(3),
                tasks: fields
                    .iter()
                    .skip(EXPERIENCE_FIELDS)
                    .filter(|t| !t.is_empty())
                    .cloned()
                    .collect(),
            }),
            ParseSection::Courses => self.doc.courses.push(course_from_block(&fields)),
            _ => {}
        }
    }

    fn finish(mut self) -> Document {
        if !self.header.summary.is_empty() {
            self.doc.summary = RichText::plain(self.header.summary.join(" "));
        }
        self.doc
    }
}

fn push_clean(list: &mut Vec<String>, line: &str) {
    let value = clean(line);
    if !value.is_empty() {
        list.push(value);
    }
}

/// First line is the title. Of the rest, a marked line is the provider and a
/// date-looking line is the date; unmarked leftovers fill provider first.
fn course_from_block(fields: &[String]) -> CourseItem {
    let mut provider = None;
    let mut date = None;
    let mut leftovers = Vec::new();

    for line in fields.iter().skip(1) {
        if let Some(stripped) = strip_provider_marker(line).filter(|_| provider.is_none()) {
            provider = Some(stripped);
        } else if date.is_none() && looks_like_date(line) {
            date = Some(line.clone());
        } else {
            leftovers.push(line.clone());
        }
    }
    let mut leftovers = leftovers.into_iter();
    let provider = provider.or_else(|| leftovers.next());
    let date = date.or_else(|| leftovers.next());

    CourseItem {
        title: fields.first().cloned().unwrap_or_default(),
        date: date.unwrap_or_default(),
        provider: provider.unwrap_or_default(),
    }
}

/// Scores are normalised to 0–100 and the level derived through the same
/// bucket table the editor uses.
fn parse_language(line: &str) -> Option<LanguageItem> {
    if let Some(caps) = LANGUAGE_SCORE_RE.captures(line) {
        let name = clean(&caps[1]);
        let value: f32 = caps[2].parse().ok()?;
        let total: f32 = caps[3].parse().ok()?;
        if name.is_empty() || total <= 0.0 {
            return None;
        }
        let score = (value / total * 100.0).round().clamp(0.0, 100.0) as u8;
        let mut item = LanguageItem::new(name, LanguageLevel::default());
        item.set_score(score);
        return Some(item);
    }

    let cleaned = clean(line);
    let caps = LANGUAGE_LEVEL_RE.captures(&cleaned)?;
    let level = LanguageLevel::parse_label(&caps[2])?;
    let name = caps[1].trim();
    (!name.is_empty()).then(|| LanguageItem::new(name, level))
}

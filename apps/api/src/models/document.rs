//! Document model: the complete in-memory résumé.
//!
//! Pure data: the layout engine, renderers, text importer and editor controller all
//! operate on these types. Serialized as camelCase JSON, which is also the format of
//! persisted records and bulk exports.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::rich_text::RichText;

pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 72;

// ────────────────────────────────────────────────────────────────────────────
// Section kinds and column layout
// ────────────────────────────────────────────────────────────────────────────

/// The fixed vocabulary of résumé content blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Courses,
    Languages,
    Interests,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Courses,
        SectionKind::Languages,
        SectionKind::Interests,
    ];

    /// Heading printed above the section.
    pub fn heading(&self) -> &'static str {
        match self {
            SectionKind::Experience => "EXPERIENCIA",
            SectionKind::Education => "EDUCACIÓN",
            SectionKind::Skills => "HABILIDADES",
            SectionKind::Courses => "CERTIFICACIONES",
            SectionKind::Languages => "IDIOMAS",
            SectionKind::Interests => "INTERESES",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Left,
    Right,
}

/// Partition of the six section kinds into two ordered columns.
///
/// Hidden sections keep their slot here; visibility is tracked separately in
/// `Document::hidden_sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub left: Vec<SectionKind>,
    pub right: Vec<SectionKind>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            left: vec![SectionKind::Experience, SectionKind::Education],
            right: vec![
                SectionKind::Skills,
                SectionKind::Courses,
                SectionKind::Languages,
                SectionKind::Interests,
            ],
        }
    }
}

impl ColumnLayout {
    pub fn column_mut(&mut self, column: Column) -> &mut Vec<SectionKind> {
        match column {
            Column::Left => &mut self.left,
            Column::Right => &mut self.right,
        }
    }

    /// Locates a section kind as (column, index).
    pub fn position_of(&self, kind: SectionKind) -> Option<(Column, usize)> {
        if let Some(i) = self.left.iter().position(|k| *k == kind) {
            return Some((Column::Left, i));
        }
        self.right
            .iter()
            .position(|k| *k == kind)
            .map(|i| (Column::Right, i))
    }
}

/// Structural grid used to place the two columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnStyle {
    #[default]
    Balanced,
    SideLeft,
    SideRight,
    Single,
}

/// Section header decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStyle {
    #[default]
    Modern,
    Classic,
    Elegant,
}

/// How date-picker input is serialized into `period` / `date` strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/YYYY")]
    MonthYear,
    #[serde(rename = "YYYY-MM")]
    YearMonth,
    #[serde(rename = "MMM YYYY")]
    MonthNameYear,
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    /// Free-form manual entry; the picker is disabled.
    #[serde(rename = "TEXT")]
    Text,
}

// ────────────────────────────────────────────────────────────────────────────
// Typography
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontField {
    Name,
    Title,
    Summary,
    SectionHeaders,
    Content,
    Contact,
}

/// Point sizes per text role, each within [`MIN_FONT_SIZE`, `MAX_FONT_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizes {
    pub name: u16,
    pub title: u16,
    pub summary: u16,
    pub section_headers: u16,
    pub content: u16,
    pub contact: u16,
}

impl Default for FontSizes {
    fn default() -> Self {
        FontSizes {
            name: 32,
            title: 16,
            summary: 11,
            section_headers: 13,
            content: 11,
            contact: 10,
        }
    }
}

impl FontSizes {
    /// Stores `value` after clamping it to the allowed range.
    pub fn set(&mut self, field: FontField, value: i64) {
        let size = clamp_font_size(value);
        let slot = match field {
            FontField::Name => &mut self.name,
            FontField::Title => &mut self.title,
            FontField::Summary => &mut self.summary,
            FontField::SectionHeaders => &mut self.section_headers,
            FontField::Content => &mut self.content,
            FontField::Contact => &mut self.contact,
        };
        *slot = size;
    }

    /// Re-clamps every size, used when loading documents from untrusted input.
    pub fn normalized(self) -> Self {
        FontSizes {
            name: clamp_font_size(self.name.into()),
            title: clamp_font_size(self.title.into()),
            summary: clamp_font_size(self.summary.into()),
            section_headers: clamp_font_size(self.section_headers.into()),
            content: clamp_font_size(self.content.into()),
            contact: clamp_font_size(self.contact.into()),
        }
    }
}

pub fn clamp_font_size(value: i64) -> u16 {
    value.clamp(MIN_FONT_SIZE as i64, MAX_FONT_SIZE as i64) as u16
}

// ────────────────────────────────────────────────────────────────────────────
// Items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub provider: String,
}

/// Proficiency level, kept in lockstep with `LanguageItem::score` through a
/// fixed five-bucket table (20 → Básico … 100 → Nativo).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageLevel {
    #[serde(rename = "Básico", alias = "Basico", alias = "Basic")]
    Basico,
    #[default]
    #[serde(rename = "Intermedio", alias = "Intermediate")]
    Intermedio,
    #[serde(rename = "Avanzado", alias = "Advanced")]
    Avanzado,
    #[serde(rename = "Experto", alias = "Expert")]
    Experto,
    #[serde(rename = "Nativo", alias = "Native")]
    Nativo,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 5] = [
        LanguageLevel::Basico,
        LanguageLevel::Intermedio,
        LanguageLevel::Avanzado,
        LanguageLevel::Experto,
        LanguageLevel::Nativo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LanguageLevel::Basico => "Básico",
            LanguageLevel::Intermedio => "Intermedio",
            LanguageLevel::Avanzado => "Avanzado",
            LanguageLevel::Experto => "Experto",
            LanguageLevel::Nativo => "Nativo",
        }
    }

    /// The bucket score this level stands for.
    pub fn score(&self) -> u8 {
        match self {
            LanguageLevel::Basico => 20,
            LanguageLevel::Intermedio => 40,
            LanguageLevel::Avanzado => 60,
            LanguageLevel::Experto => 80,
            LanguageLevel::Nativo => 100,
        }
    }

    /// Maps a 0–100 score onto the nearest bucket. Scores below the first
    /// bucket still read as Básico.
    pub fn from_score(score: u8) -> LanguageLevel {
        let bucket = (f32::from(score.min(100)) / 20.0).round().clamp(1.0, 5.0) as usize;
        LanguageLevel::ALL[bucket - 1]
    }

    /// Case-insensitive lookup of Spanish or English labels, with or without accents.
    pub fn parse_label(label: &str) -> Option<LanguageLevel> {
        match label.trim().to_lowercase().as_str() {
            "básico" | "basico" | "basic" | "beginner" => Some(LanguageLevel::Basico),
            "intermedio" | "intermediate" => Some(LanguageLevel::Intermedio),
            "avanzado" | "advanced" => Some(LanguageLevel::Avanzado),
            "experto" | "expert" | "fluent" => Some(LanguageLevel::Experto),
            "nativo" | "native" | "bilingüe" | "bilingual" => Some(LanguageLevel::Nativo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageItem {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub level: LanguageLevel,
    #[serde(default = "default_language_score")]
    pub score: u8,
}

fn default_language_score() -> u8 {
    LanguageLevel::default().score()
}

impl Default for LanguageItem {
    fn default() -> Self {
        LanguageItem {
            language: String::new(),
            level: LanguageLevel::default(),
            score: default_language_score(),
        }
    }
}

impl LanguageItem {
    pub fn new(language: impl Into<String>, level: LanguageLevel) -> Self {
        LanguageItem {
            language: language.into(),
            level,
            score: level.score(),
        }
    }

    /// Sets the score (clamped to 100) and derives the level from it.
    pub fn set_score(&mut self, score: u8) {
        self.score = score.min(100);
        self.level = LanguageLevel::from_score(self.score);
    }

    /// Sets the level and snaps the score to the level's bucket.
    pub fn set_level(&mut self, level: LanguageLevel) {
        self.level = level;
        self.score = level.score();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub name: RichText,
    #[serde(default)]
    pub title: RichText,
    #[serde(default)]
    pub summary: RichText,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub courses: Vec<CourseItem>,
    #[serde(default)]
    pub languages: Vec<LanguageItem>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub font_sizes: FontSizes,
    #[serde(default)]
    pub hidden_sections: BTreeSet<SectionKind>,
    #[serde(default)]
    pub column_layout: ColumnLayout,
    #[serde(default)]
    pub column_style: ColumnStyle,
    #[serde(default)]
    pub section_style: SectionStyle,
    #[serde(default)]
    pub date_format: DateFormat,
    #[serde(default = "default_separator")]
    pub date_range_separator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub hide_profile_image: bool,
}

pub fn default_separator() -> String {
    " - ".to_string()
}

impl Default for Document {
    fn default() -> Self {
        Document {
            name: RichText::default(),
            title: RichText::default(),
            summary: RichText::default(),
            contact: Contact::default(),
            education: Vec::new(),
            experience: Vec::new(),
            courses: Vec::new(),
            languages: Vec::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            font_sizes: FontSizes::default(),
            hidden_sections: BTreeSet::new(),
            column_layout: ColumnLayout::default(),
            column_style: ColumnStyle::default(),
            section_style: SectionStyle::default(),
            date_format: DateFormat::default(),
            date_range_separator: default_separator(),
            profile_image: None,
            hide_profile_image: false,
        }
    }
}

impl Document {
    pub fn is_hidden(&self, kind: SectionKind) -> bool {
        self.hidden_sections.contains(&kind)
    }

    /// Restores invariants that input from outside the editor may have broken:
    /// font sizes are re-clamped, language levels follow their scores, and an
    /// invalid column layout is replaced by the default partition.
    pub fn normalized(mut self) -> Self {
        self.font_sizes = self.font_sizes.normalized();
        for lang in &mut self.languages {
            let score = lang.score;
            lang.set_score(score);
        }
        self.column_layout = self.column_layout.repaired();
        self
    }
}

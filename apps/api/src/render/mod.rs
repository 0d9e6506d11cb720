//! Section renderers: one pure function per section kind.
//!
//! A renderer maps a section's data slice plus typography and theme colours into a
//! visual tree. It never reads or mutates layout state, so the same section renders
//! identically wherever the layout engine places it.
//!
//! # Shared contract
//! - Items failing the per-item visibility predicate ([`HasContent`]) produce no output
//!   but stay in the document.
//! - Skills and interests are omitted entirely (`None`) when every entry is blank.
//! - Secondary text renders at [`SECONDARY_SCALE`] of the content size, tag-like text
//!   at [`TAG_SCALE`].

pub mod entries;
pub mod header;
pub mod languages;
pub mod page;
pub mod tags;

use serde::{Deserialize, Serialize};

use crate::models::rich_text::TextRun;
use crate::models::{
    CourseItem, Document, EducationItem, ExperienceItem, FontSizes, LanguageItem, SectionKind,
    SectionStyle,
};

pub use header::HeaderDecoration;
pub use page::{render_page, PageBody, RenderedPage};

/// Dates, locations and providers.
pub const SECONDARY_SCALE: f32 = 0.85;
/// Skill pills and interest chips.
pub const TAG_SCALE: f32 = 0.8;

pub const NEUTRAL_COLOR: &str = "#e5e7eb";

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Caller-supplied colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Header background and skill pills.
    #[serde(default = "default_primary")]
    pub primary: String,
    /// Section titles and filled rating dots.
    #[serde(default = "default_accent")]
    pub accent: String,
    /// Body text.
    #[serde(default = "default_text")]
    pub text: String,
}

fn default_primary() -> String {
    "#651d3b".to_string()
}

fn default_accent() -> String {
    "#b3b3b3".to_string()
}

fn default_text() -> String {
    "#374151".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: default_primary(),
            accent: default_accent(),
            text: default_text(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub font_sizes: FontSizes,
    pub section_style: SectionStyle,
    pub theme: Theme,
}

impl RenderContext {
    pub fn new(doc: &Document, theme: Theme) -> Self {
        RenderContext {
            font_sizes: doc.font_sizes,
            section_style: doc.section_style,
            theme,
        }
    }

    pub fn content_pt(&self) -> f32 {
        f32::from(self.font_sizes.content)
    }

    pub fn secondary_pt(&self) -> f32 {
        self.content_pt() * SECONDARY_SCALE
    }

    pub fn tag_pt(&self) -> f32 {
        self.content_pt() * TAG_SCALE
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    /// Item headline (role, degree, course title, language name).
    Primary,
    /// Organisation line under the headline.
    Emphasis,
    Body,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VisualNode {
    Heading {
        text: String,
        size_pt: f32,
        color: String,
        decoration: HeaderDecoration,
    },
    Text {
        text: String,
        size_pt: f32,
        role: TextRole,
        #[serde(default)]
        italic: bool,
    },
    Rich {
        runs: Vec<TextRun>,
        size_pt: f32,
    },
    Bullet {
        text: String,
        size_pt: f32,
    },
    Pill {
        text: String,
        size_pt: f32,
        background: String,
    },
    Chip {
        text: String,
        size_pt: f32,
    },
    DotRating {
        filled: u8,
        total: u8,
        filled_color: String,
        empty_color: String,
    },
    Image {
        src: String,
    },
    /// Children laid out side by side, spread across the available width.
    Row { children: Vec<VisualNode> },
    /// Children stacked vertically as one unit.
    Stack { children: Vec<VisualNode> },
    /// Inline children flowing onto as many lines as needed.
    Wrap { children: Vec<VisualNode> },
    Grid {
        columns: u8,
        children: Vec<VisualNode>,
    },
}

impl VisualNode {
    pub fn text(text: &str, size_pt: f32, role: TextRole) -> VisualNode {
        VisualNode::Text {
            text: text.to_string(),
            size_pt,
            role,
            italic: false,
        }
    }

    pub fn italic(text: &str, size_pt: f32, role: TextRole) -> VisualNode {
        VisualNode::Text {
            text: text.to_string(),
            size_pt,
            role,
            italic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub heading: VisualNode,
    pub body: Vec<VisualNode>,
}

// ────────────────────────────────────────────────────────────────────────────
// Visibility predicate
// ────────────────────────────────────────────────────────────────────────────

/// Whether an item has any text worth printing once trimmed.
pub trait HasContent {
    fn has_content(&self) -> bool;
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

impl HasContent for String {
    fn has_content(&self) -> bool {
        filled(self)
    }
}

impl HasContent for ExperienceItem {
    fn has_content(&self) -> bool {
        filled(&self.role)
            || filled(&self.company)
            || filled(&self.period)
            || filled(&self.location)
            || self.tasks.iter().any(|t| filled(t))
    }
}

impl HasContent for EducationItem {
    fn has_content(&self) -> bool {
        filled(&self.degree)
            || filled(&self.institution)
            || filled(&self.period)
            || filled(&self.location)
    }
}

impl HasContent for CourseItem {
    fn has_content(&self) -> bool {
        filled(&self.title) || filled(&self.date) || filled(&self.provider)
    }
}

impl HasContent for LanguageItem {
    fn has_content(&self) -> bool {
        filled(&self.language)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dispatch
// ────────────────────────────────────────────────────────────────────────────

pub type SectionRenderer = fn(&Document, &RenderContext) -> Option<RenderedSection>;

/// Maps each section kind to its renderer.
pub fn renderer_for(kind: SectionKind) -> SectionRenderer {
    match kind {
        SectionKind::Experience => experience_section,
        SectionKind::Education => education_section,
        SectionKind::Skills => skills_section,
        SectionKind::Courses => courses_section,
        SectionKind::Languages => languages_section,
        SectionKind::Interests => interests_section,
    }
}

pub fn render_section(kind: SectionKind, doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    renderer_for(kind)(doc, ctx)
}

fn experience_section(doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    Some(entries::render_experience(
        &doc.experience,
        ctx,
        ExperienceItem::has_content,
    ))
}

fn education_section(doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    Some(entries::render_education(
        &doc.education,
        ctx,
        EducationItem::has_content,
    ))
}

fn courses_section(doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    Some(entries::render_courses(&doc.courses, ctx, CourseItem::has_content))
}

fn languages_section(doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    Some(languages::render_languages(
        &doc.languages,
        ctx,
        LanguageItem::has_content,
    ))
}

fn skills_section(doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    tags::render_skills(&doc.skills, ctx, String::has_content)
}

fn interests_section(doc: &Document, ctx: &RenderContext) -> Option<RenderedSection> {
    tags::render_interests(&doc.interests, ctx, String::has_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_experience_has_no_content() {
        let item = ExperienceItem {
            tasks: vec!["  ".to_string()],
            ..ExperienceItem::default()
        };
        assert!(!item.has_content());
        let item = ExperienceItem {
            tasks: vec!["Did a thing".to_string()],
            ..ExperienceItem::default()
        };
        assert!(item.has_content());
    }

    #[test]
    fn test_dispatch_returns_matching_kind() {
        let doc = Document::template();
        let ctx = RenderContext::new(&doc, Theme::default());
        for kind in SectionKind::ALL {
            let section = render_section(kind, &doc, &ctx).expect("template sections render");
            assert_eq!(section.kind, kind);
        }
    }

    #[test]
    fn test_scaled_sizes() {
        let mut doc = Document::default();
        doc.font_sizes.content = 10;
        let ctx = RenderContext::new(&doc, Theme::default());
        assert!((ctx.secondary_pt() - 8.5).abs() < 1e-4);
        assert!((ctx.tag_pt() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_theme_defaults_when_fields_missing() {
        let theme: Theme = serde_json::from_str(r##"{"accent": "#000000"}"##).unwrap();
        assert_eq!(theme.accent, "#000000");
        assert_eq!(theme.primary, "#651d3b");
    }
}

//! Typed edit operations.
//!
//! These are the wire shapes accepted by `POST /api/v1/resumes/:id/actions`, e.g.
//!
//! ```json
//! {"action": "updateItem", "update": {"collection": "languages", "index": 0,
//!   "patch": {"field": "score", "value": 60}}}
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::editor::dates::PickedPeriod;
use crate::layout::SectionSlot;
use crate::models::{
    ColumnLayout, ColumnStyle, CourseItem, DateFormat, EducationItem, ExperienceItem, FontField,
    FontSizes, LanguageItem, LanguageLevel, RichText, SectionKind, SectionStyle,
};

/// Top-level field replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Name(RichText),
    Title(RichText),
    Summary(RichText),
    Skills(Vec<String>),
    Interests(Vec<String>),
    FontSizes(FontSizes),
    HiddenSections(BTreeSet<SectionKind>),
    ColumnLayout(ColumnLayout),
    ColumnStyle(ColumnStyle),
    SectionStyle(SectionStyle),
    DateFormat(DateFormat),
    DateRangeSeparator(String),
    ProfileImage(Option<String>),
    HideProfileImage(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
    Github,
}

/// The repeatable collections of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Education,
    Experience,
    Courses,
    Languages,
    Skills,
    Interests,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
}

/// A new item for the head of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "collection", content = "item", rename_all = "camelCase")]
pub enum NewItem {
    Education(EducationItem),
    Experience(ExperienceItem),
    Courses(CourseItem),
    Languages(LanguageItem),
    Skills(String),
    Interests(String),
}

impl NewItem {
    /// An empty item of the given collection, as the editor's "add" buttons create.
    pub fn blank(collection: Collection) -> NewItem {
        match collection {
            Collection::Education => NewItem::Education(EducationItem::default()),
            Collection::Experience => NewItem::Experience(ExperienceItem {
                tasks: vec![String::new()],
                ..ExperienceItem::default()
            }),
            Collection::Courses => NewItem::Courses(CourseItem::default()),
            Collection::Languages => NewItem::Languages(LanguageItem::default()),
            Collection::Skills => NewItem::Skills(String::new()),
            Collection::Interests => NewItem::Interests(String::new()),
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            NewItem::Education(_) => Collection::Education,
            NewItem::Experience(_) => Collection::Experience,
            NewItem::Courses(_) => Collection::Courses,
            NewItem::Languages(_) => Collection::Languages,
            NewItem::Skills(_) => Collection::Skills,
            NewItem::Interests(_) => Collection::Interests,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Item patches
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EducationPatch {
    Degree(String),
    Institution(String),
    Period(String),
    Location(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExperiencePatch {
    Role(String),
    Company(String),
    Period(String),
    Location(String),
    Tasks(Vec<String>),
    /// Replaces one task line; out-of-range indices are ignored.
    Task { index: usize, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum CoursePatch {
    Title(String),
    Date(String),
    Provider(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LanguagePatch {
    Language(String),
    Level(LanguageLevel),
    /// Clamped to 0–100; the level follows.
    Score(i64),
}

/// Patches one field of one item, leaving its siblings untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collection", rename_all = "camelCase")]
pub enum ItemUpdate {
    Education { index: usize, patch: EducationPatch },
    Experience { index: usize, patch: ExperiencePatch },
    Courses { index: usize, patch: CoursePatch },
    Languages { index: usize, patch: LanguagePatch },
    Skills { index: usize, value: String },
    Interests { index: usize, value: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Umbrella action
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EditAction {
    UpdateField {
        update: FieldUpdate,
    },
    UpdateContact {
        field: ContactField,
        value: String,
    },
    /// `item` may be omitted, in which case a blank item is prepended. An item
    /// for a different collection than `collection` is rejected as a no-op.
    AddItem {
        collection: Collection,
        #[serde(default)]
        item: Option<NewItem>,
    },
    RemoveItem {
        collection: Collection,
        index: usize,
    },
    UpdateItem {
        update: ItemUpdate,
    },
    MoveItem {
        collection: Collection,
        index: usize,
        direction: Direction,
    },
    UpdateFontSize {
        field: FontField,
        value: i64,
    },
    ToggleSectionVisibility {
        section: SectionKind,
    },
    MoveSection {
        from: SectionSlot,
        to: SectionSlot,
    },
    DragSection {
        section: SectionKind,
        to: SectionSlot,
    },
    /// Writes a picked date range into an item's `period` (or a course's `date`).
    PickPeriod {
        collection: Collection,
        index: usize,
        period: PickedPeriod,
    },
    ImportText {
        text: String,
    },
}

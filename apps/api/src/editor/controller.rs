//! Editor controller: the only writer of the live document.
//!
//! # Rules
//! - Every operation is copy-on-write: clone, mutate, re-validate, swap. A
//!   rejected or out-of-range edit leaves the current document untouched.
//! - Operations never fail; invalid requests are no-ops.
//! - Language score and level move together through the five-bucket table.
//! - Layout edits delegate to the reorder primitives, so the column layout
//!   stays a partition of the six section kinds.

use tracing::{debug, warn};

use crate::editor::actions::{
    Collection, ContactField, CoursePatch, Direction, EditAction, EducationPatch, ExperiencePatch,
    FieldUpdate, ItemUpdate, LanguagePatch, NewItem,
};
use crate::editor::dates::{format_period, PickedPeriod};
use crate::import::parse_resume_text;
use crate::layout::SectionSlot;
use crate::models::{Document, FontField, SectionKind};

/// Runs `$body` with `$list` bound to the collection's `Vec`, whatever its item type.
macro_rules! with_collection {
    ($doc:expr, $collection:expr, |$list:ident| $body:expr) => {
        match $collection {
            Collection::Education => {
                let $list = &mut $doc.education;
                $body
            }
            Collection::Experience => {
                let $list = &mut $doc.experience;
                $body
            }
            Collection::Courses => {
                let $list = &mut $doc.courses;
                $body
            }
            Collection::Languages => {
                let $list = &mut $doc.languages;
                $body
            }
            Collection::Skills => {
                let $list = &mut $doc.skills;
                $body
            }
            Collection::Interests => {
                let $list = &mut $doc.interests;
                $body
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct EditorController {
    document: Document,
}

impl EditorController {
    pub fn new(document: Document) -> Self {
        EditorController {
            document: document.normalized(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Applies `mutate` to a copy and swaps it in when it reports a change.
    fn commit(&mut self, op: &'static str, mutate: impl FnOnce(&mut Document) -> bool) -> &Document {
        let mut next = self.document.clone();
        if mutate(&mut next) {
            self.document = next.normalized();
            debug!(op, "document updated");
        } else {
            debug!(op, "edit ignored");
        }
        &self.document
    }

    pub fn apply(&mut self, action: EditAction) -> &Document {
        match action {
            EditAction::UpdateField { update } => self.update_field(update),
            EditAction::UpdateContact { field, value } => self.update_contact(field, value),
            EditAction::AddItem { collection, item } => {
                let item = item.unwrap_or_else(|| NewItem::blank(collection));
                if item.collection() != collection {
                    debug!(?collection, "add_item payload does not match collection");
                    return &self.document;
                }
                self.add_item(item)
            }
            EditAction::RemoveItem { collection, index } => self.remove_item(collection, index),
            EditAction::UpdateItem { update } => self.update_item(update),
            EditAction::MoveItem {
                collection,
                index,
                direction,
            } => self.move_item(collection, index, direction),
            EditAction::UpdateFontSize { field, value } => self.update_font_size(field, value),
            EditAction::ToggleSectionVisibility { section } => {
                self.toggle_section_visibility(section)
            }
            EditAction::MoveSection { from, to } => self.move_section(from, to),
            EditAction::DragSection { section, to } => self.drag_section(section, to),
            EditAction::PickPeriod {
                collection,
                index,
                period,
            } => self.pick_period(collection, index, &period),
            EditAction::ImportText { text } => self.import_text(&text),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Fields
    // ────────────────────────────────────────────────────────────────────────

    pub fn update_field(&mut self, update: FieldUpdate) -> &Document {
        self.commit("update_field", move |doc| {
            match update {
                FieldUpdate::Name(v) => doc.name = v,
                FieldUpdate::Title(v) => doc.title = v,
                FieldUpdate::Summary(v) => doc.summary = v,
                FieldUpdate::Skills(v) => doc.skills = v,
                FieldUpdate::Interests(v) => doc.interests = v,
                FieldUpdate::FontSizes(v) => doc.font_sizes = v,
                FieldUpdate::HiddenSections(v) => doc.hidden_sections = v,
                FieldUpdate::ColumnLayout(v) => {
                    if !v.is_valid() {
                        warn!("Rejected column layout that is not a bipartition of the section kinds");
                        return false;
                    }
                    doc.column_layout = v;
                }
                FieldUpdate::ColumnStyle(v) => doc.column_style = v,
                FieldUpdate::SectionStyle(v) => doc.section_style = v,
                FieldUpdate::DateFormat(v) => doc.date_format = v,
                FieldUpdate::DateRangeSeparator(v) => doc.date_range_separator = v,
                FieldUpdate::ProfileImage(v) => doc.profile_image = v,
                FieldUpdate::HideProfileImage(v) => doc.hide_profile_image = v,
            }
            true
        })
    }

    /// Optional contact links are cleared (not stored as empty strings) when blank.
    pub fn update_contact(&mut self, field: ContactField, value: String) -> &Document {
        self.commit("update_contact", move |doc| {
            let optional = |v: String| (!v.trim().is_empty()).then_some(v);
            let contact = &mut doc.contact;
            match field {
                ContactField::Email => contact.email = value,
                ContactField::Phone => contact.phone = value,
                ContactField::Location => contact.location = value,
                ContactField::Website => contact.website = optional(value),
                ContactField::Linkedin => contact.linkedin = optional(value),
                ContactField::Github => contact.github = optional(value),
            }
            true
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Collections
    // ────────────────────────────────────────────────────────────────────────

    /// Prepends, so the newest entry comes first.
    pub fn add_item(&mut self, item: NewItem) -> &Document {
        self.commit("add_item", move |doc| {
            match item {
                NewItem::Education(v) => doc.education.insert(0, v),
                NewItem::Experience(v) => doc.experience.insert(0, v),
                NewItem::Courses(v) => doc.courses.insert(0, v),
                NewItem::Languages(mut v) => {
                    let score = v.score;
                    v.set_score(score);
                    doc.languages.insert(0, v)
                }
                NewItem::Skills(v) => doc.skills.insert(0, v),
                NewItem::Interests(v) => doc.interests.insert(0, v),
            }
            true
        })
    }

    pub fn remove_item(&mut self, collection: Collection, index: usize) -> &Document {
        self.commit("remove_item", |doc| {
            with_collection!(doc, collection, |list| remove_at(list, index))
        })
    }

    pub fn update_item(&mut self, update: ItemUpdate) -> &Document {
        self.commit("update_item", move |doc| match update {
            ItemUpdate::Education { index, patch } => {
                let Some(item) = doc.education.get_mut(index) else {
                    return false;
                };
                match patch {
                    EducationPatch::Degree(v) => item.degree = v,
                    EducationPatch::Institution(v) => item.institution = v,
                    EducationPatch::Period(v) => item.period = v,
                    EducationPatch::Location(v) => item.location = v,
                }
                true
            }
            ItemUpdate::Experience { index, patch } => {
                let Some(item) = doc.experience.get_mut(index) else {
                    return false;
                };
                match patch {
                    ExperiencePatch::Role(v) => item.role = v,
                    ExperiencePatch::Company(v) => item.company = v,
                    ExperiencePatch::Period(v) => item.period = v,
                    ExperiencePatch::Location(v) => item.location = v,
                    ExperiencePatch::Tasks(v) => item.tasks = v,
                    ExperiencePatch::Task { index, text } => match item.tasks.get_mut(index) {
                        Some(task) => *task = text,
                        None => return false,
                    },
                }
                true
            }
            ItemUpdate::Courses { index, patch } => {
                let Some(item) = doc.courses.get_mut(index) else {
                    return false;
                };
                match patch {
                    CoursePatch::Title(v) => item.title = v,
                    CoursePatch::Date(v) => item.date = v,
                    CoursePatch::Provider(v) => item.provider = v,
                }
                true
            }
            ItemUpdate::Languages { index, patch } => {
                let Some(item) = doc.languages.get_mut(index) else {
                    return false;
                };
                match patch {
                    LanguagePatch::Language(v) => item.language = v,
                    LanguagePatch::Level(level) => item.set_level(level),
                    LanguagePatch::Score(score) => item.set_score(score.clamp(0, 100) as u8),
                }
                true
            }
            ItemUpdate::Skills { index, value } => replace_at(&mut doc.skills, index, value),
            ItemUpdate::Interests { index, value } => replace_at(&mut doc.interests, index, value),
        })
    }

    /// Swaps with the neighbour; no-op at either boundary.
    pub fn move_item(&mut self, collection: Collection, index: usize, direction: Direction) -> &Document {
        self.commit("move_item", |doc| {
            with_collection!(doc, collection, |list| swap_neighbour(list, index, direction))
        })
    }

    /// Writes the picked range using the document's date format and separator.
    /// Ignored under the free-text date format and for collections without dates.
    pub fn pick_period(&mut self, collection: Collection, index: usize, period: &PickedPeriod) -> &Document {
        self.commit("pick_period", |doc| {
            let Some(text) = format_period(period, doc.date_format, &doc.date_range_separator) else {
                return false;
            };
            let slot = match collection {
                Collection::Education => doc.education.get_mut(index).map(|i| &mut i.period),
                Collection::Experience => doc.experience.get_mut(index).map(|i| &mut i.period),
                Collection::Courses => doc.courses.get_mut(index).map(|i| &mut i.date),
                Collection::Languages | Collection::Skills | Collection::Interests => None,
            };
            match slot {
                Some(slot) => {
                    *slot = text;
                    true
                }
                None => false,
            }
        })
    }

    // ────────────────────────────────────────────────────────────────────────
    // Typography and layout
    // ────────────────────────────────────────────────────────────────────────

    pub fn update_font_size(&mut self, field: FontField, value: i64) -> &Document {
        self.commit("update_font_size", |doc| {
            doc.font_sizes.set(field, value);
            true
        })
    }

    /// Flips visibility only; the section keeps its slot in the column layout.
    pub fn toggle_section_visibility(&mut self, kind: SectionKind) -> &Document {
        self.commit("toggle_section_visibility", |doc| {
            if !doc.hidden_sections.remove(&kind) {
                doc.hidden_sections.insert(kind);
            }
            true
        })
    }

    pub fn move_section(&mut self, from: SectionSlot, to: SectionSlot) -> &Document {
        self.commit("move_section", |doc| doc.column_layout.move_section(from, to))
    }

    pub fn drag_section(&mut self, kind: SectionKind, to: SectionSlot) -> &Document {
        self.commit("drag_section", |doc| doc.column_layout.drag_section(kind, to))
    }

    /// Merges a plain-text résumé into the live document.
    pub fn import_text(&mut self, text: &str) -> &Document {
        self.commit("import_text", |doc| {
            *doc = parse_resume_text(text, doc);
            true
        })
    }
}

fn remove_at<T>(list: &mut Vec<T>, index: usize) -> bool {
    if index >= list.len() {
        return false;
    }
    list.remove(index);
    true
}

fn replace_at<T>(list: &mut [T], index: usize, value: T) -> bool {
    match list.get_mut(index) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn swap_neighbour<T>(list: &mut [T], index: usize, direction: Direction) -> bool {
    let neighbour = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => index.checked_add(1),
    };
    match neighbour {
        Some(n) if index < list.len() && n < list.len() => {
            list.swap(index, n);
            true
        }
        _ => false,
    }
}

pub mod document;
pub mod record;
pub mod rich_text;
pub mod template;

pub use document::{
    Column, ColumnLayout, ColumnStyle, CourseItem, DateFormat, Document, EducationItem,
    ExperienceItem, FontField, FontSizes, LanguageItem, LanguageLevel, SectionKind, SectionStyle,
};
pub use record::{ExportEnvelope, ResumeRecord, ResumeSummary};
pub use rich_text::RichText;

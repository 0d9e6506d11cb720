// Layout engine.
// Resolves a document's column configuration into a render plan, owns the
// section reorder/move primitives, and estimates page breaks (advisory only).
// Everything here is a pure function of its inputs.

pub mod pagination;
pub mod plan;
pub mod reorder;

// Re-export the public API consumed by the editor, renderers and handlers.
pub use pagination::{estimate_pagination, PaginationHint, Paper};
pub use plan::{plan_for, ColumnGrid, RenderPlan};
pub use reorder::SectionSlot;

//! Editor controller and the typed edit operations it accepts.

pub mod actions;
pub mod controller;
pub mod dates;

pub use actions::EditAction;
pub use controller::EditorController;

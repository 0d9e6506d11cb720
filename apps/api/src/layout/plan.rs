//! Render plan resolution: which visible sections go where, in which order.
//!
//! # Rules
//! - `column_layout` must partition the six section kinds; an invalid layout is
//!   replaced by the default partition (logged, never an error).
//! - Hidden sections are filtered out of the plan but keep their slot in the layout.
//! - `single` style concatenates left then right into one list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{ColumnLayout, ColumnStyle, Document, SectionKind};

/// Relative widths of the two columns (CSS-grid style `fr` units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGrid {
    pub left_fr: u8,
    pub right_fr: u8,
}

impl ColumnGrid {
    /// Grid for a two-column style; `None` for `single`.
    pub fn for_style(style: ColumnStyle) -> Option<ColumnGrid> {
        let (left_fr, right_fr) = match style {
            ColumnStyle::Balanced => (1, 1),
            ColumnStyle::SideLeft => (1, 2),
            ColumnStyle::SideRight => (2, 1),
            ColumnStyle::Single => return None,
        };
        Some(ColumnGrid { left_fr, right_fr })
    }

    /// Share of the content width taken by the left column.
    pub fn left_fraction(&self) -> f32 {
        let total = f32::from(self.left_fr) + f32::from(self.right_fr);
        f32::from(self.left_fr) / total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderPlan {
    TwoColumn {
        grid: ColumnGrid,
        left: Vec<SectionKind>,
        right: Vec<SectionKind>,
    },
    Single {
        sections: Vec<SectionKind>,
    },
}

impl RenderPlan {
    /// All visible sections in reading order (left column first).
    pub fn visible_sections(&self) -> Vec<SectionKind> {
        match self {
            RenderPlan::TwoColumn { left, right, .. } => {
                left.iter().chain(right.iter()).copied().collect()
            }
            RenderPlan::Single { sections } => sections.clone(),
        }
    }
}

/// True when every section kind appears exactly once across both columns.
pub fn is_valid_layout(layout: &ColumnLayout) -> bool {
    let mut seen = BTreeSet::new();
    for kind in layout.left.iter().chain(layout.right.iter()) {
        if !seen.insert(*kind) {
            return false;
        }
    }
    seen.len() == SectionKind::ALL.len()
}

/// Returns the layout unchanged when valid, otherwise the default partition.
pub fn repaired_layout(layout: &ColumnLayout) -> ColumnLayout {
    if is_valid_layout(layout) {
        layout.clone()
    } else {
        warn!(
            "Invalid column layout {:?} / {:?}; falling back to default",
            layout.left, layout.right
        );
        ColumnLayout::default()
    }
}

impl ColumnLayout {
    pub fn is_valid(&self) -> bool {
        is_valid_layout(self)
    }

    pub fn repaired(&self) -> ColumnLayout {
        repaired_layout(self)
    }
}

pub fn resolve_plan(
    layout: &ColumnLayout,
    hidden: &BTreeSet<SectionKind>,
    style: ColumnStyle,
) -> RenderPlan {
    let layout = layout.repaired();
    let visible = |column: &[SectionKind]| -> Vec<SectionKind> {
        column
            .iter()
            .filter(|k| !hidden.contains(*k))
            .copied()
            .collect()
    };

    match ColumnGrid::for_style(style) {
        Some(grid) => RenderPlan::TwoColumn {
            grid,
            left: visible(layout.left.as_slice()),
            right: visible(layout.right.as_slice()),
        },
        None => {
            let mut sections = visible(layout.left.as_slice());
            sections.extend(visible(layout.right.as_slice()));
            RenderPlan::Single { sections }
        }
    }
}

pub fn plan_for(doc: &Document) -> RenderPlan {
    resolve_plan(&doc.column_layout, &doc.hidden_sections, doc.column_style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SectionKind::*;

    fn hidden(kinds: &[SectionKind]) -> BTreeSet<SectionKind> {
        kinds.iter().copied().collect()
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert!(is_valid_layout(&ColumnLayout::default()));
    }

    #[test]
    fn test_duplicate_or_missing_kind_is_invalid() {
        let dup = ColumnLayout {
            left: vec![Experience, Education, Skills],
            right: vec![Skills, Courses, Languages, Interests],
        };
        assert!(!is_valid_layout(&dup));

        let missing = ColumnLayout {
            left: vec![Experience],
            right: vec![Skills, Courses, Languages, Interests],
        };
        assert!(!is_valid_layout(&missing));
    }

    #[test]
    fn test_repaired_keeps_valid_and_resets_invalid() {
        let custom = ColumnLayout {
            left: vec![Skills, Experience, Education],
            right: vec![Courses, Languages, Interests],
        };
        assert_eq!(custom.repaired(), custom);
        assert!(custom.is_valid());

        let broken = ColumnLayout {
            left: vec![Skills],
            right: vec![Skills],
        };
        assert!(!broken.is_valid());
        assert_eq!(broken.repaired(), ColumnLayout::default());
    }

    #[test]
    fn test_balanced_plan_filters_hidden() {
        let plan = resolve_plan(
            &ColumnLayout::default(),
            &hidden(&[Education, Languages]),
            ColumnStyle::Balanced,
        );
        assert_eq!(
            plan,
            RenderPlan::TwoColumn {
                grid: ColumnGrid { left_fr: 1, right_fr: 1 },
                left: vec![Experience],
                right: vec![Skills, Courses, Interests],
            }
        );
    }

    #[test]
    fn test_single_plan_concatenates_left_then_right() {
        let plan = resolve_plan(&ColumnLayout::default(), &hidden(&[Skills]), ColumnStyle::Single);
        assert_eq!(
            plan,
            RenderPlan::Single {
                sections: vec![Experience, Education, Courses, Languages, Interests],
            }
        );
    }

    #[test]
    fn test_invalid_layout_falls_back_to_default() {
        let broken = ColumnLayout {
            left: vec![Experience, Experience],
            right: vec![],
        };
        let plan = resolve_plan(&broken, &BTreeSet::new(), ColumnStyle::SideLeft);
        match plan {
            RenderPlan::TwoColumn { grid, left, right } => {
                assert_eq!(grid, ColumnGrid { left_fr: 1, right_fr: 2 });
                assert_eq!(left, vec![Experience, Education]);
                assert_eq!(right.len(), 4);
            }
            other => panic!("expected two-column plan, got {other:?}"),
        }
    }

    #[test]
    fn test_side_right_grid_fraction() {
        let grid = ColumnGrid::for_style(ColumnStyle::SideRight).unwrap();
        assert!((grid.left_fraction() - 2.0 / 3.0).abs() < 1e-6);
        assert!(ColumnGrid::for_style(ColumnStyle::Single).is_none());
    }

    #[test]
    fn test_visible_sections_reading_order() {
        let plan = resolve_plan(&ColumnLayout::default(), &BTreeSet::new(), ColumnStyle::Balanced);
        assert_eq!(plan.visible_sections(), SectionKind::ALL.to_vec());
    }
}

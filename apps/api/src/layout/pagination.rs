//! Advisory page-break estimation.
//!
//! The preview has no real line breaker, so heights are estimated from the
//! visual tree: every glyph is assumed to be half an em wide and every line
//! 1.3 em tall. The result drives dashed page-break guides in the preview and
//! never feeds back into the render plan.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::{PageBody, RenderedSection, VisualNode};

const PT_TO_MM: f32 = 0.3528;
const AVG_GLYPH_EM: f32 = 0.5;
const LINE_HEIGHT_EM: f32 = 1.3;

const PAGE_MARGIN_MM: f32 = 10.0;
const COLUMN_GAP_MM: f32 = 12.0;
const SECTION_GAP_MM: f32 = 6.0;
const ITEM_GAP_MM: f32 = 2.0;
const HEADING_RULE_MM: f32 = 3.0;
const TAG_PADDING_MM: f32 = 4.0;
const DOT_ROW_MM: f32 = 3.0;
const IMAGE_MM: f32 = 32.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    #[default]
    Letter,
    A4,
}

impl Paper {
    /// `(width, height)` in millimetres.
    pub fn size_mm(&self) -> (f32, f32) {
        match self {
            Paper::Letter => (215.9, 279.4),
            Paper::A4 => (210.0, 297.0),
        }
    }

    pub fn width_mm(&self) -> f32 {
        self.size_mm().0
    }

    pub fn height_mm(&self) -> f32 {
        self.size_mm().1
    }
}

impl FromStr for Paper {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(Paper::Letter),
            "a4" => Ok(Paper::A4),
            other => Err(format!("unknown paper size '{other}' (expected letter or a4)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHint {
    pub paper: Paper,
    pub page_height_mm: f32,
    pub estimated_height_mm: f32,
    pub page_count: u32,
    /// Vertical offsets of the page-break guides, top of page one = 0.
    pub guides_mm: Vec<f32>,
    pub overflows: bool,
}

pub fn estimate_pagination(
    header: &[VisualNode],
    contact_bar: &[VisualNode],
    body: &PageBody,
    paper: Paper,
) -> PaginationHint {
    let content_width = paper.width_mm() - 2.0 * PAGE_MARGIN_MM;

    let header_mm = stack_height(header, content_width) + 2.0 * PAGE_MARGIN_MM;
    let contact_mm = wrap_height(contact_bar, content_width) + ITEM_GAP_MM * 2.0;
    let body_mm = match body {
        PageBody::TwoColumn { grid, left, right } => {
            let shared = content_width - COLUMN_GAP_MM;
            let left_width = shared * grid.left_fraction();
            let right_width = shared - left_width;
            sections_height(left, left_width).max(sections_height(right, right_width))
        }
        PageBody::Single { sections } => sections_height(sections, content_width),
    } + 2.0 * PAGE_MARGIN_MM;

    let total = header_mm + contact_mm + body_mm;
    let page_height = paper.height_mm();
    let page_count = ((total / page_height).ceil() as u32).max(1);
    let guides_mm: Vec<f32> = (1..page_count).map(|k| k as f32 * page_height).collect();

    debug!(
        header_mm,
        contact_mm, body_mm, total, page_count, "estimated page height"
    );

    PaginationHint {
        paper,
        page_height_mm: page_height,
        estimated_height_mm: total,
        page_count,
        guides_mm,
        overflows: page_count > 1,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Height model
// ────────────────────────────────────────────────────────────────────────────

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_HEIGHT_EM
}

fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * AVG_GLYPH_EM
}

/// Height of `text` wrapped into `width` millimetres; blank text takes no space.
fn wrapped_text_mm(text: &str, size_pt: f32, width: f32) -> f32 {
    if text.trim().is_empty() || width <= 0.0 {
        return 0.0;
    }
    let lines = (text_width_mm(text, size_pt) / width).ceil().max(1.0);
    lines * line_height_mm(size_pt)
}

fn sections_height(sections: &[RenderedSection], width: f32) -> f32 {
    sections
        .iter()
        .map(|section| {
            node_height(&section.heading, width)
                + stack_height(&section.body, width)
                + SECTION_GAP_MM
        })
        .sum()
}

fn stack_height(nodes: &[VisualNode], width: f32) -> f32 {
    let heights: Vec<f32> = nodes
        .iter()
        .map(|n| node_height(n, width))
        .filter(|h| *h > 0.0)
        .collect();
    let gaps = heights.len().saturating_sub(1) as f32 * ITEM_GAP_MM;
    heights.iter().sum::<f32>() + gaps
}

/// Inline children packed greedily into lines of `width`.
fn wrap_height(nodes: &[VisualNode], width: f32) -> f32 {
    let mut total = 0.0;
    let mut line_width = 0.0;
    let mut line_height: f32 = 0.0;

    for node in nodes {
        let (w, h) = inline_extent(node);
        if w <= 0.0 {
            continue;
        }
        if line_width > 0.0 && line_width + w > width {
            total += line_height + ITEM_GAP_MM;
            line_width = 0.0;
            line_height = 0.0;
        }
        line_width += w;
        line_height = line_height.max(h);
    }
    total + line_height
}

fn inline_extent(node: &VisualNode) -> (f32, f32) {
    match node {
        VisualNode::Pill { text, size_pt, .. } | VisualNode::Chip { text, size_pt } => (
            text_width_mm(text, *size_pt) + TAG_PADDING_MM,
            line_height_mm(*size_pt) + ITEM_GAP_MM,
        ),
        VisualNode::Text { text, size_pt, .. } => (
            text_width_mm(text, *size_pt) + TAG_PADDING_MM,
            line_height_mm(*size_pt),
        ),
        other => (1.0, node_height(other, f32::INFINITY)),
    }
}

fn node_height(node: &VisualNode, width: f32) -> f32 {
    match node {
        VisualNode::Heading { text, size_pt, .. } => {
            wrapped_text_mm(text, *size_pt, width) + HEADING_RULE_MM
        }
        VisualNode::Text { text, size_pt, .. } | VisualNode::Bullet { text, size_pt } => {
            wrapped_text_mm(text, *size_pt, width)
        }
        VisualNode::Rich { runs, size_pt } => {
            let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
            wrapped_text_mm(&joined, *size_pt, width)
        }
        VisualNode::Pill { .. } | VisualNode::Chip { .. } => inline_extent(node).1,
        VisualNode::DotRating { .. } => DOT_ROW_MM,
        VisualNode::Image { .. } => IMAGE_MM,
        VisualNode::Row { children } => {
            if children.is_empty() {
                return 0.0;
            }
            let cell = width / children.len() as f32;
            children
                .iter()
                .map(|c| node_height(c, cell))
                .fold(0.0, f32::max)
        }
        VisualNode::Stack { children } => stack_height(children, width),
        VisualNode::Wrap { children } => wrap_height(children, width),
        VisualNode::Grid { columns, children } => {
            let columns = usize::from((*columns).max(1));
            let cell = width / columns as f32;
            let rows: Vec<f32> = children
                .chunks(columns)
                .map(|row| row.iter().map(|c| node_height(c, cell)).fold(0.0, f32::max))
                .collect();
            let gaps = rows.len().saturating_sub(1) as f32 * ITEM_GAP_MM;
            rows.iter().sum::<f32>() + gaps
        }
    }
}

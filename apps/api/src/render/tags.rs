//! Skills (filled pills) and interests (outlined chips). Both render as a flowing
//! tag cloud at tag size, and both vanish entirely when nothing is filled in.

use crate::models::SectionKind;
use crate::render::header::section_heading;
use crate::render::{RenderContext, RenderedSection, VisualNode};

pub fn render_skills(
    items: &[String],
    ctx: &RenderContext,
    visible: impl Fn(&String) -> bool,
) -> Option<RenderedSection> {
    let pills: Vec<VisualNode> = items
        .iter()
        .filter(|&item| visible(item))
        .map(|skill| VisualNode::Pill {
            text: skill.trim().to_string(),
            size_pt: ctx.tag_pt(),
            background: ctx.theme.primary.clone(),
        })
        .collect();
    tag_section(SectionKind::Skills, pills, ctx)
}

pub fn render_interests(
    items: &[String],
    ctx: &RenderContext,
    visible: impl Fn(&String) -> bool,
) -> Option<RenderedSection> {
    let chips: Vec<VisualNode> = items
        .iter()
        .filter(|&item| visible(item))
        .map(|interest| VisualNode::Chip {
            text: interest.trim().to_string(),
            size_pt: ctx.tag_pt(),
        })
        .collect();
    tag_section(SectionKind::Interests, chips, ctx)
}

fn tag_section(
    kind: SectionKind,
    tags: Vec<VisualNode>,
    ctx: &RenderContext,
) -> Option<RenderedSection> {
    if tags.is_empty() {
        return None;
    }
    Some(RenderedSection {
        kind,
        heading: section_heading(kind, ctx),
        body: vec![VisualNode::Wrap { children: tags }],
    })
}

//! Full-page composition: header band, contact bar, then the resolved plan's
//! columns with each section rendered through the dispatch table.

use serde::{Deserialize, Serialize};

use crate::layout::{estimate_pagination, plan_for, ColumnGrid, PaginationHint, Paper, RenderPlan};
use crate::models::{Document, RichText, SectionKind};
use crate::render::{render_section, RenderContext, RenderedSection, TextRole, Theme, VisualNode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PageBody {
    TwoColumn {
        grid: ColumnGrid,
        left: Vec<RenderedSection>,
        right: Vec<RenderedSection>,
    },
    Single {
        sections: Vec<RenderedSection>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub paper: Paper,
    pub theme: Theme,
    pub header: Vec<VisualNode>,
    pub contact_bar: Vec<VisualNode>,
    pub body: PageBody,
    pub pagination: PaginationHint,
}

pub fn render_page(doc: &Document, theme: Theme, paper: Paper) -> RenderedPage {
    let ctx = RenderContext::new(doc, theme);
    let header = render_header(doc);
    let contact_bar = render_contact_bar(doc);

    let body = match plan_for(doc) {
        RenderPlan::TwoColumn { grid, left, right } => PageBody::TwoColumn {
            grid,
            left: render_column(&left, doc, &ctx),
            right: render_column(&right, doc, &ctx),
        },
        RenderPlan::Single { sections } => PageBody::Single {
            sections: render_column(&sections, doc, &ctx),
        },
    };

    let pagination = estimate_pagination(&header, &contact_bar, &body, paper);
    RenderedPage {
        paper,
        theme: ctx.theme,
        header,
        contact_bar,
        body,
        pagination,
    }
}

fn render_column(kinds: &[SectionKind], doc: &Document, ctx: &RenderContext) -> Vec<RenderedSection> {
    kinds
        .iter()
        .filter_map(|kind| render_section(*kind, doc, ctx))
        .collect()
}

fn rich(text: &RichText, size: u16) -> Option<VisualNode> {
    (!text.is_blank()).then(|| VisualNode::Rich {
        runs: text.runs().to_vec(),
        size_pt: f32::from(size),
    })
}

fn render_header(doc: &Document) -> Vec<VisualNode> {
    let sizes = &doc.font_sizes;
    let mut nodes: Vec<VisualNode> = [
        rich(&doc.name, sizes.name),
        rich(&doc.title, sizes.title),
        rich(&doc.summary, sizes.summary),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !doc.hide_profile_image {
        if let Some(src) = doc.profile_image.as_deref().filter(|s| !s.trim().is_empty()) {
            nodes.push(VisualNode::Image {
                src: src.to_string(),
            });
        }
    }
    nodes
}

fn render_contact_bar(doc: &Document) -> Vec<VisualNode> {
    let contact = &doc.contact;
    let size = f32::from(doc.font_sizes.contact);
    [
        Some(contact.email.as_str()),
        Some(contact.phone.as_str()),
        Some(contact.location.as_str()),
        contact.website.as_deref(),
        contact.linkedin.as_deref(),
        contact.github.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|value| !value.trim().is_empty())
    .map(|value| VisualNode::text(value.trim(), size, TextRole::Body))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnStyle;

    fn kinds(sections: &[RenderedSection]) -> Vec<SectionKind> {
        sections.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_page_follows_plan_and_hidden_sections() {
        let mut doc = Document::template();
        doc.hidden_sections.insert(SectionKind::Courses);
        let page = render_page(&doc, Theme::default(), Paper::Letter);
        match page.body {
            PageBody::TwoColumn { left, right, .. } => {
                assert_eq!(kinds(&left), vec![SectionKind::Experience, SectionKind::Education]);
                assert_eq!(
                    kinds(&right),
                    vec![SectionKind::Skills, SectionKind::Languages, SectionKind::Interests]
                );
            }
            other => panic!("expected two columns, got {other:?}"),
        }
    }

    #[test]
    fn test_single_style_renders_one_list() {
        let mut doc = Document::template();
        doc.column_style = ColumnStyle::Single;
        let page = render_page(&doc, Theme::default(), Paper::A4);
        let PageBody::Single { sections } = page.body else {
            panic!("expected single column");
        };
        assert_eq!(kinds(&sections), SectionKind::ALL.to_vec());
        assert_eq!(page.pagination.paper, Paper::A4);
    }

    #[test]
    fn test_empty_skills_are_dropped_from_page() {
        let mut doc = Document::template();
        doc.skills = vec![" ".to_string()];
        let page = render_page(&doc, Theme::default(), Paper::Letter);
        let PageBody::TwoColumn { right, .. } = page.body else {
            panic!("expected two columns");
        };
        assert!(!kinds(&right).contains(&SectionKind::Skills));
    }

    #[test]
    fn test_contact_bar_skips_empty_entries() {
        let mut doc = Document::default();
        doc.contact.email = "ana@example.com".to_string();
        doc.contact.github = Some("github.com/ana".to_string());
        doc.contact.linkedin = Some("  ".to_string());
        let bar = render_contact_bar(&doc);
        assert_eq!(bar.len(), 2);
    }

    #[test]
    fn test_profile_image_respects_hide_flag() {
        let mut doc = Document::default();
        doc.name = RichText::plain("Ana");
        doc.profile_image = Some("data:image/png;base64,AAAA".to_string());
        assert!(render_header(&doc)
            .iter()
            .any(|n| matches!(n, VisualNode::Image { .. })));

        doc.hide_profile_image = true;
        let header = render_header(&doc);
        assert_eq!(header.len(), 1);
        assert!(matches!(header[0], VisualNode::Rich { .. }));
    }
}

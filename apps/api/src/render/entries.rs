//! Experience, education and course entries: headline, organisation line,
//! a period/location row at secondary size, and (for experience) task bullets.

use crate::models::{CourseItem, EducationItem, ExperienceItem, SectionKind};
use crate::render::header::section_heading;
use crate::render::{RenderContext, RenderedSection, TextRole, VisualNode};

const PROVIDER_LABEL: &str = "Impartido por:";

pub fn render_experience(
    items: &[ExperienceItem],
    ctx: &RenderContext,
    visible: impl Fn(&ExperienceItem) -> bool,
) -> RenderedSection {
    let body = items
        .iter()
        .filter(|&item| visible(item))
        .map(|item| {
            let mut children = headline(&item.role, &item.company, ctx);
            children.extend(period_row(&item.period, &item.location, ctx));
            let bullets: Vec<VisualNode> = item
                .tasks
                .iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| VisualNode::Bullet {
                    text: t.clone(),
                    size_pt: ctx.content_pt(),
                })
                .collect();
            if !bullets.is_empty() {
                children.push(VisualNode::Stack { children: bullets });
            }
            VisualNode::Stack { children }
        })
        .collect();

    RenderedSection {
        kind: SectionKind::Experience,
        heading: section_heading(SectionKind::Experience, ctx),
        body,
    }
}

pub fn render_education(
    items: &[EducationItem],
    ctx: &RenderContext,
    visible: impl Fn(&EducationItem) -> bool,
) -> RenderedSection {
    let body = items
        .iter()
        .filter(|&item| visible(item))
        .map(|item| {
            let mut children = headline(&item.degree, &item.institution, ctx);
            children.extend(period_row(&item.period, &item.location, ctx));
            VisualNode::Stack { children }
        })
        .collect();

    RenderedSection {
        kind: SectionKind::Education,
        heading: section_heading(SectionKind::Education, ctx),
        body,
    }
}

pub fn render_courses(
    items: &[CourseItem],
    ctx: &RenderContext,
    visible: impl Fn(&CourseItem) -> bool,
) -> RenderedSection {
    let body = items
        .iter()
        .filter(|&item| visible(item))
        .map(|item| {
            let mut top = Vec::new();
            if !item.title.trim().is_empty() {
                top.push(VisualNode::text(&item.title, ctx.content_pt(), TextRole::Primary));
            }
            if !item.date.trim().is_empty() {
                top.push(VisualNode::text(
                    &item.date,
                    ctx.secondary_pt(),
                    TextRole::Secondary,
                ));
            }

            let mut children = Vec::new();
            if !top.is_empty() {
                children.push(VisualNode::Row { children: top });
            }
            if !item.provider.trim().is_empty() {
                children.push(VisualNode::italic(
                    &format!("{PROVIDER_LABEL} {}", item.provider.trim()),
                    ctx.secondary_pt(),
                    TextRole::Secondary,
                ));
            }
            VisualNode::Stack { children }
        })
        .collect();

    RenderedSection {
        kind: SectionKind::Courses,
        heading: section_heading(SectionKind::Courses, ctx),
        body,
    }
}

fn headline(title: &str, organisation: &str, ctx: &RenderContext) -> Vec<VisualNode> {
    let mut nodes = Vec::new();
    if !title.trim().is_empty() {
        nodes.push(VisualNode::text(title, ctx.content_pt(), TextRole::Primary));
    }
    if !organisation.trim().is_empty() {
        nodes.push(VisualNode::text(
            organisation,
            ctx.content_pt(),
            TextRole::Emphasis,
        ));
    }
    nodes
}

fn period_row(period: &str, location: &str, ctx: &RenderContext) -> Option<VisualNode> {
    let mut children = Vec::new();
    if !period.trim().is_empty() {
        children.push(VisualNode::text(period, ctx.secondary_pt(), TextRole::Secondary));
    }
    if !location.trim().is_empty() {
        children.push(VisualNode::italic(
            location,
            ctx.secondary_pt(),
            TextRole::Secondary,
        ));
    }
    (!children.is_empty()).then_some(VisualNode::Row { children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use crate::render::{HasContent, Theme};

    fn ctx() -> RenderContext {
        RenderContext::new(&Document::default(), Theme::default())
    }

    #[test]
    fn test_blank_experience_entry_is_invisible_but_kept() {
        let mut doc = Document::default();
        doc.experience.push(ExperienceItem {
            role: String::new(),
            company: String::new(),
            period: String::new(),
            location: String::new(),
            tasks: vec![String::new()],
        });
        let section = render_experience(&doc.experience, &ctx(), ExperienceItem::has_content);
        assert!(section.body.is_empty());
        assert_eq!(doc.experience.len(), 1);
    }

    #[test]
    fn test_experience_secondary_row_is_scaled() {
        let items = vec![ExperienceItem {
            role: "Dev".to_string(),
            company: "ACME".to_string(),
            period: "2020 - 2021".to_string(),
            location: "Remote".to_string(),
            tasks: vec!["Shipped".to_string(), " ".to_string()],
        }];
        let ctx = ctx();
        let section = render_experience(&items, &ctx, ExperienceItem::has_content);
        let VisualNode::Stack { children } = &section.body[0] else {
            panic!("expected stack");
        };
        assert_eq!(children.len(), 4);
        let VisualNode::Row { children: row } = &children[2] else {
            panic!("expected period row");
        };
        match &row[0] {
            VisualNode::Text { size_pt, .. } => {
                assert!((size_pt - ctx.content_pt() * 0.85).abs() < 1e-4)
            }
            other => panic!("unexpected {other:?}"),
        }
        let VisualNode::Stack { children: bullets } = &children[3] else {
            panic!("expected bullets");
        };
        assert_eq!(bullets.len(), 1, "blank task must be skipped");
    }

    #[test]
    fn test_course_provider_gets_label() {
        let items = vec![CourseItem {
            title: "Excel".to_string(),
            date: String::new(),
            provider: "Platzi".to_string(),
        }];
        let section = render_courses(&items, &ctx(), CourseItem::has_content);
        let VisualNode::Stack { children } = &section.body[0] else {
            panic!("expected stack");
        };
        assert!(matches!(
            &children[1],
            VisualNode::Text { text, italic: true, .. } if text == "Impartido por: Platzi"
        ));
    }

    #[test]
    fn test_education_section_keeps_header_when_empty() {
        let section = render_education(&[], &ctx(), EducationItem::has_content);
        assert!(section.body.is_empty());
        assert!(matches!(section.heading, VisualNode::Heading { ref text, .. } if text == "EDUCACIÓN"));
    }
}

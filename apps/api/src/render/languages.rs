use crate::models::{LanguageItem, SectionKind};
use crate::render::header::section_heading;
use crate::render::{RenderContext, RenderedSection, TextRole, VisualNode, NEUTRAL_COLOR};

pub const RATING_DOTS: u8 = 5;

/// Discrete 0–5 dot rating: `round(score / 20)`.
pub fn dot_rating(score: u8) -> u8 {
    (f32::from(score) / 20.0).round().clamp(0.0, f32::from(RATING_DOTS)) as u8
}

/// Two-column grid of languages, each with a dot rating in the accent colour
/// and the level label underneath.
pub fn render_languages(
    items: &[LanguageItem],
    ctx: &RenderContext,
    visible: impl Fn(&LanguageItem) -> bool,
) -> RenderedSection {
    let cells: Vec<VisualNode> = items
        .iter()
        .filter(|&item| visible(item))
        .map(|item| VisualNode::Stack {
            children: vec![
                VisualNode::Row {
                    children: vec![
                        VisualNode::text(&item.language, ctx.content_pt(), TextRole::Primary),
                        VisualNode::DotRating {
                            filled: dot_rating(item.score),
                            total: RATING_DOTS,
                            filled_color: ctx.theme.accent.clone(),
                            empty_color: NEUTRAL_COLOR.to_string(),
                        },
                    ],
                },
                VisualNode::italic(item.level.label(), ctx.secondary_pt(), TextRole::Secondary),
            ],
        })
        .collect();

    let body = if cells.is_empty() {
        Vec::new()
    } else {
        vec![VisualNode::Grid {
            columns: 2,
            children: cells,
        }]
    };

    RenderedSection {
        kind: SectionKind::Languages,
        heading: section_heading(SectionKind::Languages, ctx),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, LanguageLevel};
    use crate::render::{HasContent, Theme};

    #[test]
    fn test_dot_rating_rounds_and_clamps() {
        assert_eq!(dot_rating(0), 0);
        assert_eq!(dot_rating(9), 0);
        assert_eq!(dot_rating(10), 1);
        assert_eq!(dot_rating(40), 2);
        assert_eq!(dot_rating(70), 4);
        assert_eq!(dot_rating(100), 5);
        assert_eq!(dot_rating(255), 5);
    }

    #[test]
    fn test_rating_uses_accent_colour() {
        let theme = Theme {
            accent: "#ff0000".to_string(),
            ..Theme::default()
        };
        let ctx = RenderContext::new(&Document::default(), theme);
        let items = vec![LanguageItem::new("Inglés", LanguageLevel::Avanzado)];
        let section = render_languages(&items, &ctx, LanguageItem::has_content);

        let VisualNode::Grid { children, .. } = &section.body[0] else {
            panic!("expected grid");
        };
        let VisualNode::Stack { children: cell } = &children[0] else {
            panic!("expected cell");
        };
        let VisualNode::Row { children: row } = &cell[0] else {
            panic!("expected row");
        };
        assert_eq!(
            row[1],
            VisualNode::DotRating {
                filled: 3,
                total: 5,
                filled_color: "#ff0000".to_string(),
                empty_color: NEUTRAL_COLOR.to_string(),
            }
        );
    }

    #[test]
    fn test_unnamed_language_is_skipped() {
        let ctx = RenderContext::new(&Document::default(), Theme::default());
        let items = vec![LanguageItem::new("  ", LanguageLevel::Nativo)];
        let section = render_languages(&items, &ctx, LanguageItem::has_content);
        assert!(section.body.is_empty());
    }
}

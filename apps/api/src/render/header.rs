//! Section header decoration. Purely cosmetic: the decoration never changes a
//! section's content or position.

use serde::{Deserialize, Serialize};

use crate::models::{SectionKind, SectionStyle};
use crate::render::{RenderContext, VisualNode, NEUTRAL_COLOR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HeaderDecoration {
    /// Modern: accent-coloured rule under the title.
    BottomBorder { color: String, width_px: u8 },
    /// Elegant: bar on the left plus a faint trailing rule.
    LeftBorder { color: String, width_px: u8, trailing_rule: bool },
    /// Classic: thin grey rule, title slightly faded.
    MutedBottomBorder { color: String, width_px: u8 },
}

pub fn decoration_for(style: SectionStyle, accent: &str) -> HeaderDecoration {
    match style {
        SectionStyle::Modern => HeaderDecoration::BottomBorder {
            color: accent.to_string(),
            width_px: 2,
        },
        SectionStyle::Elegant => HeaderDecoration::LeftBorder {
            color: "#f3f4f6".to_string(),
            width_px: 4,
            trailing_rule: true,
        },
        SectionStyle::Classic => HeaderDecoration::MutedBottomBorder {
            color: NEUTRAL_COLOR.to_string(),
            width_px: 1,
        },
    }
}

pub fn section_heading(kind: SectionKind, ctx: &RenderContext) -> VisualNode {
    VisualNode::Heading {
        text: kind.heading().to_string(),
        size_pt: f32::from(ctx.font_sizes.section_headers),
        color: ctx.theme.accent.clone(),
        decoration: decoration_for(ctx.section_style, &ctx.theme.accent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use crate::render::{render_section, Theme};

    #[test]
    fn test_decoration_per_style() {
        assert!(matches!(
            decoration_for(SectionStyle::Modern, "#123456"),
            HeaderDecoration::BottomBorder { ref color, .. } if color == "#123456"
        ));
        assert!(matches!(
            decoration_for(SectionStyle::Elegant, "#123456"),
            HeaderDecoration::LeftBorder { .. }
        ));
        assert!(matches!(
            decoration_for(SectionStyle::Classic, "#123456"),
            HeaderDecoration::MutedBottomBorder { .. }
        ));
    }

    #[test]
    fn test_style_does_not_change_body() {
        let mut doc = Document::template();
        let modern = {
            let ctx = RenderContext::new(&doc, Theme::default());
            render_section(SectionKind::Experience, &doc, &ctx).unwrap()
        };
        doc.section_style = SectionStyle::Elegant;
        let ctx = RenderContext::new(&doc, Theme::default());
        let elegant = render_section(SectionKind::Experience, &doc, &ctx).unwrap();
        assert_eq!(modern.body, elegant.body);
        assert_ne!(modern.heading, elegant.heading);
    }
}

//! Minimal inline rich text: a sequence of runs, each carrying a bold/italic flag.
//!
//! Free-text fields (name, title, summary) are stored as runs instead of raw markup
//! so documents stay serializable and diffable. Older exports that stored these
//! fields as markup strings are still accepted on input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9]*)[^>]*>").expect("valid tag regex"));

/// One styled span of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RichTextRepr", into = "Vec<TextRun>")]
pub struct RichText {
    runs: Vec<TextRun>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RichTextRepr {
    Markup(String),
    Runs(Vec<TextRun>),
}

impl From<RichTextRepr> for RichText {
    fn from(repr: RichTextRepr) -> Self {
        match repr {
            RichTextRepr::Markup(s) => RichText::from_markup(&s),
            RichTextRepr::Runs(runs) => RichText::from_runs(runs),
        }
    }
}

impl From<RichText> for Vec<TextRun> {
    fn from(text: RichText) -> Self {
        text.runs
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        RichText::plain(s)
    }
}

impl RichText {
    /// A single unstyled run. Empty input yields an empty text.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return RichText::default();
        }
        RichText {
            runs: vec![TextRun {
                text,
                bold: false,
                italic: false,
            }],
        }
    }

    /// Builds from runs, dropping empty ones and merging neighbours with equal style.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());
        for run in runs.into_iter().filter(|r| !r.text.is_empty()) {
            match merged.last_mut() {
                Some(last) if last.bold == run.bold && last.italic == run.italic => {
                    last.text.push_str(&run.text);
                }
                _ => merged.push(run),
            }
        }
        RichText { runs: merged }
    }

    /// Parses inline markup. `<b>`/`<strong>` toggle bold, `<i>`/`<em>` toggle italic,
    /// `<br>` becomes a space and every other tag is dropped.
    pub fn from_markup(markup: &str) -> Self {
        let mut runs = Vec::new();
        let mut bold_depth = 0usize;
        let mut italic_depth = 0usize;
        let mut cursor = 0;

        for caps in TAG_RE.captures_iter(markup) {
            let Some(whole) = caps.get(0) else { continue };
            let closing = !caps[1].is_empty();
            let tag = caps[2].to_ascii_lowercase();

            let mut text = decode_entities(&markup[cursor..whole.start()]);
            if tag == "br" {
                text.push(' ');
            }
            runs.push(TextRun {
                text,
                bold: bold_depth > 0,
                italic: italic_depth > 0,
            });
            cursor = whole.end();

            let depth = match tag.as_str() {
                "b" | "strong" => &mut bold_depth,
                "i" | "em" => &mut italic_depth,
                _ => continue,
            };
            if closing {
                *depth = depth.saturating_sub(1);
            } else {
                *depth += 1;
            }
        }

        runs.push(TextRun {
            text: decode_entities(&markup[cursor..]),
            bold: bold_depth > 0,
            italic: italic_depth > 0,
        });
        RichText::from_runs(runs)
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Concatenated text with all styling removed.
    pub fn to_plain(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Serializes back to the minimal markup understood by [`RichText::from_markup`].
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            let mut piece = escape(&run.text);
            if run.italic {
                piece = format!("<i>{piece}</i>");
            }
            if run.bold {
                piece = format!("<b>{piece}</b>");
            }
            out.push_str(&piece);
        }
        out
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

//! Search-term highlighting.
//!
//! Splits a text into plain and marked segments, marking every case-insensitive
//! occurrence of the term (left to right, non-overlapping). The term is matched
//! literally: regex metacharacters in it have no special meaning. Callers always pass
//! the original text, so re-highlighting with a new term can never nest markers.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Mark(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(t) | Segment::Mark(t) => t,
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Segment::Mark(_))
    }
}

/// Concatenates segments back into the text they were cut from.
pub fn plain_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

/// A compiled term, reused across all titles of one render pass.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            return Self { pattern: None };
        }

        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Self {
                pattern: Some(pattern),
            },
            Err(e) => {
                debug!(error = %e, "highlight pattern rejected, titles stay plain");
                Self { pattern: None }
            }
        }
    }

    pub fn segments(&self, text: &str) -> Vec<Segment> {
        let Some(pattern) = &self.pattern else {
            return plain(text);
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Plain(text[last..m.start()].to_string()));
            }
            segments.push(Segment::Mark(m.as_str().to_string()));
            last = m.end();
        }
        if last < text.len() {
            segments.push(Segment::Plain(text[last..].to_string()));
        }
        segments
    }
}

fn plain(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::Plain(text.to_string())]
    }
}

/// One-shot convenience over [`Highlighter`].
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    Highlighter::new(term).segments(text)
}

//! Replays a recorded interaction against a listing on a virtual clock.
//!
//! A script is JSON lines, one timed event per line, with times in milliseconds since
//! the page loaded:
//!
//! ```text
//! {"at": 0,   "event": {"select_category": "web"}}
//! {"at": 120, "event": {"search_input": {"text": "si"}}}
//! {"at": 180, "event": {"search_input": {"source": "mobile", "text": "site"}}}
//! {"at": 900, "event": "next_page"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Times may repeat but never go
//! backwards. A frame is captured for the initial display and every time a render is
//! applied.

use crate::catalog::Catalog;
use crate::commands::list::ignored_message;
use crate::commands::{CmdMessage, CmdResult, Frame};
use crate::controls::Controls;
use crate::error::{FolioError, Result};
use crate::events::UiEvent;
use crate::listing::{Listing, ListingOptions, Outcome};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since start.
    pub at: u64,
    pub event: UiEvent,
    #[serde(skip)]
    pub line: usize,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    let mut steps: Vec<ScriptStep> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut step: ScriptStep =
            serde_json::from_str(trimmed).map_err(|e| FolioError::Script {
                line,
                message: e.to_string(),
            })?;
        step.line = line;

        if let Some(previous) = steps.last()
            && step.at < previous.at
        {
            return Err(FolioError::Script {
                line,
                message: format!(
                    "time goes backwards ({} ms after {} ms)",
                    step.at, previous.at
                ),
            });
        }
        steps.push(step);
    }

    Ok(steps)
}

pub fn run(
    catalog: Catalog,
    controls: Option<Controls>,
    options: ListingOptions,
    script: &str,
) -> Result<CmdResult> {
    let steps = parse_script(script)?;
    let mut result = CmdResult::default();

    if catalog.is_empty() {
        result.add_message(CmdMessage::warning(
            "Nothing to replay: the catalog is empty.",
        ));
        return Ok(result);
    }

    let controls = controls.unwrap_or_else(|| Controls::full(&catalog));
    let mut listing = Listing::new(catalog, controls, options);
    let mut frames = vec![Frame::capture(&listing, Duration::ZERO)];

    for step in steps {
        let at = Duration::from_millis(step.at);
        advance(&mut listing, Some(at), &mut frames);

        let label = step.event.to_string();
        let outcome = listing.dispatch(step.event, at);
        debug!(line = step.line, ?at, ?outcome, "script step");
        if let Outcome::Ignored(reason) = outcome {
            let message = ignored_message(&label, reason);
            result.add_message(CmdMessage {
                content: format!("line {}: {}", step.line, message.content),
                ..message
            });
        }
    }
    advance(&mut listing, None, &mut frames);

    Ok(result.with_frames(frames))
}

/// Fires every timer due up to `until` (or all of them), capturing a frame per render.
fn advance(listing: &mut Listing, until: Option<Duration>, frames: &mut Vec<Frame>) {
    while let Some(deadline) = listing.next_deadline() {
        if until.is_some_and(|limit| deadline > limit) {
            break;
        }
        if listing.tick(deadline) {
            frames.push(Frame::capture(listing, deadline));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::fixtures::{catalog_of, sample_catalog};
    use crate::commands::MessageLevel;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let steps = parse_script(
            "# warm up\n\n{\"at\": 0, \"event\": \"next_page\"}\n{\"at\": 5, \"event\": {\"go_to_page\": 1}}\n",
        )
        .unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].line, 3);
        assert_eq!(steps[1].event, UiEvent::GoToPage(1));
    }

    #[test]
    fn test_parse_reports_line_of_bad_json() {
        let err = parse_script("{\"at\": 0, \"event\": \"next_page\"}\n{oops}\n").unwrap_err();
        assert!(matches!(err, FolioError::Script { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_time_going_backwards() {
        let err = parse_script(
            "{\"at\": 300, \"event\": \"next_page\"}\n{\"at\": 250, \"event\": \"next_page\"}\n",
        )
        .unwrap_err();
        match err {
            FolioError::Script { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("backwards"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_typing_produces_one_render_after_the_window() {
        let script = r#"
{"at": 0, "event": {"search_input": {"text": "s"}}}
{"at": 50, "event": {"search_input": {"text": "si"}}}
{"at": 100, "event": {"search_input": {"text": "sit"}}}
{"at": 250, "event": {"search_input": {"text": "site"}}}
"#;
        let res = run(sample_catalog(), None, ListingOptions::default(), script).unwrap();

        // Initial display, then one render: commit at 550 + 300 ms exit.
        assert_eq!(res.frames.len(), 2);
        assert_eq!(res.frames[1].at, ms(850));
        assert_eq!(res.frames[1].facets.search_term, "site");
        assert_eq!(res.frames[1].display.visible_items().count(), 2);
    }

    #[test]
    fn test_superseded_page_change_is_never_rendered() {
        let script = r#"
{"at": 0, "event": {"go_to_page": 3}}
{"at": 100, "event": {"go_to_page": 2}}
"#;
        let res = run(catalog_of(14), None, ListingOptions::default(), script).unwrap();
        assert_eq!(res.frames.len(), 2);
        assert_eq!(res.frames[1].at, ms(300));
        assert_eq!(res.frames[1].page.current_page(), 2);
    }

    #[test]
    fn test_events_after_a_render_see_the_new_state() {
        let script = r#"
{"at": 0, "event": "next_page"}
{"at": 1000, "event": "next_page"}
{"at": 2000, "event": "next_page"}
"#;
        let res = run(catalog_of(14), None, ListingOptions::default(), script).unwrap();
        let pages: Vec<_> = res.frames.iter().map(|f| f.page.current_page()).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert_eq!(res.messages.len(), 1);
        assert!(res.messages[0].content.starts_with("line 4:"));
        assert!(matches!(res.messages[0].level, MessageLevel::Info));
    }

    #[test]
    fn test_resubmitting_the_same_term_is_reported() {
        let script = r#"
{"at": 0, "event": {"search_submit": {"text": "project"}}}
{"at": 1000, "event": {"search_submit": {"text": "Project "}}}
"#;
        let res = run(catalog_of(14), None, ListingOptions::default(), script).unwrap();
        assert_eq!(res.frames.len(), 2);
        assert_eq!(res.messages.len(), 1);
        assert!(res.messages[0].content.starts_with("line 3:"));
        assert!(res.messages[0].content.contains("already applied"));
    }

    #[test]
    fn test_custom_controls_disable_features() {
        let catalog = catalog_of(14);
        let mut controls = Controls::full(&catalog);
        controls.next_button = false;

        let res = run(
            catalog,
            Some(controls),
            ListingOptions::default(),
            "{\"at\": 0, \"event\": {\"go_to_page\": 2}}",
        )
        .unwrap();
        assert_eq!(res.frames.len(), 1);
        assert_eq!(res.frames[0].display.visible_items().count(), 14);
        assert!(matches!(res.messages[0].level, MessageLevel::Warning));
    }
}

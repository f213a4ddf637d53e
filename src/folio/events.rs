use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the page's search boxes an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBox {
    #[default]
    Desktop,
    Mobile,
}

/// A user interaction with one of the listing's controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiEvent {
    /// A filter button was activated; carries its category value (`"all"` included).
    SelectCategory(String),
    /// The text of a search input changed.
    SearchInput {
        #[serde(default)]
        source: SearchBox,
        text: String,
    },
    /// A search form was submitted.
    SearchSubmit {
        #[serde(default)]
        source: SearchBox,
        text: String,
    },
    NextPage,
    PreviousPage,
    /// A page-number control was activated.
    GoToPage(usize),
}

impl UiEvent {
    pub fn search_input(text: &str) -> Self {
        UiEvent::SearchInput {
            source: SearchBox::Desktop,
            text: text.to_string(),
        }
    }

    pub fn search_submit(text: &str) -> Self {
        UiEvent::SearchSubmit {
            source: SearchBox::Desktop,
            text: text.to_string(),
        }
    }

    pub fn select_category(value: &str) -> Self {
        UiEvent::SelectCategory(value.to_string())
    }
}

impl fmt::Display for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiEvent::SelectCategory(c) => write!(f, "select category \"{}\"", c),
            UiEvent::SearchInput { text, .. } => write!(f, "type \"{}\"", text),
            UiEvent::SearchSubmit { text, .. } => write!(f, "submit \"{}\"", text),
            UiEvent::NextPage => f.write_str("next page"),
            UiEvent::PreviousPage => f.write_str("previous page"),
            UiEvent::GoToPage(n) => write!(f, "go to page {}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_notation() {
        let events: Vec<UiEvent> = serde_json::from_str(
            r#"[
                {"select_category": "web"},
                {"search_input": {"text": "si"}},
                {"search_submit": {"source": "mobile", "text": "site"}},
                "next_page",
                {"go_to_page": 3}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                UiEvent::select_category("web"),
                UiEvent::search_input("si"),
                UiEvent::SearchSubmit {
                    source: SearchBox::Mobile,
                    text: "site".into()
                },
                UiEvent::NextPage,
                UiEvent::GoToPage(3),
            ]
        );
    }
}

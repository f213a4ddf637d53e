//! Styles for the folio CLI.
//!
//! Templates refer to semantic names only (`mark`, `category`, `disabled`...); the
//! colours behind them live here, registered once through `once_cell::sync::Lazy`.
//! Search matches use black on yellow, the terminal stand-in for `<mark>`.

use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const HEADER: &str = "header";
    pub const INDEX: &str = "index";
    pub const TITLE: &str = "title";
    pub const MARK: &str = "mark";
    pub const CATEGORY: &str = "category";
    pub const TAGS: &str = "tags";
    pub const MUTED: &str = "muted";
    pub const ACTIVE: &str = "active";
    pub const ENABLED: &str = "enabled";
    pub const DISABLED: &str = "disabled";
    pub const NOTICE: &str = "notice";
    pub const COUNT: &str = "count";
}

pub static FOLIO_THEME: Lazy<Theme> = Lazy::new(|| {
    let grey = rgb_to_ansi256((154, 154, 154));
    let faint = rgb_to_ansi256((98, 98, 98));

    Theme::new()
        .add(names::HEADER, Style::new().bold())
        .add(names::INDEX, Style::new().yellow())
        .add(names::TITLE, Style::new())
        .add(names::MARK, Style::new().black().on_yellow())
        .add(names::CATEGORY, Style::new().cyan())
        .add(names::TAGS, Style::new().color256(grey))
        .add(names::MUTED, Style::new().color256(grey).italic())
        .add(names::ACTIVE, Style::new().bold().underlined())
        .add(names::ENABLED, Style::new())
        .add(names::DISABLED, Style::new().color256(faint))
        .add(names::NOTICE, Style::new().yellow())
        .add(names::COUNT, Style::new().color256(grey))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_is_registered() {
        for name in [
            names::HEADER,
            names::INDEX,
            names::TITLE,
            names::MARK,
            names::CATEGORY,
            names::TAGS,
            names::MUTED,
            names::ACTIVE,
            names::ENABLED,
            names::DISABLED,
            names::NOTICE,
            names::COUNT,
        ] {
            assert!(FOLIO_THEME.has(name), "{} missing", name);
        }
    }
}

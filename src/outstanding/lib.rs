//! # Outstanding - Styled Terminal Templates
//!
//! Renders serializable data through [minijinja](https://docs.rs/minijinja) templates
//! with named terminal styles applied by filters, so templates describe structure and
//! a [`Theme`] describes appearance.
//!
//! ## Filters
//!
//! - `style(name)`: applies the named [`console::Style`] from the theme. Unknown names
//!   are prefixed with the theme's missing-style indicator (`(!?)` by default) so typos
//!   show up in the output instead of silently rendering plain text.
//! - `fit(width)`: truncates to `width` terminal columns (with `…`) and pads with spaces
//!   so columns line up. Width is measured with `unicode-width`.
//!
//! ```rust
//! use outstanding::{render_with_color, Theme};
//! use console::Style;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Row { name: String }
//!
//! let theme = Theme::new().add("name", Style::new().bold());
//! let out = render_with_color(
//!     r#"[{{ name | fit(6) | style("name") }}]"#,
//!     &Row { name: "portfolio".into() },
//!     &theme,
//!     false,
//! ).unwrap();
//! assert_eq!(out, "[portf…]");
//! ```
//!
//! Colour is decided once per render: [`render`] asks `console` whether stdout supports
//! colours, [`render_with_color`] and [`Renderer::with_color`] take an explicit flag
//! (for `--no-color` style switches and for tests).

use console::{Style, Term};
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use std::collections::HashMap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Default prefix shown when a style name is not found.
pub const DEFAULT_MISSING_STYLE_INDICATOR: &str = "(!?)";

const ELLIPSIS: char = '…';

/// A named collection of terminal styles.
#[derive(Clone, Debug)]
pub struct Theme {
    styles: HashMap<String, Style>,
    missing_indicator: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            styles: HashMap::new(),
            missing_indicator: DEFAULT_MISSING_STYLE_INDICATOR.to_string(),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named style.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Sets the prefix used for unknown style names. An empty string disables it.
    pub fn missing_indicator(mut self, indicator: &str) -> Self {
        self.missing_indicator = indicator.to_string();
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Applies a named style. With `use_color == false` the text is returned as-is,
    /// but unknown names are still flagged.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None if self.missing_indicator.is_empty() => text.to_string(),
            None => format!("{} {}", self.missing_indicator, text),
        }
    }
}

/// Truncates `text` to at most `width` columns, appending `…` when cut, then pads with
/// spaces up to exactly `width` columns.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_to_width(text, width);
    let used = out.width();
    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}

/// Truncates `text` to at most `width` columns, appending `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Renders with colour detection on stdout.
pub fn render<T: Serialize>(template: &str, data: &T, theme: &Theme) -> Result<String, Error> {
    let use_color = Term::stdout().features().colors_supported();
    render_with_color(template, data, theme, use_color)
}

/// Renders a one-off template with explicit colour control.
pub fn render_with_color<T: Serialize>(
    template: &str,
    data: &T,
    theme: &Theme,
    use_color: bool,
) -> Result<String, Error> {
    let mut env = Environment::new();
    register_filters(&mut env, theme.clone(), use_color);
    env.add_template_owned("_inline".to_string(), template.to_string())?;
    env.get_template("_inline")?.render(data)
}

/// A set of named templates compiled once and rendered many times against one theme.
pub struct Renderer {
    env: Environment<'static>,
    use_color: bool,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        let use_color = Term::stdout().features().colors_supported();
        Self::with_color(theme, use_color)
    }

    pub fn with_color(theme: Theme, use_color: bool) -> Self {
        let mut env = Environment::new();
        register_filters(&mut env, theme, use_color);
        Self { env, use_color }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Compiles and registers a template; syntax errors surface here.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        self.env.get_template(name)?.render(data)
    }
}

fn register_filters(env: &mut Environment<'static>, theme: Theme, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    env.add_filter("fit", |value: Value, width: usize| -> String {
        fit_to_width(&value.to_string(), width)
    });
}

/// Converts an RGB triplet to the nearest ANSI 256-colour palette index.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let scale = |c: u8| (c as u16 * 5 / 255) as u8;
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }
}

//! Extracts items from a rendered markdown listing.
//!
//! ```markdown
//! # Web
//!
//! ## Portfolio Site
//!
//! A personal portfolio with a *dark* theme.
//!
//! - HTML
//! - CSS
//! ```
//!
//! A level-1 heading opens a category (lowercased), each level-2 heading starts an
//! item, the first top-level paragraph after it is the description and the entries
//! of its first-level lists are tags. Only text content is kept: emphasis, links and
//! inline code contribute their text. Other headings and blocks are ignored.

use super::{CatalogSource, ItemRecord};
use crate::error::{FolioError, Result};
use crate::model::Item;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::fs;
use std::path::{Path, PathBuf};

pub struct MarkdownSource {
    path: PathBuf,
}

impl MarkdownSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(markdown: &str) -> Result<Vec<Item>> {
        Ok(parse_records(markdown)?
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_item(position))
            .collect())
    }
}

impl CatalogSource for MarkdownSource {
    fn read_items(&self) -> Result<Vec<Item>> {
        let content = fs::read_to_string(&self.path).map_err(FolioError::Io)?;
        Self::parse(&content)
    }

    fn describe(&self) -> String {
        format!("markdown:{}", self.path.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Nothing,
    Category,
    Title,
    Description,
    Tag,
}

fn parse_records(markdown: &str) -> Result<Vec<ItemRecord>> {
    let mut records = Vec::new();
    let mut category: Option<String> = None;
    let mut current: Option<ItemRecord> = None;
    let mut capture = Capture::Nothing;
    let mut text = String::new();
    let mut list_item_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                capture = match level {
                    HeadingLevel::H1 => Capture::Category,
                    HeadingLevel::H2 => Capture::Title,
                    _ => Capture::Nothing,
                };
                if capture != Capture::Nothing {
                    if let Some(record) = current.take() {
                        records.push(record);
                    }
                }
                text.clear();
            }
            Event::End(TagEnd::Heading(level)) => {
                let heading = text.trim().to_string();
                match level {
                    HeadingLevel::H1 => category = Some(heading.to_lowercase()),
                    HeadingLevel::H2 => {
                        let Some(category) = category.clone() else {
                            return Err(FolioError::Catalog(format!(
                                "item \"{}\" appears before any category heading",
                                heading
                            )));
                        };
                        current = Some(ItemRecord {
                            title: heading,
                            category,
                            ..Default::default()
                        });
                    }
                    _ => {}
                }
                capture = Capture::Nothing;
            }
            Event::Start(Tag::Paragraph) if list_item_depth == 0 => {
                if current.as_ref().is_some_and(|r| r.description.is_empty()) {
                    capture = Capture::Description;
                    text.clear();
                }
            }
            Event::End(TagEnd::Paragraph) if capture == Capture::Description => {
                if let Some(record) = current.as_mut() {
                    record.description = text.trim().to_string();
                }
                capture = Capture::Nothing;
            }
            Event::Start(Tag::Item) => {
                list_item_depth += 1;
                if list_item_depth == 1 && current.is_some() {
                    capture = Capture::Tag;
                    text.clear();
                }
            }
            Event::End(TagEnd::Item) => {
                if list_item_depth == 1 && capture == Capture::Tag {
                    if let Some(record) = current.as_mut() {
                        let tag = text.trim();
                        if !tag.is_empty() {
                            record.tags.push(tag.to_string());
                        }
                    }
                    capture = Capture::Nothing;
                }
                list_item_depth = list_item_depth.saturating_sub(1);
            }
            Event::Text(t) | Event::Code(t) => {
                if capture != Capture::Nothing && (capture != Capture::Tag || list_item_depth == 1)
                {
                    text.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if capture != Capture::Nothing {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }

    if let Some(record) = current.take() {
        records.push(record);
    }
    Ok(records)
}

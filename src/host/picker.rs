//! Interactive picker over a [`SearchProvider`].

use crate::error::ApiError;
use crate::search::matcher::normalize;
use crate::search::{SearchItem, SearchProvider};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

/// The user's final query and the label they selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub query: String,
    pub label: String,
}

pub trait Picker {
    /// Block until the user selects an item (`Some`) or cancels (`None`).
    fn pick(&self, provider: &dyn SearchProvider) -> Result<Option<Pick>, ApiError>;
}

/// Terminal picker: read a query, then choose among the matches.
///
/// An empty query lists everything. Escape in the list cancels; a query with
/// no matches asks again, and an empty query with no candidates cancels.
pub struct TerminalPicker {
    color: bool,
}

impl TerminalPicker {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render(&self, item: &SearchItem) -> String {
        let Some(positions) = item.highlight.as_ref().filter(|p| !p.is_empty()) else {
            return item.label.clone();
        };
        if !self.color {
            return item.label.clone();
        }
        let mut out = String::new();
        let mut next = positions.iter().peekable();
        for (index, c) in normalize(&item.label).chars().enumerate() {
            if next.peek() == Some(&&index) {
                next.next();
                out.push_str(&c.bold().yellow().to_string());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl Default for TerminalPicker {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Picker for TerminalPicker {
    fn pick(&self, provider: &dyn SearchProvider) -> Result<Option<Pick>, ApiError> {
        let theme = ColorfulTheme::default();
        loop {
            let query: String = Input::with_theme(&theme)
                .with_prompt(provider.title())
                .allow_empty(true)
                .interact_text()?;

            let items: Vec<SearchItem> = provider.provide(&query).collect();
            if items.is_empty() {
                if query.is_empty() {
                    eprintln!("Nothing to choose from.");
                    return Ok(None);
                }
                eprintln!("No matches for {:?}", query);
                continue;
            }

            let rows: Vec<String> = items.iter().map(|item| self.render(item)).collect();
            let selection = Select::with_theme(&theme)
                .items(&rows)
                .default(0)
                .interact_opt()?;

            return Ok(selection.map(|index| Pick {
                query,
                label: items[index].label.clone(),
            }));
        }
    }
}

//! Incremental filter for list screens
//!
//! The filtered view is always recomputed from scratch over the base items,
//! in base order, on every edit. Matching is a substring test on normalized
//! text (lowercase, spaces and hyphens removed).
//!
//! A keystroke that leaves nothing visible is not kept: the filter clears
//! itself and reports `FilterOutcome::NoMatches` so the caller can show a
//! notice.

use super::panel::PanelItem;

/// Result of a filter edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Nothing changed (e.g. backspace on an empty query)
    Unchanged,
    /// Query changed and the filtered view was recomputed
    Changed,
    /// The edit matched nothing; the filter has been cleared
    NoMatches,
}

/// Lowercase and drop spaces and hyphens
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Filter state over a base list
#[derive(Debug, Clone)]
pub struct FilterState<T> {
    raw_query: String,
    normalized_query: String,
    base_items: Vec<T>,
    filtered_items: Vec<T>,
}

impl<T: PanelItem + Clone> FilterState<T> {
    pub fn new(base_items: Vec<T>) -> Self {
        FilterState {
            raw_query: String::new(),
            normalized_query: String::new(),
            filtered_items: base_items.clone(),
            base_items,
        }
    }

    pub fn query(&self) -> &str {
        &self.raw_query
    }

    #[cfg(test)]
    pub fn normalized_query(&self) -> &str {
        &self.normalized_query
    }

    /// Check if filter is active (has text)
    pub fn is_active(&self) -> bool {
        !self.raw_query.is_empty()
    }

    #[cfg(test)]
    pub fn base(&self) -> &[T] {
        &self.base_items
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered_items
    }

    /// Add a character to the query
    pub fn on_character(&mut self, c: char) -> FilterOutcome {
        self.raw_query.push(c);
        self.recompute();
        if self.filtered_items.is_empty() {
            self.clear();
            return FilterOutcome::NoMatches;
        }
        FilterOutcome::Changed
    }

    /// Remove the last character of the query
    pub fn on_backspace(&mut self) -> FilterOutcome {
        if self.raw_query.pop().is_none() {
            return FilterOutcome::Unchanged;
        }
        self.recompute();
        FilterOutcome::Changed
    }

    /// Drop the query and show every base item
    pub fn clear(&mut self) -> FilterOutcome {
        if self.raw_query.is_empty() {
            return FilterOutcome::Unchanged;
        }
        self.raw_query.clear();
        self.recompute();
        FilterOutcome::Changed
    }

    fn recompute(&mut self) {
        self.normalized_query = normalize(&self.raw_query);
        let query = &self.normalized_query;
        self.filtered_items = self
            .base_items
            .iter()
            .filter(|item| normalize(item.label()).contains(query.as_str()))
            .cloned()
            .collect();
    }
}

//! Panel - Scrollable list widget
//!
//! Keeps a selected index and a scroll offset over a list that may be longer
//! than the viewport. Movement never wraps: pressing Down on the last row or
//! Up on the first row does nothing.
//!
//! Invariants, whenever the list is non-empty:
//! `0 <= selected < len` and `scroll_v <= selected < scroll_v + viewport`.
//! An empty list has `selected == -1` and `scroll_v == 0`.

use super::key::KeyEvent;
use super::view::{Block, ScreenView};

/// Handler result from event processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerResult {
    Handled,
    Ignored,
}

/// Item in a panel
pub trait PanelItem {
    /// Text shown in the row and matched by filters
    fn label(&self) -> &str;
}

impl PanelItem for String {
    fn label(&self) -> &str {
        self
    }
}

impl PanelItem for &str {
    fn label(&self) -> &str {
        self
    }
}

/// Panel widget
#[derive(Debug, Clone)]
pub struct Panel<T> {
    items: Vec<T>,
    pub selected: i32,
    pub scroll_v: i32,
    viewport: i32,
}

impl<T: PanelItem> Panel<T> {
    /// Create an empty panel showing `viewport` rows
    pub fn new(viewport: usize) -> Self {
        Panel {
            items: Vec::new(),
            selected: -1,
            scroll_v: 0,
            viewport: viewport.max(1) as i32,
        }
    }

    pub fn with_items(items: Vec<T>, viewport: usize) -> Self {
        let mut panel = Panel::new(viewport);
        panel.set_items(items);
        panel
    }

    /// Replace the whole item set and start over at the top
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.reset();
    }

    /// Replace items whose identity set is unchanged apart from tail
    /// shrinkage. Only the selection is clamped; use `set_items` otherwise.
    #[allow(dead_code)]
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        let count = self.size();
        if self.selected >= count {
            self.selected = count - 1;
        }
        if count > 0 && self.selected < 0 {
            self.selected = 0;
        }
    }

    /// Select the first row and scroll to the top
    pub fn reset(&mut self) {
        self.selected = if self.items.is_empty() { -1 } else { 0 };
        self.scroll_v = 0;
    }

    /// Get the number of items
    pub fn size(&self) -> i32 {
        self.items.len() as i32
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn viewport(&self) -> i32 {
        self.viewport
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected_item(&self) -> Option<&T> {
        usize::try_from(self.selected)
            .ok()
            .and_then(|i| self.items.get(i))
    }

    /// Move selection down one row
    pub fn move_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.size() - 1);
        if self.selected >= self.scroll_v + self.viewport {
            self.scroll_v += 1;
        }
    }

    /// Move selection up one row
    pub fn move_up(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected - 1).max(0);
        if self.selected < self.scroll_v {
            self.scroll_v -= 1;
        }
    }

    /// First visible row. `scroll_v` may be stale after a tail shrink, so
    /// the window is pulled back to keep the selection on screen.
    fn window_top(&self) -> i32 {
        self.scroll_v.min(self.selected.max(0)).max(0)
    }

    /// Rows above / below the viewport
    pub fn scroll_hint(&self) -> (bool, bool) {
        let top = self.window_top();
        (top > 0, top + self.viewport < self.size())
    }

    /// Append the visible rows and scroll arrows to a view
    pub fn draw(&self, view: &mut ScreenView) {
        let (up, down) = self.scroll_hint();
        let end = (self.window_top() as usize + self.viewport as usize).min(self.items.len());
        let start = (self.window_top() as usize).min(end);

        for (offset, item) in self.items[start..end].iter().enumerate() {
            view.push(Block::Row {
                label: item.label().to_string(),
                selected: (start + offset) as i32 == self.selected,
            });
        }
        if up || down {
            view.push(Block::ScrollHint { up, down });
        }
    }

    /// Handle a key event
    pub fn on_key(&mut self, key: KeyEvent) -> HandlerResult {
        match key {
            KeyEvent::Up => {
                self.move_up();
                HandlerResult::Handled
            }
            KeyEvent::Down => {
                self.move_down();
                HandlerResult::Handled
            }
            _ => HandlerResult::Ignored,
        }
    }
}

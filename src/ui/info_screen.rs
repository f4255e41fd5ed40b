//! InfoScreen - Timed full-screen notices
//!
//! Used for short results ("Connected", "No matches") and failures. The
//! manager keeps the notice up for its dwell time and then follows `then`.

use std::time::Duration;

use super::view::ScreenView;

/// What happens once a notice has been shown
#[derive(Debug)]
pub enum AfterNotice {
    /// Back to the screen that raised it, state untouched
    Stay,
    Pop,
    Exit,
    /// Another notice right after this one
    Then(Box<Notice>),
}

/// A timed message
#[derive(Debug)]
pub struct Notice {
    pub lines: Vec<String>,
    pub dwell: Duration,
    pub then: AfterNotice,
}

impl Notice {
    pub fn new(text: &str, dwell: Duration) -> Self {
        Notice {
            lines: text.lines().map(str::to_string).collect(),
            dwell,
            then: AfterNotice::Stay,
        }
    }

    pub fn then(mut self, then: AfterNotice) -> Self {
        self.then = then;
        self
    }

    pub fn then_pop(self) -> Self {
        self.then(AfterNotice::Pop)
    }

    pub fn then_exit(self) -> Self {
        self.then(AfterNotice::Exit)
    }

    /// First line, handy for logs and tests
    pub fn headline(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    pub fn view(&self) -> ScreenView {
        ScreenView::notice(&self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::view::Block;

    #[test]
    fn test_multiline_notice() {
        let notice = Notice::new("Save failed\nTry again", Duration::ZERO).then_pop();
        assert_eq!(notice.headline(), "Save failed");
        assert_eq!(notice.lines.len(), 2);
        assert!(matches!(notice.then, AfterNotice::Pop));
        assert!(notice
            .view()
            .blocks
            .contains(&Block::Text("Try again".to_string())));
    }
}

//! Declarative screen descriptions
//!
//! Screens describe what the LCD should show as a list of blocks; a
//! `RenderSink` turns that into pixels (or terminal cells).

/// One visual element of a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Centered heading
    Title(String),
    /// A list row; `selected` rows are drawn inverted with a `>` marker
    Row { label: String, selected: bool },
    /// Single-line text input box
    Input {
        text: String,
        focused: bool,
        cursor: bool,
        masked: bool,
    },
    Button { label: String, focused: bool },
    /// Buttons laid out side by side
    ButtonRow(Vec<(String, bool)>),
    Checkbox {
        label: String,
        checked: bool,
        focused: bool,
    },
    /// Free-form centered line
    Text(String),
    /// Arrows telling the user more rows exist above/below the viewport
    ScrollHint { up: bool, down: bool },
    /// Passcode slots
    Slots { filled: usize, total: usize },
    Spacer,
}

/// A full screen description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenView {
    pub blocks: Vec<Block>,
}

impl ScreenView {
    pub fn new() -> Self {
        ScreenView { blocks: Vec::new() }
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.push(Block::Title(text.to_string()))
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.push(Block::Text(text.to_string()))
    }

    pub fn button(&mut self, label: &str, focused: bool) -> &mut Self {
        self.push(Block::Button {
            label: label.to_string(),
            focused,
        })
    }

    #[cfg(test)]
    /// Labels of the rows currently on screen
    pub fn row_labels(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Row { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    /// Label of the focused element, whatever its kind
    pub fn focused_label(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Row { label, selected: true } => Some(label.as_str()),
            Block::Button { label, focused: true } => Some(label.as_str()),
            Block::Checkbox {
                label,
                focused: true,
                ..
            } => Some(label.as_str()),
            Block::ButtonRow(buttons) => buttons
                .iter()
                .find(|(_, focused)| *focused)
                .map(|(label, _)| label.as_str()),
            _ => None,
        })
    }

    /// Notice screen: centered lines and nothing else
    pub fn notice(lines: &[String]) -> Self {
        let mut view = ScreenView::new();
        view.push(Block::Spacer);
        for line in lines {
            view.text(line);
        }
        view
    }
}

/// Display collaborator. Painting is fire-and-forget.
pub trait RenderSink {
    fn paint(&mut self, view: &ScreenView);
}

/// Display facts every screen needs, passed explicitly instead of globals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// List rows that fit on the LCD
    pub viewport_rows: usize,
    /// Characters per text line
    pub columns: usize,
    /// Blink phase of the text cursor
    pub cursor_visible: bool,
}

impl RenderContext {
    pub fn new(viewport_rows: usize, columns: usize) -> Self {
        RenderContext {
            viewport_rows: viewport_rows.max(1),
            columns: columns.max(1),
            cursor_visible: true,
        }
    }
}

/// Break text into lines of at most `width` characters
pub fn wrap_fixed(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_fixed() {
        assert_eq!(wrap_fixed("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_fixed("", 4), vec![""]);
        assert_eq!(wrap_fixed("abcd", 4), vec!["abcd"]);
    }

    #[test]
    fn test_focused_label_finds_each_kind() {
        let mut view = ScreenView::new();
        view.push(Block::Row {
            label: "a".into(),
            selected: false,
        });
        assert_eq!(view.focused_label(), None);

        view.push(Block::ButtonRow(vec![("Chat".into(), false), ("Call".into(), true)]));
        assert_eq!(view.focused_label(), Some("Call"));
    }

    #[test]
    fn test_notice_view_has_text_lines() {
        let view = ScreenView::notice(&["No matches".to_string()]);
        assert!(view.blocks.contains(&Block::Text("No matches".to_string())));
    }
}

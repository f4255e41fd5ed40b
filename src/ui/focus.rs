//! Focus model for two-region screens
//!
//! A wizard step or the password dialog has an input region (a text field
//! or a checkbox) and a control region (one button). Up/Down toggle between
//! them, Right jumps to the control, Left walks back toward the input and
//! then out of the screen.
//!
//! Button groups that cycle (contact detail) use `ButtonRing` instead.

use super::key::KeyEvent;

/// Identifies an editable value on a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Address,
    Nickname,
    Number,
    Whitelist,
    Password,
}

/// Action bound to a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Finish,
    Connect,
    ShowAddress,
    Chat,
    Call,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "Next",
            Action::Finish => "Finish",
            Action::Connect => "Connect",
            Action::ShowAddress => "Show Address",
            Action::Chat => "Chat",
            Action::Call => "Call",
        }
    }
}

/// Something that can hold focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectableElement {
    TextInput(FieldId),
    Checkbox(FieldId),
    Button(Action),
    /// List rows are tracked by `Panel`, which keeps the index itself
    #[allow(dead_code)]
    ListRow(usize),
}

impl SelectableElement {
    pub fn is_text_input(self) -> bool {
        matches!(self, SelectableElement::TextInput(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    /// Input region focused; printable keys edit the field
    EditingInput,
    /// Control region focused
    ElementSelected,
}

/// What the screen should do after a focus transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Focus moved; redraw only
    Moved,
    /// Enter/Space on a non-text element
    Activate(SelectableElement),
    /// Printable character for the focused text input
    Text(char),
    Backspace,
    /// Left on the input of a later step
    PreviousStep,
    /// Left on the input of the first step
    Exit,
    Ignored,
}

/// Focus over an input element and a control element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    input: SelectableElement,
    control: SelectableElement,
    mode: FocusMode,
}

impl FocusState {
    pub fn new(input: SelectableElement, control: SelectableElement) -> Self {
        FocusState {
            input,
            control,
            mode: FocusMode::EditingInput,
        }
    }

    #[cfg(test)]
    pub fn mode(&self) -> FocusMode {
        self.mode
    }

    #[cfg(test)]
    /// 0 for the input region, 1 for the control region
    pub fn active_index(&self) -> usize {
        match self.mode {
            FocusMode::EditingInput => 0,
            FocusMode::ElementSelected => 1,
        }
    }

    pub fn active_element(&self) -> SelectableElement {
        match self.mode {
            FocusMode::EditingInput => self.input,
            FocusMode::ElementSelected => self.control,
        }
    }

    pub fn input(&self) -> SelectableElement {
        self.input
    }

    pub fn control(&self) -> SelectableElement {
        self.control
    }

    pub fn input_focused(&self) -> bool {
        self.mode == FocusMode::EditingInput
    }

    pub fn focus_input(&mut self) {
        self.mode = FocusMode::EditingInput;
    }

    pub fn focus_control(&mut self) {
        self.mode = FocusMode::ElementSelected;
    }

    /// Apply one key. `first_step` is true when Left on the input should
    /// leave the screen rather than go back a step.
    pub fn transition(&mut self, event: KeyEvent, first_step: bool) -> FocusOutcome {
        match event {
            KeyEvent::Up | KeyEvent::Down => {
                self.mode = match self.mode {
                    FocusMode::EditingInput => FocusMode::ElementSelected,
                    FocusMode::ElementSelected => FocusMode::EditingInput,
                };
                FocusOutcome::Moved
            }
            KeyEvent::Right => {
                if self.mode == FocusMode::ElementSelected {
                    return FocusOutcome::Ignored;
                }
                self.focus_control();
                FocusOutcome::Moved
            }
            KeyEvent::Left => match self.mode {
                FocusMode::ElementSelected => {
                    self.focus_input();
                    FocusOutcome::Moved
                }
                FocusMode::EditingInput if first_step => FocusOutcome::Exit,
                FocusMode::EditingInput => FocusOutcome::PreviousStep,
            },
            KeyEvent::Enter | KeyEvent::Space => {
                let element = self.active_element();
                if element.is_text_input() {
                    // text is never submitted from the field itself
                    FocusOutcome::Ignored
                } else {
                    FocusOutcome::Activate(element)
                }
            }
            KeyEvent::Char(c) if self.active_element().is_text_input() => FocusOutcome::Text(c),
            KeyEvent::Backspace if self.active_element().is_text_input() => {
                FocusOutcome::Backspace
            }
            _ => FocusOutcome::Ignored,
        }
    }
}

/// Buttons that cycle with wraparound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonRing {
    buttons: Vec<Action>,
    active: usize,
}

impl ButtonRing {
    pub fn new(buttons: Vec<Action>) -> Self {
        ButtonRing { buttons, active: 0 }
    }

    pub fn active(&self) -> Option<Action> {
        self.buttons.get(self.active).copied()
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.active() == Some(action)
    }

    pub fn next(&mut self) {
        if !self.buttons.is_empty() {
            self.active = (self.active + 1) % self.buttons.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.buttons.is_empty() {
            self.active = (self.active + self.buttons.len() - 1) % self.buttons.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> FocusState {
        FocusState::new(
            SelectableElement::TextInput(FieldId::Address),
            SelectableElement::Button(Action::Next),
        )
    }

    #[test]
    fn test_up_down_toggle_regions() {
        let mut focus = step();
        assert_eq!(focus.active_index(), 0);
        assert_eq!(focus.transition(KeyEvent::Down, true), FocusOutcome::Moved);
        assert_eq!(focus.mode(), FocusMode::ElementSelected);
        assert_eq!(focus.transition(KeyEvent::Up, true), FocusOutcome::Moved);
        assert_eq!(focus.mode(), FocusMode::EditingInput);
    }

    #[test]
    fn test_right_jumps_to_control() {
        let mut focus = step();
        assert_eq!(focus.transition(KeyEvent::Right, true), FocusOutcome::Moved);
        assert_eq!(
            focus.active_element(),
            SelectableElement::Button(Action::Next)
        );
        assert_eq!(focus.transition(KeyEvent::Right, true), FocusOutcome::Ignored);
    }

    #[test]
    fn test_left_walks_back() {
        let mut focus = step();
        focus.focus_control();
        assert_eq!(focus.transition(KeyEvent::Left, true), FocusOutcome::Moved);
        assert!(focus.input_focused());
        assert_eq!(focus.transition(KeyEvent::Left, false), FocusOutcome::PreviousStep);
        assert_eq!(focus.transition(KeyEvent::Left, true), FocusOutcome::Exit);
    }

    #[test]
    fn test_text_only_reaches_text_input() {
        let mut focus = step();
        assert_eq!(focus.transition(KeyEvent::Char('a'), true), FocusOutcome::Text('a'));
        assert_eq!(focus.transition(KeyEvent::Backspace, true), FocusOutcome::Backspace);
        assert_eq!(focus.transition(KeyEvent::Enter, true), FocusOutcome::Ignored);

        focus.focus_control();
        assert_eq!(focus.transition(KeyEvent::Char('a'), true), FocusOutcome::Ignored);
        assert_eq!(
            focus.transition(KeyEvent::Space, true),
            FocusOutcome::Activate(SelectableElement::Button(Action::Next))
        );
    }

    #[test]
    fn test_checkbox_activates_from_input_region() {
        let mut focus = FocusState::new(
            SelectableElement::Checkbox(FieldId::Whitelist),
            SelectableElement::Button(Action::Finish),
        );
        assert_eq!(
            focus.transition(KeyEvent::Enter, false),
            FocusOutcome::Activate(SelectableElement::Checkbox(FieldId::Whitelist))
        );
        assert_eq!(focus.transition(KeyEvent::Char('x'), false), FocusOutcome::Ignored);
    }

    #[test]
    fn test_button_ring_wraps() {
        let mut ring = ButtonRing::new(vec![Action::ShowAddress, Action::Chat, Action::Call]);
        ring.previous();
        assert_eq!(ring.active(), Some(Action::Call));
        ring.next();
        assert_eq!(ring.active(), Some(Action::ShowAddress));
        ring.next();
        assert!(ring.is_active(Action::Chat));
    }
}

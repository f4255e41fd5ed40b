//! Add-contact wizard
//!
//! Four steps, each an input and a button: address, nickname, optional
//! number, whitelist checkbox. A step only advances through its button.
//! Nothing is stored until Finish.

use std::collections::HashMap;

use log::{info, warn};

use super::field::FieldBuffer;
use super::focus::{Action, FieldId, FocusOutcome, FocusState, SelectableElement};
use super::info_screen::Notice;
use super::key::KeyEvent;
use super::screen::{Screen, Services, Transition};
use super::view::{Block, RenderContext, ScreenView};
use crate::core::Contact;

const MAX_ADDRESS: usize = 64;
const MAX_NICKNAME: usize = 24;
const MAX_NUMBER: usize = 15;

struct Step {
    title: &'static str,
    field: FieldId,
}

static STEPS: [Step; 4] = [
    Step {
        title: "Enter Address",
        field: FieldId::Address,
    },
    Step {
        title: "Enter Nickname",
        field: FieldId::Nickname,
    },
    Step {
        title: "Enter Number (optional)",
        field: FieldId::Number,
    },
    Step {
        title: "Whitelist",
        field: FieldId::Whitelist,
    },
];

/// Value held for one wizard field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(FieldBuffer),
    Flag(bool),
}

/// Everything the wizard has collected so far
#[derive(Debug, Clone)]
pub struct WizardState {
    pub step_index: usize,
    pub fields: HashMap<FieldId, FieldValue>,
    pub focus: FocusState,
}

impl WizardState {
    fn new() -> Self {
        let mut fields = HashMap::new();
        fields.insert(FieldId::Address, FieldValue::Text(FieldBuffer::new(MAX_ADDRESS)));
        fields.insert(FieldId::Nickname, FieldValue::Text(FieldBuffer::new(MAX_NICKNAME)));
        fields.insert(FieldId::Number, FieldValue::Text(FieldBuffer::new(MAX_NUMBER)));
        fields.insert(FieldId::Whitelist, FieldValue::Flag(false));
        WizardState {
            step_index: 0,
            fields,
            focus: Self::focus_for(0),
        }
    }

    fn focus_for(step_index: usize) -> FocusState {
        let field = STEPS[step_index].field;
        let input = if field == FieldId::Whitelist {
            SelectableElement::Checkbox(field)
        } else {
            SelectableElement::TextInput(field)
        };
        let action = if step_index + 1 == STEPS.len() {
            Action::Finish
        } else {
            Action::Next
        };
        FocusState::new(input, SelectableElement::Button(action))
    }

    fn go_to(&mut self, step_index: usize) {
        self.step_index = step_index;
        self.focus = Self::focus_for(step_index);
    }

    pub fn text(&self, field: FieldId) -> &str {
        match self.fields.get(&field) {
            Some(FieldValue::Text(buffer)) => buffer.value(),
            _ => "",
        }
    }

    pub fn flag(&self, field: FieldId) -> bool {
        matches!(self.fields.get(&field), Some(FieldValue::Flag(true)))
    }

    fn buffer_mut(&mut self, field: FieldId) -> Option<&mut FieldBuffer> {
        match self.fields.get_mut(&field) {
            Some(FieldValue::Text(buffer)) => Some(buffer),
            _ => None,
        }
    }

    fn toggle(&mut self, field: FieldId) {
        if let Some(FieldValue::Flag(value)) = self.fields.get_mut(&field) {
            *value = !*value;
        }
    }

    /// The record handed to the store on Finish
    pub fn to_contact(&self) -> Contact {
        let mut contact = Contact::new(self.text(FieldId::Nickname), self.text(FieldId::Address));
        contact.number = self
            .text(FieldId::Number)
            .parse::<u64>()
            .ok()
            .map(serde_json::Number::from);
        contact.whitelist = self.flag(FieldId::Whitelist);
        contact
    }
}

pub struct AddContactScreen {
    wizard: WizardState,
}

impl AddContactScreen {
    pub fn new() -> Self {
        AddContactScreen {
            wizard: WizardState::new(),
        }
    }

    #[cfg(test)]
    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    fn current_field(&self) -> FieldId {
        STEPS[self.wizard.step_index].field
    }

    fn finish(&mut self, services: &mut Services) -> Transition {
        let contact = self.wizard.to_contact();
        let nickname = contact.nickname.clone();
        match services.contacts.append(contact) {
            Ok(()) => {
                info!("added contact {}", nickname);
                Transition::Pop
            }
            Err(e) => {
                warn!("could not save contact: {}", e);
                Transition::Notice(Notice::new("Save failed", services.timing.notice).then_pop())
            }
        }
    }
}

impl Default for AddContactScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for AddContactScreen {
    fn name(&self) -> &'static str {
        "add_contact"
    }

    fn view(&self, ctx: &RenderContext) -> ScreenView {
        let wizard = &self.wizard;
        let step = &STEPS[wizard.step_index];
        let input_focused = wizard.focus.input_focused();

        let mut view = ScreenView::new();
        view.title(step.title);
        match wizard.focus.input() {
            SelectableElement::Checkbox(field) => {
                view.push(Block::Checkbox {
                    label: "Whitelist".to_string(),
                    checked: wizard.flag(field),
                    focused: input_focused,
                });
            }
            _ => {
                view.push(Block::Input {
                    text: wizard.text(step.field).to_string(),
                    focused: input_focused,
                    cursor: ctx.cursor_visible,
                    masked: false,
                });
            }
        }
        if let SelectableElement::Button(action) = wizard.focus.control() {
            view.button(action.label(), !input_focused);
        }
        view
    }

    fn on_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        let first_step = self.wizard.step_index == 0;
        let field = self.current_field();

        match self.wizard.focus.transition(event, first_step) {
            FocusOutcome::Text(c) => {
                if let Some(buffer) = self.wizard.buffer_mut(field) {
                    buffer.append(c);
                }
            }
            FocusOutcome::Backspace => {
                if let Some(buffer) = self.wizard.buffer_mut(field) {
                    buffer.backspace();
                }
            }
            FocusOutcome::PreviousStep => {
                let previous = self.wizard.step_index - 1;
                self.wizard.go_to(previous);
            }
            FocusOutcome::Exit => return Transition::Pop,
            FocusOutcome::Activate(SelectableElement::Checkbox(id)) => self.wizard.toggle(id),
            FocusOutcome::Activate(SelectableElement::Button(Action::Next)) => {
                let next = self.wizard.step_index + 1;
                self.wizard.go_to(next);
            }
            FocusOutcome::Activate(SelectableElement::Button(Action::Finish)) => {
                return self.finish(services);
            }
            _ => {}
        }
        Transition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::focus::FocusMode;
    use crate::ui::info_screen::AfterNotice;
    use crate::ui::screen::testing::{press, services, FakeNetwork, MemoryStore};

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(KeyEvent::Char).collect()
    }

    #[test]
    fn test_next_advances_and_keeps_value() {
        let (mut store, mut net) = (MemoryStore::default(), FakeNetwork::default());
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();

        press(&mut screen, &typed("addr1"), &mut svc);
        press(&mut screen, &[KeyEvent::Down], &mut svc);
        assert_eq!(screen.wizard().focus.mode(), FocusMode::ElementSelected);
        press(&mut screen, &[KeyEvent::Enter], &mut svc);

        assert_eq!(screen.wizard().step_index, 1);
        assert_eq!(screen.wizard().text(FieldId::Address), "addr1");
        assert_eq!(screen.wizard().focus.mode(), FocusMode::EditingInput);
    }

    #[test]
    fn test_enter_in_field_does_not_advance() {
        let (mut store, mut net) = (MemoryStore::default(), FakeNetwork::default());
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();

        press(&mut screen, &typed("x"), &mut svc);
        press(&mut screen, &[KeyEvent::Enter, KeyEvent::Space], &mut svc);
        assert_eq!(screen.wizard().step_index, 0);
        assert_eq!(screen.wizard().text(FieldId::Address), "x");
    }

    #[test]
    fn test_left_navigation() {
        let (mut store, mut net) = (MemoryStore::default(), FakeNetwork::default());
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();

        press(&mut screen, &[KeyEvent::Right, KeyEvent::Enter], &mut svc);
        assert_eq!(screen.wizard().step_index, 1);

        // button -> input of the same step
        press(&mut screen, &[KeyEvent::Right, KeyEvent::Left], &mut svc);
        assert_eq!(screen.wizard().step_index, 1);
        assert!(screen.wizard().focus.input_focused());

        // input -> previous step
        press(&mut screen, &[KeyEvent::Left], &mut svc);
        assert_eq!(screen.wizard().step_index, 0);

        assert!(matches!(
            screen.on_event(KeyEvent::Left, &mut svc),
            Transition::Pop
        ));
        drop(svc);
        assert!(store.contacts.is_empty());
    }

    #[test]
    fn test_full_run_appends_contact() {
        let (mut store, mut net) = (MemoryStore::default(), FakeNetwork::default());
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();

        let mut keys = typed("abc123");
        keys.extend([KeyEvent::Down, KeyEvent::Enter]);
        keys.extend(typed("Dave"));
        keys.extend([KeyEvent::Down, KeyEvent::Enter]);
        keys.extend(typed("5550100"));
        keys.extend([KeyEvent::Down, KeyEvent::Enter]);
        // toggle the checkbox, then Finish
        keys.extend([KeyEvent::Space, KeyEvent::Down, KeyEvent::Enter]);

        let t = press(&mut screen, &keys, &mut svc);
        assert!(matches!(t, Transition::Pop));
        drop(svc);

        assert_eq!(store.contacts.len(), 1);
        let saved = &store.contacts[0];
        assert_eq!(saved.nickname, "Dave");
        assert_eq!(saved.address, "abc123");
        assert_eq!(saved.number, Some(serde_json::Number::from(5550100u64)));
        assert!(saved.whitelist);
    }

    #[test]
    fn test_non_numeric_number_is_dropped() {
        let mut wizard = WizardState::new();
        if let Some(buffer) = wizard.buffer_mut(FieldId::Number) {
            for c in "12ab".chars() {
                buffer.append(c);
            }
        }
        assert_eq!(wizard.to_contact().number, None);
    }

    #[test]
    fn test_field_limits() {
        let (mut store, mut net) = (MemoryStore::default(), FakeNetwork::default());
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();
        press(&mut screen, &[KeyEvent::Right, KeyEvent::Enter], &mut svc);
        press(&mut screen, &typed(&"n".repeat(40)), &mut svc);
        assert_eq!(screen.wizard().text(FieldId::Nickname).len(), MAX_NICKNAME);
    }

    #[test]
    fn test_save_failure_shows_notice() {
        let mut store = MemoryStore {
            fail_append: true,
            ..Default::default()
        };
        let mut net = FakeNetwork::default();
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();

        let mut keys = Vec::new();
        for _ in 0..4 {
            keys.extend([KeyEvent::Right, KeyEvent::Enter]);
        }
        match press(&mut screen, &keys, &mut svc) {
            Transition::Notice(n) => {
                assert_eq!(n.headline(), "Save failed");
                assert!(matches!(n.then, AfterNotice::Pop));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_checkbox_view() {
        let (mut store, mut net) = (MemoryStore::default(), FakeNetwork::default());
        let mut svc = services(&mut store, &mut net);
        let mut screen = AddContactScreen::new();
        for _ in 0..3 {
            press(&mut screen, &[KeyEvent::Right, KeyEvent::Enter], &mut svc);
        }
        press(&mut screen, &[KeyEvent::Enter], &mut svc);
        let view = screen.view(&svc.ctx);
        assert!(view.blocks.contains(&Block::Checkbox {
            label: "Whitelist".into(),
            checked: true,
            focused: true,
        }));
        assert!(view.blocks.contains(&Block::Button {
            label: "Finish".into(),
            focused: false,
        }));
    }
}

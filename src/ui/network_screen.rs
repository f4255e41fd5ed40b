//! Wi-Fi manager: network list plus a password sub-dialog
//!
//! Every activation ends the same way: result notice, then a fresh scan and
//! a list reset, since the set of visible networks is not stable across a
//! connection attempt.

use log::debug;

use super::field::FieldBuffer;
use super::focus::{Action, FieldId, FocusOutcome, FocusState, SelectableElement};
use super::info_screen::{AfterNotice, Notice};
use super::key::KeyEvent;
use super::panel::{Panel, PanelItem};
use super::screen::{Screen, Services, Transition};
use super::view::{Block, RenderContext, ScreenView};
use crate::platform::Network;

const MAX_PASSWORD: usize = 63;

#[derive(Debug, Clone)]
struct NetworkRow {
    network: Network,
    label: String,
}

impl PanelItem for NetworkRow {
    fn label(&self) -> &str {
        &self.label
    }
}

fn rows(networks: Vec<Network>) -> Vec<NetworkRow> {
    networks
        .into_iter()
        .map(|network| NetworkRow {
            label: network.label(),
            network,
        })
        .collect()
}

/// Outcome of one activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Connected,
    Failed,
    Cancelled,
}

impl Attempt {
    fn message(self) -> &'static str {
        match self {
            Attempt::Connected => "Connected",
            Attempt::Failed => "Failed",
            Attempt::Cancelled => "Cancelled",
        }
    }
}

struct PasswordDialog {
    ssid: String,
    password: FieldBuffer,
    focus: FocusState,
}

impl PasswordDialog {
    fn new(ssid: &str) -> Self {
        PasswordDialog {
            ssid: ssid.to_string(),
            password: FieldBuffer::new(MAX_PASSWORD),
            focus: FocusState::new(
                SelectableElement::TextInput(FieldId::Password),
                SelectableElement::Button(Action::Connect),
            ),
        }
    }
}

pub struct NetworkScreen {
    panel: Panel<NetworkRow>,
    dialog: Option<PasswordDialog>,
}

impl NetworkScreen {
    pub fn new(networks: Vec<Network>, ctx: &RenderContext) -> Self {
        NetworkScreen {
            panel: Panel::with_items(rows(networks), ctx.viewport_rows),
            dialog: None,
        }
    }

    #[cfg(test)]
    /// True while the password sub-dialog is open
    pub fn prompting(&self) -> bool {
        self.dialog.is_some()
    }

    #[cfg(test)]
    pub fn labels(&self) -> Vec<&str> {
        self.panel.items().iter().map(|r| r.label.as_str()).collect()
    }

    fn connect(ssid: &str, password: Option<&str>, services: &mut Services) -> Attempt {
        if services.network.connect(ssid, password) {
            Attempt::Connected
        } else {
            Attempt::Failed
        }
    }

    /// Notice for the attempt, then rescan and start the list over
    fn finish_attempt(&mut self, attempt: Attempt, services: &mut Services) -> Transition {
        let notice = Notice::new(attempt.message(), services.timing.notice);

        let networks = services.network.scan();
        if networks.is_empty() {
            let gone = Notice::new("No networks", services.timing.notice).then_pop();
            return Transition::Notice(notice.then(AfterNotice::Then(Box::new(gone))));
        }
        // set_items also resets selection and scroll
        self.panel.set_items(rows(networks));
        Transition::Notice(notice)
    }

    fn activate_selected(&mut self, services: &mut Services) -> Transition {
        let Some(network) = self.panel.selected_item().map(|r| r.network.clone()) else {
            return Transition::Stay;
        };
        if network.is_open() {
            let attempt = Self::connect(&network.ssid, None, services);
            return self.finish_attempt(attempt, services);
        }
        self.dialog = Some(PasswordDialog::new(&network.ssid));
        Transition::Stay
    }

    fn on_list_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        match event {
            KeyEvent::Up | KeyEvent::Down => {
                self.panel.on_key(event);
                Transition::Stay
            }
            KeyEvent::Left => Transition::Pop,
            e if e.is_activate() => self.activate_selected(services),
            _ => Transition::Stay,
        }
    }

    fn on_dialog_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        let Some(dialog) = self.dialog.as_mut() else {
            return Transition::Stay;
        };

        if event == KeyEvent::Left {
            // cancelled: no connection attempt at all
            debug!("password entry for {:?} cancelled", dialog.ssid);
            self.dialog = None;
            return self.finish_attempt(Attempt::Cancelled, services);
        }

        match dialog.focus.transition(event, true) {
            FocusOutcome::Text(c) => {
                dialog.password.append(c);
            }
            FocusOutcome::Backspace => dialog.password.backspace(),
            FocusOutcome::Activate(SelectableElement::Button(Action::Connect)) => {
                let ssid = dialog.ssid.clone();
                let password = dialog.password.value().to_string();
                self.dialog = None;
                let attempt = Self::connect(&ssid, Some(&password), services);
                return self.finish_attempt(attempt, services);
            }
            _ => {}
        }
        Transition::Stay
    }

    fn dialog_view(dialog: &PasswordDialog, ctx: &RenderContext) -> ScreenView {
        let input_focused = dialog.focus.input_focused();
        let mut view = ScreenView::new();
        view.title("Password");
        view.text(&dialog.ssid);
        view.push(Block::Input {
            text: dialog.password.value().to_string(),
            focused: input_focused,
            cursor: input_focused && ctx.cursor_visible,
            masked: true,
        });
        view.button(Action::Connect.label(), !input_focused);
        view
    }
}

impl Screen for NetworkScreen {
    fn name(&self) -> &'static str {
        "network"
    }

    fn view(&self, ctx: &RenderContext) -> ScreenView {
        if let Some(dialog) = &self.dialog {
            return Self::dialog_view(dialog, ctx);
        }
        let mut view = ScreenView::new();
        view.title("Wi-Fi");
        self.panel.draw(&mut view);
        view
    }

    fn on_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        if self.dialog.is_some() {
            self.on_dialog_event(event, services)
        } else {
            self.on_list_event(event, services)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NetworkManager;
    use crate::ui::screen::testing::{press, services, FakeNetwork, MemoryStore};

    fn screen_for(net: &mut FakeNetwork) -> NetworkScreen {
        NetworkScreen::new(net.scan(), &RenderContext::new(4, 20))
    }

    #[test]
    fn test_labels() {
        let mut net = FakeNetwork::with(&[("Cafe", ""), ("Home", "WPA2"), ("Lab", "--")]);
        let screen = screen_for(&mut net);
        assert_eq!(screen.labels(), vec!["Cafe [Open]", "Home [Sec]", "Lab [Open]"]);
    }

    #[test]
    fn test_open_network_connects_without_password() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("Cafe", "")]);
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);

        match screen.on_event(KeyEvent::Enter, &mut svc) {
            Transition::Notice(n) => assert_eq!(n.headline(), "Connected"),
            other => panic!("unexpected {:?}", other),
        }
        drop(svc);
        assert_eq!(net.connects, vec![("Cafe".to_string(), None)]);
        // initial scan plus the rescan
        assert_eq!(net.scans, 2);
    }

    #[test]
    fn test_cancelled_password_never_connects() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("Home", "WPA2")]);
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);

        screen.on_event(KeyEvent::Enter, &mut svc);
        assert!(screen.prompting());
        match screen.on_event(KeyEvent::Left, &mut svc) {
            Transition::Notice(n) => assert_eq!(n.headline(), "Cancelled"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!screen.prompting());
        drop(svc);
        assert!(net.connects.is_empty());
    }

    #[test]
    fn test_submitted_empty_password_still_connects() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("Home", "WPA2")]);
        net.connect_result = false;
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);

        let t = press(
            &mut screen,
            &[KeyEvent::Enter, KeyEvent::Down, KeyEvent::Enter],
            &mut svc,
        );
        match t {
            Transition::Notice(n) => assert_eq!(n.headline(), "Failed"),
            other => panic!("unexpected {:?}", other),
        }
        drop(svc);
        assert_eq!(
            net.connects,
            vec![("Home".to_string(), Some(String::new()))]
        );
    }

    #[test]
    fn test_password_is_masked_and_fresh_each_time() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("Home", "WPA2"), ("Work", "WPA2")]);
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);

        press(
            &mut screen,
            &[KeyEvent::Enter, KeyEvent::Char('p'), KeyEvent::Char('w')],
            &mut svc,
        );
        let view = screen.view(&svc.ctx);
        assert!(view.blocks.iter().any(|b| matches!(
            b,
            Block::Input { text, masked: true, .. } if text == "pw"
        )));

        press(&mut screen, &[KeyEvent::Left, KeyEvent::Down, KeyEvent::Enter], &mut svc);
        assert!(screen.prompting());
        let view = screen.view(&svc.ctx);
        assert!(view.blocks.contains(&Block::Text("Work".to_string())));
        assert!(view.blocks.iter().any(|b| matches!(
            b,
            Block::Input { text, .. } if text.is_empty()
        )));
    }

    #[test]
    fn test_rescan_resets_selection() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("A", ""), ("B", ""), ("C", "")]);
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);

        press(&mut screen, &[KeyEvent::Down, KeyEvent::Down, KeyEvent::Space], &mut svc);
        assert_eq!(screen.panel.selected, 0);
        assert_eq!(screen.panel.scroll_v, 0);
        drop(svc);
        assert_eq!(net.connects[0].0, "C");
    }

    #[test]
    fn test_empty_rescan_leaves_screen() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("Cafe", "")]);
        net.vanish_after_connect = true;
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);

        match screen.on_event(KeyEvent::Enter, &mut svc) {
            Transition::Notice(n) => match n.then {
                AfterNotice::Then(next) => {
                    assert_eq!(next.headline(), "No networks");
                    assert!(matches!(next.then, AfterNotice::Pop));
                }
                _ => panic!("expected a follow-up notice"),
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_left_leaves_list() {
        let mut store = MemoryStore::default();
        let mut net = FakeNetwork::with(&[("Cafe", "")]);
        let mut screen = screen_for(&mut net);
        let mut svc = services(&mut store, &mut net);
        assert!(matches!(
            screen.on_event(KeyEvent::Left, &mut svc),
            Transition::Pop
        ));
    }
}

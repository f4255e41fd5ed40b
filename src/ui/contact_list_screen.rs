//! Contact list with type-to-filter, contact detail and address zoom
//!
//! One screen owns all four states so the filter survives a visit to a
//! contact's detail page.

use log::{info, warn};

use super::focus::{Action, ButtonRing};
use super::info_screen::Notice;
use super::key::KeyEvent;
use super::panel::{Panel, PanelItem};
use super::screen::{Screen, Services, Transition};
use super::search_filter::{FilterOutcome, FilterState};
use super::view::{wrap_fixed, Block, RenderContext, ScreenView};
use crate::core::Contact;

impl PanelItem for Contact {
    fn label(&self) -> &str {
        &self.nickname
    }
}

/// Observable state of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactListState {
    Browsing,
    Filtering,
    Detail,
    AddressZoom,
}

struct Detail {
    contact: Contact,
    buttons: ButtonRing,
    zoomed: bool,
}

impl Detail {
    fn new(contact: Contact) -> Self {
        Detail {
            contact,
            buttons: ButtonRing::new(vec![Action::ShowAddress, Action::Chat, Action::Call]),
            zoomed: false,
        }
    }
}

pub struct ContactListScreen {
    panel: Panel<Contact>,
    filter: FilterState<Contact>,
    detail: Option<Detail>,
}

impl ContactListScreen {
    pub fn new(contacts: Vec<Contact>, ctx: &RenderContext) -> Self {
        ContactListScreen {
            panel: Panel::with_items(contacts.clone(), ctx.viewport_rows),
            filter: FilterState::new(contacts),
            detail: None,
        }
    }

    pub fn state(&self) -> ContactListState {
        match &self.detail {
            Some(d) if d.zoomed => ContactListState::AddressZoom,
            Some(_) => ContactListState::Detail,
            None if self.filter.is_active() => ContactListState::Filtering,
            None => ContactListState::Browsing,
        }
    }

    #[cfg(test)]
    pub fn panel(&self) -> &Panel<Contact> {
        &self.panel
    }

    #[cfg(test)]
    pub fn filter(&self) -> &FilterState<Contact> {
        &self.filter
    }

    fn refresh_rows(&mut self) {
        self.panel.set_items(self.filter.filtered().to_vec());
    }

    fn on_list_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        match event {
            KeyEvent::Up | KeyEvent::Down => {
                self.panel.on_key(event);
                Transition::Stay
            }
            KeyEvent::Char(c) => match self.filter.on_character(c) {
                FilterOutcome::NoMatches => {
                    self.refresh_rows();
                    Transition::Notice(Notice::new("No matches", services.timing.brief))
                }
                _ => {
                    self.refresh_rows();
                    Transition::Stay
                }
            },
            KeyEvent::Backspace => {
                if self.filter.on_backspace() == FilterOutcome::Changed {
                    self.refresh_rows();
                }
                Transition::Stay
            }
            KeyEvent::Left => {
                if self.filter.clear() == FilterOutcome::Changed {
                    self.refresh_rows();
                    return Transition::Stay;
                }
                Transition::Pop
            }
            e if e.is_activate() => self.open_selected(services),
            _ => Transition::Stay,
        }
    }

    /// The row's own record is shown; the store lookup only confirms the
    /// contact still exists
    fn open_selected(&mut self, services: &mut Services) -> Transition {
        let Some(selected) = self.panel.selected_item().cloned() else {
            return Transition::Stay;
        };
        match services.contacts.find(&selected.nickname) {
            Ok(_) => {
                self.detail = Some(Detail::new(selected));
                Transition::Stay
            }
            Err(e) => {
                warn!("{}", e);
                Transition::Notice(Notice::new("Contact not found", services.timing.notice))
            }
        }
    }

    fn on_detail_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        let Some(detail) = self.detail.as_mut() else {
            return Transition::Stay;
        };

        if detail.zoomed {
            if event == KeyEvent::Left || event.is_activate() {
                detail.zoomed = false;
            }
            return Transition::Stay;
        }

        match event {
            KeyEvent::Up => detail.buttons.previous(),
            KeyEvent::Down | KeyEvent::Right => detail.buttons.next(),
            KeyEvent::Left => self.detail = None,
            e if e.is_activate() => match detail.buttons.active() {
                Some(Action::ShowAddress) => detail.zoomed = true,
                Some(action) => {
                    info!("{} requested for {}", action.label(), detail.contact.nickname);
                    let text = format!("{} unavailable", action.label());
                    return Transition::Notice(Notice::new(&text, services.timing.notice));
                }
                None => {}
            },
            _ => {}
        }
        Transition::Stay
    }

    fn list_view(&self, ctx: &RenderContext) -> ScreenView {
        let mut view = ScreenView::new();
        view.title("Contacts");
        if self.filter.is_active() {
            view.push(Block::Input {
                text: self.filter.query().to_string(),
                focused: true,
                cursor: ctx.cursor_visible,
                masked: false,
            });
        }
        self.panel.draw(&mut view);
        view
    }

    fn detail_view(detail: &Detail, ctx: &RenderContext) -> ScreenView {
        let mut view = ScreenView::new();
        if detail.zoomed {
            view.push(Block::Spacer);
            for line in wrap_fixed(&detail.contact.address, ctx.columns) {
                view.text(&line);
            }
            return view;
        }

        view.title(&detail.contact.nickname);
        if let Some(number) = &detail.contact.number {
            view.text(&number.to_string());
        }
        view.button(
            Action::ShowAddress.label(),
            detail.buttons.is_active(Action::ShowAddress),
        );
        view.push(Block::ButtonRow(
            [Action::Chat, Action::Call]
                .iter()
                .map(|a| (a.label().to_string(), detail.buttons.is_active(*a)))
                .collect(),
        ));
        view
    }
}

impl Screen for ContactListScreen {
    fn name(&self) -> &'static str {
        "contact_list"
    }

    fn view(&self, ctx: &RenderContext) -> ScreenView {
        match &self.detail {
            Some(detail) => Self::detail_view(detail, ctx),
            None => self.list_view(ctx),
        }
    }

    fn on_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        match self.state() {
            ContactListState::Detail | ContactListState::AddressZoom => {
                self.on_detail_event(event, services)
            }
            ContactListState::Browsing | ContactListState::Filtering => {
                self.on_list_event(event, services)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screen::testing::{press, services, FakeNetwork, MemoryStore};

    fn screen_for(store: &MemoryStore) -> ContactListScreen {
        ContactListScreen::new(store.load_all(), &RenderContext::new(4, 20))
    }

    use crate::core::ContactStore;

    fn nicknames(screen: &ContactListScreen) -> Vec<String> {
        screen
            .panel()
            .items()
            .iter()
            .map(|c| c.nickname.clone())
            .collect()
    }

    #[test]
    fn test_typing_filters_rows() {
        let mut store = MemoryStore::with(&["Alice", "Bob", "Carol"]);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        press(&mut screen, &[KeyEvent::Char('b')], &mut svc);
        assert_eq!(nicknames(&screen), vec!["Bob"]);
        assert_eq!(screen.state(), ContactListState::Filtering);
        assert_eq!(screen.panel().selected, 0);
    }

    #[test]
    fn test_zero_matches_notice_and_reset() {
        let mut store = MemoryStore::with(&["Alice", "Bob", "Carol"]);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        match screen.on_event(KeyEvent::Char('x'), &mut svc) {
            Transition::Notice(n) => assert_eq!(n.headline(), "No matches"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(screen.filter().query(), "");
        assert_eq!(screen.state(), ContactListState::Browsing);
        assert_eq!(nicknames(&screen), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_left_clears_filter_before_exiting() {
        let mut store = MemoryStore::with(&["Alice", "Bob", "Carol"]);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        press(&mut screen, &[KeyEvent::Char('a')], &mut svc);
        // at the top of the list with a filter active
        assert_eq!(screen.panel().scroll_v, 0);
        assert!(matches!(
            screen.on_event(KeyEvent::Left, &mut svc),
            Transition::Stay
        ));
        assert_eq!(screen.state(), ContactListState::Browsing);
        assert_eq!(nicknames(&screen).len(), 3);
        assert!(matches!(
            screen.on_event(KeyEvent::Left, &mut svc),
            Transition::Pop
        ));
    }

    #[test]
    fn test_detail_buttons_cycle_and_zoom() {
        let mut store = MemoryStore::with(&["Alice", "Bob"]);
        store.contacts[1].number = Some(5551234u64.into());
        store.contacts[1].address = "b".repeat(30);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        press(&mut screen, &[KeyEvent::Down, KeyEvent::Enter], &mut svc);
        assert_eq!(screen.state(), ContactListState::Detail);

        let view = screen.view(&svc.ctx);
        assert!(view.blocks.contains(&Block::Title("Bob".into())));
        assert!(view.blocks.contains(&Block::Text("5551234".into())));
        assert_eq!(view.focused_label(), Some("Show Address"));

        screen.on_event(KeyEvent::Up, &mut svc);
        assert_eq!(screen.view(&svc.ctx).focused_label(), Some("Call"));
        screen.on_event(KeyEvent::Right, &mut svc);
        assert_eq!(screen.view(&svc.ctx).focused_label(), Some("Show Address"));

        screen.on_event(KeyEvent::Space, &mut svc);
        assert_eq!(screen.state(), ContactListState::AddressZoom);
        let zoom = screen.view(&svc.ctx);
        assert!(zoom.blocks.contains(&Block::Text("b".repeat(20))));
        assert!(zoom.blocks.contains(&Block::Text("b".repeat(10))));

        screen.on_event(KeyEvent::Left, &mut svc);
        assert_eq!(screen.state(), ContactListState::Detail);
        screen.on_event(KeyEvent::Left, &mut svc);
        assert_eq!(screen.state(), ContactListState::Browsing);
        assert_eq!(screen.panel().selected, 1);
    }

    #[test]
    fn test_filter_survives_detail_visit() {
        let mut store = MemoryStore::with(&["Alice", "Bob", "Carol"]);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        press(
            &mut screen,
            &[KeyEvent::Char('c'), KeyEvent::Enter, KeyEvent::Left],
            &mut svc,
        );
        assert_eq!(screen.state(), ContactListState::Filtering);
        assert_eq!(nicknames(&screen), vec!["Carol"]);
    }

    #[test]
    fn test_chat_is_a_placeholder() {
        let mut store = MemoryStore::with(&["Alice"]);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        let t = press(
            &mut screen,
            &[KeyEvent::Enter, KeyEvent::Down, KeyEvent::Enter],
            &mut svc,
        );
        match t {
            Transition::Notice(n) => assert_eq!(n.headline(), "Chat unavailable"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(screen.state(), ContactListState::Detail);
    }

    #[test]
    fn test_missing_contact_shows_not_found() {
        let mut store = MemoryStore::with(&["Alice"]);
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        store.contacts.clear();
        let mut svc = services(&mut store, &mut net);

        match screen.on_event(KeyEvent::Enter, &mut svc) {
            Transition::Notice(n) => assert_eq!(n.headline(), "Contact not found"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(screen.state(), ContactListState::Browsing);
    }

    #[test]
    fn test_duplicate_nicknames_open_the_selected_row() {
        let mut store = MemoryStore::with(&["Bob", "Bob"]);
        store.contacts[1].address = "second".into();
        let mut net = FakeNetwork::default();
        let mut screen = screen_for(&store);
        let mut svc = services(&mut store, &mut net);

        press(
            &mut screen,
            &[KeyEvent::Down, KeyEvent::Enter, KeyEvent::Enter],
            &mut svc,
        );
        assert_eq!(screen.state(), ContactListState::AddressZoom);
        let zoom = screen.view(&svc.ctx);
        assert!(zoom.blocks.contains(&Block::Text("second".into())));
    }
}

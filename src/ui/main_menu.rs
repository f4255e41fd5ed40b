//! Root menu of the device

use log::info;

use super::add_contact_screen::AddContactScreen;
use super::contact_list_screen::ContactListScreen;
use super::info_screen::Notice;
use super::key::KeyEvent;
use super::network_screen::NetworkScreen;
use super::panel::Panel;
use super::screen::{Screen, Services, Transition};
use super::view::{RenderContext, ScreenView};

pub const MENU_ITEMS: [&str; 6] = [
    "Keypad",
    "Contacts",
    "Add Contact",
    "Network",
    "Destroy ID",
    "Shutdown",
];

pub struct MainMenu {
    panel: Panel<&'static str>,
}

impl MainMenu {
    pub fn new(ctx: &RenderContext) -> Self {
        MainMenu {
            panel: Panel::with_items(MENU_ITEMS.to_vec(), ctx.viewport_rows),
        }
    }

    #[cfg(test)]
    pub fn panel(&self) -> &Panel<&'static str> {
        &self.panel
    }

    fn activate(&mut self, services: &mut Services) -> Transition {
        let Some(item) = self.panel.selected_item().copied() else {
            return Transition::Stay;
        };
        info!("menu: {}", item);

        match item {
            "Contacts" => {
                let contacts = services.contacts.load_all();
                if contacts.is_empty() {
                    return Transition::Notice(Notice::new("No contacts", services.timing.notice));
                }
                Transition::Push(Box::new(ContactListScreen::new(contacts, &services.ctx)))
            }
            "Add Contact" => Transition::Push(Box::new(AddContactScreen::new())),
            "Network" => {
                let networks = services.network.scan();
                if networks.is_empty() {
                    return Transition::Notice(Notice::new("No networks", services.timing.notice));
                }
                Transition::Push(Box::new(NetworkScreen::new(networks, &services.ctx)))
            }
            "Shutdown" => {
                info!("shutdown requested");
                Transition::Exit
            }
            _ => Transition::Notice(Notice::new("Not available", services.timing.notice)),
        }
    }
}

impl Screen for MainMenu {
    fn name(&self) -> &'static str {
        "main_menu"
    }

    fn view(&self, _ctx: &RenderContext) -> ScreenView {
        let mut view = ScreenView::new();
        self.panel.draw(&mut view);
        view
    }

    fn on_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        match event {
            KeyEvent::Up | KeyEvent::Down => {
                self.panel.on_key(event);
                Transition::Stay
            }
            e if e.is_activate() => self.activate(services),
            // root screen: nothing to go back to
            _ => Transition::Stay,
        }
    }
}

//! Passcode gate in front of the menu tree

use log::{info, warn};

use super::field::FieldBuffer;
use super::info_screen::Notice;
use super::key::KeyEvent;
use super::main_menu::MainMenu;
use super::screen::{Screen, Services, Transition};
use super::view::{Block, RenderContext, ScreenView};

pub struct LoginScreen {
    passcode: String,
    entry: FieldBuffer,
    attempts_left: u32,
}

impl LoginScreen {
    pub fn new(passcode: &str, attempts: u32, length: usize) -> Self {
        LoginScreen {
            passcode: passcode.to_string(),
            entry: FieldBuffer::new(length),
            attempts_left: attempts.max(1),
        }
    }

    #[cfg(test)]
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    fn submit(&mut self, services: &Services) -> Transition {
        if self.entry.value() == self.passcode {
            info!("login accepted");
            return Transition::Replace(Box::new(MainMenu::new(&services.ctx)));
        }

        self.attempts_left = self.attempts_left.saturating_sub(1);
        self.entry.clear();
        warn!("wrong passcode, {} attempts left", self.attempts_left);

        if self.attempts_left == 0 {
            warn!("login failed");
            return Transition::Notice(
                Notice::new("Login failed", services.timing.notice).then_exit(),
            );
        }
        Transition::Stay
    }
}

impl Screen for LoginScreen {
    fn name(&self) -> &'static str {
        "login"
    }

    fn view(&self, _ctx: &RenderContext) -> ScreenView {
        let mut view = ScreenView::new();
        view.title("PASSCODE");
        view.push(Block::Slots {
            filled: self.entry.len(),
            total: self.entry.max_length(),
        });
        view.text(&format!("Attempts left: {}", self.attempts_left));
        view
    }

    fn on_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition {
        match event {
            KeyEvent::Char(c) => {
                self.entry.append(c);
                Transition::Stay
            }
            KeyEvent::Backspace => {
                self.entry.backspace();
                Transition::Stay
            }
            KeyEvent::Enter => self.submit(services),
            _ => Transition::Stay,
        }
    }
}

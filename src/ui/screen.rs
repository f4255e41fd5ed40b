//! Screen trait and the transitions screens ask the manager for

use std::time::Duration;

use super::info_screen::Notice;
use super::key::KeyEvent;
use super::view::{RenderContext, ScreenView};
use crate::core::ContactStore;
use crate::platform::NetworkManager;

/// How long notices stay up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTiming {
    /// Results and failures
    pub notice: Duration,
    /// Transient hints such as "No matches"
    pub brief: Duration,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        NoticeTiming {
            notice: Duration::from_millis(1500),
            brief: Duration::from_millis(1000),
        }
    }
}

/// Collaborators handed to a screen for the duration of one event
pub struct Services<'a> {
    pub contacts: &'a mut dyn ContactStore,
    pub network: &'a mut dyn NetworkManager,
    pub timing: NoticeTiming,
    pub ctx: RenderContext,
}

/// What the manager should do after a screen handled an event
pub enum Transition {
    Stay,
    /// Open a child screen on top of this one
    Push(Box<dyn Screen>),
    /// Swap this screen for another
    Replace(Box<dyn Screen>),
    /// Return to the parent screen
    Pop,
    /// Show a timed notice, then follow its continuation
    Notice(Notice),
    /// Unwind everything and leave the program
    Exit,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Stay => write!(f, "Stay"),
            Transition::Push(s) => write!(f, "Push({})", s.name()),
            Transition::Replace(s) => write!(f, "Replace({})", s.name()),
            Transition::Pop => write!(f, "Pop"),
            Transition::Notice(n) => write!(f, "Notice({:?})", n.lines),
            Transition::Exit => write!(f, "Exit"),
        }
    }
}

/// One screen of the menu tree
pub trait Screen {
    fn name(&self) -> &'static str;

    /// Describe the current frame
    fn view(&self, ctx: &RenderContext) -> ScreenView;

    /// Handle one key. `Interrupt` never reaches a screen.
    fn on_event(&mut self, event: KeyEvent, services: &mut Services) -> Transition;
}

//! UI module
//!
//! This module contains all UI-related components:
//! - CRT: Terminal abstraction using ncurses (key source + LCD preview)
//! - Key/View: logical key events and declarative screen descriptions
//! - Panel, SearchFilter, Field, Focus: the navigation widgets
//! - Screens: login, main menu, contacts, add-contact wizard, Wi-Fi
//! - ScreenManager: screen stack and main loop

mod add_contact_screen;
mod contact_list_screen;
mod crt;
mod field;
mod focus;
mod info_screen;
mod key;
mod login_screen;
mod main_menu;
mod network_screen;
mod panel;
mod screen;
mod screen_manager;
mod search_filter;
mod view;

pub use crt::*;
pub use login_screen::LoginScreen;
pub use screen::{NoticeTiming, Services};
pub use screen_manager::*;
pub use view::RenderContext;

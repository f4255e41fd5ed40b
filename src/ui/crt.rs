//! CRT - Terminal abstraction using ncurses
//!
//! Owns the terminal for the whole program run: raw input is acquired once
//! in `Crt::new` and released in `Drop`, so every exit path restores the
//! shell. Also paints a monochrome preview of the LCD frame.

use ncurses::CURSOR_VISIBILITY::{CURSOR_INVISIBLE, CURSOR_VISIBLE};
use ncurses::*;

use super::key::{decode_key, KeyEvent, KeySource};
use super::view::{Block, RenderSink, ScreenView};
use crate::core::{PanelError, Settings};

/// Unfilled passcode slot
const EMPTY_SLOT: &str = "\u{2022}"; // •

/// CRT - Terminal handler
pub struct Crt {
    /// Inner width of the LCD frame, in characters
    columns: i32,
    screen_width: i32,
    screen_height: i32,
    active: bool,
}

impl Crt {
    /// Initialize the terminal
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        if unsafe { libc::isatty(libc::STDIN_FILENO) } == 0 {
            return Err(PanelError::Terminal {
                details: "standard input is not a terminal".into(),
            }
            .into());
        }

        // Locale must be set before initscr for the wide slot glyphs
        unsafe {
            libc::setlocale(libc::LC_CTYPE, b"\0".as_ptr() as *const libc::c_char);
        }

        initscr();
        noecho();
        cbreak();
        curs_set(CURSOR_INVISIBLE);
        keypad(stdscr(), true);
        ncurses::timeout(settings.poll_interval().as_millis() as i32);

        let mut crt = Crt {
            columns: settings.screen_columns as i32,
            screen_width: 0,
            screen_height: 0,
            active: true,
        };
        crt.update_size();
        log::debug!(
            "terminal {}x{}, frame width {}",
            crt.screen_width,
            crt.screen_height,
            crt.columns
        );
        Ok(crt)
    }

    /// Update screen dimensions
    pub fn update_size(&mut self) {
        getmaxyx(stdscr(), &mut self.screen_height, &mut self.screen_width);
    }

    /// Read a key from input
    pub fn read_key(&self) -> Option<i32> {
        let ch = getch();
        if ch == ERR {
            None
        } else {
            Some(ch)
        }
    }

    /// Print `text` centered inside the frame
    fn print_centered(&self, y: i32, attr: attr_t, text: &str) {
        let len = text.chars().count() as i32;
        let x = 1 + ((self.columns - len) / 2).max(0);
        self.print_at(y, x, attr, &clip(text, self.columns));
    }

    /// Print a string with attributes
    fn print_at(&self, y: i32, x: i32, attr: attr_t, text: &str) {
        attrset(attr);
        let _ = mvaddstr(y, x, text);
        attrset(A_NORMAL);
    }

    /// Print a full-width line, inverted when focused
    fn print_line(&self, y: i32, focused: bool, text: &str) {
        let attr = if focused { A_REVERSE } else { A_NORMAL };
        let padded = format!("{:<width$}", clip(text, self.columns), width = self.columns as usize);
        self.print_at(y, 1, attr, &padded);
    }

    fn draw_frame(&self, height: i32) {
        let w = self.columns + 2;
        mv(0, 0);
        hline(ACS_HLINE(), w);
        mv(height - 1, 0);
        hline(ACS_HLINE(), w);
        for y in 1..height - 1 {
            mvaddch(y, 0, ACS_VLINE());
            mvaddch(y, w - 1, ACS_VLINE());
        }
        mvaddch(0, 0, ACS_ULCORNER());
        mvaddch(0, w - 1, ACS_URCORNER());
        mvaddch(height - 1, 0, ACS_LLCORNER());
        mvaddch(height - 1, w - 1, ACS_LRCORNER());
    }

    fn draw_block(&self, y: i32, block: &Block) {
        match block {
            Block::Title(text) => self.print_centered(y, A_BOLD, text),
            Block::Row { label, selected } => {
                let width = (self.columns - 2).max(1) as usize;
                let marker = if *selected { ">" } else { " " };
                let line = format!("{:<width$} {}", clip(label, width as i32), marker);
                self.print_line(y, *selected, &line);
            }
            Block::Input {
                text,
                focused,
                cursor,
                masked,
            } => {
                let mut shown = if *masked {
                    "*".repeat(text.chars().count())
                } else {
                    text.clone()
                };
                if *cursor {
                    shown.push('|');
                }
                // keep the tail visible while typing
                let width = self.columns as usize;
                let skip = shown.chars().count().saturating_sub(width);
                let tail: String = shown.chars().skip(skip).collect();
                self.print_line(y, *focused, &tail);
            }
            Block::Button { label, focused } => {
                let attr = if *focused { A_REVERSE } else { A_NORMAL };
                self.print_centered(y, attr, &format!("[ {} ]", label));
            }
            Block::ButtonRow(buttons) => {
                let mut x = 1;
                for (label, focused) in buttons {
                    let attr = if *focused { A_REVERSE } else { A_NORMAL };
                    let text = format!("[ {} ]", label);
                    self.print_at(y, x, attr, &text);
                    x += text.chars().count() as i32 + 1;
                }
            }
            Block::Checkbox {
                label,
                checked,
                focused,
            } => {
                let mark = if *checked { "x" } else { " " };
                self.print_line(y, *focused, &format!("[{}] {}", mark, label));
            }
            Block::Text(text) => self.print_centered(y, A_NORMAL, text),
            Block::ScrollHint { up, down } => {
                let up = if *up { "^" } else { " " };
                let down = if *down { "v" } else { " " };
                self.print_centered(y, A_NORMAL, &format!("{}   {}", up, down));
            }
            Block::Slots { filled, total } => {
                let slots: Vec<&str> = (0..*total)
                    .map(|i| if i < *filled { "*" } else { EMPTY_SLOT })
                    .collect();
                self.print_centered(y, A_BOLD, &slots.join(" "));
            }
            Block::Spacer => {}
        }
    }

    /// Clean up terminal
    pub fn done(&mut self) {
        if self.active {
            curs_set(CURSOR_VISIBLE);
            endwin();
            self.active = false;
        }
    }
}

fn clip(text: &str, width: i32) -> String {
    text.chars().take(width.max(0) as usize).collect()
}

impl KeySource for Crt {
    fn next_event(&mut self) -> Option<KeyEvent> {
        let ch = self.read_key()?;
        if ch == KEY_RESIZE {
            self.update_size();
            return None;
        }
        decode_key(ch)
    }
}

impl RenderSink for Crt {
    fn paint(&mut self, view: &ScreenView) {
        clear();
        let mut y = 2;
        for block in &view.blocks {
            if y >= self.screen_height - 1 {
                break;
            }
            self.draw_block(y, block);
            y += match block {
                Block::Title(_) | Block::Input { .. } | Block::Button { .. } => 2,
                _ => 1,
            };
        }
        self.draw_frame((y + 2).min(self.screen_height));
        refresh();
    }
}

impl Drop for Crt {
    fn drop(&mut self) {
        self.done();
    }
}

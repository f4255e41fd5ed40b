//! ScreenManager - Screen stack and the main event loop
//!
//! One event at a time: paint the top screen, read a key (or time out),
//! dispatch, apply the transition. Notices are timed frames drawn by the
//! manager itself; keys pressed while one is up are dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info};

use super::info_screen::{AfterNotice, Notice};
use super::key::{KeyEvent, KeySource};
use super::screen::{Screen, Services, Transition};
use super::view::{RenderContext, RenderSink};

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Last screen popped or a screen asked to exit
    Finished,
    /// Ctrl-C or a termination signal
    Interrupted,
}

struct ActiveNotice {
    notice: Notice,
    shown_at: Instant,
}

/// Screen manager state
pub struct ScreenManager {
    stack: Vec<Box<dyn Screen>>,
    notice: Option<ActiveNotice>,
    ctx: RenderContext,
    cursor_blink: Duration,
    last_blink: Instant,
    dirty: bool,
}

impl ScreenManager {
    pub fn new(root: Box<dyn Screen>, ctx: RenderContext, cursor_blink: Duration) -> Self {
        ScreenManager {
            stack: vec![root],
            notice: None,
            ctx,
            cursor_blink,
            last_blink: Instant::now(),
            dirty: true,
        }
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[cfg(test)]
    pub fn top_name(&self) -> Option<&'static str> {
        self.stack.last().map(|s| s.name())
    }

    fn paint(&mut self, sink: &mut dyn RenderSink) {
        if !self.dirty {
            return;
        }
        if let Some(active) = &self.notice {
            sink.paint(&active.notice.view());
        } else if let Some(screen) = self.stack.last() {
            sink.paint(&screen.view(&self.ctx));
        }
        self.dirty = false;
    }

    fn blink(&mut self) {
        if self.last_blink.elapsed() >= self.cursor_blink {
            self.ctx.cursor_visible = !self.ctx.cursor_visible;
            self.last_blink = Instant::now();
            self.dirty = true;
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        debug!("notice: {}", notice.headline());
        self.notice = Some(ActiveNotice {
            notice,
            shown_at: Instant::now(),
        });
    }

    /// Follow the continuation of an expired notice. Returns false while
    /// the notice is still up (or there is none).
    fn expire_notice(&mut self) -> bool {
        let Some(active) = self.notice.take() else {
            return false;
        };
        if active.shown_at.elapsed() < active.notice.dwell {
            self.notice = Some(active);
            return false;
        }
        self.dirty = true;
        match active.notice.then {
            AfterNotice::Stay => {}
            AfterNotice::Pop => {
                self.stack.pop();
            }
            AfterNotice::Exit => self.stack.clear(),
            AfterNotice::Then(next) => self.show_notice(*next),
        }
        true
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Push(screen) => {
                debug!("push {}", screen.name());
                self.stack.push(screen);
            }
            Transition::Replace(screen) => {
                debug!("replace with {}", screen.name());
                self.stack.pop();
                self.stack.push(screen);
            }
            Transition::Pop => {
                self.stack.pop();
            }
            Transition::Notice(notice) => self.show_notice(notice),
            Transition::Exit => self.stack.clear(),
        }
        self.dirty = true;
    }

    /// Main loop. Returns once the stack is empty or on interrupt.
    pub fn run<T: KeySource + RenderSink>(
        &mut self,
        terminal: &mut T,
        services: &mut Services,
        running: &AtomicBool,
    ) -> RunOutcome {
        loop {
            if !running.load(Ordering::SeqCst) {
                info!("interrupted by signal");
                return RunOutcome::Interrupted;
            }
            if self.stack.is_empty() {
                return RunOutcome::Finished;
            }

            self.paint(terminal);
            // a notice is painted at least once before it can expire
            if self.expire_notice() {
                continue;
            }

            let Some(event) = terminal.next_event() else {
                self.blink();
                continue;
            };
            if event == KeyEvent::Interrupt {
                info!("interrupted from keyboard");
                return RunOutcome::Interrupted;
            }
            if self.notice.is_some() {
                continue;
            }

            services.ctx = self.ctx;
            let Some(screen) = self.stack.last_mut() else {
                continue;
            };
            let transition = screen.on_event(event, services);
            self.apply(transition);
        }
    }
}

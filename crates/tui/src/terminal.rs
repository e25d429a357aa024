//! Raw mode and the alternate screen, restored on every way out: a normal
//! return, an `Err` from the event loop, or a panic.

use std::io::{self, Write, stdout};
use std::sync::OnceLock;

use algoviz_core::model::session::in_guarded_run;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

/// Holds the terminal in raw mode on the alternate screen until dropped.
pub struct TerminalGuard(());

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        // Built before the screen switch so a failure there still undoes raw mode.
        let guard = Self(());
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(&mut stdout());
    }
}

/// Restore the terminal before the previous hook prints the panic.
///
/// Driver panics are caught and shown in the status bar, so those only
/// reach the log and leave the screen alone.
fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if in_guarded_run() {
                log::error!("{info}");
                return;
            }
            restore(&mut stdout());
            previous(info);
        }));
    });
}

/// Best effort: every step runs even if an earlier one failed.
fn restore(out: &mut impl Write) {
    let _ = execute!(out, LeaveAlternateScreen, cursor::Show);
    let _ = disable_raw_mode();
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_leaves_alternate_screen_and_shows_cursor() {
        let mut out = Vec::new();
        restore(&mut out);
        let written = String::from_utf8(out).expect("ansi is utf-8");
        assert!(written.contains("\x1b[?1049l"), "{written:?}");
        assert!(written.contains("\x1b[?25h"), "{written:?}");
    }

    #[test]
    fn restore_is_safe_to_repeat() {
        let mut out = Vec::new();
        restore(&mut out);
        let once = out.len();
        restore(&mut out);
        assert_eq!(out.len(), once * 2);
    }
}

//! Terminal setup and restoration

use std::io;
use std::panic;
use std::sync::{Arc, Mutex};

use crossterm::execute;
use crossterm::terminal::SetTitle;

use bcozy_core::prelude::*;
use bcozy_core::Localization;

/// Restore the terminal before the default panic output is printed
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        previous(info);
    }));
}

/// Terminal window title that follows the display language
#[derive(Debug, Clone, Default)]
pub struct WindowTitle {
    pending: Arc<Mutex<Option<String>>>,
}

impl WindowTitle {
    /// Track the localized title. The current one is pending right away.
    pub fn follow(localization: &mut Localization) -> Self {
        let title = Self::default();
        let pending = Arc::clone(&title.pending);
        localization.add_observer_for("windowTitle", move |_, text| {
            *pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        });
        title
    }

    /// Title set since the last call, if any
    pub fn take_pending(&self) -> Option<String> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Write a pending title to the terminal
    pub fn apply(&self) -> Result<()> {
        if let Some(text) = self.take_pending() {
            debug!("Window title: {}", text);
            execute!(io::stdout(), SetTitle(text))?;
        }
        Ok(())
    }
}

//! Terminal spinner shown while the model call is in flight.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Starts ticking immediately. Draws to stderr; hidden when it is not a terminal.
    pub fn start(msg: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            pb.set_style(style.tick_chars("-\\|/ "));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        Self { pb }
    }

    pub fn stop(self) {
        self.pb.finish_and_clear();
    }
}

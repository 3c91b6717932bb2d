use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown on stderr while the tree is scanned.
pub struct ScanProgress {
    spinner: ProgressBar,
}

impl ScanProgress {
    pub fn start(message: impl Into<String>) -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    pub fn finish(self) {
        self.spinner.finish_and_clear();
    }
}

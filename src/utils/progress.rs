use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Console progress reporting that can be disabled entirely, keeping stdout
/// clean when a command emits machine-readable output.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// A bar over a known number of input files.
    pub fn bar(total: u64, message: &str, silent: bool) -> Self {
        if silent {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar: Some(bar) }
    }

    /// A spinner for work without a known total.
    pub fn spinner(message: &str, silent: bool) -> Self {
        if silent {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar: Some(bar) }
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Prints a line above the bar; silent reporters print nothing.
    pub fn println(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.println(message);
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref bar) = self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

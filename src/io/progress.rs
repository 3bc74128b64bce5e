//! Batch progress display for multi-file cropping

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many files of a batch have been cropped
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
    completed: usize,
}

impl ProgressManager {
    /// Create a progress manager with no bar attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the batch bar for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
        self.completed = 0;
    }

    /// Show the file currently being processed
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let display_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_message(display_name);
        }
    }

    /// Advance the batch by one file
    pub fn complete_file(&mut self) {
        self.completed += 1;
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Number of files completed since initialization
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Check if a bar is currently displayed
    pub const fn is_active(&self) -> bool {
        self.bar.is_some()
    }

    /// Finish and clear the progress display
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

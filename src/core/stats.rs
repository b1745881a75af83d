use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate counters for one distribution run.
///
/// Owned by the pipeline thread and mutated through it only; the UI sees
/// cloned snapshots carried on the progress channel. Every run starts from
/// an empty value.
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    pub total_images: usize,
    pub white_background: usize,
    pub non_white_background: usize,
    /// Lowercased extension (with leading dot) -> file count.
    pub extensions: BTreeMap<String, usize>,
    pub elapsed: Duration,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_extension(&mut self, ext: &str) {
        *self.extensions.entry(ext.to_string()).or_insert(0) += 1;
    }

    pub fn record_classification(&mut self, is_white: bool) {
        if is_white {
            self.white_background += 1;
        } else {
            self.non_white_background += 1;
        }
    }

    pub fn processed(&self) -> usize {
        self.white_background + self.non_white_background
    }

    /// Histogram rendered as `".jpg (3), .png (2)"`.
    pub fn extensions_summary(&self) -> String {
        self.extensions
            .iter()
            .map(|(ext, count)| format!("{} ({})", ext, count))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn elapsed_display(&self) -> String {
        format_duration(self.elapsed)
    }
}

/// Format a duration as HH:MM:SS wall-clock time.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

//! Progress bar display across install targets

use indicatif::{ProgressBar, ProgressStyle};

/// Longest path shown in the message line before truncation
const MAX_MESSAGE_CHARS: usize = 50;

/// Truncate long paths for display, keeping the trailing components
///
/// Counts characters, not bytes, so multibyte directory names never split
/// mid-character.
fn truncate_path(path: &str) -> String {
    let chars = path.chars().count();
    if chars <= MAX_MESSAGE_CHARS {
        return path.to_string();
    }
    let tail: String = path.chars().skip(chars - (MAX_MESSAGE_CHARS - 3)).collect();
    format!("...{tail}")
}

/// Single progress bar covering the whole dispatch phase
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with the total target count
    pub fn new(total_targets: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-");

        let bar = ProgressBar::new(total_targets);
        bar.set_style(style);

        Self { bar }
    }

    /// Show the target currently being installed
    pub fn start_target(&self, path: &str) {
        self.bar.set_message(truncate_path(path));
    }

    /// Mark one target as finished
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Clear the bar before the report is rendered
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_path_shown_unchanged() {
        assert_eq!(truncate_path("/tmp/tree/pkg"), "/tmp/tree/pkg");
    }

    #[test]
    fn test_long_path_keeps_trailing_components() {
        let path = format!("/very/long/prefix{}/packages/app", "/x".repeat(40));
        let shown = truncate_path(&path);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("/packages/app"));
        assert_eq!(shown.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_multibyte_path_below_char_limit_shown_unchanged() {
        // 30 characters but 90 bytes; must not be cut mid-character
        let path = "日".repeat(30);
        assert_eq!(truncate_path(&path), path);
    }

    #[test]
    fn test_long_multibyte_path_does_not_split_characters() {
        let path = "日".repeat(60);
        let shown = truncate_path(&path);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("日"));
        assert_eq!(shown.chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn test_start_target_accepts_multibyte_paths() {
        let progress = ProgressDisplay::new(1);
        progress.start_target(&"日本語のディレクトリ".repeat(10));
        progress.inc();
        progress.finish();
    }
}

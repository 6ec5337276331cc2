//! Status icons for CLI output

use colored::{ColoredString, Colorize};

/// Status icons for command outcomes
pub struct StatusIcon;

impl StatusIcon {
    /// Request accepted or completed
    pub const SUCCESS: &'static str = "✓";

    /// Nothing was changed
    pub const SKIPPED: &'static str = "⚠";

    /// Request failed
    pub const ERROR: &'static str = "✗";

    /// Colored icon for a command that either changed something or did not
    pub fn outcome(changed: bool) -> ColoredString {
        if changed {
            Self::SUCCESS.green()
        } else {
            Self::SKIPPED.yellow()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_icon() {
        assert!(StatusIcon::outcome(true).to_string().contains(StatusIcon::SUCCESS));
        assert!(StatusIcon::outcome(false).to_string().contains(StatusIcon::SKIPPED));
    }
}

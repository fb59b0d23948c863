//! Busy indicator shown while a request is outstanding.

use tracing::debug;

/// Progress bar overlay at the top of the page body.
#[derive(Debug, Default)]
pub struct Loader {
    visible: bool,
}

impl Loader {
    /// Markup inserted at the top of `<body>` while visible.
    pub const MARKUP: &'static str =
        "  <div class=\"progress\">\n    <div class=\"indeterminate\"></div>\n  </div>";

    /// Insert the indicator. Showing twice still yields a single indicator.
    pub fn show(&mut self) {
        if !self.visible {
            debug!("Loader shown");
        }
        self.visible = true;
    }

    /// Remove the indicator if present.
    pub fn remove(&mut self) {
        if self.visible {
            debug!("Loader removed");
        }
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

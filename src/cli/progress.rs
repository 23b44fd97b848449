//! Terminal loading indicator shown while a chat turn is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Braille dots.
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create an animated spinner with the given message.
///
/// Call one of the finish helpers (`finish_clear`, `finish_error`) when done.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars(TICK_CHARS)
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Remove the spinner line; the reply is printed in its place.
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

/// Finish a spinner with a red cross.
pub fn finish_error(pb: &ProgressBar, msg: &str) {
    if let Ok(style) = ProgressStyle::default_spinner().template("  {msg}") {
        pb.set_style(style);
    }
    pb.finish_with_message(format!("✗ {}", msg));
}

/// Marker printed in front of each message in the transcript.
pub fn role_icon(role: crate::models::Role) -> &'static str {
    match role {
        crate::models::Role::User => "›",
        crate::models::Role::Assistant => "◆",
    }
}

//! Progress display while repositories are scanned and queried

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::config::{PROGRESS_TEMPLATE, PROGRESS_TICK_MS, SCANNING_MESSAGE};

/// Creates the spinner shown on stderr during a run
///
/// Returns a hidden bar when `visible` is false so callers never need to branch.
/// indicatif also hides it on its own when stderr is not a terminal.
pub fn create_scan_progress(visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(create_progress_style()?);
    pb.set_prefix(SCANNING_MESSAGE);
    pb.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
    Ok(pb)
}

/// Creates a progress bar style configuration
/// Returns a ProgressStyle configured with the application's visual styling
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_spinner().template(PROGRESS_TEMPLATE)?)
}

//! Progress bar utilities.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for downloads.
pub fn create_download_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {percent}% {bytes}/{total_bytes} ({eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

/// Create a byte counter for downloads of unknown size.
pub fn create_byte_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {bytes} received")
    {
        spinner.set_style(style);
    }
    spinner
}

/// Progress display for one transfer, hidden when `visible` is false.
pub fn transfer_bar(content_length: Option<u64>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    match content_length {
        Some(total) => create_download_bar(total),
        None => create_byte_spinner(),
    }
}

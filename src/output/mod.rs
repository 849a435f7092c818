//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Run summary reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_error, print_info, print_run_config, print_success, print_warning,
};
pub use progress::{create_byte_spinner, create_download_bar, transfer_bar};
pub use stats::print_run_summary;

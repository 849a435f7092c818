//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     ig-spider                                         ║
║     Resumable photo and video feed downloader         ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print a summary of what this run will do.
pub fn print_run_config(
    username: &str,
    mode: &str,
    download_type: &str,
    pages: (u32, u32),
    download_dir: &str,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Account:   {}", username);
    println!("  Mode:      {}", mode);
    println!("  Type:      {}", download_type);
    println!("  Pages:     {} done, limit {}", pages.0, pages.1);
    println!("  Directory: {}", download_dir);
    println!();
}

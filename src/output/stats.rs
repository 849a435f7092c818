//! Run summary reporting.

use console::style;

use crate::download::{AbortCause, CrawlReport, TerminalState};

/// Print the outcome of a crawl.
pub fn print_run_summary(report: &CrawlReport) {
    let stats = &report.stats;

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Statistics for {}:", report.checkpoint.username)).bold()
    );
    println!("  Pictures: {}", stats.pic_count);
    println!("  Videos:   {}", stats.vid_count);
    println!("  Existing: {} (already downloaded)", stats.already_complete);
    println!("  Filtered: {}", stats.filtered);
    println!(
        "  Pages:    {} this run, {} total",
        stats.pages, report.checkpoint.page_index
    );

    let status = match &report.terminal {
        TerminalState::Exhausted => style("no more pages".to_string()).green(),
        TerminalState::LimitReached => style("page limit reached".to_string()).green(),
        TerminalState::Aborted(AbortCause::ExistingFile(path)) => {
            style(format!("stopped at existing file {}", path.display())).yellow()
        }
        TerminalState::Aborted(AbortCause::Interrupted) => {
            style("interrupted".to_string()).yellow()
        }
        TerminalState::Aborted(AbortCause::Failed(e)) => style(format!("failed: {}", e)).red(),
    };
    println!("  Status:   {}", status);
    println!(
        "  Downloaded {} items",
        style(stats.total_downloaded()).green().bold()
    );
    println!("{}", style("═".repeat(50)).dim());
}

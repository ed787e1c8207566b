//! Vanity Address Search CLI
//!
//! Usage:
//!   vanity_search -p dead               # Search until Ctrl+C, appending hits to matches.txt
//!   vanity_search -p BEEF -c -n 3       # Three checksummed addresses containing "BEEF"
//!   vanity_search -p cafe -f lower -w 4 # Lowercase addresses, four workers

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use vanity_search::crypto::ADDRESS_HEX_LEN;
use vanity_search::output::{Console, FileSink, Tee};
use vanity_search::{CancellationToken, Config, Coordinator, KeypairSource, RunSummary};

fn main() {
    let config = Config::parse();
    init_logging(config.debug);

    let run_config = match config.run_config() {
        Ok(run_config) => run_config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    let pattern = run_config.pattern().clone();

    println!("Vanity Address Search");
    println!("=====================");
    println!("Pattern:        {}", pattern);
    println!("Case-sensitive: {}", pattern.is_case_sensitive());
    println!("Format:         {}", config.format);
    println!("Difficulty:     {}", pattern.difficulty_description(ADDRESS_HEX_LEN));
    println!("Workers:        {}", run_config.workers());
    if run_config.max_hits() == 0 {
        println!("Max matches:    unlimited");
    } else {
        println!("Max matches:    {}", run_config.max_hits());
    }
    println!("Output file:    {}", config.output.display());
    println!();

    let file = match FileSink::open(&config.output) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let console = Console::stdout(pattern, config.show_stats());
    let mut sinks = Tee::new().with(file).with(console.hit_sink());

    let max_hits = run_config.max_hits();
    let mut coordinator = Coordinator::new(run_config);
    if config.show_stats() {
        coordinator = coordinator.with_progress(config.report_interval(), console.progress_sink());
    }
    ctrlc_handler(coordinator.cancel_token());

    println!("Searching... (Press Ctrl+C to stop)\n");

    let summary = coordinator.run(KeypairSource::new(config.format), &mut sinks);
    console.finish();

    if max_hits > 0 && summary.total_matches >= max_hits {
        println!("\nTarget reached! Found {} address(es).", summary.total_matches);
    } else {
        println!("\nStopped by user.");
    }
    print_summary(&summary);
}

fn init_logging(debug: bool) {
    let default_directive = if debug { "vanity_search=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(summary: &RunSummary) {
    println!("\n--- Final Statistics ---");
    println!(
        "Total addresses generated: {}",
        format_number(summary.total_generated)
    );
    println!("Total matches found:       {}", summary.total_matches);
    println!(
        "Time elapsed:              {:.2}s",
        summary.elapsed.as_secs_f64()
    );
    println!(
        "Average speed:             {}/s",
        format_number(summary.average_rate() as u64)
    );
}

fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.2}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn ctrlc_handler(cancel: Arc<CancellationToken>) {
    if let Err(e) = ctrlc::set_handler(move || {
        cancel.cancel();
    }) {
        warn!(error = %e, "could not install Ctrl+C handler");
    }
}

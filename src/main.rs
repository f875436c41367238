//! # chatheat CLI
//!
//! Command-line interface for chatheat library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatheat::ChatheatError;
use chatheat::cli::Args;
use chatheat::pipeline::{Pipeline, RunOutcome};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "chatheat=debug" } else { "chatheat=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatheatError> {
    let total_start = Instant::now();
    let skype = args.skype_config()?;
    let report = args.report_config()?;

    // Print header
    println!("📦 chatheat v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", report.output.display());
    println!("🕒 Zone:    {}", skype.time_zone);
    println!("📊 Charts:  {}", report.charts.len());
    println!("🗓️  Years:   {}", report.order.years);
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref group) = args.group {
        println!("👥 Group:   {}", group);
    }
    println!();

    println!("⏳ Building report...");
    let pipeline = Pipeline::new(skype, report);
    let summary = pipeline.run(&args.input)?;
    let total_time = total_start.elapsed();
    let report_path = &pipeline.report_config().output;

    let stats = summary.stats;
    println!(
        "   {} conversations: {} group, {} personal, {} empty, {} excluded",
        stats.conversations, stats.group, stats.personal, stats.empty, stats.excluded
    );
    println!("   {} messages loaded, {} charted", summary.rows, summary.group_rows);

    println!();
    match summary.outcome {
        RunOutcome::Rendered => println!("✅ Done! Report saved to {}", report_path.display()),
        RunOutcome::NoData => println!(
            "⚠️  No group messages found. Empty report saved to {}",
            report_path.display()
        ),
    }
    for extra in summary.written.iter().skip(1) {
        println!("   Also wrote {}", extra.display());
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_time.as_secs_f64());

    if !args.no_open {
        if let Err(e) = webbrowser::open(&report_path.to_string_lossy()) {
            eprintln!("⚠️  Could not open browser: {}", e);
        }
    }

    Ok(())
}

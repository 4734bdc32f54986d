//! Human-readable text output

use crate::config::Config;
use crate::pipeline::RunSummary;
use crate::util::time::{calculate_rate, format_duration};

/// Print run results to the console
///
/// Displays address counts, failure causes, call latency, and the centroid
/// (or the reason it is undefined).
pub fn print_report(summary: &RunSummary, config: &Config) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    CENTROID RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    println!("Elapsed Time: {:.3}s", summary.elapsed.as_secs_f64());
    if summary.cancelled {
        println!("Run cancelled before the address list was exhausted");
    }
    println!();

    let rate = calculate_rate(summary.attempted, summary.elapsed);
    println!("Addresses:");
    println!("  Read:      {}", summary.addresses_read);
    println!("  Attempted: {}", summary.attempted);
    println!("  Resolved:  {}", summary.resolved);
    println!("  Failed:    {}", summary.failures.len());
    println!("  Rate:      {:.1} addr/s", rate);
    println!();

    if !summary.failures.is_empty() {
        println!("Failures:");
        for failure in &summary.failures {
            println!("  {}: {}", failure.address, failure.error);
        }
        println!();
    }

    let hist = summary.stats.latency();
    if !hist.is_empty() {
        println!("Geocode Latency:");
        println!("  Min:    {}", format_duration(hist.min()));
        println!("  Mean:   {}", format_duration(hist.mean()));
        println!("  Max:    {}", format_duration(hist.max()));

        if config.output.show_percentiles {
            println!();
            println!("  Percentiles:");
            for &p in &[50.0, 90.0, 95.0, 99.0] {
                println!("    p{:5.2}: {}", p, format_duration(hist.percentile(p)));
            }
        }
        println!();
    }

    if config.output.per_worker_output {
        println!("Per-Worker:");
        for (id, stats) in &summary.per_worker {
            println!(
                "  worker {}: {} calls ({} resolved, {} failed)",
                id,
                stats.attempted(),
                stats.resolved(),
                stats.failed()
            );
        }
        println!();
    }

    match &summary.centroid {
        Ok(center) => println!("Centroid: {}", center),
        Err(e) => println!("Centroid: undefined - {}", e),
    }
    println!("═══════════════════════════════════════════════════════════");
}

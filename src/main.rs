//! # chatshelf CLI
//!
//! Command-line interface for the chatshelf library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use chatshelf::ShelfError;
use chatshelf::cli::Args;
use chatshelf::core::{Granularity, process_export};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "chatshelf=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ShelfError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let config = args.config();
    let granularity: Granularity = args.time_group.into();

    // Print header
    println!("📚 chatshelf v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💬 Chat:    {}", args.conversation_name);
    println!("💾 Output:  {}", args.output_folder.display());
    println!("🗓️  Group:   {}", granularity);
    if let Some(layout) = config.layout {
        println!("📅 Layout:  {} (forced)", layout);
    }
    println!();

    let summary = process_export(
        &args.input,
        &args.conversation_name,
        &args.output_folder,
        granularity,
        &config,
    )?;

    if summary.is_empty() {
        println!("⚠️  No messages found, nothing written.");
        return Ok(());
    }

    for failure in &summary.failed {
        eprintln!("⚠️  {}", failure);
    }

    let total_time = total_start.elapsed();

    println!("✅ Done! Files saved to {}", args.output_folder.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!(
        "   Layout:    {}{}",
        summary.detection.layout,
        if summary.detection.is_fallback() {
            " (ambiguous, assumed)"
        } else {
            ""
        }
    );
    println!("   Messages:  {}", summary.message_count);
    println!("   Media:     {}", summary.media_count);
    println!("   Grouping:  {}", summary.period);
    println!("   Files:     {}/{}", summary.written.len(), summary.planned);
    if summary.planned > config.max_files {
        println!("   ⚠️  More files than the limit of {}", config.max_files);
    }

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());

    Ok(())
}

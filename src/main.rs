use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use credential_sift::config::Config;
use credential_sift::constants::{DEFAULT_CONFIG_FILE, FAILURE_EXIT_CODE, INPUT_PROMPT};
use credential_sift::core::pipeline::Sifter;
use credential_sift::core::report::render_report;
use credential_sift::utils::io::{prompt_for_path, resolve_input_path};
use credential_sift::utils::system::{format_duration, setup_logging};

#[derive(Parser)]
#[command(name = "credential-sift")]
#[command(about = "🧹 Credential Sift: collapses duplicate browser logins and flags the suspicious ones")]
#[command(version)]
struct Args {
    #[arg(short, long, help = "Password export to sift (prompted for when omitted)")]
    input: Option<PathBuf>,

    #[arg(short, long, help = "Output file for the clean export")]
    output: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, help = "Configuration file")]
    config: PathBuf,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[arg(long, help = "Original export used to restore full urls and username casing")]
    restore_from: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{:#}", e);
        process::exit(FAILURE_EXIT_CODE);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    if args.verbose {
        config.logging.verbosity = "verbose".to_string();
    }
    if let Some(output) = args.output {
        config.io.output_path = output;
    }

    setup_logging(&config.logging.verbosity)?;

    let input = match args.input {
        Some(path) => resolve_input_path(path)?,
        None => {
            let raw = prompt_for_path(&mut io::stdin().lock(), &mut io::stdout(), INPUT_PROMPT)?;
            resolve_input_path(raw)?
        }
    };

    let mut sifter = Sifter::new(config);
    if let Some(reference) = args.restore_from {
        sifter = sifter.with_restore_reference(reference);
    }

    let outcome = sifter.prepare(&input)?;
    print!("{}", render_report(&outcome.classification));
    sifter.write(&outcome)?;

    let stats = &outcome.stats;
    println!("\n🎉 Sifting completed successfully!");
    println!("=======================================");
    println!("📊 Records read: {}", stats.total_records);
    println!("🕳️ Incomplete rows dropped: {}", stats.incomplete_removed);
    println!("✨ Unique credentials kept: {}", stats.unique_records);
    println!("🗑️ Exact duplicates removed: {}", stats.exact_duplicates_removed);
    println!("⚠️ Possible duplicates: {}", stats.possible_duplicates);
    println!("⌛ Possible outdated: {}", stats.possible_outdated);
    if stats.restored_fields > 0 {
        println!("🩹 Fields restored: {}", stats.restored_fields);
    }
    println!("⏱️ Processing time: {}", format_duration(stats.processing_time));
    println!("📜 Output written to: {}", outcome.output_path.display());

    Ok(())
}

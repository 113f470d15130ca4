use clap::{Parser, Subcommand};
use tracing::info;

use esg_claims::batch;
use esg_claims::config::Config;
use esg_claims::export;
use esg_claims::logging;

#[derive(Parser)]
#[command(name = "esg_claims")]
#[command(about = "Sustainability-report claim extraction pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config controlling the directory layout
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean raw report text files into sentence-level claim records
    Clean {
        /// Directory of raw `<COMPANY>_<YYYY>.txt` files
        #[arg(long)]
        input: Option<String>,
        /// Directory receiving one `.jsonl` file per report
        #[arg(long)]
        output: Option<String>,
    },
    /// Drop glossary noise and rebalance compound metric sentences
    Refine {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Explode records into role-pure atomic claims
    Atomic {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Combine record files into one flat CSV table
    Export {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Report atomicity statistics over an exploded corpus
    Validate {
        #[arg(long)]
        input: Option<String>,
    },
    /// Run clean, refine and atomic sequentially
    Run,
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Clean { input, output } => {
            let input = input.unwrap_or_else(|| config.raw_dir.clone());
            let output = output.unwrap_or_else(|| config.cleaned_dir.clone());
            println!("🧹 Cleaning raw reports from {input}...");
            let summary = batch::run_clean(&input, &output)?;
            print_summary("Cleaning", &summary);
        }
        Commands::Refine { input, output } => {
            let input = input.unwrap_or_else(|| config.cleaned_dir.clone());
            let output = output.unwrap_or_else(|| config.refined_dir.clone());
            println!("⚖️  Refining cleaned records from {input}...");
            let summary = batch::run_refine(&input, &output)?;
            print_summary("Refinement", &summary);
        }
        Commands::Atomic { input, output } => {
            let input = input.unwrap_or_else(|| config.refined_dir.clone());
            let output = output.unwrap_or_else(|| config.atomic_dir.clone());
            println!("⚛️  Exploding records from {input}...");
            let summary = batch::run_atomic(&input, &output)?;
            print_summary("Atomic extraction", &summary);
        }
        Commands::Export { input, output } => {
            let input = input.unwrap_or_else(|| config.atomic_dir.clone());
            let output = output.unwrap_or_else(|| config.export_file.clone());
            println!("📦 Exporting records from {input}...");
            let rows = export::export_csv(&input, &output)?;
            println!("✅ Combined CSV written to {output} ({rows} rows)");
        }
        Commands::Validate { input } => {
            let input = input.unwrap_or_else(|| config.atomic_dir.clone());
            let report = batch::validate_atomicity(&input)?;
            println!("Total sentences: {}", report.total_records);
            println!("Average sentence length: {}", report.mean_sentence_chars);
            println!("Mixed-role violations: {}", report.mixed_role_violations);
        }
        Commands::Run => {
            info!("running full batch pipeline");
            println!("🧹 Cleaning raw reports from {}...", config.raw_dir);
            let cleaned = batch::run_clean(&config.raw_dir, &config.cleaned_dir)?;
            print_summary("Cleaning", &cleaned);

            println!("⚖️  Refining cleaned records...");
            let refined = batch::run_refine(&config.cleaned_dir, &config.refined_dir)?;
            print_summary("Refinement", &refined);

            println!("⚛️  Exploding refined records...");
            let atomic = batch::run_atomic(&config.refined_dir, &config.atomic_dir)?;
            print_summary("Atomic extraction", &atomic);
        }
    }

    Ok(())
}

fn print_summary(stage: &str, summary: &batch::StageSummary) {
    println!(
        "📊 {} finished: {} files, {} records -> {}",
        stage, summary.files_processed, summary.records_written, summary.output_dir
    );
}

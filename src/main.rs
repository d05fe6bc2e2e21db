use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use termsieve::config::{AggregationPolicy, RunOptions, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONTEXTS};
use termsieve::pipeline;

/// Termsieve: near-duplicate detection for controlled-vocabulary curation.
///
/// Compares candidate terms against each other and against a master glossary
/// so a human reviewer only sees genuinely new terms.
#[derive(Parser)]
#[command(name = "termsieve", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full tiered detection pipeline over a term/context corpus
    Run {
        /// JSON corpus mapping term -> { contexts, source }
        #[arg(long)]
        corpus: PathBuf,

        /// Master glossary file (term|identifier per line)
        #[arg(long)]
        master: PathBuf,

        /// Directory for the final reports (headered tables + HTML)
        #[arg(long)]
        output_dir: PathBuf,

        /// Directory for the intermediate candidate tables
        #[arg(long)]
        subdir: PathBuf,

        /// Max context snippets rendered per term in the HTML report
        #[arg(long, default_value_t = DEFAULT_MAX_CONTEXTS)]
        max_contexts: usize,

        /// How corpus entries sharing a lowercase key are merged
        #[arg(long, value_enum, default_value = "first-source-wins")]
        aggregation: AggregationPolicy,

        /// Master rows per chunk in the cross-similarity computation
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Annotate a new-terms file (glossary format) against the master,
    /// reporting every match without dropping anything
    Check {
        /// New terms file (term|identifier per line)
        #[arg(long)]
        new_terms: PathBuf,

        /// Master glossary file (term|identifier per line)
        #[arg(long)]
        master: PathBuf,

        /// Output file for the annotated table
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("termsieve=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            corpus,
            master,
            output_dir,
            subdir,
            max_contexts,
            aggregation,
            chunk_size,
        } => {
            let options = RunOptions {
                corpus_path: corpus,
                master_path: master,
                output_dir,
                subdir,
                max_contexts,
                aggregation,
                chunk_size,
            };
            let summary = pipeline::run(&options)?;
            termsieve::report::terminal::display_summary(&summary);
            println!(
                "{}",
                format!("Reports written to {}", options.output_dir.display()).dimmed()
            );
        }

        Commands::Check {
            new_terms,
            master,
            out,
        } => {
            pipeline::check(&new_terms, &master, &out)?;
            println!("Annotated table written to {}", out.display());
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bibtex-citation-enrichment")]
#[command(about = "Unified CLI for converting BibTeX citation databases into literature review tables enriched with Scopus journal metrics")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a BibTeX file to a review table without external lookups
    Convert(ConvertArgs),

    /// Convert a BibTeX file to a review table with Scopus metric lookups
    Enrich(EnrichArgs),
}

#[derive(Parser, Clone)]
pub struct ConvertArgs {
    /// Path to the BibTeX citation database
    #[arg(short, long, required = true)]
    pub input: String,

    /// Output CSV report file
    #[arg(short, long, default_value = "report.csv")]
    pub output: String,

    /// Logging level (OFF, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct EnrichArgs {
    /// Path to the BibTeX citation database
    #[arg(short, long, required = true)]
    pub input: String,

    /// Output CSV report file
    #[arg(short, long, default_value = "report.csv")]
    pub output: String,

    /// Scopus API key (falls back to the SCOPUS_API_KEY environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Concurrent metric lookups
    #[arg(short, long, default_value = "4")]
    pub concurrency: usize,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Logging level (OFF, DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

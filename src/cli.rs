use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bioc-corpus-server")]
#[command(about = "Serve dashboard, inspector, and publication views over a directory of BioC JSON files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the corpus JSON API, reloading on a TTL and on directory changes
    Serve(ServeArgs),

    /// Load the corpus once and log per-file dashboard counts
    Summary(SummaryArgs),

    /// Print one publication (or inspector record) as JSON
    Show(ShowArgs),
}

/// Options shared by every command that reads the corpus
#[derive(Args, Clone, Debug)]
pub struct CorpusArgs {
    /// Corpus directory (default: first of ../bioc, ./bioc, ../../bioc that exists)
    #[arg(short, long, env = "BIOC_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of threads for per-file derivation (0 = auto-detect)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Seconds before a loaded corpus is considered stale
    #[arg(long, default_value = "300")]
    pub ttl_secs: u64,

    /// Quiet period in milliseconds before a directory change triggers a reload
    #[arg(long, default_value = "1000")]
    pub debounce_ms: u64,

    /// Do not watch the corpus directory for changes
    #[arg(long, default_value = "false")]
    pub no_watch: bool,
}

#[derive(Args, Clone, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Publication id (or record id with --record)
    pub id: String,

    /// Look up an inspector record instead of a publication
    #[arg(long, default_value = "false")]
    pub record: bool,
}

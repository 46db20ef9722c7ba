use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "verdict",
    about = "Semantic document comparison with configurable match rules",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the semantic diff between two documents
    Diff(DiffArgs),
    /// Check two documents for semantic equality
    Verify(VerifyArgs),
    /// Print the canonical text form of a document
    Canon(CanonArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Expected document (.json parsed as JSON, anything else as YAML)
    pub expected: String,
    /// Actual document
    pub actual: String,
    #[command(flatten)]
    pub rules: RuleFlags,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub expected: String,
    pub actual: String,
    /// Label printed ahead of the diff on mismatch
    #[arg(long)]
    pub summary: Option<String>,
    #[command(flatten)]
    pub rules: RuleFlags,
}

#[derive(Args)]
pub struct CanonArgs {
    pub file: String,
    /// Treat the file as an HTML fragment instead of a value document
    #[arg(long)]
    pub html: bool,
}

#[derive(Args)]
pub struct RuleFlags {
    /// Null expectations match any actual value
    #[arg(long)]
    pub ignore_nulls: bool,
    /// "!"-prefixed string expectations assert inequality
    #[arg(long)]
    pub negate: bool,
    /// "/pattern/" string expectations match by regex
    #[arg(long)]
    pub regex: bool,
    /// String expectations containing "*" match as wildcards
    #[arg(long)]
    pub wildcard: bool,
    /// Drop actual-side object keys missing from the expectation
    #[arg(long)]
    pub ignore_extra_keys: bool,
    /// Compare ".json"-suffixed string fields structurally
    #[arg(long)]
    pub nested_json: bool,
    /// Canonicalize ".html"-suffixed string fields before comparing
    #[arg(long)]
    pub nested_html: bool,
    /// Enable every built-in rule
    #[arg(long)]
    pub standard: bool,
}

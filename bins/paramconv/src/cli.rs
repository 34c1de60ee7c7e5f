use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "paramconv", about = "Resolve handler parameters through a converter chain")]
pub struct Cli {
    /// Path to TOML configuration file. Built-in default chain when omitted.
    #[arg(long, global = true, env = "PARAMCONV_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one value to a target type
    Convert(ConvertArgs),
    /// Show the configured converter chain in resolution order
    Chain,
    /// List converter kinds available to configuration
    Kinds,
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// Target type, e.g. int64, optional<bool>, array<float64>, named:Order
    #[arg(long, short)]
    pub target: String,

    /// Parameter name used in diagnostics
    #[arg(long, short, default_value = "value")]
    pub name: String,

    /// Source value (text unless --json or --bytes is given)
    #[arg(required_unless_present = "absent", conflicts_with = "absent")]
    pub value: Option<String>,

    /// Interpret the source value as a JSON document
    #[arg(long, conflicts_with = "bytes")]
    pub json: bool,

    /// Interpret the source value as base64-encoded bytes
    #[arg(long)]
    pub bytes: bool,

    /// Convert a missing value (no source at all)
    #[arg(long)]
    pub absent: bool,
}

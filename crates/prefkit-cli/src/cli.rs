use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use prefkit_core::Scope;

#[derive(Parser)]
#[command(
    name = "prefctl",
    about = "Inspect and edit prefkit preference scopes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the scope files (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

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
    /// Print the value stored under a key
    Get(GetArgs),
    /// Store a typed value under a key
    Set(SetArgs),
    /// Remove a key
    Remove(RemoveArgs),
    /// List every key in a scope
    List(ScopeArgs),
    /// Remove every key in a scope
    Clear(ScopeArgs),
}

#[derive(Args)]
pub struct ScopeArgs {
    /// `user` or `app_settings`
    pub scope: Scope,
}

#[derive(Args)]
pub struct GetArgs {
    pub scope: Scope,
    pub key: String,
}

#[derive(Args)]
pub struct SetArgs {
    pub scope: Scope,
    pub key: String,
    pub kind: KindArg,
    /// The value; comma-separated for `set`, JSON text for `json`
    pub value: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub scope: Scope,
    pub key: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    Bool,
    Float,
    Int,
    Long,
    String,
    Set,
    Json,
}

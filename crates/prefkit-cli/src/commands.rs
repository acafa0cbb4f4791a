use std::collections::BTreeMap;

use anyhow::{bail, Context};
use colored::Colorize;
use prefkit_core::{open_scope, PrefValue, Preferences, PrefsConfig, Scope};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    debug!(root = %config.root_dir.display(), "using preference root");
    let format = cli.format;

    match cli.command {
        Command::Get(args) => cmd_get(&config, args, &format),
        Command::Set(args) => cmd_set(&config, args),
        Command::Remove(args) => cmd_remove(&config, args),
        Command::List(args) => cmd_list(&config, args, &format),
        Command::Clear(args) => cmd_clear(&config, args),
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<PrefsConfig> {
    let mut config = match &cli.config {
        Some(path) => PrefsConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PrefsConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.root_dir = root.clone();
    }
    Ok(config)
}

fn open(config: &PrefsConfig, scope: Scope) -> anyhow::Result<Preferences> {
    open_scope(config, scope).with_context(|| format!("opening scope {scope}"))
}

fn cmd_get(config: &PrefsConfig, args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let prefs = open(config, args.scope)?;
    let Some(value) = prefs.raw(&args.key)? else {
        bail!("{} is not set in {}", args.key, args.scope);
    };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{value}"),
    }
    Ok(())
}

fn cmd_set(config: &PrefsConfig, args: SetArgs) -> anyhow::Result<()> {
    let value = parse_value(args.kind, &args.value)?;
    let kind = value.kind_name();
    let prefs = open(config, args.scope)?;
    prefs.put(&args.key, value)?;
    println!("{} {} = {} ({})", "✓".green().bold(), args.key.bold(), args.value, kind.cyan());
    Ok(())
}

fn cmd_remove(config: &PrefsConfig, args: RemoveArgs) -> anyhow::Result<()> {
    let prefs = open(config, args.scope)?;
    if prefs.remove(&args.key)? {
        println!("{} removed {}", "✓".green().bold(), args.key.bold());
    } else {
        println!("{} was not set", args.key.bold());
    }
    Ok(())
}

fn cmd_list(config: &PrefsConfig, args: ScopeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let prefs = open(config, args.scope)?;
    let mut entries = BTreeMap::new();
    for key in prefs.keys()? {
        if let Some(value) = prefs.raw(&key)? {
            entries.insert(key, value);
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("Scope {} is empty.", args.scope.to_string().yellow());
            }
            for (key, value) in &entries {
                println!("{} = {} ({})", key.bold(), value, value.kind().to_string().cyan());
            }
        }
    }
    Ok(())
}

fn cmd_clear(config: &PrefsConfig, args: ScopeArgs) -> anyhow::Result<()> {
    let prefs = open(config, args.scope)?;
    let count = prefs.keys()?.len();
    prefs.clear()?;
    println!("{} cleared {} keys from {}", "✓".green().bold(), count, args.scope.to_string().yellow());
    Ok(())
}

/// Parse a command-line value as the requested kind.
pub fn parse_value(kind: KindArg, raw: &str) -> anyhow::Result<PrefValue> {
    let value = match kind {
        KindArg::Bool => PrefValue::Bool(raw.parse().with_context(|| format!("invalid bool: {raw}"))?),
        KindArg::Float => PrefValue::Float(raw.parse().with_context(|| format!("invalid float: {raw}"))?),
        KindArg::Int => PrefValue::Int(raw.parse().with_context(|| format!("invalid int: {raw}"))?),
        KindArg::Long => PrefValue::Long(raw.parse().with_context(|| format!("invalid long: {raw}"))?),
        KindArg::String => PrefValue::String(raw.to_string()),
        KindArg::Set => PrefValue::StringSet(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        KindArg::Json => PrefValue::Object(serde_json::from_str(raw).context("invalid JSON value")?),
    };
    Ok(value)
}

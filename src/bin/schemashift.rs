//! schemashift: CREATE TABLE translator CLI
//!
//! # Usage
//!
//! ```bash
//! # Translate a MySQL dump to PostgreSQL
//! schemashift dump.sql --to pgsql
//!
//! # From stdin, LF line endings, into a file
//! cat schema.sql | schemashift --to sqlite --lf -o schema.sqlite.sql
//!
//! # Inspect the parsed model
//! schemashift explain dump.sql --json
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use schemashift::config::Config;
use schemashift::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemashift")]
#[command(version)]
#[command(about = "Translate CREATE TABLE schemas between SQLite, MySQL/MariaDB and PostgreSQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    schemashift dump.sql --to pgsql
    cat schema.sql | schemashift --to sqlite --lf
    schemashift explain dump.sql --json")]
struct Cli {
    /// SQL script to translate (stdin when omitted)
    input: Option<PathBuf>,

    /// Target dialect: sqlite, mysql, mariadb, pgsql, postgresql
    #[arg(short, long, env = "SCHEMASHIFT_TARGET")]
    to: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use LF instead of CRLF line endings
    #[arg(long)]
    lf: bool,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parsed table model of a script
    Explain {
        /// SQL script (stdin when omitted)
        input: Option<PathBuf>,

        /// Print the model as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the accepted dialect identifiers
    Dialects,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Explain { input, json }) => explain(input.as_deref(), *json),
        Some(Commands::Dialects) => {
            show_dialects();
            Ok(())
        }
        None => run(&cli),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "schemashift=debug" } else { "schemashift=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let dialect = match &cli.to {
        Some(name) => name.parse::<Dialect>()?,
        None => config
            .target()?
            .context("No target dialect. Use --to or set [output] target in schemashift.toml")?,
    };

    let mut options = config.emit_options();
    if cli.lf {
        options.line_ending = LineEnding::Lf;
    }

    let script = read_input(cli.input.as_deref())?;
    let translation = Translator::with_options(options).translate_with_report(&script, dialect);

    if cli.verbose {
        for diagnostic in &translation.report.diagnostics {
            eprintln!(
                "{} statement {}: {}",
                "skipped".yellow(),
                diagnostic.statement + 1,
                diagnostic.error
            );
        }
    }

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &translation.sql)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} table(s) to {}",
                "✓".green(),
                translation.report.tables.len(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", translation.sql),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read stdin")?;
            Ok(script)
        }
    }
}

fn explain(input: Option<&Path>, json: bool) -> Result<()> {
    let script = read_input(input)?;
    let report = Translator::new().parse(&script);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for table in &report.tables {
        println!("{} {}", "Table:".green().bold(), table.name.white().bold());
        if let Some(pk) = &table.primary_key {
            println!("  {} {}", "Primary key:".dimmed(), pk.cyan());
        }
        if !table.composite_key.is_empty() {
            println!(
                "  {} ({})",
                "Composite key:".dimmed(),
                table.composite_key.join(", ").cyan()
            );
        }
        for col in &table.columns {
            let mut flags = Vec::new();
            if col.key {
                flags.push("key");
            }
            if !col.nullable {
                flags.push("not null");
            }
            if col.auto_increment {
                flags.push("auto");
            }
            if col.unsigned {
                flags.push("unsigned");
            }
            let type_text = if col.length.is_empty() {
                col.type_name.clone()
            } else {
                format!("{}({})", col.type_name, col.length)
            };
            println!(
                "    • {:20} {:24} {}",
                col.name.white(),
                type_text.yellow(),
                flags.join(", ").dimmed()
            );
            if let Some(default) = &col.default {
                println!("      {} {}", "default".dimmed(), default);
            }
        }
        println!();
    }

    for diagnostic in &report.diagnostics {
        println!(
            "{} statement {}: {}",
            "Skipped".yellow().bold(),
            diagnostic.statement + 1,
            diagnostic.error
        );
    }
    Ok(())
}

fn show_dialects() {
    println!("{:10} {}", "Dialect".white().bold(), "Identifiers".white().bold());
    println!("{}", "─".repeat(48).dimmed());
    for dialect in Dialect::ALL {
        println!(
            "{:10} {}",
            dialect.name().cyan().bold(),
            dialect.aliases().join(", ").dimmed()
        );
    }
}

//! incbin CLI: emit embedding code for any supported toolchain.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use incbin_codegen::{EmitLanguage, NamingStyle};
use manifest::IncbinManifest;

#[derive(Parser)]
#[command(name = "incbin", version, about = "Build-time binary embedding")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new incbin project
    Init {
        /// Project name
        name: String,
    },
    /// Manage target profiles
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Generate embedding code
    Emit(EmitCli),
    /// Report sizes, digests, and symbols without writing anything
    Inspect {
        /// Target profile (default: manifest [target] default, else host)
        #[arg(long)]
        target: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
}

#[derive(Args)]
struct EmitCli {
    /// Target profile (default: manifest [target] default, else host)
    #[arg(long)]
    target: Option<String>,
    /// Output language (asm, c, c-header, rust, rust-extern); repeatable
    #[arg(long = "lang", value_parser = parse_language)]
    languages: Vec<EmitLanguage>,
    /// Output file ("-" for stdout); only with a single language
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Prefix composed before the `g` of every symbol
    #[arg(long)]
    prefix: Option<String>,
    /// Symbol naming style (camel, snake)
    #[arg(long, value_parser = parse_style)]
    style: Option<NamingStyle>,
    /// Output section replacing the target's read-only data section
    #[arg(long)]
    section: Option<String>,
    /// Embed ad-hoc resources as NUL-terminated text
    #[arg(long)]
    text: bool,
    /// Omit Rust accessor functions
    #[arg(long)]
    no_accessors: bool,
    /// Ad-hoc resources as NAME=PATH (default: the manifest's [[resource]] list)
    resources: Vec<String>,
}

#[derive(Subcommand)]
enum TargetAction {
    /// List available target profiles
    List,
    /// Show a profile with its alignment and assembler fragments
    Describe {
        /// Profile name
        name: String,
        /// Output format (default: human-readable, "toml" or "json")
        #[arg(long)]
        format: Option<String>,
    },
    /// Write a template profile into profiles/
    New {
        /// Profile name
        name: String,
    },
    /// Validate a profile definition
    Validate {
        /// Profile name
        name: String,
    },
}

fn parse_language(s: &str) -> Result<EmitLanguage, String> {
    s.parse()
}

fn parse_style(s: &str) -> Result<NamingStyle, String> {
    s.parse()
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Target { action } => {
            let (_, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or_else(|| cwd.clone());
            match action {
                TargetAction::List => commands::target::list(Some(&project_dir)),
                TargetAction::Describe { name, format } => {
                    commands::target::describe(&name, Some(&project_dir), format.as_deref())
                }
                TargetAction::New { name } => commands::target::new(&name, &project_dir),
                TargetAction::Validate { name } => {
                    commands::target::validate(&name, Some(&project_dir))
                }
            }
        }

        Commands::Emit(args) => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let request = commands::emit::EmitRequest {
                target: args.target,
                languages: args.languages,
                output: args.output,
                prefix: args.prefix,
                style: args.style,
                section: args.section,
                text: args.text,
                accessors: !args.no_accessors,
                resources: args.resources,
            };
            commands::emit::run(&cwd, manifest.as_ref().zip(project_dir.as_deref()), &request)
        }

        Commands::Inspect { target, format } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::inspect::run(&project_dir, &manifest, target.as_deref(), format.as_deref())
        }
    }
}

/// Load manifest, returning error if not found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(IncbinManifest, PathBuf)> {
    match IncbinManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no incbin.toml found (run `incbin init` first)"),
    }
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<IncbinManifest>, Option<PathBuf>)> {
    match IncbinManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

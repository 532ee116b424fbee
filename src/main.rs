use clap::Parser;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use simplenote_git_export::sequential;
use simplenote_git_export::utils::{self, Author};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Convert a Simplenote export archive into a git repository of Markdown notes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Archive file, exported from simplenote.com.
    /// Defaults to notes.zip if not set in config.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output folder (GitJournal repo). Created and initialised if missing.
    /// Defaults to the current directory if not set in config.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/simplenote-git-export/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print each note exported, deleted or skipped.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress standard output (progress bar, summary).
    #[arg(short, long)]
    quiet: bool,
}

/// Long options that may also be spelled with a single dash.
const SINGLE_DASH_LONGS: &[&str] = &["input", "output", "config", "verbose", "quiet"];

/// Rewrite `-input x` / `-input=x` style flags to their `--` form.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let flag = rest.split('=').next().unwrap_or(rest);
            if SINGLE_DASH_LONGS.contains(&flag) {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}

#[derive(Deserialize, Default, Debug)]
struct FileConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    author_name: Option<String>,
    author_email: Option<String>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        dirs::config_dir()
            .map(|d| d.join("simplenote-git-export/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn resolve(cli: Cli, file_cfg: FileConfig) -> utils::ExportConfig {
    let defaults = Author::default();
    utils::ExportConfig {
        input: cli
            .input
            .or(file_cfg.input)
            .unwrap_or_else(|| PathBuf::from("notes.zip")),
        output: cli
            .output
            .or(file_cfg.output)
            .unwrap_or_else(|| PathBuf::from(".")),
        author: Author {
            name: file_cfg.author_name.unwrap_or(defaults.name),
            email: file_cfg.author_email.unwrap_or(defaults.email),
        },
        verbose: cli.verbose,
        quiet: cli.quiet,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve input/output/author (CLI > Config > Default)
    let config = resolve(cli, file_cfg);

    // 3. Run the Business Logic
    sequential::execute(config)?;
    Ok(())
}

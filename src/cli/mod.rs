use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use crate::config::Config;
use crate::key::{classify, decode_if_wrapped, normalize};
use crate::materialize::{materialize, MaterializeOptions, OutputPaths};
use crate::report::{report, Summary};

/// Argument value meaning "read the key from stdin"
pub const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "sshkey-normalize")]
#[command(about = "Repair a mangled SSH private key and install it for unattended ssh")]
#[command(version)]
pub struct Cli {
    /// Path to a file holding the key, the key text itself, or `-` for stdin
    #[arg(allow_hyphen_values = true)]
    pub input: Option<String>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Copy existing key/config files to `<path>.bak` before overwriting
    #[arg(long)]
    pub backup: bool,
}

pub struct CliHandler {
    config: Config,
}

impl CliHandler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load config from `config_path`, or the default locations
    pub fn from_config_path(config_path: Option<&Path>) -> crate::Result<Self> {
        let config = Config::load_config(config_path)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the whole pipeline for `cli`
    pub fn handle(&self, cli: &Cli) -> Result<Summary> {
        let arg = cli
            .input
            .as_deref()
            .ok_or_else(|| anyhow!("no key given; pass a key file path, the key text, or `-`"))?;

        let raw = resolve_input(arg).context("failed to read key input")?;

        let paths = OutputPaths::from_config(&self.config);
        let mut options = MaterializeOptions::from_config(&self.config);
        options.backup_existing |= cli.backup;

        process(&raw, &paths, &options).context("failed to install SSH key")
    }
}

/// Turn the positional argument into key text.
///
/// An existing regular file is read; anything else is taken as the key
/// itself.
pub fn resolve_input(arg: &str) -> crate::Result<String> {
    if arg == STDIN_MARKER {
        debug!("Reading key from stdin");
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(String::from_utf8_lossy(&buf).into_owned());
    }

    let path = Path::new(arg);
    if path.is_file() {
        debug!("Reading key from {}", path.display());
        let bytes = std::fs::read(path)?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    debug!("Treating argument as inline key text ({} bytes)", arg.len());
    Ok(arg.to_string())
}

/// Decode, normalize, classify and write `raw`.
pub fn process(
    raw: &str,
    paths: &OutputPaths,
    options: &MaterializeOptions,
) -> crate::Result<Summary> {
    let decoded = decode_if_wrapped(raw);
    let normalized = decoded.text.map(normalize);
    let format = classify(normalized.as_str(), raw);

    info!(
        "Detected {} key ({} lines, unwrapped: {})",
        format,
        normalized.line_count(),
        decoded.was_wrapped
    );

    let written = materialize(&normalized, paths, options)?;
    Ok(report(format, &normalized, &written).with_unwrapped(decoded.was_wrapped))
}

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use folio_runtime::MotionConfig;

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Configuration file to load and validate. Defaults are shown when absent.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of TOML.
    #[arg(long)]
    pub json: bool,
}

/// Print the effective motion configuration.
pub fn run_config(args: &ConfigArgs, out: &mut dyn Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => MotionConfig::load(path)?,
        None => MotionConfig::default(),
    };
    let text = if args.json {
        config.to_json_string()?
    } else {
        config.to_toml_string()?
    };
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

use std::io::Write;

use clap::Args;
use folio_runtime::scenes::background::Element;
use folio_runtime::scenes::{BackgroundConfig, BackgroundLayout};
use folio_style::StyleValue;

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Layout seed. The same seed always places elements identically.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Print the layout as pretty JSON.
    #[arg(long)]
    pub json: bool,
}

fn write_element(out: &mut dyn Write, label: &str, index: usize, e: &Element) -> Result<()> {
    writeln!(
        out,
        "{label}{index} left={}% top={}% size={}px speed={} opacity={} hue={}",
        StyleValue::Number(e.left),
        StyleValue::Number(e.top),
        StyleValue::Number(e.size),
        StyleValue::Number(e.speed),
        StyleValue::Number(e.opacity),
        StyleValue::Number(e.hue),
    )?;
    Ok(())
}

pub fn run_layout(args: &LayoutArgs, out: &mut dyn Write) -> Result<()> {
    let layout = BackgroundLayout::generate(&BackgroundConfig {
        seed: args.seed,
        ..BackgroundConfig::default()
    });
    tracing::debug!(
        seed = layout.seed,
        particles = layout.particles.len(),
        orbs = layout.orbs.len(),
        "generated layout"
    );
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&layout)?)?;
        return Ok(());
    }
    writeln!(out, "seed {}", layout.seed)?;
    for (i, particle) in layout.particles.iter().enumerate() {
        write_element(out, "particle", i, particle)?;
    }
    for (i, orb) in layout.orbs.iter().enumerate() {
        write_element(out, "orb", i, orb)?;
    }
    Ok(())
}

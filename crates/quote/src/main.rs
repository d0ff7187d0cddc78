use std::io::Read;

use anyhow::{Context, Result};

use cursorcat_quote::{QuoteConfig, parse_patch, render_quote};

/// Usage: `cursorcat-quote [patch.json]` (reads stdin when no file is given).
fn main() -> Result<()> {
    cursorcat_observability::init();

    let config = QuoteConfig::from_env()?;

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading selection patch from stdin")?;
            buf
        }
    };

    let summary = render_quote(&config, &parse_patch(&input)?)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};

use tablift::source::dump_tokens;
use tablift::SourceRouter;

use super::read_input;

pub fn cmd_tokens(input: &str, output: Option<PathBuf>) -> Result<()> {
    let (name, bytes) = read_input(input)?;
    let pages = SourceRouter::new().load(&name, &bytes)?;
    tracing::info!(
        "{name}: {} pages, {} tokens",
        pages.len(),
        pages.iter().map(Vec::len).sum::<usize>()
    );

    let json = dump_tokens(&pages)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("💾 Saved tokens to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub mod config;
pub mod extract;
pub mod output;
pub mod tokens;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read an input document; `-` reads stdin.
pub fn read_input(input: &str) -> Result<(String, Vec<u8>)> {
    if input == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;
        return Ok(("stdin".to_string(), bytes));
    }

    let bytes = std::fs::read(Path::new(input)).with_context(|| format!("failed to read {input}"))?;
    Ok((input.to_string(), bytes))
}

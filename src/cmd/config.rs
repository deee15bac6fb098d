use anyhow::Result;

use tablift::config::config_path;
use tablift::ExtractConfig;

pub fn cmd_config(config: &ExtractConfig) -> Result<()> {
    println!("# {}", config_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}

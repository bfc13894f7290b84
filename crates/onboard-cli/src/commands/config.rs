use std::path::Path;

use anyhow::{bail, Context, Result};

use onboard_core::AppConfig;

/// Write the default configuration to `path`
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists.\nUse --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default()
        .save_to(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Print the effective configuration, presets resolved
pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

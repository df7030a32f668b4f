use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::schema::Config;

const HEADER: &str = "\
# trustscore configuration
# provider.api_key may be left out and supplied via TRUSTSCORE_API_KEY instead.
";

/// Write the default configuration to `path` (or the default config path).
///
/// Refuses to replace an existing file unless `force` is set. The file is
/// written atomically so a failed write never leaves a truncated config.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p,
        None => super::get_config_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    write_config(&path, &Config::default())?;
    Ok(path)
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config).context("Failed to serialize config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes()).context("Failed to write config")?;
    file.write_all(yaml.as_bytes()).context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

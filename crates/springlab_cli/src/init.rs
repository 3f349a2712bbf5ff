//! `springlab init`: write a starter configuration

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{SpringlabConfig, CONFIG_FILE};

const HEADER: &str = "\
# springlab configuration
#
# [preview]     preset: default | bouncy | gentle | wobbly | stiff | slow
#               kind:   translate | scale | rotate
#               policy: window (animating for window_ms) | settle
# [spring]      optional stiffness / damping / mass / velocity overrides
# [simulation]  fps and duration (seconds; omit to run until settled)

";

/// Write a default `springlab.toml` into `dir`. Refuses to overwrite unless `force`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Pass --force to overwrite it.", path.display());
    }

    let body = SpringlabConfig::default().to_toml()?;
    fs::write(&path, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn written_config_loads_back_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_default_config(dir.path(), false).unwrap();

        assert_eq!(path, dir.path().join(CONFIG_FILE));
        assert_eq!(
            SpringlabConfig::load_from_path(dir.path()).unwrap(),
            SpringlabConfig::default()
        );
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = write_default_config(&nested, false).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn existing_config_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        write_default_config(dir.path(), false).unwrap();

        let err = write_default_config(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(write_default_config(dir.path(), true).is_ok());
    }
}

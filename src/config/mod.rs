mod organization;

pub use organization::{ApiSettings, Config, Organization, PdfSettings, ShareSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.supplytrack or XDG config)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "supplytrack") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".supplytrack"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the PDF output dir relative to the config dir when not absolute.
pub fn resolve_output_dir(configured: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(configured);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[organization]
name = "Your Organization Name"
short_name = "ORG"                 # used on the narrow receipt title
issuer = "Issuing Authority"       # printed as "Issuer: ..." on receipts
region = "Your Region"             # printed under the name on stock reports

[api]
base_url = "https://supply.example.com"
# token = "paste-your-bearer-token"   # optional

[pdf]
output_dir = "output"

[share]
# Command used to hand a generated file to a share target.
# `{file}` and `{caption}` are replaced before running.
# command = "share-handler --attach {file} --text {caption}"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.organization.short_name, "ORG");
        assert!(config.api.token.is_none());
        assert!(config.share.command.is_none());
    }

    #[test]
    fn output_dir_resolves_relative_to_config_dir() {
        let dir = resolve_output_dir("output", Path::new("/tmp/st"));
        assert_eq!(dir, PathBuf::from("/tmp/st/output"));

        let dir = resolve_output_dir("/var/reports", Path::new("/tmp/st"));
        assert_eq!(dir, PathBuf::from("/var/reports"));
    }
}

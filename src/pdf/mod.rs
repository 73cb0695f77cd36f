pub mod typst;

use std::path::{Path, PathBuf};

use crate::config::ShareSettings;
use crate::document::{Document, OutputAction};
use crate::error::{ReportError, Result};

/// Render a document and perform its terminal action. Returns the path of
/// the produced PDF.
pub fn emit(doc: &Document, output_dir: &Path, share: &ShareSettings) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    match &doc.action {
        OutputAction::Save(filename) => {
            let path = output_dir.join(filename);
            typst::compile(doc, &path)?;
            Ok(path)
        }
        OutputAction::Print { filename, copies } => {
            // Printing is duplicate physical copies: render once, open the
            // viewer once per copy.
            let path = output_dir.join(filename);
            typst::compile(doc, &path)?;
            for _ in 0..*copies {
                open_path(&path)?;
            }
            Ok(path)
        }
        OutputAction::Share { filename, caption } => {
            let command = share.command.as_deref().ok_or_else(|| {
                ReportError::CapabilityUnavailable(
                    "no share command configured (set [share] command in config.toml)".to_string(),
                )
            })?;

            let path = output_dir.join(filename);
            typst::compile(doc, &path)?;

            let rendered = command
                .replace("{file}", &path.to_string_lossy())
                .replace("{caption}", caption);
            let status = std::process::Command::new("sh")
                .args(["-c", &rendered])
                .status()?;
            if !status.success() {
                return Err(ReportError::CapabilityUnavailable(format!(
                    "share command exited with {status}"
                )));
            }
            Ok(path)
        }
    }
}

/// Open a PDF with the system default viewer.
pub fn open_path(pdf_path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReportError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReportError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", pdf_path.to_str().unwrap_or("")])
            .spawn()
            .map_err(ReportError::Io)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageSize;

    #[test]
    fn share_without_configured_command_is_a_capability_error() {
        let doc = Document {
            page: PageSize::A4,
            instructions: vec![],
            action: OutputAction::Share {
                filename: "receipt.pdf".to_string(),
                caption: "caption".to_string(),
            },
        };
        let err = emit(&doc, std::env::temp_dir().as_path(), &ShareSettings::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::CapabilityUnavailable(_)));
    }
}

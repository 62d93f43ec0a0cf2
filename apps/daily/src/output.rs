//! Delivery of the finished PDF: saved file, on-screen preview or printer.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::info;

use crate::cli::CliArgs;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Save(PathBuf),
    Preview,
    Print,
}

impl OutputTarget {
    /// `--save` wins over `--preview`; printing is the default.
    pub fn from_args(args: &CliArgs) -> Self {
        match (&args.save, args.preview) {
            (Some(path), _) => OutputTarget::Save(path.clone()),
            (None, true) => OutputTarget::Preview,
            (None, false) => OutputTarget::Print,
        }
    }
}

pub async fn deliver(pdf: &[u8], target: &OutputTarget) -> Result<(), AppError> {
    match target {
        OutputTarget::Save(path) => {
            tokio::fs::write(path, pdf).await?;
            info!(path = %path.display(), bytes = pdf.len(), "PDF saved");
        }
        OutputTarget::Preview => {
            // The viewer opens the file asynchronously, so it must outlive us.
            let (_, path) = write_temp(pdf)?
                .keep()
                .map_err(|e| AppError::Output(format!("could not keep preview file: {e}")))?;
            run_tool("open", &path).await?;
            info!(path = %path.display(), "Opened preview");
        }
        OutputTarget::Print => {
            // Removed on drop, whether or not `lp` succeeds.
            let file = write_temp(pdf)?;
            let job = run_tool("lp", file.path()).await?;
            info!(job = %job, "Sent to printer");
        }
    }
    Ok(())
}

fn write_temp(pdf: &[u8]) -> Result<NamedTempFile, AppError> {
    let mut file = tempfile::Builder::new()
        .prefix("daily-")
        .suffix(".pdf")
        .tempfile()?;
    file.write_all(pdf)?;
    file.flush()?;
    Ok(file)
}

/// Runs `program path` and returns its trimmed stdout. A non-zero exit is an error.
async fn run_tool(program: &str, path: &Path) -> Result<String, AppError> {
    let output = Command::new(program)
        .arg(path)
        .output()
        .await
        .map_err(|e| AppError::Output(format!("could not run {program}: {e}")))?;

    if !output.status.success() {
        return Err(AppError::Output(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_defaults_to_print() {
        assert_eq!(OutputTarget::from_args(&CliArgs::default()), OutputTarget::Print);
    }

    #[test]
    fn test_save_takes_precedence_over_preview() {
        let args = CliArgs {
            preview: true,
            save: Some(PathBuf::from("today.pdf")),
            ..CliArgs::default()
        };
        assert_eq!(
            OutputTarget::from_args(&args),
            OutputTarget::Save(PathBuf::from("today.pdf"))
        );
    }

    #[test]
    fn test_preview_target() {
        let args = CliArgs {
            preview: true,
            ..CliArgs::default()
        };
        assert_eq!(OutputTarget::from_args(&args), OutputTarget::Preview);
    }

    #[tokio::test]
    async fn test_save_writes_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.pdf");
        deliver(b"%PDF-1.7 test", &OutputTarget::Save(path.clone()))
            .await
            .expect("saved");
        assert_eq!(std::fs::read(&path).expect("read back"), b"%PDF-1.7 test");
    }

    #[tokio::test]
    async fn test_temp_file_has_pdf_suffix_and_contents() {
        let file = write_temp(b"abc").expect("temp file");
        assert_eq!(file.path().extension().and_then(|e| e.to_str()), Some("pdf"));
        assert_eq!(std::fs::read(file.path()).expect("read back"), b"abc");
    }

    #[tokio::test]
    async fn test_failing_tool_is_output_error() {
        let file = write_temp(b"abc").expect("temp file");
        let err = run_tool("false", file.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Output(_)));
    }

    #[tokio::test]
    async fn test_missing_tool_is_output_error() {
        let file = write_temp(b"abc").expect("temp file");
        let err = run_tool("daily-no-such-tool", file.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Output(_)));
    }
}

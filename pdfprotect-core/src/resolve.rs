//! Output path derivation and precondition checks.
//!
//! Runs before any file is opened: the input must exist and the output must
//! not collide with an existing file unless overwriting was requested.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{ProtectError, ProtectResult};

/// Derive the default output path for `input` by inserting `_protected`
/// before the file extension. Inputs without an extension get `.pdf`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let extension = input.extension().unwrap_or_else(|| OsStr::new("pdf"));

    let mut file_name = stem.to_os_string();
    file_name.push("_protected.");
    file_name.push(extension);

    input.with_file_name(file_name)
}

/// Validate the input path and resolve the output path.
///
/// No files are created here; this stage only rejects runs that could not
/// succeed or would clobber an existing file.
pub fn resolve_paths(
    input: &Path,
    output: Option<&Path>,
    overwrite: bool,
) -> ProtectResult<PathBuf> {
    if !input.exists() {
        return Err(ProtectError::InputNotFound(input.to_path_buf()));
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };

    if output.exists() && !overwrite {
        return Err(ProtectError::OutputExists(output));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_path_inserts_suffix_before_extension() {
        assert_eq!(
            default_output_path(Path::new("report.pdf")),
            PathBuf::from("report_protected.pdf")
        );
        assert_eq!(
            default_output_path(Path::new("docs/q3/report.pdf")),
            PathBuf::from("docs/q3/report_protected.pdf")
        );
    }

    #[test]
    fn default_path_falls_back_to_pdf_extension() {
        assert_eq!(
            default_output_path(Path::new("report")),
            PathBuf::from("report_protected.pdf")
        );
    }

    #[test]
    fn default_path_keeps_unusual_extensions() {
        assert_eq!(
            default_output_path(Path::new("scan.PDF")),
            PathBuf::from("scan_protected.PDF")
        );
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = resolve_paths(Path::new("does-not-exist.pdf"), None, false).unwrap_err();
        assert!(matches!(err, ProtectError::InputNotFound(_)));
    }

    #[test]
    fn existing_output_requires_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        let output = dir.path().join("out.pdf");
        fs::write(&input, b"%PDF-1.4").unwrap();
        fs::write(&output, b"old contents").unwrap();

        let err = resolve_paths(&input, Some(&output), false).unwrap_err();
        assert!(matches!(err, ProtectError::OutputExists(_)));

        let resolved = resolve_paths(&input, Some(&output), true).unwrap();
        assert_eq!(resolved, output);
    }

    #[test]
    fn absent_output_resolves_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdf");
        fs::write(&input, b"%PDF-1.4").unwrap();

        let resolved = resolve_paths(&input, None, false).unwrap();
        assert_eq!(resolved, dir.path().join("in_protected.pdf"));
    }
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the protection pipeline.
///
/// Each variant corresponds to exactly one pipeline stage, so callers can
/// map failures to distinct process exit codes without string matching.
#[derive(Debug, Error)]
pub enum ProtectError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("failed to read input PDF: {0}")]
    Parse(String),

    #[error("input PDF is encrypted; an input password is required to open it")]
    PasswordRequired,

    #[error("failed to decrypt input PDF with the provided input password")]
    WrongPassword,

    #[error("error while copying pages: {0}")]
    PageCopy(String),

    #[error("failed to encrypt PDF: {0}")]
    Encryption(String),

    #[error("error while writing output PDF: {0}")]
    Write(#[from] io::Error),
}

/// Result type for the protection pipeline.
pub type ProtectResult<T> = Result<T, ProtectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_paths() {
        let err = ProtectError::InputNotFound(PathBuf::from("missing.pdf"));
        assert_eq!(err.to_string(), "input file not found: missing.pdf");

        let err = ProtectError::OutputExists(PathBuf::from("out.pdf"));
        assert_eq!(err.to_string(), "output file already exists: out.pdf");
    }

    #[test]
    fn display_for_credential_errors() {
        assert_eq!(
            ProtectError::PasswordRequired.to_string(),
            "input PDF is encrypted; an input password is required to open it"
        );
        assert_eq!(
            ProtectError::WrongPassword.to_string(),
            "failed to decrypt input PDF with the provided input password"
        );
    }

    #[test]
    fn io_errors_convert_to_write() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: ProtectError = io_err.into();
        assert!(matches!(err, ProtectError::Write(_)));
    }
}

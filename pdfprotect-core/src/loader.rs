//! Input document loading and unlocking.

use std::path::Path;

use lopdf::encryption::DecryptionError;
use lopdf::{Document, Error as PdfError};
use tracing::debug;

use crate::error::{ProtectError, ProtectResult};

/// Outcome of an unlock attempt, normalized at the lopdf boundary.
///
/// The library reports failed decryption through several error shapes;
/// collapsing them here keeps the rest of the pipeline free of
/// collaborator-specific matching.
#[derive(Debug)]
enum UnlockOutcome {
    Unlocked,
    WrongPassword,
    Invalid(String),
}

/// Parse the document at `path`, unlocking it with `unlock_password` when it
/// reports itself encrypted.
///
/// Documents encrypted with an empty password are unlocked by the parser
/// itself and are treated as unencrypted input.
pub fn load_document(path: &Path, unlock_password: Option<&str>) -> ProtectResult<Document> {
    let mut document =
        Document::load(path).map_err(|err| ProtectError::Parse(err.to_string()))?;

    if document.is_encrypted() {
        let password = unlock_password.ok_or(ProtectError::PasswordRequired)?;
        match unlock(&mut document, password) {
            UnlockOutcome::Unlocked => debug!("input document unlocked"),
            UnlockOutcome::WrongPassword => return Err(ProtectError::WrongPassword),
            UnlockOutcome::Invalid(detail) => return Err(ProtectError::Parse(detail)),
        }
    }

    Ok(document)
}

fn unlock(document: &mut Document, password: &str) -> UnlockOutcome {
    // Authenticate first so a wrong password is distinguishable from a
    // structurally broken encryption dictionary.
    match document.authenticate_password(password) {
        Ok(_) => {}
        Err(PdfError::Decryption(DecryptionError::IncorrectPassword)) => {
            return UnlockOutcome::WrongPassword;
        }
        Err(err) => return UnlockOutcome::Invalid(err.to_string()),
    }

    match document.decrypt(password) {
        Ok(()) => UnlockOutcome::Unlocked,
        Err(PdfError::Decryption(DecryptionError::IncorrectPassword)) => {
            UnlockOutcome::WrongPassword
        }
        Err(err) => UnlockOutcome::Invalid(err.to_string()),
    }
}

//! Applying the standard security handler to the output document.

use lopdf::{Document, EncryptionState, EncryptionVersion, Object, Permissions, StringFormat};
use tracing::debug;

use crate::error::{ProtectError, ProtectResult};

/// Key length for the standard security handler. The cipher strength is not
/// configurable; this mirrors the library default for password protection.
const KEY_LENGTH: usize = 128;

/// Encrypt `document` in place with the given passwords.
///
/// The owner password falls back to the user password when not supplied
/// separately.
pub fn encrypt_document(
    document: &mut Document,
    user_password: &str,
    owner_password: Option<&str>,
) -> ProtectResult<()> {
    let owner_password = owner_password.unwrap_or(user_password);

    // The security handler derives its keys from the file identifier, which
    // a freshly transcribed document does not have yet.
    ensure_file_id(document);

    let version = EncryptionVersion::V2 {
        document: &*document,
        owner_password,
        user_password,
        key_length: KEY_LENGTH,
        permissions: Permissions::all(),
    };

    let state = EncryptionState::try_from(version)
        .map_err(|err| ProtectError::Encryption(err.to_string()))?;

    document
        .encrypt(&state)
        .map_err(|err| ProtectError::Encryption(err.to_string()))?;

    debug!(key_length = KEY_LENGTH, "document encrypted");
    Ok(())
}

/// Install a random 16-byte file identifier pair unless one is present.
fn ensure_file_id(document: &mut Document) {
    if document.trailer.get(b"ID").is_ok() {
        return;
    }

    let first: [u8; 16] = rand::random();
    let second: [u8; 16] = rand::random();
    document.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(first.to_vec(), StringFormat::Literal),
            Object::String(second.to_vec(), StringFormat::Literal),
        ]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_is_installed_once() {
        let mut doc = Document::with_version("1.5");
        assert!(doc.trailer.get(b"ID").is_err());

        ensure_file_id(&mut doc);
        let first = doc.trailer.get(b"ID").unwrap().clone();

        ensure_file_id(&mut doc);
        let second = doc.trailer.get(b"ID").unwrap().clone();

        // A present identifier is kept as-is.
        assert_eq!(first, second);
    }

    #[test]
    fn file_id_has_two_16_byte_parts() {
        let mut doc = Document::with_version("1.5");
        ensure_file_id(&mut doc);

        let id = doc.trailer.get(b"ID").unwrap().as_array().unwrap().clone();
        assert_eq!(id.len(), 2);
        for part in id {
            assert_eq!(part.as_str().unwrap().len(), 16);
        }
    }
}

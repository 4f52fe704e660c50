//! The end-to-end protection pipeline.

use std::io;
use std::path::{Path, PathBuf};

use lopdf::Document;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::encrypt::encrypt_document;
use crate::error::{ProtectError, ProtectResult};
use crate::loader::load_document;
use crate::resolve::resolve_paths;
use crate::transcribe::{copy_metadata, transcribe_pages};

/// Options for protecting a document.
#[derive(Debug, Clone)]
pub struct ProtectOptions {
    /// Password required to open the protected document.
    pub user_password: String,
    /// Password granting full access; mirrors the user password when absent.
    pub owner_password: Option<String>,
    /// Password for unlocking an already-encrypted input.
    pub input_password: Option<String>,
    /// Replace an existing output file.
    pub overwrite: bool,
    /// Carry the source metadata dictionary into the output.
    pub copy_metadata: bool,
}

impl ProtectOptions {
    /// Options protecting a document with `user_password` and defaults
    /// everywhere else.
    pub fn new(user_password: impl Into<String>) -> Self {
        Self {
            user_password: user_password.into(),
            owner_password: None,
            input_password: None,
            overwrite: false,
            copy_metadata: true,
        }
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct ProtectSummary {
    /// Where the protected document was written.
    pub output: PathBuf,
    /// Number of pages carried over.
    pub pages: usize,
}

/// Protect the document at `input` and write the result to `output`, or to
/// the derived default path when `output` is `None`.
///
/// The stages run strictly in order; the first failure aborts the run and
/// the output path is never left holding a partial file.
pub fn protect_pdf<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Option<Q>,
    options: &ProtectOptions,
) -> ProtectResult<ProtectSummary> {
    let input = input.as_ref();
    let output = output.as_ref().map(|path| path.as_ref());
    let output = resolve_paths(input, output, options.overwrite)?;
    debug!(input = %input.display(), output = %output.display(), "paths resolved");

    let source = load_document(input, options.input_password.as_deref())?;

    let mut document = transcribe_pages(&source)?;
    let pages = document.get_pages().len();
    debug!(pages, "pages transcribed");

    if options.copy_metadata {
        if let Err(err) = copy_metadata(&source, &mut document) {
            warn!("failed to copy metadata (continuing): {err}");
        }
    }

    encrypt_document(
        &mut document,
        &options.user_password,
        options.owner_password.as_deref(),
    )?;

    write_document(&mut document, &output)?;
    info!(output = %output.display(), pages, "protected document written");

    Ok(ProtectSummary { output, pages })
}

/// Serialize `document` to `output` through a sibling temporary file, so the
/// target path only ever holds a complete document.
fn write_document(document: &mut Document, output: &Path) -> ProtectResult<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    document
        .save_to(&mut staged)
        .map_err(|err| ProtectError::Write(io::Error::other(err.to_string())))?;
    staged.persist(output).map_err(|err| err.error)?;

    Ok(())
}

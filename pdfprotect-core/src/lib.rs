//! # pdfprotect-core
//!
//! Password protection for PDF documents, built on the `lopdf` object model.
//!
//! The crate implements a one-shot pipeline: resolve paths, load (and if
//! needed unlock) the input, transcribe its pages and metadata into a fresh
//! document, apply the standard security handler, and write the result
//! atomically. PDF parsing, serialization and the handler cryptography all
//! come from `lopdf`; this crate only sequences them and translates errors.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pdfprotect_core::{protect_pdf, ProtectOptions};
//!
//! # fn main() -> Result<(), pdfprotect_core::ProtectError> {
//! let options = ProtectOptions::new("secret123");
//! let summary = protect_pdf("report.pdf", None::<&str>, &options)?;
//! println!("wrote {} ({} pages)", summary.output.display(), summary.pages);
//! # Ok(())
//! # }
//! ```

pub mod encrypt;
pub mod error;
pub mod loader;
pub mod protect;
pub mod resolve;
pub mod transcribe;

pub use encrypt::encrypt_document;
pub use error::{ProtectError, ProtectResult};
pub use loader::load_document;
pub use protect::{protect_pdf, ProtectOptions, ProtectSummary};
pub use resolve::{default_output_path, resolve_paths};
pub use transcribe::{copy_metadata, transcribe_pages};

//! Editing-session orchestration for crxedit.
//!
//! This crate ties the schema codec and the icon pipeline together into
//! [`Session`] — the single-owner editing session behind every user
//! operation: create, open, edit fields, pick an icon source, and save with
//! all-or-nothing icon regeneration.

pub mod session;

pub use session::Session;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("manifest error: {0}")]
    Manifest(#[from] crxedit_schema::ManifestError),
    #[error("icon error: {0}")]
    Icon(#[from] crxedit_icons::IconError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no manifest path set (save the session with save_as first)")]
    NoPath,
}

//! Manifest model and JSON codec for crxedit.
//!
//! This crate defines the schema layer: the in-memory `Manifest` document
//! (flat fields, no wire-format nesting), and the codec that converts it to
//! and from the on-disk `manifest.json` shape (`parse_manifest_str`,
//! `encode_manifest`, plus atomic file read/write helpers).

pub mod codec;
pub mod manifest;

pub use codec::{
    encode_manifest, parse_manifest_str, read_manifest_file, write_manifest_file, ManifestError,
};
pub use manifest::{IconEntry, Manifest, MANIFEST_VERSION};

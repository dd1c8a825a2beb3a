//! Fixed-size PNG icon generation for crxedit.
//!
//! This crate provides the icon pipeline: decode one source raster, resize it
//! to each of a list of exact square sizes with a bicubic filter, and encode
//! each result as a lossless PNG, together with the `IconEntry` records that
//! reference the generated files.

pub mod pipeline;

pub use pipeline::{generate_icons, write_icons, RenderedIcon, ICON_SIZES};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("failed to open icon source '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode icon source: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode {size}x{size} PNG: {source}")]
    Encode {
        size: u32,
        source: image::ImageError,
    },
    #[error("failed to write icon file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

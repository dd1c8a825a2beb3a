use crate::IconError;
use crxedit_schema::IconEntry;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// The fixed set of square sizes the pipeline produces. The manifest model
/// does not enforce this set; only the pipeline does.
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

/// One rendered icon: the manifest entry describing it and the encoded PNG
/// bytes, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedIcon {
    pub entry: IconEntry,
    pub png: Vec<u8>,
}

/// Decode `source` once and render one PNG per entry in `sizes`.
///
/// Each output is exactly `size x size` pixels, resampled with a bicubic
/// filter (fidelity over speed; this runs once per save). Output order
/// matches `sizes` order and entries are named `<size>.png`. Re-running with
/// the same inputs yields the same dimensions and names; encoded bytes may
/// vary by encoder version.
///
/// Pure with respect to the filesystem apart from reading `source` — writing
/// the results is the caller's job (see [`write_icons`]).
pub fn generate_icons(source: &Path, sizes: &[u32]) -> Result<Vec<RenderedIcon>, IconError> {
    let image = image::open(source).map_err(|e| match e {
        image::ImageError::IoError(io) => IconError::Open {
            path: source.to_path_buf(),
            source: io,
        },
        other => IconError::Decode(other),
    })?;
    debug!(
        "decoded icon source {} ({}x{})",
        source.display(),
        image.width(),
        image.height()
    );

    sizes.iter().map(|&size| render(&image, size)).collect()
}

fn render(image: &DynamicImage, size: u32) -> Result<RenderedIcon, IconError> {
    let resized = image.resize_exact(size, size, FilterType::CatmullRom);
    let mut png = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|source| IconError::Encode { size, source })?;
    debug!("rendered {size}x{size} icon ({} bytes)", png.len());
    Ok(RenderedIcon {
        entry: IconEntry::new(size, format!("{size}.png")),
        png,
    })
}

/// Write each rendered PNG into `dir` under its entry filename, overwriting
/// any existing file of the same name.
pub fn write_icons(dir: &Path, icons: &[RenderedIcon]) -> Result<(), IconError> {
    for icon in icons {
        let path = dir.join(&icon.entry.file);
        std::fs::write(&path, &icon.png).map_err(|source| IconError::Write {
            path: path.clone(),
            source,
        })?;
        debug!("wrote {}", path.display());
    }
    Ok(())
}

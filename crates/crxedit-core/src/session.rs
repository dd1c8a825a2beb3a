use crate::SessionError;
use crxedit_icons::{generate_icons, write_icons, ICON_SIZES};
use crxedit_schema::{read_manifest_file, write_manifest_file, IconEntry, Manifest};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The active editing session: one manifest, its file path, and the pending
/// icon source.
///
/// Exclusively owned by its caller — operations are synchronous and never
/// overlap, so no locking is needed. An absolute pending icon source means
/// "regenerate the icon set on the next save"; a relative one refers to an
/// asset already next to the manifest and triggers no regeneration.
#[derive(Debug)]
pub struct Session {
    manifest: Manifest,
    path: Option<PathBuf>,
    icon_source: Option<PathBuf>,
}

impl Session {
    /// Start a session on a fresh manifest with no backing file.
    pub fn new() -> Self {
        Self {
            manifest: Manifest::new(),
            path: None,
            icon_source: None,
        }
    }

    /// Open an existing manifest file. The session owns the decoded document;
    /// a decode failure leaves no session behind.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        info!("opening manifest {}", path.display());
        let manifest = read_manifest_file(&path)?;
        Ok(Self {
            manifest,
            path: Some(path),
            icon_source: None,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn icon_source(&self) -> Option<&Path> {
        self.icon_source.as_deref()
    }

    /// Remember the user's chosen icon source image. Pass an absolute path to
    /// request regeneration on the next save.
    pub fn set_icon_source(&mut self, source: impl Into<PathBuf>) {
        self.icon_source = Some(source.into());
    }

    /// Save to the session's current path. Fails with [`SessionError::NoPath`]
    /// for a fresh session that was never saved.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let path = self.path.clone().ok_or(SessionError::NoPath)?;
        self.save_to(&path)
    }

    /// Save to a new path and adopt it as the session path.
    ///
    /// A pending relative icon source refers to the old manifest's directory;
    /// it is anchored there before the switch, which makes it absolute and
    /// therefore regenerated into the new directory.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), SessionError> {
        let path = path.into();
        let anchored = match (&self.icon_source, &self.path) {
            (Some(source), Some(old_path)) if source.is_relative() => {
                old_path.parent().map(|old_dir| old_dir.join(source))
            }
            _ => None,
        };
        if anchored.is_some() {
            self.icon_source = anchored;
        }
        self.save_to(&path)?;
        self.path = Some(path);
        Ok(())
    }

    /// The save operation: regenerate icons if an external source is pending,
    /// then write the manifest.
    ///
    /// Icon regeneration is all-or-nothing: every size is rendered in memory
    /// before anything touches the filesystem, so a decode or resize failure
    /// leaves the manifest file and any prior icon files unchanged.
    fn save_to(&mut self, path: &Path) -> Result<(), SessionError> {
        let dir = manifest_dir(path);

        let pending = self
            .icon_source
            .as_ref()
            .filter(|source| source.is_absolute())
            .cloned();
        if let Some(source) = pending {
            info!("regenerating icon set from {}", source.display());
            let rendered = generate_icons(&source, &ICON_SIZES)?;
            write_icons(&dir, &rendered)?;
            self.manifest.icons = rendered.into_iter().map(|icon| icon.entry).collect();
            // The generated entries are now the manifest-relative truth;
            // further saves reuse them instead of re-rendering.
            self.icon_source = None;
        } else {
            debug!("no external icon source pending; icon entries reused unchanged");
        }

        write_manifest_file(path, &self.manifest)?;
        info!("saved manifest {}", path.display());
        Ok(())
    }

    /// The largest icon entry, for preview display. Absent when the manifest
    /// has no icons.
    pub fn largest_icon(&self) -> Option<&IconEntry> {
        self.manifest.largest_icon()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory that manifest-relative paths (icon files) resolve against.
fn manifest_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

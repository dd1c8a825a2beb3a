//! Conversion between the in-memory [`Manifest`] and its on-disk JSON shape.
//!
//! Two wire-format quirks live here and nowhere else: the `icons` collection
//! is an object mapping decimal-string sizes to filenames (not an array), and
//! the flat `web_url` field is nested under `app.launch.web_url`.

use crate::manifest::{IconEntry, Manifest, MANIFEST_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid icon size key: '{0}', expected a non-negative integer")]
    InvalidIconSize(String),
}

/// On-disk shape of `manifest.json`. Field order here is the emission order.
#[derive(Debug, Serialize, Deserialize)]
struct ManifestDoc {
    #[serde(default = "default_manifest_version")]
    manifest_version: u32,
    name: String,
    #[serde(default)]
    description: String,
    version: String,
    #[serde(default)]
    icons: BTreeMap<String, String>,
    app: AppSection,
}

#[derive(Debug, Serialize, Deserialize)]
struct AppSection {
    launch: LaunchSection,
}

#[derive(Debug, Serialize, Deserialize)]
struct LaunchSection {
    web_url: String,
}

fn default_manifest_version() -> u32 {
    MANIFEST_VERSION
}

/// `icons` wire mapping → entry list. Keys must parse as non-negative
/// integers; entry order follows map iteration order and is not part of the
/// contract.
fn icons_from_map(map: BTreeMap<String, String>) -> Result<Vec<IconEntry>, ManifestError> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, file) in map {
        let size: u32 = key
            .parse()
            .map_err(|_| ManifestError::InvalidIconSize(key.clone()))?;
        entries.push(IconEntry { size, file });
    }
    Ok(entries)
}

/// Entry list → `icons` wire mapping. Duplicate sizes collapse
/// last-write-wins, keeping the mapping unique by key.
fn icons_to_map(entries: &[IconEntry]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|entry| (entry.size.to_string(), entry.file.clone()))
        .collect()
}

/// Parse manifest JSON. Fails if the JSON is malformed or `name`, `version`,
/// or `app.launch.web_url` is missing; `manifest_version` is accepted as-is.
pub fn parse_manifest_str(input: &str) -> Result<Manifest, ManifestError> {
    let doc: ManifestDoc = serde_json::from_str(input)?;
    Ok(Manifest {
        name: doc.name,
        description: doc.description,
        version: doc.version,
        web_url: doc.app.launch.web_url,
        icons: icons_from_map(doc.icons)?,
    })
}

/// Encode a manifest as pretty-printed JSON with the fixed top-level key
/// order `manifest_version, name, description, version, icons, app`.
/// `description` is always emitted, as `""` when unset.
pub fn encode_manifest(manifest: &Manifest) -> Result<String, ManifestError> {
    let doc = ManifestDoc {
        manifest_version: MANIFEST_VERSION,
        name: manifest.name.clone(),
        description: manifest.description.clone(),
        version: manifest.version.clone(),
        icons: icons_to_map(&manifest.icons),
        app: AppSection {
            launch: LaunchSection {
                web_url: manifest.web_url.clone(),
            },
        },
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn read_manifest_file(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}

/// Encode and write atomically: temp file in the destination directory,
/// fsync, rename. The prior file is never truncated before the replacement
/// is complete.
pub fn write_manifest_file(
    path: impl AsRef<Path>,
    manifest: &Manifest,
) -> Result<(), ManifestError> {
    let path = path.as_ref();
    let content = encode_manifest(manifest)?;
    // A bare filename has `Some("")` as its parent; treat that as the
    // current directory.
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    std::io::Write::write_all(&mut tmp, content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ManifestError::Io(e.error))?;
    // Fsync parent directory to ensure rename durability on power loss.
    if let Ok(f) = fs::File::open(dir) {
        let _ = f.sync_all();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"{
  "manifest_version": 2,
  "name": "Demo",
  "description": "",
  "version": "1.0",
  "icons": { "16": "16.png" },
  "app": { "launch": { "web_url": "https://example.com" } }
}"#;

    fn sorted_icons(manifest: &Manifest) -> Vec<IconEntry> {
        let mut icons = manifest.icons.clone();
        icons.sort_by_key(|e| e.size);
        icons
    }

    #[test]
    fn parses_full_manifest() {
        let m = parse_manifest_str(DEMO).expect("should parse");
        assert_eq!(m.name, "Demo");
        assert_eq!(m.description, "");
        assert_eq!(m.version, "1.0");
        assert_eq!(m.web_url, "https://example.com");
        assert_eq!(m.icons, vec![IconEntry::new(16, "16.png")]);
    }

    #[test]
    fn parses_manifest_without_optional_fields() {
        let m = parse_manifest_str(
            r#"{
  "name": "Bare",
  "version": "0.3-beta",
  "app": { "launch": { "web_url": "https://bare.example" } }
}"#,
        )
        .expect("should parse");
        assert_eq!(m.name, "Bare");
        assert!(m.description.is_empty());
        assert!(m.icons.is_empty());
    }

    #[test]
    fn rejects_missing_web_url() {
        assert!(parse_manifest_str(r#"{"name":"x","version":"1.0"}"#).is_err());
        assert!(
            parse_manifest_str(r#"{"name":"x","version":"1.0","app":{"launch":{}}}"#).is_err()
        );
    }

    #[test]
    fn rejects_missing_name_or_version() {
        let no_name = r#"{"version":"1.0","app":{"launch":{"web_url":"https://e.com"}}}"#;
        let no_version = r#"{"name":"x","app":{"launch":{"web_url":"https://e.com"}}}"#;
        assert!(parse_manifest_str(no_name).is_err());
        assert!(parse_manifest_str(no_version).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_manifest_str("{not json").is_err());
    }

    #[test]
    fn rejects_non_integer_icon_key() {
        for key in ["icon", "-16", "16.5", ""] {
            let input = format!(
                r#"{{"name":"x","version":"1.0","icons":{{"{key}":"a.png"}},"app":{{"launch":{{"web_url":"https://e.com"}}}}}}"#
            );
            let err = parse_manifest_str(&input).unwrap_err();
            assert!(
                matches!(err, ManifestError::InvalidIconSize(_)),
                "key '{key}' must fail as an invalid icon size, got: {err}"
            );
        }
    }

    #[test]
    fn accepts_foreign_manifest_version() {
        let input = r#"{
  "manifest_version": 3,
  "name": "x",
  "version": "1.0",
  "app": { "launch": { "web_url": "https://e.com" } }
}"#;
        assert!(parse_manifest_str(input).is_ok());
    }

    #[test]
    fn icon_entries_agree_with_mapping_keys() {
        let input = r#"{
  "name": "x",
  "version": "1.0",
  "icons": { "16": "16.png", "32": "32.png", "48": "48.png", "128": "128.png" },
  "app": { "launch": { "web_url": "https://e.com" } }
}"#;
        let m = parse_manifest_str(input).unwrap();
        assert_eq!(m.icons.len(), 4);
        let reencoded = encode_manifest(&m).unwrap();
        for entry in &m.icons {
            assert!(reencoded.contains(&format!("\"{}\": \"{}\"", entry.size, entry.file)));
        }
    }

    #[test]
    fn round_trip_preserves_fields() {
        let mut original = Manifest::new();
        original.name = "Round Trip".to_owned();
        original.description = "a description".to_owned();
        original.version = "2.7".to_owned();
        original.web_url = "https://roundtrip.example/app".to_owned();
        original.icons = vec![
            IconEntry::new(128, "128.png"),
            IconEntry::new(16, "16.png"),
            IconEntry::new(48, "48.png"),
        ];

        let decoded = parse_manifest_str(&encode_manifest(&original).unwrap()).unwrap();
        assert_eq!(decoded.name, original.name);
        assert_eq!(decoded.description, original.description);
        assert_eq!(decoded.version, original.version);
        assert_eq!(decoded.web_url, original.web_url);
        // Icon order is not part of the contract; compare size-sorted.
        assert_eq!(sorted_icons(&decoded), sorted_icons(&original));
    }

    #[test]
    fn golden_example_round_trips() {
        let m = parse_manifest_str(DEMO).unwrap();
        let reencoded = encode_manifest(&m).unwrap();
        let again = parse_manifest_str(&reencoded).unwrap();
        assert_eq!(again.name, "Demo");
        assert_eq!(again.web_url, "https://example.com");
        assert_eq!(again.icons, vec![IconEntry::new(16, "16.png")]);
    }

    #[test]
    fn encodes_icons_as_object_not_array() {
        let mut m = Manifest::new();
        m.name = "x".to_owned();
        m.web_url = "https://e.com".to_owned();
        m.icons = vec![IconEntry::new(16, "16.png"), IconEntry::new(32, "32.png")];
        let out = encode_manifest(&m).unwrap();
        assert!(out.contains("\"16\": \"16.png\""));
        assert!(out.contains("\"32\": \"32.png\""));
        assert!(!out.contains('['), "icons must not be an array: {out}");
    }

    #[test]
    fn encodes_fixed_key_order() {
        let mut m = Manifest::new();
        m.name = "x".to_owned();
        m.web_url = "https://e.com".to_owned();
        let out = encode_manifest(&m).unwrap();
        let pos = |key: &str| out.find(&format!("\"{key}\"")).unwrap();
        assert!(pos("manifest_version") < pos("name"));
        assert!(pos("name") < pos("description"));
        assert!(pos("description") < pos("version"));
        assert!(pos("version") < pos("icons"));
        assert!(pos("icons") < pos("app"));
    }

    #[test]
    fn always_writes_manifest_version_two() {
        let input = r#"{
  "manifest_version": 7,
  "name": "x",
  "version": "1.0",
  "app": { "launch": { "web_url": "https://e.com" } }
}"#;
        let out = encode_manifest(&parse_manifest_str(input).unwrap()).unwrap();
        assert!(out.contains("\"manifest_version\": 2"));
    }

    #[test]
    fn empty_description_is_emitted() {
        let mut m = Manifest::new();
        m.name = "x".to_owned();
        m.web_url = "https://e.com".to_owned();
        let out = encode_manifest(&m).unwrap();
        assert!(out.contains("\"description\": \"\""));
    }

    #[test]
    fn duplicate_sizes_collapse_last_write_wins() {
        let mut m = Manifest::new();
        m.name = "x".to_owned();
        m.web_url = "https://e.com".to_owned();
        m.icons = vec![IconEntry::new(16, "old.png"), IconEntry::new(16, "new.png")];
        let out = encode_manifest(&m).unwrap();
        assert!(out.contains("\"16\": \"new.png\""));
        assert!(!out.contains("old.png"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        let mut m = Manifest::new();
        m.name = "File".to_owned();
        m.web_url = "https://file.example".to_owned();
        m.icons = vec![IconEntry::new(16, "16.png")];

        write_manifest_file(&path, &m).unwrap();
        let loaded = read_manifest_file(&path).unwrap();
        assert_eq!(loaded, m);
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");

        let mut m = Manifest::new();
        m.name = "First".to_owned();
        m.web_url = "https://e.com".to_owned();
        write_manifest_file(&path, &m).unwrap();

        m.name = "Second".to_owned();
        write_manifest_file(&path, &m).unwrap();
        assert_eq!(read_manifest_file(&path).unwrap().name, "Second");
    }
}

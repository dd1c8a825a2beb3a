pub mod completions;
pub mod inspect;
pub mod new;
pub mod set;
pub mod set_icon;

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;
pub const EXIT_IMAGE_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

/// JSON payload describing a manifest, shared by the inspect/set/set-icon
/// outputs. Icons are size-sorted for stable output.
pub fn manifest_payload(
    path: &std::path::Path,
    manifest: &crxedit_schema::Manifest,
) -> serde_json::Value {
    let mut icons = manifest.icons.clone();
    icons.sort_by_key(|entry| entry.size);
    serde_json::json!({
        "path": path.display().to_string(),
        "manifest_version": crxedit_schema::MANIFEST_VERSION,
        "name": manifest.name,
        "description": manifest.description,
        "version": manifest.version,
        "web_url": manifest.web_url,
        "icons": icons
            .iter()
            .map(|entry| serde_json::json!({ "size": entry.size, "file": entry.file }))
            .collect::<Vec<_>>(),
        "largest_icon": manifest.largest_icon().map(|entry| entry.file.clone()),
    })
}

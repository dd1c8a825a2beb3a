use super::{json_pretty, manifest_payload, spin_fail, spin_ok, spinner, EXIT_SUCCESS};
use crxedit_core::Session;
use std::path::Path;

pub fn run(path: &Path, image: &Path, json: bool) -> Result<u8, String> {
    let mut session = Session::open(path).map_err(|e| e.to_string())?;

    // The session regenerates only for absolute sources; a CLI-relative
    // image path means "relative to the invocation directory", not to the
    // manifest, so anchor it here.
    let image = if image.is_absolute() {
        image.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| format!("cannot resolve current directory: {e}"))?
            .join(image)
    };
    tracing::debug!("icon source resolved to {}", image.display());
    session.set_icon_source(image);

    if json {
        session.save().map_err(|e| e.to_string())?;
    } else {
        let pb = spinner("rendering icon set...");
        match session.save() {
            Ok(()) => spin_ok(&pb, "icon set regenerated"),
            Err(e) => {
                spin_fail(&pb, "icon generation failed");
                return Err(e.to_string());
            }
        }
    }

    if json {
        let mut payload = manifest_payload(path, session.manifest());
        payload["status"] = serde_json::Value::from("saved");
        println!("{}", json_pretty(&payload)?);
    } else {
        let mut icons = session.manifest().icons.clone();
        icons.sort_by_key(|entry| entry.size);
        for entry in &icons {
            println!("  {:>4}  {}", entry.size, entry.file);
        }
        println!("saved {}", path.display());
    }
    Ok(EXIT_SUCCESS)
}

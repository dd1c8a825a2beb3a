use super::{json_pretty, manifest_payload, EXIT_SUCCESS};
use crxedit_core::Session;
use std::path::Path;

pub fn run(
    path: &Path,
    name: Option<String>,
    description: Option<String>,
    app_version: Option<String>,
    web_url: Option<String>,
    json: bool,
) -> Result<u8, String> {
    let mut session = Session::open(path).map_err(|e| e.to_string())?;

    let manifest = session.manifest_mut();
    if let Some(name) = name {
        manifest.name = name;
    }
    if let Some(description) = description {
        manifest.description = description;
    }
    if let Some(version) = app_version {
        manifest.version = version;
    }
    if let Some(url) = web_url {
        manifest.web_url = url;
    }

    session.save().map_err(|e| e.to_string())?;

    if json {
        let mut payload = manifest_payload(path, session.manifest());
        payload["status"] = serde_json::Value::from("saved");
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("saved {}", path.display());
    }
    Ok(EXIT_SUCCESS)
}

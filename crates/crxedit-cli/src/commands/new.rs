use super::{json_pretty, manifest_payload, EXIT_SUCCESS};
use crxedit_schema::{write_manifest_file, Manifest};
use dialoguer::{Confirm, Input};
use std::io::{stderr, stdin, IsTerminal};
use std::path::Path;

fn ensure_can_write(dest: &Path, force: bool, is_tty: bool) -> Result<(), String> {
    if !dest.exists() || force {
        return Ok(());
    }
    if !is_tty {
        return Err(format!(
            "refusing to overwrite existing {} (pass --force)",
            dest.display()
        ));
    }
    let overwrite = Confirm::new()
        .with_prompt(format!("overwrite {}?", dest.display()))
        .default(false)
        .interact()
        .map_err(|e| format!("prompt failed: {e}"))?;
    if overwrite {
        Ok(())
    } else {
        Err(format!(
            "refusing to overwrite existing {} (pass --force)",
            dest.display()
        ))
    }
}

fn prompt_text(label: &str, default: Option<&str>, allow_empty: bool) -> Result<String, String> {
    let mut input = Input::new().with_prompt(label).allow_empty(allow_empty);
    if let Some(default) = default {
        input = input.default(default.to_owned());
    }
    input
        .interact_text()
        .map_err(|e| format!("prompt failed: {e}"))
}

pub fn run(
    dest: &Path,
    name: Option<String>,
    description: Option<String>,
    app_version: Option<String>,
    web_url: Option<String>,
    force: bool,
    json: bool,
) -> Result<u8, String> {
    let is_tty = stdin().is_terminal() && stderr().is_terminal();
    ensure_can_write(dest, force, is_tty)?;

    let mut manifest = Manifest::new();

    manifest.name = match name {
        Some(name) => name,
        None if is_tty => prompt_text("name", None, false)?,
        None => return Err("--name is required when stdin is not a TTY".to_owned()),
    };
    manifest.web_url = match web_url {
        Some(url) => url,
        None if is_tty => prompt_text("launch URL", None, false)?,
        None => return Err("--web-url is required when stdin is not a TTY".to_owned()),
    };
    manifest.description = match description {
        Some(description) => description,
        None if is_tty => prompt_text("description", None, true)?,
        None => String::new(),
    };
    if let Some(version) = app_version {
        manifest.version = version;
    } else if is_tty {
        manifest.version = prompt_text("version", Some("1.0"), false)?;
    }

    write_manifest_file(dest, &manifest).map_err(|e| e.to_string())?;

    if json {
        let mut payload = manifest_payload(dest, &manifest);
        payload["status"] = serde_json::Value::from("written");
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("wrote {} for '{}'", dest.display(), manifest.name);
    }
    Ok(EXIT_SUCCESS)
}

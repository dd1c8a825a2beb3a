use super::{json_pretty, manifest_payload, EXIT_SUCCESS};
use console::Style;
use crxedit_core::Session;
use std::path::Path;

pub fn run(path: &Path, json: bool) -> Result<u8, String> {
    let session = Session::open(path).map_err(|e| e.to_string())?;
    let manifest = session.manifest();

    if json {
        println!("{}", json_pretty(&manifest_payload(path, manifest))?);
        return Ok(EXIT_SUCCESS);
    }

    println!("name:         {}", manifest.name);
    println!("description:  {}", manifest.description);
    println!("version:      {}", manifest.version);
    println!("web_url:      {}", manifest.web_url);
    match session.largest_icon() {
        Some(entry) => println!("icon:         {}", entry.file),
        None => println!("icon:         {}", Style::new().dim().apply_to("(none)")),
    }
    let mut icons = manifest.icons.clone();
    icons.sort_by_key(|entry| entry.size);
    println!("icons:        {}", icons.len());
    for entry in &icons {
        println!("  {:>4}  {}", entry.size, entry.file);
    }
    Ok(EXIT_SUCCESS)
}

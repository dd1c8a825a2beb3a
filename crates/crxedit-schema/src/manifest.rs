/// Schema version written into every manifest. Readers accept other values;
/// the editor only ever produces this one.
pub const MANIFEST_VERSION: u32 = 2;

/// One generated icon asset: a square pixel size and a filename relative to
/// the manifest's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconEntry {
    pub size: u32,
    pub file: String,
}

impl IconEntry {
    pub fn new(size: u32, file: impl Into<String>) -> Self {
        Self {
            size,
            file: file.into(),
        }
    }
}

/// The editable manifest document.
///
/// `web_url` is a flat field here; the `app.launch.web_url` nesting of the
/// wire format exists only inside the codec. `icons` is an ordered list,
/// unique by size — the codec collapses duplicate sizes last-write-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub web_url: String,
    pub icons: Vec<IconEntry>,
}

impl Manifest {
    /// A fresh document: empty name, description, and URL, version "1.0",
    /// no icons.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: "1.0".to_owned(),
            web_url: String::new(),
            icons: Vec::new(),
        }
    }

    /// The icon entry with the largest size, used for preview purposes.
    /// `None` when the icon list is empty — never an error.
    pub fn largest_icon(&self) -> Option<&IconEntry> {
        self.icons.iter().max_by_key(|entry| entry.size)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

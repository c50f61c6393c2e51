/// Project-name derivation for a discovered marker file.
///
/// A project directory that sits directly under the default root is named
/// after the directory. Anywhere else the name comes from the marker's own
/// metadata: the `<name>` child of the `<projectDescription>` root element.
/// If neither rule yields a name the caller has to ask the user.
use crate::error::MarkerParseError;
use crate::fs::FileSystem;
use compact_str::CompactString;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;
use tracing::debug;

pub type ProjectName = CompactString;

const ROOT_ELEMENT: &[u8] = b"projectDescription";
const NAME_ELEMENT: &[u8] = b"name";

/// Derive the name of the unit described by `marker`, or `None` if the
/// caller must supply one.
pub fn derive_project_name<F: FileSystem>(
    marker: &Path,
    default_root: Option<&Path>,
    fs: &F,
) -> Option<ProjectName> {
    if let Some(root) = default_root {
        if is_default_location(marker, root) {
            return marker
                .parent()
                .and_then(Path::file_name)
                .map(|name| ProjectName::new(name.to_string_lossy()));
        }
    }

    match read_declared_name(marker, fs) {
        Ok(name) => Some(name),
        Err(err) => {
            debug!("No project name for {}: {err}", marker.display());
            None
        }
    }
}

/// `true` if `marker` lives in a directory directly under `default_root`.
pub fn is_default_location(marker: &Path, default_root: &Path) -> bool {
    marker.parent().and_then(Path::parent) == Some(default_root)
}

/// Read `marker` and return the name it declares.
pub fn read_declared_name<F: FileSystem>(
    marker: &Path,
    fs: &F,
) -> Result<ProjectName, MarkerParseError> {
    let contents = fs
        .read_to_string(marker)
        .map_err(|source| MarkerParseError::Unreadable {
            path: marker.to_path_buf(),
            source,
        })?;
    parse_declared_name(&contents)
}

/// Extract the declared project name from marker contents.
///
/// Only a `<name>` that is a direct child of `<projectDescription>` counts;
/// nested ones (linked resources, build commands) are ignored. The whole
/// document is read before a name is returned, so a truncated or
/// mismatched marker yields an error rather than a name.
pub fn parse_declared_name(xml: &str) -> Result<ProjectName, MarkerParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut declared: Option<String> = None;
    loop {
        let event = reader
            .read_event()
            .map_err(|err| MarkerParseError::Malformed(err.to_string()))?;
        match event {
            Event::Start(start) => open.push(start.name().as_ref().to_vec()),
            Event::End(_) => {
                open.pop();
            }
            Event::Text(text) if declared.is_none() && at_name(&open) => {
                let name = text
                    .unescape()
                    .map_err(|err| MarkerParseError::Malformed(err.to_string()))?;
                declared = Some(name.into_owned());
            }
            Event::CData(data) if declared.is_none() && at_name(&open) => {
                declared = Some(String::from_utf8_lossy(&data).into_owned());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(MarkerParseError::Malformed(format!(
            "unclosed element <{}>",
            String::from_utf8_lossy(unclosed)
        )));
    }
    match declared {
        Some(name) => non_empty(&name),
        None => Err(MarkerParseError::MissingName),
    }
}

fn at_name(open: &[Vec<u8>]) -> bool {
    matches!(open, [root, name] if root == ROOT_ELEMENT && name == NAME_ELEMENT)
}

fn non_empty(name: &str) -> Result<ProjectName, MarkerParseError> {
    let name = name.trim();
    if name.is_empty() {
        Err(MarkerParseError::MissingName)
    } else {
        Ok(ProjectName::new(name))
    }
}

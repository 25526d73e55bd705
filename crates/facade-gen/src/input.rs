//! Loading descriptor JSON from files or stdin.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use facade_types::TypeDescriptor;

/// Parse one document: a single descriptor or an array of them.
pub fn parse_descriptors(text: &str) -> serde_json::Result<Vec<TypeDescriptor>> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str(text)
    } else {
        serde_json::from_str::<TypeDescriptor>(text).map(|one| vec![one])
    }
}

pub fn load_file(path: &Path) -> anyhow::Result<Vec<TypeDescriptor>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_descriptors(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_reader(mut reader: impl Read) -> anyhow::Result<Vec<TypeDescriptor>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("Failed to read descriptors from stdin")?;
    parse_descriptors(&text).context("Failed to parse descriptors from stdin")
}

/// Load every input in order. No inputs means stdin.
pub fn load_all<P: AsRef<Path>>(inputs: &[P]) -> anyhow::Result<Vec<TypeDescriptor>> {
    if inputs.is_empty() {
        return load_reader(std::io::stdin().lock());
    }

    let mut descriptors = Vec::new();
    for input in inputs {
        let loaded = load_file(input.as_ref())?;
        log::debug!(
            "Loaded {} descriptor(s) from {}",
            loaded.len(),
            input.as_ref().display()
        );
        descriptors.extend(loaded);
    }
    Ok(descriptors)
}

/// Keep the first descriptor per fully qualified type.
pub fn dedupe(descriptors: Vec<TypeDescriptor>) -> Vec<TypeDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .into_iter()
        .filter(|descriptor| {
            let name = descriptor.qualified_name();
            let first = seen.insert(name.clone());
            if !first {
                log::warn!("Ignoring duplicate descriptor for {}", name);
            }
            first
        })
        .collect()
}

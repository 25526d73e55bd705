//! The marker attribute that opts a type into synthesis.

use facade_types::GeneratedFile;

use crate::error::{Result, SynthesisError};
use crate::render::{HEADER, SourceWriter};
use crate::validate::is_valid_identifier;

pub const MARKER_NAME: &str = "Interfaced";
pub const DEFAULT_MARKER_NAMESPACE: &str = "Facade";

/// Source of the marker attribute, placed in `namespace` or the default one.
pub fn marker_file(namespace: Option<&str>) -> Result<GeneratedFile> {
    let namespace = namespace.unwrap_or(DEFAULT_MARKER_NAMESPACE);
    if namespace.split('.').any(|segment| !is_valid_identifier(segment)) {
        return Err(SynthesisError::InvalidMarkerNamespace(namespace.to_string()));
    }

    let mut w = SourceWriter::new();
    w.line(HEADER);
    w.line(&format!("namespace {}", namespace));
    w.open();
    w.line(
        "[global::System.AttributeUsage(global::System.AttributeTargets.Class | \
         global::System.AttributeTargets.Struct, AllowMultiple = false)]",
    );
    w.line(&format!(
        "internal sealed class {}Attribute : global::System.Attribute",
        MARKER_NAME
    ));
    w.open();
    w.line(&format!(
        "public {}Attribute(bool SkipOverlappingMembers = true, bool ForcePublicAccessibility = false)",
        MARKER_NAME
    ));
    w.open();
    w.close();
    w.close();
    w.close();

    Ok(GeneratedFile {
        hint_name: format!("{}_{}__.g.cs", namespace, MARKER_NAME),
        source: w.finish(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker() {
        let file = marker_file(None).unwrap();
        assert_eq!(file.hint_name, "Facade_Interfaced__.g.cs");
        assert!(file.source.starts_with("// <auto-generated/>\nnamespace Facade\n{\n"));
        assert!(file.source.contains("\tinternal sealed class InterfacedAttribute"));
        assert!(file.source.contains("AllowMultiple = false"));
        assert!(
            file.source
                .contains("bool SkipOverlappingMembers = true, bool ForcePublicAccessibility = false")
        );
        assert!(file.source.ends_with("\t}\n}\n"));
    }

    #[test]
    fn test_custom_namespace() {
        let file = marker_file(Some("Acme.Codegen")).unwrap();
        assert_eq!(file.hint_name, "Acme.Codegen_Interfaced__.g.cs");
        assert!(file.source.contains("namespace Acme.Codegen\n"));
    }

    #[test]
    fn test_invalid_namespace() {
        assert_eq!(
            marker_file(Some("Acme..Gen")),
            Err(SynthesisError::InvalidMarkerNamespace("Acme..Gen".to_string()))
        );
        assert!(marker_file(Some("")).is_err());
    }
}

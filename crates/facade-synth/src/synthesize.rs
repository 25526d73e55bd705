//! The per-type pipeline: validate, project, subtract overlaps, assemble.

use facade_types::{
    Accessibility, AmendedTypeDeclaration, GenerationOptions, InterfaceDeclaration,
    SynthesisResult, TypeDescriptor,
};

use crate::error::Result;
use crate::overlap::OverlapResolver;
use crate::project::{MemberProjector, is_eligible};
use crate::validate::validate;

/// Accessibility of the amended type: `public` stays public, anything else
/// collapses to `internal`.
pub fn base_accessibility(declared: Accessibility) -> Accessibility {
    if declared.is_public() {
        Accessibility::Public
    } else {
        Accessibility::Internal
    }
}

pub fn interface_accessibility(declared: Accessibility, options: &GenerationOptions) -> Accessibility {
    if options.force_public_accessibility {
        Accessibility::Public
    } else {
        base_accessibility(declared)
    }
}

/// Interface reference with the type's generic parameters applied.
fn interface_reference(name: &str, type_parameters: &[String]) -> String {
    if type_parameters.is_empty() {
        name.to_string()
    } else {
        format!("{}<{}>", name, type_parameters.join(", "))
    }
}

/// Synthesize the interface and amended declaration for one type.
///
/// Fails only on invariant violations. Members whose default values cannot be
/// spelled are left out and reported in `diagnostics`.
pub fn synthesize(descriptor: &TypeDescriptor) -> Result<SynthesisResult> {
    validate(descriptor)?;

    let projector = MemberProjector::new(descriptor);
    let resolver = OverlapResolver::new(descriptor);

    let eligible = descriptor.own_members.iter().filter(|m| is_eligible(m));
    let surviving = resolver.resolve(eligible);

    let mut members = Vec::with_capacity(surviving.len());
    let mut diagnostics = Vec::new();

    for member in surviving {
        match projector.project(member) {
            Ok(Some(projected)) => members.push(projected),
            Ok(None) => {}
            Err(err) => match err.to_diagnostic() {
                Some(diagnostic) => {
                    log::warn!("{}", diagnostic.message);
                    diagnostics.push(diagnostic);
                }
                None => return Err(err),
            },
        }
    }

    let interface_name = descriptor.interface_name();
    let accessibility = base_accessibility(descriptor.declared_accessibility);

    log::debug!(
        "synthesized {} for {} with {} of {} members",
        interface_name,
        descriptor.qualified_name(),
        members.len(),
        descriptor.own_members.len()
    );

    Ok(SynthesisResult {
        namespace_path: descriptor.namespace_path.clone(),
        interface: InterfaceDeclaration {
            name: interface_name.clone(),
            accessibility: interface_accessibility(
                descriptor.declared_accessibility,
                &descriptor.generation_options,
            ),
            type_parameters: descriptor.type_parameters.clone(),
            members,
        },
        amended_type: AmendedTypeDeclaration {
            name: descriptor.name.clone(),
            kind: descriptor.kind,
            accessibility,
            is_partial: true,
            type_parameters: descriptor.type_parameters.clone(),
            conforms_to: interface_reference(&interface_name, &descriptor.type_parameters),
        },
        diagnostics,
    })
}

/// Synthesize a batch. One type failing never affects another.
pub fn synthesize_all(descriptors: &[TypeDescriptor]) -> Vec<Result<SynthesisResult>> {
    descriptors.iter().map(synthesize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthesisError;
    use facade_types::{
        DefaultValue, DiagnosticCode, InterfaceMember, MemberDescriptor, MethodDescriptor,
        Parameter, TypeKind,
    };

    #[test]
    fn test_accessibility_matrix() {
        let plain = GenerationOptions::default();
        let forced = GenerationOptions {
            force_public_accessibility: true,
            ..GenerationOptions::default()
        };

        assert_eq!(interface_accessibility(Accessibility::Public, &plain), Accessibility::Public);
        assert_eq!(
            interface_accessibility(Accessibility::Internal, &plain),
            Accessibility::Internal
        );
        assert_eq!(interface_accessibility(Accessibility::Internal, &forced), Accessibility::Public);
        assert_eq!(interface_accessibility(Accessibility::Public, &forced), Accessibility::Public);
    }

    #[test]
    fn test_non_public_collapses_to_internal() {
        for declared in [
            Accessibility::Private,
            Accessibility::ProtectedAndInternal,
            Accessibility::Protected,
            Accessibility::ProtectedOrInternal,
        ] {
            assert_eq!(base_accessibility(declared), Accessibility::Internal);
            assert_eq!(
                interface_accessibility(declared, &GenerationOptions::default()),
                Accessibility::Internal
            );
        }
    }

    #[test]
    fn test_generic_parameters_are_echoed() {
        let mut descriptor = TypeDescriptor::new("Cache", TypeKind::Class, Accessibility::Public);
        descriptor.type_parameters = vec!["TKey".to_string(), "TValue".to_string()];

        let result = synthesize(&descriptor).unwrap();
        assert_eq!(result.interface.type_parameters, descriptor.type_parameters);
        assert_eq!(result.amended_type.type_parameters, descriptor.type_parameters);
        assert_eq!(result.amended_type.conforms_to, "ICache<TKey, TValue>");
        assert!(result.amended_type.is_partial);
    }

    #[test]
    fn test_unsupported_default_drops_only_that_member() {
        let mut descriptor = TypeDescriptor::new("Brush", TypeKind::Class, Accessibility::Public);
        descriptor.own_members = vec![
            MemberDescriptor::Method(MethodDescriptor::new("Reset", "void")),
            MemberDescriptor::Method(MethodDescriptor::new("Paint", "void").with_parameter(
                Parameter::new("color", "Color").with_default(DefaultValue::Other {
                    kind: "enum".to_string(),
                    text: "Color.Red".to_string(),
                }),
            )),
            MemberDescriptor::Method(MethodDescriptor::new("Dispose", "void")),
        ];

        let result = synthesize(&descriptor).unwrap();
        let names: Vec<_> = result.interface.members.iter().map(InterfaceMember::name).collect();
        assert_eq!(names, ["Reset", "Dispose"]);

        assert_eq!(result.diagnostics.len(), 1);
        let diagnostic = &result.diagnostics[0];
        assert_eq!(diagnostic.code, DiagnosticCode::UnsupportedDefaultValue);
        assert_eq!(diagnostic.type_name, "Brush");
        assert_eq!(diagnostic.member.as_deref(), Some("Paint"));
    }

    #[test]
    fn test_invalid_descriptor_fails_fast() {
        let descriptor = TypeDescriptor::new("", TypeKind::Class, Accessibility::Public);
        let err = synthesize(&descriptor).unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good = TypeDescriptor::new("Good", TypeKind::Class, Accessibility::Public);
        let bad = TypeDescriptor::new("9Bad", TypeKind::Class, Accessibility::Public);
        let results = synthesize_all(&[good.clone(), bad, good]);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[0], results[2]);
    }
}

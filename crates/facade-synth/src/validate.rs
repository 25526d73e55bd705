//! Descriptor invariant checks, run before any projection.

use std::collections::HashSet;

use facade_types::{Accessibility, MemberDescriptor, Parameter, TypeDescriptor};

use crate::error::{InvalidReason, Result, SynthesisError};

/// Whether `name` is a valid identifier, optionally `@`-escaped.
pub fn is_valid_identifier(name: &str) -> bool {
    let name = name.strip_prefix('@').unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Check every invariant a descriptor must hold before it can be synthesized.
pub fn validate(descriptor: &TypeDescriptor) -> Result<()> {
    let fail = |reason: InvalidReason| -> Result<()> {
        Err(SynthesisError::invalid(&descriptor.name, reason))
    };

    if !is_valid_identifier(&descriptor.name) {
        return fail(InvalidReason::InvalidTypeName(descriptor.name.clone()));
    }

    if let Some(segment) = descriptor
        .namespace_path
        .iter()
        .find(|s| !is_valid_identifier(s))
    {
        return fail(InvalidReason::InvalidNamespaceSegment(segment.clone()));
    }

    check_type_parameters(&descriptor.type_parameters)
        .map_err(|reason| SynthesisError::invalid(&descriptor.name, reason))?;

    for member in &descriptor.own_members {
        check_member(member).map_err(|reason| SynthesisError::invalid(&descriptor.name, reason))?;
    }

    Ok(())
}

fn check_type_parameters(parameters: &[String]) -> std::result::Result<(), InvalidReason> {
    let mut seen = HashSet::new();
    for parameter in parameters {
        if !is_valid_identifier(parameter) {
            return Err(InvalidReason::InvalidTypeParameter(parameter.clone()));
        }
        if !seen.insert(parameter.as_str()) {
            return Err(InvalidReason::DuplicateTypeParameter(parameter.clone()));
        }
    }
    Ok(())
}

fn check_member(member: &MemberDescriptor) -> std::result::Result<(), InvalidReason> {
    match member {
        MemberDescriptor::Method(method) => {
            if method.is_constructor && method.is_property_accessor {
                return Err(InvalidReason::ContradictoryMethodFlags(method.name.clone()));
            }
            // Constructors are named by the host (`.ctor`, the type name, ...).
            if !method.is_constructor {
                check_name(&method.name)?;
                check_type(&method.name, "return", &method.return_type)?;
            }
            check_type_parameters(&method.type_parameters)?;
            check_parameters(&method.name, &method.parameters)
        }
        MemberDescriptor::Property(property) => {
            check_name(&property.name)?;
            check_type(&property.name, "property", &property.ty)?;
            check_accessors(
                &property.name,
                property.declared_accessibility,
                property.getter_accessibility,
                property.setter_accessibility,
                property.setter_is_init_only,
            )
        }
        MemberDescriptor::Indexer(indexer) => {
            check_type(&indexer.name, "element", &indexer.ty)?;
            check_accessors(
                &indexer.name,
                indexer.declared_accessibility,
                indexer.getter_accessibility,
                indexer.setter_accessibility,
                indexer.setter_is_init_only,
            )?;
            if indexer.index_parameters.is_empty() {
                return Err(InvalidReason::EmptyIndexer(indexer.name.clone()));
            }
            check_parameters(&indexer.name, &indexer.index_parameters)
        }
        MemberDescriptor::Event(event) => {
            check_name(&event.name)?;
            check_type(&event.name, "handler", &event.handler_type)
        }
    }
}

fn check_name(name: &str) -> std::result::Result<(), InvalidReason> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(InvalidReason::InvalidMemberName(name.to_string()))
    }
}

fn check_type(member: &str, what: &'static str, ty: &str) -> std::result::Result<(), InvalidReason> {
    if ty.trim().is_empty() {
        Err(InvalidReason::MissingType {
            member: member.to_string(),
            what,
        })
    } else {
        Ok(())
    }
}

fn check_accessors(
    member: &str,
    declared: Accessibility,
    getter: Option<Accessibility>,
    setter: Option<Accessibility>,
    init_only: bool,
) -> std::result::Result<(), InvalidReason> {
    if init_only && setter.is_none() {
        return Err(InvalidReason::InitWithoutSetter(member.to_string()));
    }

    for (accessor, accessibility) in [("get", getter), ("set", setter)] {
        if let Some(accessibility) = accessibility {
            if accessibility > declared {
                return Err(InvalidReason::AccessorMoreAccessible {
                    member: member.to_string(),
                    accessor,
                    accessor_accessibility: accessibility,
                    member_accessibility: declared,
                });
            }
        }
    }

    Ok(())
}

fn check_parameters(member: &str, parameters: &[Parameter]) -> std::result::Result<(), InvalidReason> {
    let mut seen = HashSet::new();
    for parameter in parameters {
        if !is_valid_identifier(&parameter.name) {
            return Err(InvalidReason::InvalidParameterName {
                member: member.to_string(),
                parameter: parameter.name.clone(),
            });
        }
        if !seen.insert(parameter.name.as_str()) {
            return Err(InvalidReason::DuplicateParameter {
                member: member.to_string(),
                parameter: parameter.name.clone(),
            });
        }
        check_type(member, "parameter", &parameter.ty)?;
        if !parameter.has_default && parameter.default_value.is_some() {
            return Err(InvalidReason::UnflaggedDefault {
                member: member.to_string(),
                parameter: parameter.name.clone(),
            });
        }
    }
    Ok(())
}

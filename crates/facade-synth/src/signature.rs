//! Overlap keys.

use facade_types::{MemberDescriptor, MemberSignature, Parameter};

use crate::type_name::normalize;

fn parameter_types(parameters: &[Parameter]) -> Vec<String> {
    parameters.iter().map(|p| normalize(&p.ty)).collect()
}

/// Comparison key of a declared member, with normalized parameter types.
pub fn member_signature(member: &MemberDescriptor) -> MemberSignature {
    match member {
        MemberDescriptor::Method(method) => {
            MemberSignature::method(&method.name, parameter_types(&method.parameters))
        }
        MemberDescriptor::Property(property) => MemberSignature::property(&property.name),
        MemberDescriptor::Indexer(indexer) => {
            MemberSignature::indexer(parameter_types(&indexer.index_parameters))
        }
        MemberDescriptor::Event(event) => MemberSignature::event(&event.name),
    }
}

/// The same key with its parameter types normalized, so host spellings of
/// inherited members compare equal to declared ones.
pub fn normalize_signature(signature: &MemberSignature) -> MemberSignature {
    MemberSignature {
        kind: signature.kind,
        name: signature.name.clone(),
        parameter_types: signature
            .parameter_types
            .iter()
            .map(|ty| normalize(ty))
            .collect(),
    }
}

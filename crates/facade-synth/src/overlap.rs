//! Overlap resolution against base types and implemented interfaces.

use std::collections::HashSet;

use facade_types::{InheritedMember, MemberDescriptor, MemberSignature, TypeDescriptor};

use crate::signature::{member_signature, normalize_signature};

/// Signatures the type already satisfies, and whether to subtract them.
#[derive(Debug, Clone, Default)]
pub struct OverlapResolver {
    satisfied: HashSet<MemberSignature>,
    enabled: bool,
}

impl OverlapResolver {
    /// Build the resolver for one type from its public inherited members.
    ///
    /// With `skip_overlapping_members` off the resolver passes every member
    /// through.
    pub fn new(descriptor: &TypeDescriptor) -> Self {
        if !descriptor.generation_options.skip_overlapping_members {
            return Self::default();
        }

        Self::from_inherited(
            descriptor
                .base_type_members
                .iter()
                .chain(&descriptor.implemented_interface_members),
        )
    }

    pub fn from_inherited<'a>(members: impl IntoIterator<Item = &'a InheritedMember>) -> Self {
        let satisfied = members
            .into_iter()
            .filter(|m| m.accessibility.is_public())
            .map(|m| normalize_signature(&m.signature))
            .collect();

        Self {
            satisfied,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of distinct satisfied signatures.
    pub fn len(&self) -> usize {
        self.satisfied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satisfied.is_empty()
    }

    /// Whether `member` is already provided, by signature.
    pub fn is_satisfied(&self, member: &MemberDescriptor) -> bool {
        self.enabled && self.satisfied.contains(&member_signature(member))
    }

    /// Stable filter: keeps the members that are not already satisfied, in
    /// their original order.
    pub fn resolve<'m>(
        &self,
        members: impl IntoIterator<Item = &'m MemberDescriptor>,
    ) -> Vec<&'m MemberDescriptor> {
        members
            .into_iter()
            .filter(|member| {
                let satisfied = self.is_satisfied(member);
                if satisfied {
                    log::debug!(
                        "skipping {:?} `{}`: already provided",
                        member.kind(),
                        member.name()
                    );
                }
                !satisfied
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facade_types::{
        Accessibility, IndexerDescriptor, MethodDescriptor, Parameter, PropertyDescriptor,
        TypeKind,
    };

    fn members() -> Vec<MemberDescriptor> {
        vec![
            MemberDescriptor::Property(PropertyDescriptor::new(
                "Name",
                "string",
                Some(Accessibility::Public),
                None,
            )),
            MemberDescriptor::Method(
                MethodDescriptor::new("Save", "void").with_parameter(Parameter::new("force", "bool")),
            ),
            MemberDescriptor::Indexer(IndexerDescriptor::new(
                "int",
                vec![Parameter::new("key", "string")],
                Some(Accessibility::Public),
                None,
            )),
        ]
    }

    #[test]
    fn test_resolve_keeps_order() {
        let resolver = OverlapResolver::from_inherited(&[InheritedMember::public(
            MemberSignature::property("Name"),
        )]);
        let members = members();
        let names: Vec<_> = resolver.resolve(&members).iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Save", "this"]);
    }

    #[test]
    fn test_non_public_inherited_members_do_not_overlap() {
        let resolver = OverlapResolver::from_inherited(&[InheritedMember {
            signature: MemberSignature::property("Name"),
            accessibility: Accessibility::Private,
        }]);
        assert!(resolver.is_empty());
        assert_eq!(resolver.resolve(&members()).len(), 3);
    }

    #[test]
    fn test_host_spellings_are_normalized() {
        let resolver = OverlapResolver::from_inherited(&[
            InheritedMember::public(MemberSignature::method("Save", ["global::System.Boolean"])),
            InheritedMember::public(MemberSignature::indexer(["System.String"])),
        ]);
        let members = members();
        let names: Vec<_> = resolver.resolve(&members).iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Name"]);
    }

    #[test]
    fn test_disabled_resolver_passes_everything() {
        let mut descriptor = TypeDescriptor::new("Doc", TypeKind::Class, Accessibility::Public);
        descriptor.own_members = members();
        descriptor
            .base_type_members
            .push(InheritedMember::public(MemberSignature::property("Name")));
        descriptor.generation_options.skip_overlapping_members = false;

        let resolver = OverlapResolver::new(&descriptor);
        assert!(!resolver.is_enabled());
        assert_eq!(resolver.resolve(&descriptor.own_members).len(), 3);
    }

    #[test]
    fn test_base_and_interface_members_are_unioned() {
        let mut descriptor = TypeDescriptor::new("Doc", TypeKind::Class, Accessibility::Public);
        descriptor
            .base_type_members
            .push(InheritedMember::public(MemberSignature::property("Name")));
        descriptor
            .implemented_interface_members
            .push(InheritedMember::public(MemberSignature::method("Save", ["bool"])));
        descriptor
            .implemented_interface_members
            .push(InheritedMember::public(MemberSignature::property("Name")));

        let resolver = OverlapResolver::new(&descriptor);
        assert_eq!(resolver.len(), 2);
    }
}

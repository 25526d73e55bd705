//! Member projection: which declared members an interface can expose, and how
//! each one reads once it is an interface member.

use facade_types::{
    AccessorSet, Accessibility, EventDescriptor, IndexerDescriptor, InterfaceEvent,
    InterfaceIndexer, InterfaceMember, InterfaceMethod, InterfaceProperty, MemberDescriptor,
    MethodDescriptor, Parameter, PropertyDescriptor, RenderedParameter, SetAccessor,
    TypeDescriptor,
};

use crate::error::{Result, SynthesisError};
use crate::literal::default_literal;
use crate::type_name::qualify;

fn is_public(accessibility: Option<Accessibility>) -> bool {
    accessibility.is_some_and(Accessibility::is_public)
}

/// Accessors reachable through the interface: only the public ones, with an
/// init-only setter kept as `init`.
pub fn public_accessors(
    getter: Option<Accessibility>,
    setter: Option<Accessibility>,
    setter_is_init_only: bool,
) -> AccessorSet {
    AccessorSet {
        get: is_public(getter),
        set: is_public(setter).then_some(if setter_is_init_only {
            SetAccessor::Init
        } else {
            SetAccessor::Set
        }),
    }
}

/// Whether a member exposes at least one public access point.
pub fn is_eligible(member: &MemberDescriptor) -> bool {
    match member {
        MemberDescriptor::Method(method) => {
            method.declared_accessibility.is_public()
                && !method.is_property_accessor
                && !method.is_constructor
                && !method.is_static
        }
        MemberDescriptor::Property(property) => {
            !property.is_static
                && !public_accessors(
                    property.getter_accessibility,
                    property.setter_accessibility,
                    property.setter_is_init_only,
                )
                .is_empty()
        }
        MemberDescriptor::Indexer(indexer) => !public_accessors(
            indexer.getter_accessibility,
            indexer.setter_accessibility,
            indexer.setter_is_init_only,
        )
        .is_empty(),
        MemberDescriptor::Event(event) => {
            event.declared_accessibility.is_public() && !event.is_static
        }
    }
}

/// Renders eligible members of one type into interface members.
pub struct MemberProjector<'a> {
    type_name: &'a str,
    type_parameters: Vec<&'a str>,
}

impl<'a> MemberProjector<'a> {
    pub fn new(descriptor: &'a TypeDescriptor) -> Self {
        Self {
            type_name: &descriptor.name,
            type_parameters: descriptor.type_parameters.iter().map(String::as_str).collect(),
        }
    }

    /// Project one member. `Ok(None)` when the member is not eligible.
    ///
    /// Fails with `UnsupportedDefaultValue` when a parameter default has no
    /// literal spelling.
    pub fn project(&self, member: &MemberDescriptor) -> Result<Option<InterfaceMember>> {
        if !is_eligible(member) {
            return Ok(None);
        }

        let projected = match member {
            MemberDescriptor::Method(method) => InterfaceMember::Method(self.method(method)?),
            MemberDescriptor::Property(property) => {
                InterfaceMember::Property(self.property(property))
            }
            MemberDescriptor::Indexer(indexer) => InterfaceMember::Indexer(self.indexer(indexer)?),
            MemberDescriptor::Event(event) => InterfaceMember::Event(self.event(event)),
        };

        Ok(Some(projected))
    }

    fn method(&self, method: &MethodDescriptor) -> Result<InterfaceMethod> {
        let mut scope: Vec<&str> = self.type_parameters.iter().copied().collect();
        scope.extend(method.type_parameters.iter().map(String::as_str));

        Ok(InterfaceMethod {
            name: method.name.clone(),
            return_type: qualify(&method.return_type, &scope),
            type_parameters: method.type_parameters.clone(),
            parameters: self.parameters(&method.name, &method.parameters, &scope)?,
            documentation: method.documentation.clone(),
        })
    }

    fn property(&self, property: &PropertyDescriptor) -> InterfaceProperty {
        InterfaceProperty {
            name: property.name.clone(),
            ty: qualify(&property.ty, &self.type_parameters),
            accessors: public_accessors(
                property.getter_accessibility,
                property.setter_accessibility,
                property.setter_is_init_only,
            ),
            documentation: property.documentation.clone(),
        }
    }

    fn indexer(&self, indexer: &IndexerDescriptor) -> Result<InterfaceIndexer> {
        Ok(InterfaceIndexer {
            ty: qualify(&indexer.ty, &self.type_parameters),
            parameters: self.parameters(
                &indexer.name,
                &indexer.index_parameters,
                &self.type_parameters,
            )?,
            accessors: public_accessors(
                indexer.getter_accessibility,
                indexer.setter_accessibility,
                indexer.setter_is_init_only,
            ),
            documentation: indexer.documentation.clone(),
        })
    }

    fn event(&self, event: &EventDescriptor) -> InterfaceEvent {
        InterfaceEvent {
            name: event.name.clone(),
            handler_type: qualify(&event.handler_type, &self.type_parameters),
            documentation: event.documentation.clone(),
        }
    }

    fn parameters(
        &self,
        member: &str,
        parameters: &[Parameter],
        scope: &[&str],
    ) -> Result<Vec<RenderedParameter>> {
        parameters
            .iter()
            .map(|parameter| {
                let default = default_literal(parameter).map_err(|unsupported| {
                    SynthesisError::UnsupportedDefaultValue {
                        type_name: self.type_name.to_string(),
                        member: member.to_string(),
                        parameter: parameter.name.clone(),
                        kind: unsupported.0,
                    }
                })?;
                Ok(RenderedParameter {
                    name: parameter.name.clone(),
                    ty: qualify(&parameter.ty, scope),
                    default,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facade_types::{DefaultValue, TypeKind};

    fn descriptor() -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::new("Store", TypeKind::Class, Accessibility::Public);
        descriptor.type_parameters = vec!["TItem".to_string()];
        descriptor
    }

    #[test]
    fn test_accessor_splitting() {
        let get_only = public_accessors(
            Some(Accessibility::Public),
            Some(Accessibility::Private),
            false,
        );
        assert_eq!(get_only, AccessorSet { get: true, set: None });

        let set_only = public_accessors(
            Some(Accessibility::Protected),
            Some(Accessibility::Public),
            false,
        );
        assert_eq!(
            set_only,
            AccessorSet {
                get: false,
                set: Some(SetAccessor::Set)
            }
        );

        let init = public_accessors(Some(Accessibility::Public), Some(Accessibility::Public), true);
        assert_eq!(init.set, Some(SetAccessor::Init));

        assert!(public_accessors(Some(Accessibility::Private), None, false).is_empty());
    }

    #[test]
    fn test_method_eligibility() {
        let public = MethodDescriptor::new("Run", "void");
        assert!(is_eligible(&MemberDescriptor::Method(public.clone())));

        let mut internal = public.clone();
        internal.declared_accessibility = Accessibility::Internal;
        assert!(!is_eligible(&MemberDescriptor::Method(internal)));

        let mut accessor = public.clone();
        accessor.is_property_accessor = true;
        assert!(!is_eligible(&MemberDescriptor::Method(accessor)));

        let mut ctor = public.clone();
        ctor.is_constructor = true;
        assert!(!is_eligible(&MemberDescriptor::Method(ctor)));

        let mut stat = public;
        stat.is_static = true;
        assert!(!is_eligible(&MemberDescriptor::Method(stat)));
    }

    #[test]
    fn test_private_property_projects_to_nothing() {
        let mut property = PropertyDescriptor::new(
            "Hidden",
            "int",
            Some(Accessibility::Private),
            Some(Accessibility::Private),
        );
        property.declared_accessibility = Accessibility::Private;

        let descriptor = descriptor();
        let projector = MemberProjector::new(&descriptor);
        assert_eq!(
            projector.project(&MemberDescriptor::Property(property)),
            Ok(None)
        );
    }

    #[test]
    fn test_method_rendering_qualifies_types() {
        let mut method = MethodDescriptor::new("Find", "System.Threading.Tasks.Task<TItem>")
            .with_parameter(Parameter::new("key", "System.Guid"))
            .with_parameter(Parameter::new("fallback", "TKey").with_default(DefaultValue::Null));
        method.type_parameters = vec!["TKey".to_string()];
        method.documentation = Some("/// <summary>Finds.</summary>".to_string());

        let descriptor = descriptor();
        let projector = MemberProjector::new(&descriptor);
        let projected = projector
            .project(&MemberDescriptor::Method(method))
            .unwrap()
            .unwrap();

        match projected {
            InterfaceMember::Method(m) => {
                assert_eq!(m.return_type, "global::System.Threading.Tasks.Task<TItem>");
                assert_eq!(m.parameters[0].ty, "global::System.Guid");
                assert_eq!(m.parameters[1].ty, "TKey");
                assert_eq!(m.parameters[1].default.as_deref(), Some("default"));
                assert_eq!(m.type_parameters, vec!["TKey".to_string()]);
                assert!(m.documentation.is_some());
            }
            other => panic!("Wrong member: {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_default_names_member_and_parameter() {
        let method = MethodDescriptor::new("Paint", "void").with_parameter(
            Parameter::new("color", "Color").with_default(DefaultValue::Other {
                kind: "enum".to_string(),
                text: "Color.Red".to_string(),
            }),
        );

        let descriptor = descriptor();
        let projector = MemberProjector::new(&descriptor);
        assert_eq!(
            projector.project(&MemberDescriptor::Method(method)),
            Err(SynthesisError::UnsupportedDefaultValue {
                type_name: "Store".to_string(),
                member: "Paint".to_string(),
                parameter: "color".to_string(),
                kind: "enum".to_string(),
            })
        );
    }

    #[test]
    fn test_indexer_keeps_parameter_order() {
        let indexer = IndexerDescriptor::new(
            "bool",
            vec![Parameter::new("row", "int"), Parameter::new("column", "string")],
            Some(Accessibility::Private),
            Some(Accessibility::Public),
        );

        let descriptor = descriptor();
        let projector = MemberProjector::new(&descriptor);
        match projector.project(&MemberDescriptor::Indexer(indexer)) {
            Ok(Some(InterfaceMember::Indexer(i))) => {
                let names: Vec<_> = i.parameters.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, ["row", "column"]);
                assert!(!i.accessors.get);
                assert_eq!(i.accessors.set, Some(SetAccessor::Set));
            }
            other => panic!("Wrong projection: {:?}", other),
        }
    }
}

use facade_types::{Accessibility, Diagnostic, DiagnosticCode};

/// Errors produced while synthesizing one type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("Invalid descriptor for `{type_name}`: {reason}")]
    InvalidDescriptor {
        type_name: String,
        reason: InvalidReason,
    },

    #[error(
        "`{type_name}.{member}`: parameter `{parameter}` has a default value of unsupported kind `{kind}`"
    )]
    UnsupportedDefaultValue {
        type_name: String,
        member: String,
        parameter: String,
        kind: String,
    },

    #[error("Marker namespace `{0}` is not a valid namespace")]
    InvalidMarkerNamespace(String),
}

impl SynthesisError {
    pub(crate) fn invalid(type_name: &str, reason: InvalidReason) -> Self {
        SynthesisError::InvalidDescriptor {
            type_name: type_name.to_string(),
            reason,
        }
    }

    /// Per-member form of this error, for errors that do not fail the whole type.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            SynthesisError::UnsupportedDefaultValue {
                type_name, member, ..
            } => Some(Diagnostic {
                code: DiagnosticCode::UnsupportedDefaultValue,
                type_name: type_name.clone(),
                member: Some(member.clone()),
                message: self.to_string(),
            }),
            _ => None,
        }
    }
}

/// The descriptor invariant that was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReason {
    #[error("`{0}` is not a valid type name")]
    InvalidTypeName(String),

    #[error("namespace segment `{0}` is not a valid identifier")]
    InvalidNamespaceSegment(String),

    #[error("type parameter `{0}` is not a valid identifier")]
    InvalidTypeParameter(String),

    #[error("type parameter `{0}` is declared more than once")]
    DuplicateTypeParameter(String),

    #[error("member `{0}` does not have a valid name")]
    InvalidMemberName(String),

    #[error("member `{member}` has an empty {what} type")]
    MissingType { member: String, what: &'static str },

    #[error("method `{0}` is marked both as a constructor and as a property accessor")]
    ContradictoryMethodFlags(String),

    #[error("`{0}` has an init-only setter flag but no setter")]
    InitWithoutSetter(String),

    #[error(
        "{accessor} accessor of `{member}` is `{accessor_accessibility}`, more accessible than the member (`{member_accessibility}`)"
    )]
    AccessorMoreAccessible {
        member: String,
        accessor: &'static str,
        accessor_accessibility: Accessibility,
        member_accessibility: Accessibility,
    },

    #[error("indexer `{0}` has no index parameters")]
    EmptyIndexer(String),

    #[error("parameter `{parameter}` of `{member}` is not a valid identifier")]
    InvalidParameterName { member: String, parameter: String },

    #[error("parameter `{parameter}` of `{member}` is declared more than once")]
    DuplicateParameter { member: String, parameter: String },

    #[error("parameter `{parameter}` of `{member}` carries a default value but is not marked as having one")]
    UnflaggedDefault { member: String, parameter: String },
}

/// Result type for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthesisError>;

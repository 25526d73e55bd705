//! Shared types for facade interface synthesis.
//!
//! This crate defines the resolved type descriptors a driver hands to the
//! synthesizer, the synthesis results it gets back, and the line protocol
//! spoken by `facade-gen serve`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests and Responses
// ============================================================================

/// A request sent to `facade-gen serve`, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Request ID echoed back in the response
    pub id: u64,
    /// What to do
    pub query: Query,
}

/// Operations understood by the line protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Synthesize the interface for one descriptor and render it
    Synthesize { descriptor: TypeDescriptor },

    /// Render the marker attribute source
    Marker {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },

    /// Check that the server is alive
    Ping,

    /// Ask the server to stop reading requests
    Shutdown,
}

/// A response line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to
    pub id: u64,
    /// The result of the request
    pub result: QueryResult,
}

/// The result of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryResult {
    /// Request handled
    Success { data: QueryData },
    /// Request failed; nothing was generated
    Error { message: String },
}

/// Data returned from successful requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryData {
    /// Response to Synthesize
    Generated {
        result: SynthesisResult,
        file: GeneratedFile,
    },

    /// Response to Marker
    Marker { file: GeneratedFile },

    /// Response to Ping
    Pong,

    /// Response to Shutdown
    ShuttingDown,
}

/// A rendered source file and the name it should be emitted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub hint_name: String,
    pub source: String,
}

// ============================================================================
// Accessibility and Type Shape
// ============================================================================

/// Declared accessibility, ordered from most to least restrictive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Private,
    ProtectedAndInternal,
    Protected,
    Internal,
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    pub fn is_public(self) -> bool {
        self == Accessibility::Public
    }

    /// Modifier keywords for this accessibility, in source order.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Accessibility::Private => &["private"],
            Accessibility::ProtectedAndInternal => &["private", "protected"],
            Accessibility::Protected => &["protected"],
            Accessibility::Internal => &["internal"],
            Accessibility::ProtectedOrInternal => &["protected", "internal"],
            Accessibility::Public => &["public"],
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keywords().join(" "))
    }
}

/// Declaration shape of the annotated type.
///
/// Only affects how the amended declaration is spelled, never which members
/// end up in the interface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct,
    RecordStruct,
    Class,
    RecordClass,
}

impl TypeKind {
    pub fn is_value_type(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::RecordStruct)
    }

    pub fn is_record(self) -> bool {
        matches!(self, TypeKind::RecordStruct | TypeKind::RecordClass)
    }

    /// Declaration keyword(s), e.g. `record struct`.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Struct => "struct",
            TypeKind::RecordStruct => "record struct",
            TypeKind::Class => "class",
            TypeKind::RecordClass => "record",
        }
    }
}

/// Per-type generation switches carried by the marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct GenerationOptions {
    /// Leave out members a base type or implemented interface already provides
    pub skip_overlapping_members: bool,
    /// Make the interface public even when the type is not
    pub force_public_accessibility: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            skip_overlapping_members: true,
            force_public_accessibility: false,
        }
    }
}

// ============================================================================
// Type Descriptors
// ============================================================================

/// Resolved view of one marker-annotated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    /// Namespace segments; empty for the global namespace
    #[serde(default)]
    pub namespace_path: Vec<String>,
    pub kind: TypeKind,
    pub declared_accessibility: Accessibility,
    /// Generic parameter names in declaration order
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Members inherited from the base type
    #[serde(default)]
    pub base_type_members: Vec<InheritedMember>,
    /// Members of every interface the type already implements
    #[serde(default)]
    pub implemented_interface_members: Vec<InheritedMember>,
    /// Members declared directly on the type, in declaration order
    #[serde(default)]
    pub own_members: Vec<MemberDescriptor>,
    #[serde(default)]
    pub generation_options: GenerationOptions,
}

impl TypeDescriptor {
    /// A descriptor with no namespace, generics, members or inherited members.
    pub fn new(name: impl Into<String>, kind: TypeKind, accessibility: Accessibility) -> Self {
        Self {
            name: name.into(),
            namespace_path: Vec::new(),
            kind,
            declared_accessibility: accessibility,
            type_parameters: Vec::new(),
            base_type_members: Vec::new(),
            implemented_interface_members: Vec::new(),
            own_members: Vec::new(),
            generation_options: GenerationOptions::default(),
        }
    }

    /// Dotted namespace, empty for the global namespace.
    pub fn namespace(&self) -> String {
        self.namespace_path.join(".")
    }

    /// Fully qualified name with generic arity, e.g. `Shop.Repo`1`.
    ///
    /// Two descriptors with the same qualified name describe the same type.
    pub fn qualified_name(&self) -> String {
        let mut name = if self.namespace_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace(), self.name)
        };
        if !self.type_parameters.is_empty() {
            name.push_str(&format!("`{}", self.type_parameters.len()));
        }
        name
    }

    pub fn interface_name(&self) -> String {
        format!("I{}", self.name)
    }
}

/// A member the type already gets from its base type or an interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InheritedMember {
    #[serde(flatten)]
    pub signature: MemberSignature,
    #[serde(default = "public_accessibility")]
    pub accessibility: Accessibility,
}

fn public_accessibility() -> Accessibility {
    Accessibility::Public
}

impl InheritedMember {
    pub fn public(signature: MemberSignature) -> Self {
        Self {
            signature,
            accessibility: Accessibility::Public,
        }
    }
}

/// The kind of a member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Method,
    Property,
    Indexer,
    Event,
}

/// Overlap comparison key: kind, name and (for methods and indexers) the
/// parameter types in order. Return and element types are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberSignature {
    pub kind: MemberKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_types: Vec<String>,
}

/// Name every indexer signature is keyed under.
pub const INDEXER_NAME: &str = "this";

impl MemberSignature {
    pub fn method<I, S>(name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Property,
            name: name.into(),
            parameter_types: Vec::new(),
        }
    }

    pub fn indexer<I, S>(parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: MemberKind::Indexer,
            name: INDEXER_NAME.to_string(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn event(name: impl Into<String>) -> Self {
        Self {
            kind: MemberKind::Event,
            name: name.into(),
            parameter_types: Vec::new(),
        }
    }
}

// ============================================================================
// Member Descriptors
// ============================================================================

/// A member declared directly on the annotated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDescriptor {
    Method(MethodDescriptor),
    Property(PropertyDescriptor),
    Indexer(IndexerDescriptor),
    Event(EventDescriptor),
}

impl MemberDescriptor {
    pub fn name(&self) -> &str {
        match self {
            MemberDescriptor::Method(m) => &m.name,
            MemberDescriptor::Property(p) => &p.name,
            MemberDescriptor::Indexer(i) => &i.name,
            MemberDescriptor::Event(e) => &e.name,
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            MemberDescriptor::Method(_) => MemberKind::Method,
            MemberDescriptor::Property(_) => MemberKind::Property,
            MemberDescriptor::Indexer(_) => MemberKind::Indexer,
            MemberDescriptor::Event(_) => MemberKind::Event,
        }
    }

    pub fn declared_accessibility(&self) -> Accessibility {
        match self {
            MemberDescriptor::Method(m) => m.declared_accessibility,
            MemberDescriptor::Property(p) => p.declared_accessibility,
            MemberDescriptor::Indexer(i) => i.declared_accessibility,
            MemberDescriptor::Event(e) => e.declared_accessibility,
        }
    }

    pub fn documentation(&self) -> Option<&str> {
        match self {
            MemberDescriptor::Method(m) => m.documentation.as_deref(),
            MemberDescriptor::Property(p) => p.documentation.as_deref(),
            MemberDescriptor::Indexer(i) => i.documentation.as_deref(),
            MemberDescriptor::Event(e) => e.documentation.as_deref(),
        }
    }
}

/// An ordinary method, constructor or accessor method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub declared_accessibility: Accessibility,
    /// Documentation comment text, copied verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub return_type: String,
    /// Generic method parameters
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Backs a property or indexer getter/setter
    #[serde(default)]
    pub is_property_accessor: bool,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub is_static: bool,
}

impl MethodDescriptor {
    /// A public, non-generic instance method without parameters.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_accessibility: Accessibility::Public,
            documentation: None,
            return_type: return_type.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            is_property_accessor: false,
            is_constructor: false,
            is_static: false,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// A non-indexer property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub declared_accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(rename = "type")]
    pub ty: String,
    /// Effective getter accessibility; `None` when there is no getter
    #[serde(default)]
    pub getter_accessibility: Option<Accessibility>,
    /// Effective setter accessibility; `None` when there is no setter
    #[serde(default)]
    pub setter_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub setter_is_init_only: bool,
    #[serde(default)]
    pub is_static: bool,
}

impl PropertyDescriptor {
    /// A public property with the given accessor accessibilities.
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        getter: Option<Accessibility>,
        setter: Option<Accessibility>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_accessibility: Accessibility::Public,
            documentation: None,
            ty: ty.into(),
            getter_accessibility: getter,
            setter_accessibility: setter,
            setter_is_init_only: false,
            is_static: false,
        }
    }
}

/// An indexer (`this[...]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerDescriptor {
    #[serde(default = "indexer_name")]
    pub name: String,
    pub declared_accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Element type
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub getter_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub setter_accessibility: Option<Accessibility>,
    #[serde(default)]
    pub setter_is_init_only: bool,
    pub index_parameters: Vec<Parameter>,
}

fn indexer_name() -> String {
    INDEXER_NAME.to_string()
}

impl IndexerDescriptor {
    pub fn new(
        ty: impl Into<String>,
        index_parameters: Vec<Parameter>,
        getter: Option<Accessibility>,
        setter: Option<Accessibility>,
    ) -> Self {
        Self {
            name: indexer_name(),
            declared_accessibility: Accessibility::Public,
            documentation: None,
            ty: ty.into(),
            getter_accessibility: getter,
            setter_accessibility: setter,
            setter_is_init_only: false,
            index_parameters,
        }
    }
}

/// An event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub name: String,
    pub declared_accessibility: Accessibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    pub handler_type: String,
    #[serde(default)]
    pub is_static: bool,
}

impl EventDescriptor {
    pub fn new(name: impl Into<String>, handler_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_accessibility: Accessibility::Public,
            documentation: None,
            handler_type: handler_type.into(),
            is_static: false,
        }
    }
}

/// A method or indexer parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub has_default: bool,
    /// Explicit default; `None` with `has_default` means `default`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            has_default: false,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.has_default = true;
        self.default_value = Some(value);
        self
    }
}

/// A parameter's explicit default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// `null` / `default`
    Null,
    Bool(bool),
    Char(char),
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Decimal literal text, e.g. `"10.5"`
    Decimal(String),
    /// A literal the host could only describe, not type
    Other { kind: String, text: String },
}

impl DefaultValue {
    /// Short name of the literal kind, for diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            DefaultValue::Null => "null",
            DefaultValue::Bool(_) => "bool",
            DefaultValue::Char(_) => "char",
            DefaultValue::String(_) => "string",
            DefaultValue::Int(_) => "int",
            DefaultValue::Long(_) => "long",
            DefaultValue::Float(_) => "float",
            DefaultValue::Double(_) => "double",
            DefaultValue::Decimal(_) => "decimal",
            DefaultValue::Other { kind, .. } => kind,
        }
    }
}

// ============================================================================
// Synthesis Results
// ============================================================================

/// Everything generated for one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// Namespace both declarations are emitted into
    pub namespace_path: Vec<String>,
    pub interface: InterfaceDeclaration,
    pub amended_type: AmendedTypeDeclaration,
    /// Per-member problems that did not stop synthesis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// The generated interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub name: String,
    pub accessibility: Accessibility,
    pub type_parameters: Vec<String>,
    pub members: Vec<InterfaceMember>,
}

/// The partial declaration that makes the type implement its interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendedTypeDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub is_partial: bool,
    pub type_parameters: Vec<String>,
    /// Interface reference including type arguments, e.g. `IRepo<T>`
    pub conforms_to: String,
}

/// A rendered interface member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum InterfaceMember {
    Method(InterfaceMethod),
    Property(InterfaceProperty),
    Indexer(InterfaceIndexer),
    Event(InterfaceEvent),
}

impl InterfaceMember {
    pub fn name(&self) -> &str {
        match self {
            InterfaceMember::Method(m) => &m.name,
            InterfaceMember::Property(p) => &p.name,
            InterfaceMember::Indexer(_) => INDEXER_NAME,
            InterfaceMember::Event(e) => &e.name,
        }
    }

    pub fn documentation(&self) -> Option<&str> {
        match self {
            InterfaceMember::Method(m) => m.documentation.as_deref(),
            InterfaceMember::Property(p) => p.documentation.as_deref(),
            InterfaceMember::Indexer(i) => i.documentation.as_deref(),
            InterfaceMember::Event(e) => e.documentation.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub name: String,
    pub return_type: String,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<RenderedParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub accessors: AccessorSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceIndexer {
    #[serde(rename = "type")]
    pub ty: String,
    pub parameters: Vec<RenderedParameter>,
    pub accessors: AccessorSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceEvent {
    pub name: String,
    pub handler_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// Accessors exposed through the interface. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessorSet {
    pub get: bool,
    pub set: Option<SetAccessor>,
}

impl AccessorSet {
    pub fn is_empty(&self) -> bool {
        !self.get && self.set.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetAccessor {
    Set,
    Init,
}

/// A parameter ready to print: qualified type, default literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A problem confined to one member of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub type_name: String,
    pub member: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A default value has no literal mapping; the member was left out
    UnsupportedDefaultValue,
}

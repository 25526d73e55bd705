//! # Facade - Interface Synthesis from Resolved Types
//!
//! Facade takes a fully resolved description of a type that carries the
//! `Interfaced` marker and produces two declarations: an interface exposing
//! the type's public instance surface, and a partial declaration of the type
//! that implements it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use facade::{TypeDescriptor, render, synthesize};
//!
//! let descriptor: TypeDescriptor = serde_json::from_str(r#"{
//!     "name": "Account",
//!     "namespace_path": ["Bank"],
//!     "kind": "record_class",
//!     "declared_accessibility": "public",
//!     "own_members": [{
//!         "member": "method",
//!         "name": "Deposit",
//!         "declared_accessibility": "public",
//!         "return_type": "void",
//!         "parameters": [{ "name": "amount", "type": "decimal" }]
//!     }]
//! }"#)?;
//!
//! let result = synthesize(&descriptor)?;
//! assert_eq!(result.interface.name, "IAccount");
//! println!("{}", render(&result));
//! ```
//!
//! ## What Ends Up in the Interface
//!
//! - Public, non-static methods that are neither constructors nor accessors
//! - Properties and indexers with at least one public accessor, restricted to
//!   their public accessors
//! - Public, non-static events
//!
//! Members a base type or an implemented interface already provides are left
//! out while `skip_overlapping_members` is on (the default). The interface is
//! public when the type is public or when `force_public_accessibility` is set,
//! and internal otherwise.
//!
//! ## Architecture
//!
//! - **[`facade_types`]**: descriptors, results and the line protocol
//! - **[`facade_synth`]**: validation, projection, overlap resolution and rendering
//! - **`facade-gen`**: command-line driver with batch and serve modes

// Re-export the engine
pub use facade_synth::{
    InvalidReason, MemberProjector, OverlapResolver, Result, SynthesisError,
    base_accessibility, hint_name, interface_accessibility, marker_file, render, render_file,
    synthesize, synthesize_all, validate,
};

// Re-export the model
pub use facade_types::{
    Accessibility, AccessorSet, AmendedTypeDeclaration, DefaultValue, Diagnostic, DiagnosticCode,
    EventDescriptor, GeneratedFile, GenerationOptions, IndexerDescriptor, InheritedMember,
    InterfaceDeclaration, InterfaceMember, MemberDescriptor, MemberKind, MemberSignature,
    MethodDescriptor, Parameter, PropertyDescriptor, SynthesisResult, TypeDescriptor, TypeKind,
};

//! Interface synthesis from resolved type descriptors.
//!
//! Given a [`TypeDescriptor`](facade_types::TypeDescriptor) for a type carrying
//! the `Interfaced` marker, this crate derives an interface exposing the type's
//! public instance surface and a partial declaration of the type that
//! implements it. Members a base type or an already-implemented interface
//! provides are left out unless overlap skipping is turned off.
//!
//! The engine is pure: no I/O, no shared state, safe to call from many threads.
//!
//! # Example
//!
//! ```ignore
//! use facade_synth::{render_file, synthesize};
//!
//! let descriptor: TypeDescriptor = serde_json::from_str(&json)?;
//! let result = synthesize(&descriptor)?;
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{}", diagnostic.message);
//! }
//! let file = render_file(&result);
//! std::fs::write(&file.hint_name, &file.source)?;
//! ```

pub mod error;
pub mod literal;
pub mod marker;
pub mod overlap;
pub mod project;
pub mod render;
pub mod signature;
pub mod synthesize;
pub mod type_name;
pub mod validate;

pub use error::{InvalidReason, Result, SynthesisError};
pub use marker::{DEFAULT_MARKER_NAMESPACE, MARKER_NAME, marker_file};
pub use overlap::OverlapResolver;
pub use project::{MemberProjector, is_eligible, public_accessors};
pub use render::{hint_name, render, render_file};
pub use synthesize::{base_accessibility, interface_accessibility, synthesize, synthesize_all};
pub use validate::validate;

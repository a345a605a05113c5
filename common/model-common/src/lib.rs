//! Model Common - Shared contracts for operator API models
//!
//! Every generated model in the operator API carries the same structural
//! contract, whether or not it has anything to check:
//!
//! - **Validation**: [`Validate`] and [`ContextValidate`] against a [`FormatRegistry`]
//! - **Marshalling**: [`BinaryModel`] JSON byte encoding with whole-value replacement on decode
//! - **Omit-empty**: [`omit`] helpers for zero-valued fields
//! - **Decoding**: [`fields`] key lookup for lenient hand-written decoders
//! - **Errors**: [`ModelError`] for encode, decode and validation failures
//! - **Initialization**: [`init_tracing`] for binaries built on the models
//!
//! # Example
//!
//! ```rust,ignore
//! use model_common::{BinaryModel, Registry, Validate};
//!
//! let drive = ServerDrives::from_binary(body)?;
//! drive.validate(&Registry::default())?;
//! let bytes = drive.marshal_binary()?;
//! ```

pub mod binary;
pub mod error;
pub mod fields;
pub mod init;
pub mod omit;
pub mod validate;

// Re-export commonly used items at crate root
pub use binary::{marshal_optional, BinaryModel};
pub use error::{ModelError, ModelResult};
pub use init::init_tracing;
pub use validate::{
    context_validate_all, validate_all, ContextValidate, FormatChecker, FormatRegistry, Registry,
    Validate, ValidationContext,
};

//! Operator Models Library
//!
//! Drive status models for the object-storage operator management API.
//! Provides the `serverDrives` record with its JSON wire format, capacity
//! presentation helpers, and an inventory summary over lists of drives.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use operator_models::{BinaryModel, ServerDrives};
//!
//! let drive = ServerDrives::from_binary(body)?;
//! println!("{} is {:.1}% full", drive.drive_path, drive.usage_percent());
//! ```
//!
//! # Usage as Binary
//!
//! ```text
//! drive-status inspect drives.json
//! curl -s .../drives | drive-status normalize
//! drive-status schema
//! ```

pub mod capacity;
pub mod config;
pub mod report;
pub mod types;

// Re-export main model types
pub use types::{InventorySummary, ServerDrives, STATE_OK};

// Re-export the shared model contracts for direct API usage
pub use model_common::{
    BinaryModel, ContextValidate, FormatRegistry, ModelError, ModelResult, Registry, Validate,
    ValidationContext,
};

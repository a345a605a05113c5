//! Validation contracts shared by all operator API models
//!
//! Models implement [`Validate`] to check field formats against a
//! [`FormatRegistry`], and [`ContextValidate`] to do the same inside a
//! cancellable [`ValidationContext`]. Models without format-constrained
//! fields implement both as no-ops so they can be validated uniformly
//! alongside models that do have constraints.
//!
//! # Example
//!
//! ```rust,ignore
//! use model_common::{Registry, Validate, ValidationContext, ContextValidate};
//!
//! let formats = Registry::default();
//! drive.validate(&formats)?;
//!
//! let ctx = ValidationContext::with_timeout(Duration::from_secs(1));
//! drive.context_validate(&ctx, &formats)?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{ModelError, ModelResult};

/// Checker for a single named string format
pub type FormatChecker = fn(&str) -> bool;

/// Registry of named string formats used during validation
pub trait FormatRegistry: Send + Sync {
    /// Whether a checker is registered under this name
    fn contains(&self, name: &str) -> bool;

    /// Validate a value against the named format
    ///
    /// Unknown format names never validate.
    fn validate_name(&self, name: &str, value: &str) -> bool;
}

/// Standard format registry
///
/// Comes pre-loaded with `uuid` and `date-time` (RFC 3339). Further formats
/// can be registered with [`Registry::add`].
#[derive(Clone)]
pub struct Registry {
    checkers: HashMap<String, FormatChecker>,
}

impl Registry {
    /// Create a registry with no formats registered
    pub fn empty() -> Self {
        Self {
            checkers: HashMap::new(),
        }
    }

    /// Register (or replace) a format checker
    pub fn add(&mut self, name: impl Into<String>, checker: FormatChecker) -> &mut Self {
        self.checkers.insert(name.into(), checker);
        self
    }

    /// Names of all registered formats, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .add("uuid", is_uuid)
            .add("date-time", is_date_time);
        registry
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("formats", &self.names())
            .finish()
    }
}

impl FormatRegistry for Registry {
    fn contains(&self, name: &str) -> bool {
        self.checkers.contains_key(name)
    }

    fn validate_name(&self, name: &str, value: &str) -> bool {
        match self.checkers.get(name) {
            Some(check) => check(value),
            None => {
                tracing::debug!(format = name, "unknown format requested");
                false
            }
        }
    }
}

fn is_uuid(value: &str) -> bool {
    uuid::Uuid::parse_str(value).is_ok()
}

fn is_date_time(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
}

/// Cancellable scope for validation
///
/// Clones share the cancellation flag, so a clone handed to another thread
/// can cancel validation running on this one.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl ValidationContext {
    /// Create a context that never expires on its own
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that expires after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Cancel this context and every clone of it
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the context was cancelled or its deadline has passed
    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return true;
        }
        matches!(self.deadline, Some(deadline) if Instant::now() >= deadline)
    }

    /// Return [`ModelError::Cancelled`] once the context is done
    pub fn check(&self) -> ModelResult<()> {
        if self.is_cancelled() {
            Err(ModelError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Format validation for a model
pub trait Validate {
    /// Validate field formats against the supplied registry
    fn validate(&self, formats: &dyn FormatRegistry) -> ModelResult<()>;
}

/// Context-aware validation for a model
///
/// Models with nested objects are expected to call
/// [`ValidationContext::check`] before descending into each child.
pub trait ContextValidate {
    /// Validate within the given context
    fn context_validate(
        &self,
        ctx: &ValidationContext,
        formats: &dyn FormatRegistry,
    ) -> ModelResult<()>;
}

/// Validate every model in a slice, stopping at the first failure
pub fn validate_all<T: Validate>(items: &[T], formats: &dyn FormatRegistry) -> ModelResult<()> {
    for (index, item) in items.iter().enumerate() {
        item.validate(formats).map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

/// Context-validate every model in a slice
///
/// The context is checked before each element.
pub fn context_validate_all<T: ContextValidate>(
    items: &[T],
    ctx: &ValidationContext,
    formats: &dyn FormatRegistry,
) -> ModelResult<()> {
    for (index, item) in items.iter().enumerate() {
        ctx.check()?;
        item.context_validate(ctx, formats)
            .map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

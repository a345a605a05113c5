//! Omit-empty fields
//!
//! Models leave a field out of the encoded JSON when it holds its zero
//! value:
//!
//! ```rust,ignore
//! #[serde(skip_serializing_if = "model_common::omit::is_default")]
//! pub total_space: i64,
//! ```

/// Whether a value equals its type's zero value
pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_default() {
        assert!(is_default(&0i64));
        assert!(is_default(&false));
        assert!(is_default(&String::new()));
        assert!(!is_default(&-1i64));
        assert!(!is_default(&true));
        assert!(!is_default(&"x".to_string()));
    }
}

//! Field lookup for hand-written model decoders
//!
//! The management API decodes objects leniently: a key matches a field
//! exactly or, failing that, ignoring ASCII case; a repeated key overwrites
//! the earlier value; `null` leaves a field untouched. Models implement
//! `Deserialize` with a map visitor built on these helpers:
//!
//! ```rust,ignore
//! while let Some(key) = map.next_key::<String>()? {
//!     match fields::lookup(&key, FIELDS) {
//!         Some(Field::State) => fields::assign(&mut drive.state, map.next_value()?),
//!         None => { map.next_value::<IgnoredAny>()?; }
//!     }
//! }
//! ```

/// Resolve a JSON key against a model's wire names
///
/// An exact match wins over a case-insensitive one.
pub fn lookup<F: Copy>(key: &str, fields: &[(&str, F)]) -> Option<F> {
    fields
        .iter()
        .find(|(name, _)| *name == key)
        .or_else(|| fields.iter().find(|(name, _)| name.eq_ignore_ascii_case(key)))
        .map(|(_, field)| *field)
}

/// Store a decoded value, leaving the slot alone when the value was `null`
pub fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

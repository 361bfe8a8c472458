//! Projection Module
//!
//! Selective structural persistence: save only a marked subset of a type's
//! fields, and rebuild an instance by overlaying a partial saved record onto
//! a freshly default-constructed value.
//!
//! ## Marker Mechanism
//! Each participating type carries a static binding table — one
//! [`FieldBinding`] per marked field, holding the field's name plus getter
//! and setter function pointers. The table is declared once with the
//! [`persist_fields!`](crate::persist_fields) macro and shared by both
//! [`project`] and [`overlay`], so the persisted field set is fixed per type
//! and identical in both directions.
//!
//! ```
//! use keystash::persist_fields;
//! use keystash::projection::{overlay, project};
//!
//! #[derive(Default)]
//! struct PlayerData {
//!     name: String,
//!     level: u32,
//!     temp_health: u32, // not persisted
//! }
//!
//! persist_fields!(PlayerData { name, level });
//!
//! let player = PlayerData { name: "Grok".into(), level: 50, temp_health: 999 };
//! let record = project(&player).unwrap();
//! let restored = overlay(PlayerData::default(), &record).unwrap();
//!
//! assert_eq!(restored.name, "Grok");
//! assert_eq!(restored.level, 50);
//! assert_eq!(restored.temp_health, 0); // left at its default
//! ```
//!
//! ## Failure Policy
//! Unlike the store's best-effort wrapper, [`overlay`] propagates decode
//! faults: a type mismatch between a record entry and its field would leave
//! a live object silently half-restored otherwise.

mod autosave;

pub use autosave::AutoSave;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, StoreError};

/// On-disk shape of a selective record: flat field-name → encoded value
///
/// Structurally the same JSON object format as a full snapshot, so the store
/// handles both without distinction.
pub type Record = serde_json::Map<String, Value>;

/// One marked field of a persistable type
///
/// The getter/setter are plain function pointers so a type's binding table
/// can live in a `static`.
pub struct FieldBinding<T> {
    /// Field name, used as the record entry key
    pub name: &'static str,

    /// Read the field's current value as JSON
    pub get: fn(&T) -> Result<Value>,

    /// Assign a decoded record entry onto the field
    pub set: fn(&mut T, Value) -> Result<()>,
}

/// A type with a fixed set of fields marked for selective persistence
///
/// Implement via [`persist_fields!`](crate::persist_fields) rather than by
/// hand; the macro keeps the getter, setter, and name of each binding in
/// sync with the actual field.
pub trait Persist: Sized {
    /// The binding table for this type's marked fields
    fn bindings() -> &'static [FieldBinding<Self>];
}

/// Build a partial record from a value's marked fields
///
/// Unmarked fields are excluded entirely — never saved, never touched on a
/// later overlay.
pub fn project<T: Persist + 'static>(value: &T) -> Result<Record> {
    let mut record = Record::new();
    for binding in T::bindings() {
        record.insert(binding.name.to_string(), (binding.get)(value)?);
    }
    Ok(record)
}

/// Overlay a partial record onto an instance, returning the mutated instance
///
/// For every marked field with a matching record entry, the entry is decoded
/// to the field's type and assigned. Marked fields without an entry — and
/// all unmarked fields — keep whatever the instance already held, which for
/// a default-constructed instance means the type's defaults.
pub fn overlay<T: Persist + 'static>(mut instance: T, record: &Record) -> Result<T> {
    for binding in T::bindings() {
        if let Some(raw) = record.get(binding.name) {
            (binding.set)(&mut instance, raw.clone())?;
        }
    }
    Ok(instance)
}

/// Encode one field value (used by the `persist_fields!` expansion)
pub fn encode_field<F: Serialize>(field: &F, name: &'static str) -> Result<Value> {
    serde_json::to_value(field)
        .map_err(|e| StoreError::Encode(format!("field '{}': {}", name, e)))
}

/// Decode one record entry to a field's type (used by the `persist_fields!`
/// expansion)
pub fn decode_field<F: DeserializeOwned>(raw: Value, name: &'static str) -> Result<F> {
    serde_json::from_value(raw)
        .map_err(|e| StoreError::Decode(format!("field '{}': {}", name, e)))
}

/// Mark a type's fields for selective persistence
///
/// Expands to a [`Persist`] implementation whose binding table covers
/// exactly the listed fields. Each field's type must implement
/// `serde::Serialize` and `serde::de::DeserializeOwned`.
#[macro_export]
macro_rules! persist_fields {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::projection::Persist for $ty {
            fn bindings() -> &'static [$crate::projection::FieldBinding<Self>] {
                static BINDINGS: &[$crate::projection::FieldBinding<$ty>] = &[
                    $($crate::projection::FieldBinding {
                        name: stringify!($field),
                        get: |value| {
                            $crate::projection::encode_field(&value.$field, stringify!($field))
                        },
                        set: |value, raw| {
                            value.$field =
                                $crate::projection::decode_field(raw, stringify!($field))?;
                            Ok(())
                        },
                    }),+
                ];
                BINDINGS
            }
        }
    };
}

//! Flattens structs and string-keyed maps into `String -> String` rows.
//!
//! Any `T: Serialize` whose top-level shape is a struct, a map with string-like keys, or an
//! `Option` of either can be marshaled. Field names come from serde, so `#[serde(rename = "...")]`
//! picks the output key and `#[serde(skip)]` (or renaming to `"-"`) drops the field.

use {
    serde::Serialize,
    tap::TapFallible,
    tracing::{debug, instrument},
};

pub mod error;
pub mod flags;
mod marshaled;
mod ser;
pub mod value;

pub use {
    error::{Error, ErrorKind, Kind, Result},
    flags::{EncodingFlag, EncodingFlags},
    marshaled::Marshaled,
    value::FieldValue,
};

/// Output row. Keeps struct declaration order, or the map's own iteration order.
pub type StringMap = indexmap::IndexMap<String, String>;

/// [`marshal_to_map_with_flags`] with no flags set.
pub fn marshal_to_map<T>(value: &T) -> Result<StringMap>
where
    T: Serialize + ?Sized,
{
    marshal_to_map_with_flags(value, EncodingFlags::NONE)
}

#[instrument(skip_all)]
pub fn marshal_to_map_with_flags<T>(value: &T, flags: impl Into<EncodingFlags>) -> Result<StringMap>
where
    T: Serialize + ?Sized,
{
    let flags = flags.into();
    value
        .serialize(ser::top_level::TopLevelSerializer::new(flags))
        .tap_ok(|row| debug!(%flags, entries = row.len(), "marshaled to map"))
        .tap_err(|err| debug!(%flags, %err, "marshaling failed"))
}

/// Stringifies a single value with the same rules used for every entry of a row.
pub fn convert_value<T>(value: &T, flags: impl Into<EncodingFlags>) -> Result<String>
where
    T: Serialize + ?Sized,
{
    ser::convert(value, flags.into())
}

#[extension_traits::extension(pub trait MarshalToMapExt)]
impl<T: Serialize> T {
    fn marshal_to_map(&self) -> Result<StringMap> {
        crate::marshal_to_map(self)
    }

    fn marshal_to_map_with_flags(&self, flags: impl Into<EncodingFlags>) -> Result<StringMap> {
        crate::marshal_to_map_with_flags(self, flags)
    }
}

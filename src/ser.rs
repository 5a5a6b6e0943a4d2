use {
    crate::{error::Result, flags::EncodingFlags, value::FieldValue},
    serde::Serialize,
};

/// Field name that excludes a struct field, same as `#[serde(skip)]`.
const EXCLUDED: &str = "-";

pub(crate) fn reduce<T>(value: &T) -> Result<FieldValue>
where
    T: Serialize + ?Sized,
{
    value.serialize(field_value::FieldValueSerializer)
}

pub(crate) fn convert<T>(value: &T, flags: EncodingFlags) -> Result<String>
where
    T: Serialize + ?Sized,
{
    reduce(value).map(|value| value.render(flags))
}

mod fallback;
mod field_value;
mod map_key;
pub(crate) mod top_level;

use {
    crate::{flags::EncodingFlags, marshal_to_map_with_flags},
    serde::{Serialize, Serializer},
    tracing::instrument,
};

/// Serializes the wrapped value as its flattened row instead of its own shape.
///
/// ```ignore
/// serde_json::to_string(&Marshaled::new(&process, EncodingFlag::UseNumbersZeroValues))
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Marshaled<T> {
    value: T,
    flags: EncodingFlags,
}

impl<T> Marshaled<T> {
    pub fn new(value: T, flags: impl Into<EncodingFlags>) -> Self {
        Self {
            value,
            flags: flags.into(),
        }
    }

    pub fn as_ref(&self) -> Marshaled<&T> {
        Marshaled {
            value: &self.value,
            flags: self.flags,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Serialize for Marshaled<T>
where
    T: Serialize,
{
    #[instrument(skip_all)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        marshal_to_map_with_flags(&self.value, self.flags)
            .map_err(serde::ser::Error::custom)
            .and_then(|row| serializer.collect_map(row))
    }
}

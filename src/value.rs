use {
    crate::{
        error::Result,
        flags::{EncodingFlag, EncodingFlags},
    },
    serde::Serialize,
};

/// A single entry value, reduced to the cases the conversion rule distinguishes.
///
/// `Option`s are resolved while the value is built: `None` becomes [`FieldValue::Null`] and
/// `Some` is followed to whatever it holds, however deeply nested.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Bool(bool),
    Int(i128),
    Uint(u128),
    F32(f32),
    F64(f64),
    /// Already rendered text for values with no dedicated rule.
    Other(String),
}

impl FieldValue {
    pub fn of<T>(value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        crate::ser::reduce(value)
    }

    /// Stringifies the value the way osquery tables expect it.
    pub fn render(self, flags: EncodingFlags) -> String {
        let keep_zero = flags.has(EncodingFlag::UseNumbersZeroValues);
        match self {
            FieldValue::Null => String::new(),
            FieldValue::Text(text) | FieldValue::Other(text) => text,
            FieldValue::Bool(true) => "1".to_owned(),
            FieldValue::Bool(false) => "0".to_owned(),
            FieldValue::Int(0) | FieldValue::Uint(0) if !keep_zero => String::new(),
            FieldValue::Int(v) => v.to_string(),
            FieldValue::Uint(v) => v.to_string(),
            FieldValue::F32(v) if v.is_infinite() => infinity(v.is_sign_positive()),
            FieldValue::F64(v) if v.is_infinite() => infinity(v.is_sign_positive()),
            FieldValue::F32(v) if v == 0.0 && !keep_zero => String::new(),
            FieldValue::F32(v) => v.to_string(),
            FieldValue::F64(v) if v == 0.0 && !keep_zero => String::new(),
            FieldValue::F64(v) => v.to_string(),
        }
    }
}

fn infinity(positive: bool) -> String {
    match positive {
        true => "+Inf".to_owned(),
        false => "-Inf".to_owned(),
    }
}

use std::fmt;

/// Shape of a value as seen through the serde data model, used to name what was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Bytes,
    Unit,
    Option,
    UnitStruct,
    UnitVariant,
    NewtypeVariant,
    Seq,
    Tuple,
    TupleStruct,
    TupleVariant,
    Map,
    Struct,
    StructVariant,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Unit => "unit",
            Kind::Option => "option",
            Kind::UnitStruct => "unit struct",
            Kind::UnitVariant => "unit variant",
            Kind::NewtypeVariant => "newtype variant",
            Kind::Seq => "seq",
            Kind::Tuple => "tuple",
            Kind::TupleStruct => "tuple struct",
            Kind::TupleVariant => "tuple variant",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::StructVariant => "struct variant",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// absent input or a `None` where the top-level value should be
    InvalidInput,
    UnsupportedType,
    /// a single entry failed, see [`Error::Conversion`]
    ConversionError,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input cannot be nil")]
    NilInput,
    #[error("input pointer is nil")]
    NilPointer,
    #[error("unsupported type: {0}, must be a struct, map, or pointer to one of them")]
    UnsupportedTopLevel(Kind),
    #[error("map keys must be strings, got {0}")]
    NonStringMapKey(Kind),
    #[error("unsupported type ({0})")]
    UnsupportedValue(Box<str>),
    #[error("rendering composite value")]
    Composite(#[from] serde_json::Error),
    #[error("failed to convert field {key}")]
    Conversion {
        key: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NilInput | Error::NilPointer => ErrorKind::InvalidInput,
            Error::UnsupportedTopLevel(_)
            | Error::NonStringMapKey(_)
            | Error::UnsupportedValue(_)
            | Error::Composite(_) => ErrorKind::UnsupportedType,
            Error::Conversion { .. } => ErrorKind::ConversionError,
        }
    }

    /// Key of the entry that failed to convert, if this is a per-entry failure.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::Conversion { key, .. } => Some(key),
            _ => None,
        }
    }

    pub(crate) fn conversion(key: impl Into<String>) -> impl FnOnce(Error) -> Error {
        let key = key.into();
        move |source| Error::Conversion {
            key,
            source: Box::new(source),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::UnsupportedValue(msg.to_string().into_boxed_str())
    }
}

pub type Result<T> = std::result::Result<T, self::Error>;

#[cfg(test)]
mod tests {
    use {super::*, std::error::Error as _};

    #[test]
    fn conversion_error_wraps_the_entry_failure() {
        let err = Error::conversion("pid")(Error::NonStringMapKey(Kind::Int));
        assert_eq!(err.kind(), ErrorKind::ConversionError);
        assert_eq!(err.key(), Some("pid"));
        assert_eq!(err.to_string(), "failed to convert field pid");
        let source = err.source().expect("conversion errors carry a source");
        assert_eq!(source.to_string(), "map keys must be strings, got int");
    }

    #[test]
    fn top_level_errors_name_the_shape() {
        assert_eq!(
            Error::UnsupportedTopLevel(Kind::Seq).to_string(),
            "unsupported type: seq, must be a struct, map, or pointer to one of them"
        );
        assert_eq!(Error::NilInput.kind(), ErrorKind::InvalidInput);
        assert_eq!(Error::NilPointer.kind(), ErrorKind::InvalidInput);
    }
}

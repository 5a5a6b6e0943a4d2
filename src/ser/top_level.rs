use {
    super::{EXCLUDED, convert, map_key::MapKeySerializer},
    crate::{
        StringMap,
        error::{Error, Kind, Result},
        flags::EncodingFlags,
    },
    serde::{
        Serialize, Serializer,
        ser::{Impossible, SerializeMap, SerializeStruct},
    },
    tracing::trace,
};

/// Dispatches on the shape of the value handed to `marshal_to_map`.
///
/// One `Some` is looked through; everything past that has to be a struct or a map.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TopLevelSerializer {
    flags: EncodingFlags,
    dereferenced: bool,
}

impl TopLevelSerializer {
    pub(crate) fn new(flags: EncodingFlags) -> Self {
        Self {
            flags,
            dereferenced: false,
        }
    }
}

fn unsupported<T>(kind: Kind) -> Result<T> {
    Err(Error::UnsupportedTopLevel(kind))
}

impl Serializer for TopLevelSerializer {
    type Ok = StringMap;
    type Error = Error;

    type SerializeSeq = Impossible<StringMap, Error>;
    type SerializeTuple = Impossible<StringMap, Error>;
    type SerializeTupleStruct = Impossible<StringMap, Error>;
    type SerializeTupleVariant = Impossible<StringMap, Error>;
    type SerializeMap = Collector;
    type SerializeStruct = Collector;
    type SerializeStructVariant = Impossible<StringMap, Error>;

    fn serialize_unit(self) -> Result<StringMap> {
        Err(Error::NilInput)
    }

    fn serialize_none(self) -> Result<StringMap> {
        match self.dereferenced {
            true => unsupported(Kind::Option),
            false => Err(Error::NilPointer),
        }
    }

    fn serialize_some<T>(self, value: &T) -> Result<StringMap>
    where
        T: Serialize + ?Sized,
    {
        match self.dereferenced {
            true => unsupported(Kind::Option),
            false => value.serialize(Self {
                dereferenced: true,
                ..self
            }),
        }
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<StringMap>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<StringMap> {
        Ok(StringMap::new())
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Collector> {
        Ok(Collector::new(self.flags, Kind::Map, len.unwrap_or_default()))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Collector> {
        Ok(Collector::new(self.flags, Kind::Struct, len))
    }

    fn serialize_bool(self, _v: bool) -> Result<StringMap> {
        unsupported(Kind::Bool)
    }

    fn serialize_i8(self, _v: i8) -> Result<StringMap> {
        unsupported(Kind::Int)
    }

    fn serialize_i16(self, _v: i16) -> Result<StringMap> {
        unsupported(Kind::Int)
    }

    fn serialize_i32(self, _v: i32) -> Result<StringMap> {
        unsupported(Kind::Int)
    }

    fn serialize_i64(self, _v: i64) -> Result<StringMap> {
        unsupported(Kind::Int)
    }

    fn serialize_i128(self, _v: i128) -> Result<StringMap> {
        unsupported(Kind::Int)
    }

    fn serialize_u8(self, _v: u8) -> Result<StringMap> {
        unsupported(Kind::Uint)
    }

    fn serialize_u16(self, _v: u16) -> Result<StringMap> {
        unsupported(Kind::Uint)
    }

    fn serialize_u32(self, _v: u32) -> Result<StringMap> {
        unsupported(Kind::Uint)
    }

    fn serialize_u64(self, _v: u64) -> Result<StringMap> {
        unsupported(Kind::Uint)
    }

    fn serialize_u128(self, _v: u128) -> Result<StringMap> {
        unsupported(Kind::Uint)
    }

    fn serialize_f32(self, _v: f32) -> Result<StringMap> {
        unsupported(Kind::Float)
    }

    fn serialize_f64(self, _v: f64) -> Result<StringMap> {
        unsupported(Kind::Float)
    }

    fn serialize_char(self, _v: char) -> Result<StringMap> {
        unsupported(Kind::Char)
    }

    fn serialize_str(self, _v: &str) -> Result<StringMap> {
        unsupported(Kind::String)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<StringMap> {
        unsupported(Kind::Bytes)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<StringMap> {
        unsupported(Kind::UnitVariant)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<StringMap>
    where
        T: Serialize + ?Sized,
    {
        unsupported(Kind::NewtypeVariant)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        unsupported(Kind::Seq)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        unsupported(Kind::Tuple)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        unsupported(Kind::TupleStruct)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported(Kind::TupleVariant)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported(Kind::StructVariant)
    }
}

/// Accumulates the rendered entries of a struct or a map.
#[derive(Debug)]
pub(crate) struct Collector {
    flags: EncodingFlags,
    shape: Kind,
    output: StringMap,
    pending_key: Option<String>,
}

impl Collector {
    fn new(flags: EncodingFlags, shape: Kind, len: usize) -> Self {
        Self {
            flags,
            shape,
            output: StringMap::with_capacity(len),
            pending_key: None,
        }
    }

    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = convert(value, self.flags).map_err(Error::conversion(key.as_str()))?;
        if let Some(previous) = self.output.insert(key, value) {
            trace!(shape = %self.shape, %previous, "duplicate key overwritten");
        }
        Ok(())
    }
}

impl SerializeMap for Collector {
    type Ok = StringMap;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.pending_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        match self.pending_key.take() {
            Some(key) => self.insert(key, value),
            None => Err(Error::UnsupportedValue("map value serialized before its key".into())),
        }
    }

    fn end(self) -> Result<StringMap> {
        Ok(self.output)
    }
}

impl SerializeStruct for Collector {
    type Ok = StringMap;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        match key {
            EXCLUDED => {
                trace!("field renamed to {EXCLUDED:?} excluded");
                Ok(())
            }
            key => self.insert(key.to_owned(), value),
        }
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        trace!(key, "skipped field excluded");
        Ok(())
    }

    fn end(self) -> Result<StringMap> {
        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::error::ErrorKind,
        std::collections::{BTreeMap, HashMap},
    };

    fn flatten<T: Serialize + ?Sized>(value: &T) -> Result<StringMap> {
        value.serialize(TopLevelSerializer::new(EncodingFlags::NONE))
    }

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        #[serde(rename = "-")]
        hidden: u32,
    }

    #[derive(Serialize)]
    struct Empty;

    #[test]
    fn only_one_option_level_is_dereferenced() {
        let row = Row {
            name: "a",
            hidden: 1,
        };
        assert!(flatten(&Some(&row)).is_ok());
        let err = flatten(&Some(Some(&row))).expect_err("double option");
        assert_eq!(err.to_string(), "unsupported type: option, must be a struct, map, or pointer to one of them");
        let err = flatten(&Some(None::<Row>)).expect_err("option holding none");
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn scalars_and_sequences_are_rejected() {
        for err in [
            flatten(&5).expect_err("number"),
            flatten("text").expect_err("string"),
            flatten(&vec![1, 2]).expect_err("seq"),
            flatten(&(1, 2)).expect_err("tuple"),
        ] {
            assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        }
    }

    #[test]
    fn literal_dash_name_excludes_the_field() {
        let out = flatten(&Row {
            name: "a",
            hidden: 1,
        })
        .expect("row flattens");
        assert_eq!(out.len(), 1);
        assert!(!out.contains_key("-"));
    }

    #[test]
    fn unit_struct_is_an_empty_record() {
        assert!(flatten(&Empty).expect("unit struct flattens").is_empty());
    }

    #[test]
    fn map_entries_keep_their_keys() {
        let out = flatten(&BTreeMap::from([("b", 2), ("a", 0)])).expect("map flattens");
        assert_eq!(out.get("a").map(String::as_str), Some(""));
        assert_eq!(out.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn non_string_key_fails_before_any_value_is_read() {
        let err = flatten(&HashMap::from([(1, "a")])).expect_err("integer keys");
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.to_string(), "map keys must be strings, got int");
    }
}

use {
    crate::error::{Error, Kind, Result},
    serde::{Serialize, Serializer, ser::Impossible},
};

/// Accepts string-like map keys only.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MapKeySerializer;

fn rejected<T>(kind: Kind) -> Result<T> {
    Err(Error::NonStringMapKey(kind))
}

impl Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String> {
        rejected(Kind::Bool)
    }

    fn serialize_i8(self, _v: i8) -> Result<String> {
        rejected(Kind::Int)
    }

    fn serialize_i16(self, _v: i16) -> Result<String> {
        rejected(Kind::Int)
    }

    fn serialize_i32(self, _v: i32) -> Result<String> {
        rejected(Kind::Int)
    }

    fn serialize_i64(self, _v: i64) -> Result<String> {
        rejected(Kind::Int)
    }

    fn serialize_i128(self, _v: i128) -> Result<String> {
        rejected(Kind::Int)
    }

    fn serialize_u8(self, _v: u8) -> Result<String> {
        rejected(Kind::Uint)
    }

    fn serialize_u16(self, _v: u16) -> Result<String> {
        rejected(Kind::Uint)
    }

    fn serialize_u32(self, _v: u32) -> Result<String> {
        rejected(Kind::Uint)
    }

    fn serialize_u64(self, _v: u64) -> Result<String> {
        rejected(Kind::Uint)
    }

    fn serialize_u128(self, _v: u128) -> Result<String> {
        rejected(Kind::Uint)
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        rejected(Kind::Float)
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        rejected(Kind::Float)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        rejected(Kind::Bytes)
    }

    fn serialize_none(self) -> Result<String> {
        rejected(Kind::Option)
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        rejected(Kind::Option)
    }

    fn serialize_unit(self) -> Result<String> {
        rejected(Kind::Unit)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        rejected(Kind::UnitStruct)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        rejected(Kind::NewtypeVariant)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        rejected(Kind::Seq)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        rejected(Kind::Tuple)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        rejected(Kind::TupleStruct)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        rejected(Kind::TupleVariant)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        rejected(Kind::Map)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        rejected(Kind::Struct)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        rejected(Kind::StructVariant)
    }
}

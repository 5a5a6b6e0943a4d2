use {
    super::fallback::{Fallback, rendered},
    crate::{
        error::{Error, Result},
        value::FieldValue,
    },
    serde::{Serialize, Serializer},
};

/// Reduces one entry value to a [`FieldValue`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FieldValueSerializer;

impl Serializer for FieldValueSerializer {
    type Ok = FieldValue;
    type Error = Error;

    type SerializeSeq = Fallback;
    type SerializeTuple = Fallback;
    type SerializeTupleStruct = Fallback;
    type SerializeTupleVariant = Fallback;
    type SerializeMap = Fallback;
    type SerializeStruct = Fallback;
    type SerializeStructVariant = Fallback;

    fn serialize_bool(self, v: bool) -> Result<FieldValue> {
        Ok(FieldValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<FieldValue> {
        self.serialize_i128(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<FieldValue> {
        self.serialize_i128(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<FieldValue> {
        self.serialize_i128(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<FieldValue> {
        self.serialize_i128(v.into())
    }

    fn serialize_i128(self, v: i128) -> Result<FieldValue> {
        Ok(FieldValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<FieldValue> {
        self.serialize_u128(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<FieldValue> {
        self.serialize_u128(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<FieldValue> {
        self.serialize_u128(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<FieldValue> {
        self.serialize_u128(v.into())
    }

    fn serialize_u128(self, v: u128) -> Result<FieldValue> {
        Ok(FieldValue::Uint(v))
    }

    fn serialize_f32(self, v: f32) -> Result<FieldValue> {
        Ok(FieldValue::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<FieldValue> {
        Ok(FieldValue::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<FieldValue> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<FieldValue> {
        Ok(FieldValue::Text(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<FieldValue> {
        rendered(v)
    }

    fn serialize_none(self) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<FieldValue>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FieldValue> {
        Ok(FieldValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<FieldValue> {
        Ok(FieldValue::Text(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<FieldValue>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<FieldValue>
    where
        T: Serialize + ?Sized,
    {
        let mut object = Fallback::object();
        object.field(variant, value)?;
        object.finish()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Fallback> {
        Ok(Fallback::array())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Fallback> {
        Ok(Fallback::array())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Fallback> {
        Ok(Fallback::array())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Fallback> {
        Fallback::variant(variant, b'[', b"]}")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Fallback> {
        Ok(Fallback::object())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Fallback> {
        Ok(Fallback::object())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Fallback> {
        Fallback::variant(variant, b'{', b"}}")
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::BTreeMap};

    fn reduce<T: Serialize>(value: T) -> FieldValue {
        value
            .serialize(FieldValueSerializer)
            .expect("value to reduce")
    }

    #[derive(Serialize)]
    enum Status {
        Running,
        Stopped { code: i32 },
    }

    #[derive(Serialize)]
    struct Pid(u32);

    #[test]
    fn scalars_keep_their_variant() {
        assert_eq!(reduce(true), FieldValue::Bool(true));
        assert_eq!(reduce(-3i8), FieldValue::Int(-3));
        assert_eq!(reduce(7u16), FieldValue::Uint(7));
        assert_eq!(reduce(1.5f32), FieldValue::F32(1.5));
        assert_eq!(reduce('x'), FieldValue::Text("x".into()));
        assert_eq!(reduce("text"), FieldValue::Text("text".into()));
    }

    #[test]
    fn options_resolve_through_every_level() {
        assert_eq!(reduce(None::<u32>), FieldValue::Null);
        assert_eq!(reduce(Some(Some(Some(5u32)))), FieldValue::Uint(5));
        assert_eq!(reduce(Some(None::<u32>)), FieldValue::Null);
        assert_eq!(reduce(Box::new(Some("boxed"))), FieldValue::Text("boxed".into()));
    }

    #[test]
    fn newtypes_are_transparent_and_unit_variants_use_their_name() {
        assert_eq!(reduce(Pid(42)), FieldValue::Uint(42));
        assert_eq!(reduce(Status::Running), FieldValue::Text("Running".into()));
        assert_eq!(reduce(()), FieldValue::Null);
    }

    #[test]
    fn composites_render_as_compact_json() {
        assert_eq!(reduce(vec![1, 2, 3]), FieldValue::Other("[1,2,3]".into()));
        assert_eq!(reduce((1, "a")), FieldValue::Other(r#"[1,"a"]"#.into()));
        assert_eq!(
            reduce(Status::Stopped { code: 2 }),
            FieldValue::Other(r#"{"Stopped":{"code":2}}"#.into())
        );
        assert_eq!(
            reduce(BTreeMap::from([("a", 1), ("b", 2)])),
            FieldValue::Other(r#"{"a":1,"b":2}"#.into())
        );
    }

    #[test]
    fn wide_integers_inside_composites_render() {
        assert_eq!(
            reduce(vec![u128::MAX]),
            FieldValue::Other("[340282366920938463463374607431768211455]".into())
        );
        assert_eq!(reduce(b"hi".as_slice()), FieldValue::Other("[104,105]".into()));
    }

    #[test]
    fn unrepresentable_composites_are_unsupported() {
        let err = FieldValueSerializer
            .serialize_map(None)
            .and_then(|mut map| {
                serde::ser::SerializeMap::serialize_entry(&mut map, &(1, 2), &"v")?;
                serde::ser::SerializeMap::end(map)
            })
            .expect_err("tuple keys cannot become json object keys");
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedType);
    }
}

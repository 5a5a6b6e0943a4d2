//! Composite entry values (sequences, nested maps and structs, enum variants carrying data)
//! have no dedicated rule. They are written as one compact JSON text, element by element,
//! with `serde_json`'s streaming serializer so 128-bit integers survive. Non-finite floats
//! inside a composite come out as `null`, which is what `serde_json` writes for them.

use {
    crate::{
        error::{Error, Result},
        value::FieldValue,
    },
    serde::{
        Serialize,
        ser::{
            SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
            SerializeTupleStruct, SerializeTupleVariant,
        },
    },
    tap::Pipe,
};

/// JSON text of a value that needs no incremental building.
pub(crate) fn rendered<T>(value: &T) -> Result<FieldValue>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value)
        .map_err(Error::from)
        .map(FieldValue::Other)
}

/// JSON object keys must be strings; scalar keys are quoted the way `serde_json` does it.
fn object_key<T>(key: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(key)?;
    match text.as_bytes().first() {
        Some(b'"') => Ok(text),
        Some(b'[' | b'{') | None => Err(Error::UnsupportedValue(
            format!("json object key must be a string, got {text}").into_boxed_str(),
        )),
        _ if text == "null" => Err(Error::UnsupportedValue("json object key cannot be null".into())),
        _ => serde_json::to_string(&text).map_err(Error::from),
    }
}

#[derive(Debug)]
pub(crate) struct Fallback {
    out: Vec<u8>,
    first: bool,
    closing: &'static [u8],
}

impl Fallback {
    pub(crate) fn array() -> Self {
        Self {
            out: b"[".to_vec(),
            first: true,
            closing: b"]",
        }
    }

    pub(crate) fn object() -> Self {
        Self {
            out: b"{".to_vec(),
            first: true,
            closing: b"}",
        }
    }

    /// `{"Variant":[...]}` or `{"Variant":{...}}`
    pub(crate) fn variant(variant: &str, opening: u8, closing: &'static [u8]) -> Result<Self> {
        let mut out = b"{".to_vec();
        serde_json::to_writer(&mut out, variant)?;
        out.extend_from_slice(&[b':', opening]);
        Ok(Self {
            out,
            first: true,
            closing,
        })
    }

    fn separate(&mut self) {
        match self.first {
            true => self.first = false,
            false => self.out.push(b','),
        }
    }

    fn write<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_writer(&mut self.out, value).map_err(Error::from)
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.separate();
        self.write(value)
    }

    fn key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = object_key(key)?;
        self.separate();
        self.out.extend_from_slice(key.as_bytes());
        self.out.push(b':');
        Ok(())
    }

    pub(crate) fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.separate();
        self.write(key)?;
        self.out.push(b':');
        self.write(value)
    }

    pub(crate) fn finish(mut self) -> Result<FieldValue> {
        self.out.extend_from_slice(self.closing);
        String::from_utf8(self.out)
            .map_err(|err| Error::UnsupportedValue(err.to_string().into_boxed_str()))?
            .pipe(FieldValue::Other)
            .pipe(Ok)
    }
}

impl SerializeSeq for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

impl SerializeTuple for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

impl SerializeTupleStruct for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

impl SerializeTupleVariant for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.element(value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

impl SerializeMap for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.key(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.write(value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

impl SerializeStruct for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

impl SerializeStructVariant for Fallback {
    type Ok = FieldValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<FieldValue> {
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_integers_are_written_natively() {
        let mut seq = Fallback::array();
        seq.element(&u128::MAX).expect("u128 element");
        seq.element(&i128::MIN).expect("i128 element");
        assert_eq!(
            seq.finish().expect("seq renders"),
            FieldValue::Other(
                "[340282366920938463463374607431768211455,-170141183460469231731687303715884105728]"
                    .into()
            )
        );
    }

    #[test]
    fn scalar_keys_are_quoted() {
        assert_eq!(object_key("a\"b").expect("str key"), r#""a\"b""#);
        assert_eq!(object_key(&7u128).expect("int key"), r#""7""#);
        assert_eq!(object_key(&true).expect("bool key"), r#""true""#);
        assert!(object_key(&(1, 2)).is_err());
        assert!(object_key(&()).is_err());
    }

    #[test]
    fn variants_wrap_their_payload() {
        let mut variant = Fallback::variant("Moved", b'[', b"]}").expect("variant opens");
        variant.element(&1).expect("first");
        variant.element(&"x").expect("second");
        assert_eq!(
            variant.finish().expect("variant renders"),
            FieldValue::Other(r#"{"Moved":[1,"x"]}"#.into())
        );
    }
}

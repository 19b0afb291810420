//! `serde` support, so layered override settings can live in config files.
//!
//! [`OverrideValue`] is written as a struct with three optional fields.
//! Reading one goes through [`OverrideValue::construct`], so an all-unset
//! input yields the canonical empty value.

use alloc::string::String;
use core::fmt;

use serde_core::de::{Error, MapAccess, SeqAccess, Visitor};
use serde_core::ser::SerializeStruct;
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{OptBool, OverrideValue};

// -----------------------------------------------------------------------------
// OptBool

impl Serialize for OptBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(v) => serializer.serialize_some(&v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for OptBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(OptBool::from)
    }
}

// -----------------------------------------------------------------------------
// OverrideValue

const FIELDS: &[&str] = &["id", "use_input", "tolerate_missing"];

impl Serialize for OverrideValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OverrideValue", 3)?;
        state.serialize_field("id", &self.id())?;
        state.serialize_field("use_input", &self.use_input())?;
        state.serialize_field("tolerate_missing", &self.tolerate_missing())?;
        state.end()
    }
}

enum Field {
    Id,
    UseInput,
    TolerateMissing,
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an override value field name")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "id" => Ok(Field::Id),
            "use_input" => Ok(Field::UseInput),
            "tolerate_missing" => Ok(Field::TolerateMissing),
            _ => Err(E::unknown_field(v, FIELDS)),
        }
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct OverrideValueVisitor;

impl<'de> Visitor<'de> for OverrideValueVisitor {
    type Value = OverrideValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("struct OverrideValue")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let id: Option<String> = seq.next_element()?.unwrap_or_default();
        let use_input: OptBool = seq.next_element()?.unwrap_or_default();
        let tolerate_missing: OptBool = seq.next_element()?.unwrap_or_default();
        Ok(OverrideValue::construct(
            id.as_deref(),
            use_input,
            tolerate_missing,
        ))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut id: Option<Option<String>> = None;
        let mut use_input: Option<OptBool> = None;
        let mut tolerate_missing: Option<OptBool> = None;

        while let Some(field) = map.next_key::<Field>()? {
            match field {
                Field::Id => {
                    if id.is_some() {
                        return Err(A::Error::duplicate_field("id"));
                    }
                    id = Some(map.next_value()?);
                }
                Field::UseInput => {
                    if use_input.is_some() {
                        return Err(A::Error::duplicate_field("use_input"));
                    }
                    use_input = Some(map.next_value()?);
                }
                Field::TolerateMissing => {
                    if tolerate_missing.is_some() {
                        return Err(A::Error::duplicate_field("tolerate_missing"));
                    }
                    tolerate_missing = Some(map.next_value()?);
                }
            }
        }

        Ok(OverrideValue::construct(
            id.flatten().as_deref(),
            use_input.unwrap_or_default(),
            tolerate_missing.unwrap_or_default(),
        ))
    }
}

impl<'de> Deserialize<'de> for OverrideValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_struct("OverrideValue", FIELDS, OverrideValueVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::{OptBool, OverrideValue};

    #[test]
    fn json() {
        let v = OverrideValue::construct(Some("inject"), OptBool::False, OptBool::Unset);
        let text = serde_json::to_string(&v).unwrap();
        assert_eq!(
            text,
            r#"{"id":"inject","use_input":false,"tolerate_missing":null}"#
        );
        let back: OverrideValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn missing_fields_are_unset() {
        let v: OverrideValue = serde_json::from_str(r#"{"use_input":true}"#).unwrap();
        assert_eq!(v.id(), None);
        assert_eq!(v.use_input(), OptBool::True);

        let empty: OverrideValue = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert!(empty.ptr_eq(&OverrideValue::EMPTY));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(serde_json::from_str::<OverrideValue>(r#"{"ident":"x"}"#).is_err());
        assert!(serde_json::from_str::<OverrideValue>(r#"{"id":"a","id":"b"}"#).is_err());
        assert!(serde_json::from_str::<OverrideValue>(r#"{"use_input":"yes"}"#).is_err());
    }

    #[test]
    fn ron() {
        let v: OverrideValue =
            ron::from_str("(id: Some(\"cache\"), tolerate_missing: Some(true))").unwrap();
        assert_eq!(v.id(), Some("cache"));
        assert!(v.will_tolerate_missing(false));
        assert!(v.will_use_input(true));
    }
}

//! Field deserializers for partial updates. A falsy JSON value (`null`,
//! `false`, `0`, `""`) leaves the field unchanged, so it maps to `None`
//! instead of being rejected for having the wrong type.

use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

fn truthy<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let falsy = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    Ok((!falsy).then_some(value))
}

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match truthy(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(D::Error::custom(format!("expected a string, found {other}"))),
    }
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match truthy(deserializer)? {
        None => Ok(None),
        Some(Value::String(s)) => OffsetDateTime::parse(&s, &Rfc3339)
            .map(Some)
            .map_err(D::Error::custom),
        Some(other) => Err(D::Error::custom(format!(
            "expected an RFC 3339 timestamp, found {other}"
        ))),
    }
}

/// Accepts a number or a numeric string; zero means "no id".
pub fn id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match truthy(deserializer)? {
        None => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    };
    match id {
        Some(id) => Ok((id != 0).then_some(id)),
        None => Err(D::Error::custom("expected an integer id")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;
    use time::macros::datetime;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "super::string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "super::timestamp")]
        at: Option<time::OffsetDateTime>,
        #[serde(default, deserialize_with = "super::id")]
        parent: Option<i32>,
    }

    fn patch(value: serde_json::Value) -> Result<Patch, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn falsy_values_are_absent() {
        for body in [
            json!({}),
            json!({ "name": null, "at": null, "parent": null }),
            json!({ "name": "", "at": "", "parent": "" }),
            json!({ "name": false, "at": false, "parent": false }),
            json!({ "name": 0, "at": 0, "parent": 0 }),
            json!({ "parent": "0" }),
        ] {
            let p = patch(body.clone()).unwrap();
            assert!(
                p.name.is_none() && p.at.is_none() && p.parent.is_none(),
                "{body} was not empty: {p:?}"
            );
        }
    }

    #[test]
    fn truthy_values_are_parsed() {
        let p = patch(json!({
            "name": "Dogs",
            "at": "2020-05-01T12:30:00Z",
            "parent": "7"
        }))
        .unwrap();
        assert_eq!(p.name.as_deref(), Some("Dogs"));
        assert_eq!(p.at, Some(datetime!(2020-05-01 12:30 UTC)));
        assert_eq!(p.parent, Some(7));

        assert_eq!(patch(json!({ "parent": 3 })).unwrap().parent, Some(3));
    }

    #[test]
    fn truthy_values_of_the_wrong_shape_are_rejected() {
        assert!(patch(json!({ "name": 5 })).is_err());
        assert!(patch(json!({ "at": "yesterday" })).is_err());
        assert!(patch(json!({ "parent": true })).is_err());
        assert!(patch(json!({ "parent": 1.5 })).is_err());
    }
}

//! Subgraphs encode `BigInt` values as JSON strings. These codecs decode them into integers and
//! write them back out the same way, so persisted records keep the shape the subgraph returned.

use serde::{de, Deserialize, Deserializer, Serializer};

pub fn i64_from_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    s.parse::<i64>().map_err(|error| {
        de::Error::invalid_value(
            de::Unexpected::Str(&format!("unexpected value: {}, error: {}", s, error)),
            &"a number as string e.g. \"1704067200\", which fits within i64",
        )
    })
}

pub fn to_i64_string<S>(num_i64: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&num_i64.to_string())
}

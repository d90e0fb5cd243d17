use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer};

/// Accepts a JSON boolean or a `"true"` / `"false"` string in any case.
pub fn deserialize_bool_like<'d, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'d>,
{
    struct V;
    impl<'d> de::Visitor<'d> for V {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a boolean or a \"true\"/\"false\" string")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<bool, E>
        where
            E: de::Error,
        {
            match value.trim().to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(de::Error::invalid_value(de::Unexpected::Str(value), &self)),
            }
        }
    }
    deserializer.deserialize_any(V)
}

/// Treats an explicit `null` like a missing sequence.
pub fn deserialize_null_as_empty<'d, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'d>,
    T: Deserialize<'d>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

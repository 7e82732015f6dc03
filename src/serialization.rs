// ============================================================================
// Serialization
// Values as their display strings, plus the tagged collaborator form
// ============================================================================

use crate::convert::Binary;
use crate::interfaces::NumericValue;
use crate::numeric::{Decimal, Fraction};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// `"<TypeName> -;- <value>"` as a JSON string.
pub fn tagged_json(value: &dyn NumericValue) -> serde_json::Value {
    serde_json::Value::String(value.tagged())
}

macro_rules! string_serde {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let text = String::deserialize(deserializer)?;
                    text.parse().map_err(de::Error::custom)
                }
            }
        )*
    };
}

string_serde!(Decimal, Fraction, Binary);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MathConfig;

    #[test]
    fn test_values_serialize_as_strings() {
        let value: Decimal = "-12.50".parse().unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"-12.5\"");

        let fraction: Fraction = "3/4".parse().unwrap();
        assert_eq!(serde_json::to_string(&fraction).unwrap(), "\"3/4\"");

        let bits: Binary = "101".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&bits).unwrap(),
            "\"0000000000000101\""
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let value: Decimal = serde_json::from_str("\"1e3\"").unwrap();
        assert_eq!(value.as_str(), "1000");

        assert!(serde_json::from_str::<Decimal>("\"12abc\"").is_err());
        assert!(serde_json::from_str::<Binary>("\"102\"").is_err());
    }

    #[test]
    fn test_tagged_json() {
        let value: Decimal = "2.5".parse().unwrap();
        assert_eq!(
            tagged_json(&value),
            serde_json::Value::String("Decimal -;- 2.5".to_string())
        );
    }

    #[test]
    fn test_config_round_trip() {
        let config = MathConfig::high_precision();
        let json = serde_json::to_string(&config).unwrap();
        let restored: MathConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}

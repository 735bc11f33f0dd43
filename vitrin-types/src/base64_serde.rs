use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize bytes as a base64 string.
pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let encoded = STANDARD.encode(bytes);
    serializer.serialize_str(&encoded)
}

/// Deserialize a base64 string into bytes.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;
    use serde::de::Error as _;

    /// Serialize an optional byte vector as a base64 string.
    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize a base64 string into an optional byte vector.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = Option::<String>::deserialize(deserializer)?;
        match encoded {
            Some(value) => STANDARD
                .decode(value.as_bytes())
                .map(Some)
                .map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        data: Vec<u8>,
    }

    #[derive(Serialize, Deserialize)]
    struct OptionalWrapper {
        #[serde(default, with = "super::option")]
        data: Option<Vec<u8>>,
    }

    #[test]
    fn test_round_trip() {
        let wrapper = Wrapper {
            data: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(json, r#"{"data":"3q2+7w=="}"#);
        let decoded: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.data, wrapper.data);
    }

    #[test]
    fn test_option_none_and_some() {
        let decoded: OptionalWrapper = serde_json::from_str("{}").unwrap();
        assert!(decoded.data.is_none());

        let decoded: OptionalWrapper = serde_json::from_str(r#"{"data":"aGk="}"#).unwrap();
        assert_eq!(decoded.data.as_deref(), Some(b"hi".as_slice()));
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"data":"!!"}"#);
        assert!(result.is_err());
    }
}

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

/// Client-owned settings blob. The server checks that it is a JSON object and
/// otherwise keeps the exact text it was sent.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Settings(Box<RawValue>);

impl Settings {
    pub fn from_json(encoded: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(encoded)
    }

    pub fn empty() -> Result<Self, serde_json::Error> {
        Self::from_json("{}")
    }

    pub fn as_json(&self) -> &str {
        self.0.get()
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        if !raw.get().trim_start().starts_with('{') {
            return Err(D::Error::custom("settings must be a JSON object"));
        }
        Ok(Settings(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_numbers_wider_than_64_bits() {
        let sent = r#"{"big":123456789012345678901234567890,"pi":3.14159265358979323846264338}"#;
        let settings = Settings::from_json(sent).unwrap();

        assert_eq!(settings.as_json(), sent);
        assert_eq!(serde_json::to_string(&settings).unwrap(), sent);
    }

    #[test]
    fn only_objects_are_settings() {
        assert!(Settings::from_json("[1, 2]").is_err());
        assert!(Settings::from_json("\"dark\"").is_err());
        assert!(Settings::from_json("null").is_err());
        assert_eq!(Settings::empty().unwrap().as_json(), "{}");
    }
}

use serde::{Deserialize, Deserializer};

use crate::RemoteError;

/// Vehicle status as reported by `/telemetry`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Telemetry {
    /// Pitch angle
    #[serde(rename = "p")]
    pub pitch: f64,
    /// Roll angle
    #[serde(rename = "r")]
    pub roll: f64,
    #[serde(rename = "a", deserialize_with = "armed_flag")]
    pub armed: bool,
}

impl Telemetry {
    pub fn from_json(body: &str) -> Result<Self, RemoteError> {
        Ok(serde_json::from_str(body)?)
    }
}

// The firmware reports 0/1, accept booleans as well
fn armed_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Number(f64),
        Bool(bool),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Number(n) => n != 0.0,
        Flag::Bool(b) => b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report() {
        let telemetry = Telemetry::from_json(r#"{"p":12.34,"r":-5.6,"a":0}"#).unwrap();
        assert_eq!(telemetry.pitch, 12.34);
        assert_eq!(telemetry.roll, -5.6);
        assert!(!telemetry.armed);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let telemetry =
            Telemetry::from_json(r#"{"p":0,"r":1.5,"a":1,"bat":11.1,"alt":3}"#).unwrap();
        assert!(telemetry.armed);
        assert_eq!(telemetry.roll, 1.5);
    }

    #[test]
    fn test_boolean_armed_flag() {
        let telemetry = Telemetry::from_json(r#"{"p":0,"r":0,"a":true}"#).unwrap();
        assert!(telemetry.armed);
    }

    #[test]
    fn test_malformed_report() {
        assert!(matches!(
            Telemetry::from_json(r#"{"p":1.0,"a":0}"#),
            Err(RemoteError::MalformedTelemetry(_))
        ));
        assert!(Telemetry::from_json("<html>").is_err());
    }
}

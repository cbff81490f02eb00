//! Serde support for polling configuration (feature-gated)
//!
//! Durations are written as whole milliseconds under the field names
//! `delayTime`, `timeout` and `pollingStartAfter`. Missing fields take their
//! defaults, and a [`PollingConfiguration`] is validated on deserialize.
//!
//! # Example
//!
//! ```rust,ignore
//! use fluentwait::PollingConfiguration;
//!
//! let config: PollingConfiguration =
//!     serde_json::from_str(r#"{"delayTime": 1000, "timeout": 5000}"#).unwrap();
//! assert_eq!(config.delay_time(), std::time::Duration::from_secs(1));
//!
//! // Invalid data fails deserialization
//! let bad: Result<PollingConfiguration, _> = serde_json::from_str(r#"{"delayTime": 0}"#);
//! assert!(bad.is_err());
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

use super::config::{PollingConfiguration, PollingOptions};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delay_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    polling_start_after: Option<u64>,
}

// Rounds up so a valid sub-millisecond delay never serializes as zero.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX)
}

impl From<&PollingOptions> for RawOptions {
    fn from(options: &PollingOptions) -> Self {
        Self {
            delay_time: options.delay_time.map(millis),
            timeout: options.timeout.map(millis),
            polling_start_after: options.polling_start_after.map(millis),
        }
    }
}

impl From<RawOptions> for PollingOptions {
    fn from(raw: RawOptions) -> Self {
        Self {
            delay_time: raw.delay_time.map(Duration::from_millis),
            timeout: raw.timeout.map(Duration::from_millis),
            polling_start_after: raw.polling_start_after.map(Duration::from_millis),
        }
    }
}

impl Serialize for PollingOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawOptions::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PollingOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawOptions::deserialize(deserializer).map(PollingOptions::from)
    }
}

impl Serialize for PollingConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PollingOptions::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PollingConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let config = PollingConfiguration::from(PollingOptions::deserialize(deserializer)?);
        config.validate().map_err(serde::de::Error::custom)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_partial_config_uses_defaults() {
        let config: PollingConfiguration =
            serde_json::from_str(r#"{"delayTime": 1000, "timeout": 5000}"#).unwrap();

        assert_eq!(config.delay_time(), Duration::from_millis(1000));
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.polling_start_after(), Duration::ZERO);
    }

    #[test]
    fn deserialize_empty_object_is_default() {
        let config: PollingConfiguration = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PollingConfiguration::default());
    }

    #[test]
    fn deserialize_rejects_invalid_config() {
        let result: Result<PollingConfiguration, _> = serde_json::from_str(r#"{"delayTime": 0}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("delay time must be greater than zero"));

        let result: Result<PollingConfiguration, _> = serde_json::from_str(r#"{"timeout": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_unknown_fields() {
        let result: Result<PollingOptions, _> =
            serde_json::from_str(r#"{"customDelayTimeInMs": 100}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_config_as_millis() {
        let config = PollingConfiguration::new()
            .with_delay_time(Duration::from_millis(100))
            .with_polling_start_after(Duration::from_millis(300));

        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"delayTime": 100, "timeout": 10000, "pollingStartAfter": 300})
        );
    }

    #[test]
    fn sub_millisecond_durations_round_up() {
        let config = PollingConfiguration::new()
            .with_delay_time(Duration::from_micros(500))
            .with_timeout(Duration::from_micros(1500));

        let json = serde_json::to_string(&config).unwrap();
        let back: PollingConfiguration = serde_json::from_str(&json).unwrap();

        assert_eq!(back.delay_time(), Duration::from_millis(1));
        assert_eq!(back.timeout(), Duration::from_millis(2));
        assert_eq!(back.polling_start_after(), Duration::ZERO);
    }

    #[test]
    fn serialize_options_skips_unset_fields() {
        let options = PollingOptions::new().timeout(Duration::from_secs(2));
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"timeout":2000}"#);

        let back: PollingOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}

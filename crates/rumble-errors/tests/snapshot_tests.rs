//! Inline snapshots of user-facing error messages.

use rumble_errors::{ConfigError, RumbleError, ValidationError};

#[test]
fn out_of_range_message() {
    let err: RumbleError = ValidationError::out_of_range("gains.road_feel", -1.0, 0.0, 4.0).into();
    insta::assert_snapshot!(
        err.to_string(),
        @"Validation error: gains.road_feel value -1.0 is out of range [0.0, 4.0]"
    );
}

#[test]
fn unsupported_format_message() {
    let err: RumbleError = ConfigError::UnsupportedFormat("toml".to_string()).into();
    insta::assert_snapshot!(
        err.to_string(),
        @"Configuration error: Unsupported configuration format 'toml' (expected .yaml, .yml or .json)"
    );
}

#[test]
fn parse_message() {
    let err = ConfigError::parse("yaml", "unknown field `gian`");
    insta::assert_snapshot!(err.to_string(), @"Failed to parse yaml configuration: unknown field `gian`");
}

//! Decoding of solar radiation payloads.
//!
//! The sensor publishes its reading as plain decimal text, e.g. `"412.5"`.

use crate::error::MqttError;

/// Decode a payload into a reading. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`MqttError::InvalidUtf8`] or [`MqttError::PayloadParse`] when the
/// payload is not a number.
pub fn decode_reading(payload: &[u8]) -> Result<f64, MqttError> {
    let text = std::str::from_utf8(payload).map_err(MqttError::InvalidUtf8)?;
    text.trim().parse::<f64>().map_err(MqttError::PayloadParse)
}

/// Decode a payload, falling back to `0.0` when it is not a number.
///
/// The failure is logged; it never reaches the evaluator.
#[must_use]
pub fn reading_or_default(payload: &[u8]) -> f64 {
    match decode_reading(payload) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(
                %err,
                payload = %String::from_utf8_lossy(payload),
                "unable to parse reading from MQTT payload, using 0.0"
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_decimal_text() {
        let value = decode_reading(b"412.5").unwrap();
        assert!((value - 412.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_decode_integer_and_negative_text() {
        assert!((decode_reading(b"12").unwrap() - 12.0).abs() < f64::EPSILON);
        assert!((decode_reading(b"-3.25").unwrap() + 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn should_ignore_surrounding_whitespace() {
        let value = decode_reading(b" 80\n").unwrap();
        assert!((value - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_non_numeric_text() {
        assert!(matches!(
            decode_reading(b"sunny"),
            Err(MqttError::PayloadParse(_))
        ));
    }

    #[test]
    fn should_reject_empty_payload() {
        assert!(matches!(decode_reading(b""), Err(MqttError::PayloadParse(_))));
    }

    #[test]
    fn should_reject_invalid_utf8() {
        assert!(matches!(
            decode_reading(&[0xff, 0xfe]),
            Err(MqttError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn should_fall_back_to_zero_when_unparseable() {
        assert!(reading_or_default(b"n/a").abs() < f64::EPSILON);
    }

    #[test]
    fn should_pass_through_valid_reading() {
        assert!((reading_or_default(b"65") - 65.0).abs() < f64::EPSILON);
    }
}

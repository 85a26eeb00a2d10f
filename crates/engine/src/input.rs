//! Field extraction for device configurations arriving as raw JSON.
//!
//! Every field is required. Fields are checked in declaration order and the
//! first problem found is reported, so a body missing both `electrodes` and
//! `frame_rate` reports `electrodes`.

use serde_json::{Map, Value};

use eit_common::error::AppError;
use eit_common::types::ConfigInput;

/// Largest integer an f64 represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Extract a [`ConfigInput`] from a JSON object.
pub fn parse_config(value: &Value) -> Result<ConfigInput, AppError> {
    let obj = value.as_object().ok_or(AppError::InvalidType {
        field: "body",
        expected: "JSON object",
    })?;

    Ok(ConfigInput {
        electrodes: integer(obj, "electrodes")?,
        adc_resolution: integer(obj, "adc_resolution")?,
        adc_sample_rate: number(obj, "adc_sample_rate")?,
        oversampling: number(obj, "oversampling")?,
        compression_bits: integer(obj, "compression_bits")?,
        frame_rate: number(obj, "frame_rate")?,
        max_bandwidth: number(obj, "max_bandwidth")?,
    })
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, AppError> {
    obj.get(name).ok_or(AppError::MissingField(name))
}

/// Integer field. Whole-valued floats such as `16.0` are accepted.
///
/// Integers outside the `i64` range are an `InvalidValue`, not a type error.
fn integer(obj: &Map<String, Value>, name: &'static str) -> Result<i64, AppError> {
    let value = field(obj, name)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    let out_of_range = || AppError::InvalidValue {
        field: name,
        reason: "integer out of range".to_string(),
    };
    if value.as_u64().is_some() {
        return Err(out_of_range());
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => Ok(f as i64),
        Some(f) if f.fract() == 0.0 => Err(out_of_range()),
        _ => Err(AppError::InvalidType {
            field: name,
            expected: "integer",
        }),
    }
}

fn number(obj: &Map<String, Value>, name: &'static str) -> Result<f64, AppError> {
    field(obj, name)?.as_f64().ok_or(AppError::InvalidType {
        field: name,
        expected: "number",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> Value {
        json!({
            "electrodes": 16,
            "adc_resolution": 16,
            "adc_sample_rate": 20000,
            "oversampling": 1,
            "compression_bits": 8,
            "frame_rate": 1000,
            "max_bandwidth": 50
        })
    }

    #[test]
    fn test_parse_complete_body() {
        let config = parse_config(&full_body()).unwrap();
        assert_eq!(config.electrodes, 16);
        assert_eq!(config.adc_resolution, 16);
        assert_eq!(config.adc_sample_rate, 20000.0);
        assert_eq!(config.oversampling, 1.0);
        assert_eq!(config.compression_bits, 8);
        assert_eq!(config.frame_rate, 1000.0);
        assert_eq!(config.max_bandwidth, 50.0);
    }

    #[test]
    fn test_every_field_is_required() {
        for name in [
            "electrodes",
            "adc_resolution",
            "adc_sample_rate",
            "oversampling",
            "compression_bits",
            "frame_rate",
            "max_bandwidth",
        ] {
            let mut body = full_body();
            body.as_object_mut().unwrap().remove(name);
            match parse_config(&body) {
                Err(AppError::MissingField(field)) => assert_eq!(field, name),
                other => panic!("expected MissingField({}), got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_first_missing_field_reported() {
        let body = json!({ "adc_resolution": 16 });
        assert!(matches!(
            parse_config(&body),
            Err(AppError::MissingField("electrodes"))
        ));
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let mut body = full_body();
        body["frame_rate"] = json!("1000");
        assert!(matches!(
            parse_config(&body),
            Err(AppError::InvalidType {
                field: "frame_rate",
                expected: "number"
            })
        ));

        let mut body = full_body();
        body["oversampling"] = Value::Null;
        assert!(matches!(
            parse_config(&body),
            Err(AppError::InvalidType {
                field: "oversampling",
                ..
            })
        ));
    }

    #[test]
    fn test_integer_fields_reject_fractions() {
        let mut body = full_body();
        body["electrodes"] = json!(16.5);
        assert!(matches!(
            parse_config(&body),
            Err(AppError::InvalidType {
                field: "electrodes",
                expected: "integer"
            })
        ));
    }

    #[test]
    fn test_integer_fields_accept_whole_floats() {
        let mut body = full_body();
        body["compression_bits"] = json!(8.0);
        assert_eq!(parse_config(&body).unwrap().compression_bits, 8);
    }

    #[test]
    fn test_integer_beyond_i64_is_out_of_range() {
        let mut body = full_body();
        body["electrodes"] = json!(u64::MAX);
        match parse_config(&body) {
            Err(AppError::InvalidValue { field, reason }) => {
                assert_eq!(field, "electrodes");
                assert_eq!(reason, "integer out of range");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }

        let mut body = full_body();
        body["compression_bits"] = json!(1e20);
        assert!(matches!(
            parse_config(&body),
            Err(AppError::InvalidValue {
                field: "compression_bits",
                ..
            })
        ));
    }

    #[test]
    fn test_non_object_body() {
        assert!(matches!(
            parse_config(&json!([16, 16])),
            Err(AppError::InvalidType { field: "body", .. })
        ));
    }
}

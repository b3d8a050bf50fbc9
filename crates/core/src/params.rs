//! Helpers for extracting typed parameters from a `serde_json::Value` object.
//!
//! Real-valued lookups are lenient: a missing key or a value of the wrong type
//! yields the default, and domain checks happen afterwards when the engine
//! validates its parameter struct. Counts are strict, because a negative or
//! fractional count is a caller error that must not silently turn into the
//! default.

use serde_json::Value;

use crate::error::EngineError;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts an optional `f64` from `params[name]`; missing, null, or
/// non-numeric values give `None`.
pub fn param_opt_f64(params: &Value, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

/// Extracts a non-negative count from `params[name]`.
///
/// Missing or null keys give `default`. Integral floats such as `100.0` are
/// accepted. Negative, fractional, or non-numeric values return
/// `EngineError::InvalidParam`.
pub fn param_count(params: &Value, name: &str, default: usize) -> Result<usize, EngineError> {
    let value = match params.get(name) {
        None | Some(Value::Null) => return Ok(default),
        Some(v) => v,
    };
    if let Some(n) = value.as_u64() {
        return usize::try_from(n)
            .map_err(|_| EngineError::invalid_param(name, format!("{n} does not fit in usize")));
    }
    match value.as_f64() {
        Some(f) if f < 0.0 => Err(EngineError::invalid_param(
            name,
            format!("must not be negative, got {f}"),
        )),
        Some(f) if f.fract() == 0.0 && f <= usize::MAX as f64 => Ok(f as usize),
        Some(f) => Err(EngineError::invalid_param(
            name,
            format!("must be a whole number, got {f}"),
        )),
        None => Err(EngineError::invalid_param(
            name,
            format!("expected a number, got {value}"),
        )),
    }
}

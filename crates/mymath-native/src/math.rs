//! Scalar and batch floating-point operations.

use crate::error::NativeError;

pub fn is_normal(input: f64) -> bool {
    input.is_normal()
}

pub fn sinf(input: f32) -> f32 {
    input.sin()
}

pub fn cosf(input: f32) -> f32 {
    input.cos()
}

pub fn tanf(input: f32) -> f32 {
    input.tan()
}

pub fn sin(input: f64) -> f64 {
    input.sin()
}

pub fn cos(input: f64) -> f64 {
    input.cos()
}

pub fn tan(input: f64) -> f64 {
    input.tan()
}

/// Parses a decimal integer with C `atoi` rules.
///
/// Leading whitespace is skipped, one optional sign is accepted, and the
/// leading run of digits is converted. Anything else (including a null
/// input) yields `0`. Overflow wraps.
pub fn parse_int(input: Option<&str>) -> i32 {
    parse_int_bytes(input.map(str::as_bytes))
}

/// Byte-level form of [`parse_int`], used by the C ABI where input need not be UTF-8.
pub fn parse_int_bytes(input: Option<&[u8]>) -> i32 {
    let Some(bytes) = input else {
        return 0;
    };

    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r'))
        .unwrap_or(bytes.len());
    let rest = &bytes[start..];

    let (negative, digits) = match rest.first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let magnitude = digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0i32, |acc, b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')));

    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

/// Writes `tan(input)` through `output`. Fails when no output slot is supplied.
pub fn tan_with_errcode(input: f64, output: Option<&mut f64>) -> Result<(), NativeError> {
    let output = output.ok_or(NativeError::NullPointer("output"))?;
    *output = input.tan();
    Ok(())
}

pub fn sin_array(
    len: usize,
    inputs: Option<&[f64]>,
    outputs: Option<&mut [f64]>,
) -> Result<(), NativeError> {
    map_array(len, inputs, outputs, f64::sin)
}

pub fn cos_array(
    len: usize,
    inputs: Option<&[f64]>,
    outputs: Option<&mut [f64]>,
) -> Result<(), NativeError> {
    map_array(len, inputs, outputs, f64::cos)
}

pub fn tan_array(
    len: usize,
    inputs: Option<&[f64]>,
    outputs: Option<&mut [f64]>,
) -> Result<(), NativeError> {
    map_array(len, inputs, outputs, f64::tan)
}

/// Applies `op` to the first `len` inputs, writing the first `len` outputs.
/// Elements past `len` are left untouched.
fn map_array(
    len: usize,
    inputs: Option<&[f64]>,
    outputs: Option<&mut [f64]>,
    op: fn(f64) -> f64,
) -> Result<(), NativeError> {
    let inputs = inputs.ok_or(NativeError::NullPointer("inputs"))?;
    let outputs = outputs.ok_or(NativeError::NullPointer("outputs"))?;

    if inputs.len() < len {
        return Err(NativeError::LengthMismatch {
            name: "inputs",
            expected: len,
            actual: inputs.len(),
        });
    }
    if outputs.len() < len {
        return Err(NativeError::LengthMismatch {
            name: "outputs",
            expected: len,
            actual: outputs.len(),
        });
    }

    for (out, input) in outputs[..len].iter_mut().zip(&inputs[..len]) {
        *out = op(*input);
    }
    Ok(())
}

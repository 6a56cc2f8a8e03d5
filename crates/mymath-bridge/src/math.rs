//! Host-facing versions of the scalar and batch math entry points.
//!
//! Scalars pass straight through. Strings and arrays are host objects and are
//! converted at the boundary; failures surface as the native `-1` status.

use mymath_gc::{FloatArray, Gc, Heap, HostString};
use mymath_native::{self as native, NativeError, STATUS_ERROR, STATUS_OK};

use crate::error::BridgeError;
use crate::string::{host_string_bytes, str_to_host_string};

pub use mymath_native::{cos, cosf, is_normal, print_version, sin, sinf, tan, tanf, version_major};

type BatchOp = fn(usize, Option<&[f64]>, Option<&mut [f64]>) -> Result<(), NativeError>;

/// The `major.minor.patch` version as a new host string.
pub fn version(heap: &mut Heap) -> Gc<HostString> {
    str_to_host_string(heap, &native::version())
}

/// Parses a leading decimal integer; `0` for a missing or unparsable string.
pub fn parse_int(heap: &Heap, input: Option<Gc<HostString>>) -> i32 {
    let Some(input) = input else {
        return 0;
    };
    match host_string_bytes(heap, input) {
        Ok(bytes) => native::parse_int_bytes(Some(bytes.as_slice())),
        Err(err) => {
            log::warn!("parse_int: {}", err);
            0
        }
    }
}

pub fn tan_with_errcode(input: f64, output: Option<&mut f64>) -> i32 {
    native::to_status(native::tan_with_errcode(input, output))
}

pub fn sin_array(heap: &mut Heap, len: i32, inputs: Option<Gc<FloatArray>>, outputs: Option<Gc<FloatArray>>) -> i32 {
    batch(heap, len, inputs, outputs, native::sin_array)
}

pub fn cos_array(heap: &mut Heap, len: i32, inputs: Option<Gc<FloatArray>>, outputs: Option<Gc<FloatArray>>) -> i32 {
    batch(heap, len, inputs, outputs, native::cos_array)
}

pub fn tan_array(heap: &mut Heap, len: i32, inputs: Option<Gc<FloatArray>>, outputs: Option<Gc<FloatArray>>) -> i32 {
    batch(heap, len, inputs, outputs, native::tan_array)
}

fn batch(
    heap: &mut Heap,
    len: i32,
    inputs: Option<Gc<FloatArray>>,
    outputs: Option<Gc<FloatArray>>,
    op: BatchOp,
) -> i32 {
    match try_batch(heap, len, inputs, outputs, op) {
        Ok(()) => STATUS_OK,
        Err(err) => {
            log::warn!("batch call failed: {}", err);
            STATUS_ERROR
        }
    }
}

fn try_batch(
    heap: &mut Heap,
    len: i32,
    inputs: Option<Gc<FloatArray>>,
    outputs: Option<Gc<FloatArray>>,
    op: BatchOp,
) -> Result<(), BridgeError> {
    // A negative count processes nothing, as a C loop over `i < len` would.
    let len = usize::try_from(len).unwrap_or(0);
    // Inputs and outputs may be the same array.
    let inputs = match inputs {
        Some(array) => Some(heap.get(array)?.as_slice().to_vec()),
        None => None,
    };
    let outputs = match outputs {
        Some(array) => Some(heap.get_mut(array)?.as_mut_slice()),
        None => None,
    };
    op(len, inputs.as_deref(), outputs)?;
    Ok(())
}

//! Text crossing the boundary: NUL-terminated byte strings become host
//! strings by widening each byte to one code unit.

use std::ffi::CStr;
use std::fmt;
use std::io::Write;

use mymath_gc::{Gc, Heap, HostString};
use mymath_native::NativeComplex;

use crate::error::BridgeError;
use crate::handle::{unwrap, ComplexHandle};

/// Capacity of the scratch buffer used by [`format_complex`].
pub const FORMAT_BUFFER_LEN: usize = 128;

/// Rendered in place of a value that does not fit the format buffer.
pub const FORMAT_ERROR: &str = "(formatting error)";

/// Copies `bytes` up to the first NUL (or the end) into a new host string.
/// A missing input yields the empty string.
pub fn to_host_string(heap: &mut Heap, bytes: Option<&[u8]>) -> Gc<HostString> {
    let bytes = bytes.unwrap_or_default();
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let units: Vec<u16> = bytes[..len].iter().map(|&b| u16::from(b)).collect();
    heap.alloc_string(&units)
}

pub fn cstr_to_host_string(heap: &mut Heap, s: Option<&CStr>) -> Gc<HostString> {
    to_host_string(heap, s.map(CStr::to_bytes))
}

pub fn str_to_host_string(heap: &mut Heap, s: &str) -> Gc<HostString> {
    to_host_string(heap, Some(s.as_bytes()))
}

/// Narrows a host string back to bytes. Units above `0xff` become `?`.
pub fn host_string_bytes(heap: &Heap, s: Gc<HostString>) -> Result<Vec<u8>, BridgeError> {
    let string = heap.get(s)?;
    Ok(string
        .units()
        .iter()
        .map(|&unit| u8::try_from(unit).unwrap_or(b'?'))
        .collect())
}

/// `%.8f`, with NaN spelled `nan`.
struct Fixed8(f64);

impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.8}", self.0)
        }
    }
}

/// Renders `a+bi` / `a-bi` with eight fractional digits into a fixed buffer.
/// One byte of the buffer is reserved for the C terminator, so the longest
/// accepted rendering is `FORMAT_BUFFER_LEN - 1` bytes.
pub fn format_complex(value: &NativeComplex) -> Result<String, BridgeError> {
    let mut buffer = [0u8; FORMAT_BUFFER_LEN];
    let capacity = FORMAT_BUFFER_LEN - 1;
    let written = {
        let mut cursor = &mut buffer[..capacity];
        let result = if value.img.is_nan() || value.img >= 0.0 {
            write!(cursor, "{}+{}i", Fixed8(value.real), Fixed8(value.img))
        } else {
            write!(cursor, "{}-{}i", Fixed8(value.real), Fixed8(-value.img))
        };
        if result.is_err() {
            return Err(BridgeError::FormatOverflow {
                capacity: FORMAT_BUFFER_LEN,
            });
        }
        capacity - cursor.len()
    };
    Ok(String::from_utf8_lossy(&buffer[..written]).into_owned())
}

/// Host string rendering of a complex handle. A missing or inert handle
/// renders as the empty string, an oversized value as [`FORMAT_ERROR`].
pub fn complex_to_host_string(heap: &mut Heap, handle: Option<ComplexHandle>) -> Gc<HostString> {
    let Some(value) = unwrap(heap, handle).copied() else {
        return to_host_string(heap, None);
    };
    let text = format_complex(&value).unwrap_or_else(|err| {
        log::warn!("cannot format {:?}: {}", value, err);
        FORMAT_ERROR.to_owned()
    });
    str_to_host_string(heap, &text)
}

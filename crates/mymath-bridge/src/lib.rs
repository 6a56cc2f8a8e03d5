//! Boundary adapter between the native math provider and the host heap.
//!
//! Native complex values are owned by host handles ([`ComplexHandle`]) and
//! released by the handle's finalizer, exactly once. Strings are converted
//! byte-for-unit, and sequences of handles are host [`RefArray`]s.
//!
//! [`RefArray`]: mymath_gc::RefArray

mod batch;
mod callback;
pub mod error;
pub mod handle;
pub mod math;
pub mod string;

pub use batch::reinit_all;
pub use callback::for_each;
pub use error::BridgeError;
pub use handle::{
    complex_parts, free_complex, length, multiply, new_complex, replace, unwrap, wrap, ComplexCell,
    ComplexHandle,
};
pub use string::{
    complex_to_host_string, cstr_to_host_string, format_complex, host_string_bytes, str_to_host_string,
    to_host_string, FORMAT_BUFFER_LEN, FORMAT_ERROR,
};

//! The native math provider.
//!
//! Stateless functions over primitive numbers, the fixed-layout
//! [`NativeComplex`] with explicit create/destroy, and batch array variants.
//! The [`ffi`] module exposes the same surface over the C ABI.

pub mod complex;
pub mod error;
pub mod ffi;
pub mod math;
pub mod version;

pub use complex::{
    allocation_stats, for_each_complex, free_complex, init_n_complexes, length, multiply,
    new_complex, AllocStats, ComplexPtr, NativeComplex,
};
pub use error::{to_status, NativeError, STATUS_ERROR, STATUS_OK};
pub use math::{
    cos, cos_array, cosf, is_normal, parse_int, parse_int_bytes, sin, sin_array, sinf, tan,
    tan_array, tan_with_errcode, tanf,
};
pub use version::{print_version, version, version_major};

//! C ABI exports of the provider, mirroring `mymath.h`.
//!
//! Pointer arguments are null-checked; failures are reported with the `0` / `-1`
//! status convention or a null return.

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;
use std::slice;

use crate::complex::{self, ComplexPtr, NativeComplex};
use crate::error::{to_status, NativeError, STATUS_ERROR};
use crate::math;
use crate::version;

/// Callback signature accepted by [`mymath_for_each_complex`].
pub type ComplexCallback = extern "C" fn(*mut NativeComplex) -> c_int;

#[no_mangle]
pub extern "C" fn mymath_print_version() {
    version::print_version();
}

#[no_mangle]
pub extern "C" fn mymath_version_major() -> c_int {
    version::version_major()
}

#[no_mangle]
pub extern "C" fn mymath_is_normal(input: f64) -> c_int {
    c_int::from(math::is_normal(input))
}

#[no_mangle]
pub extern "C" fn mymath_sinf(input: f32) -> f32 {
    math::sinf(input)
}

#[no_mangle]
pub extern "C" fn mymath_cosf(input: f32) -> f32 {
    math::cosf(input)
}

#[no_mangle]
pub extern "C" fn mymath_tanf(input: f32) -> f32 {
    math::tanf(input)
}

#[no_mangle]
pub extern "C" fn mymath_sin(input: f64) -> f64 {
    math::sin(input)
}

#[no_mangle]
pub extern "C" fn mymath_cos(input: f64) -> f64 {
    math::cos(input)
}

#[no_mangle]
pub extern "C" fn mymath_tan(input: f64) -> f64 {
    math::tan(input)
}

/// # Safety
/// `input` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn mymath_parse_int(input: *const c_char) -> c_int {
    if input.is_null() {
        return 0;
    }
    math::parse_int_bytes(Some(CStr::from_ptr(input).to_bytes()))
}

/// Returns a freshly allocated version string. Release it with [`mymath_string_free`].
#[no_mangle]
pub extern "C" fn mymath_version() -> *mut c_char {
    match CString::new(version::version()) {
        Ok(s) => s.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// # Safety
/// `s` must be null or a pointer returned by [`mymath_version`] not yet freed.
#[no_mangle]
pub unsafe extern "C" fn mymath_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// # Safety
/// `output` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn mymath_tan_with_errcode(input: f64, output: *mut f64) -> c_int {
    to_status(math::tan_with_errcode(input, output.as_mut()))
}

type BatchOp = fn(usize, Option<&[f64]>, Option<&mut [f64]>) -> Result<(), NativeError>;

/// A negative `input_len` processes nothing and succeeds, like a C loop
/// bounded by `i < input_len`.
///
/// # Safety
/// Non-null `inputs` / `outputs` must be valid for `input_len` elements.
unsafe fn batch_call(input_len: c_int, inputs: *const f64, outputs: *mut f64, op: BatchOp) -> c_int {
    if inputs.is_null() || outputs.is_null() {
        return STATUS_ERROR;
    }
    let len = usize::try_from(input_len).unwrap_or(0);
    let inputs = slice::from_raw_parts(inputs, len);
    let outputs = slice::from_raw_parts_mut(outputs, len);
    to_status(op(len, Some(inputs), Some(outputs)))
}

/// # Safety
/// See [`batch_call`].
#[no_mangle]
pub unsafe extern "C" fn mymath_sin_array(input_len: c_int, inputs: *const f64, outputs: *mut f64) -> c_int {
    batch_call(input_len, inputs, outputs, math::sin_array)
}

/// # Safety
/// See [`batch_call`].
#[no_mangle]
pub unsafe extern "C" fn mymath_cos_array(input_len: c_int, inputs: *const f64, outputs: *mut f64) -> c_int {
    batch_call(input_len, inputs, outputs, math::cos_array)
}

/// # Safety
/// See [`batch_call`].
#[no_mangle]
pub unsafe extern "C" fn mymath_tan_array(input_len: c_int, inputs: *const f64, outputs: *mut f64) -> c_int {
    batch_call(input_len, inputs, outputs, math::tan_array)
}

/// Allocates a complex number; null on allocation failure.
#[no_mangle]
pub extern "C" fn mymath_new_complex(real: f64, img: f64) -> *mut NativeComplex {
    complex::new_complex(real, img).map_or(ptr::null_mut(), ComplexPtr::into_raw)
}

/// Writes a freshly allocated `a * b` through `result`. Does nothing if any pointer is null.
///
/// # Safety
/// Non-null arguments must be valid; `result` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn mymath_multiply(
    a: *const NativeComplex,
    b: *const NativeComplex,
    result: *mut *mut NativeComplex,
) {
    let (Some(a), Some(b)) = (a.as_ref(), b.as_ref()) else {
        return;
    };
    if result.is_null() {
        return;
    }
    *result = complex::multiply(a, b).map_or(ptr::null_mut(), ComplexPtr::into_raw);
}

/// Overwrites each of the `n` slots with a fresh zero complex.
/// Previous occupants are not released; that stays the caller's job.
///
/// # Safety
/// `complex_array` must be null or valid for `n` pointer writes.
#[no_mangle]
pub unsafe extern "C" fn mymath_init_n_complexes(n: c_int, complex_array: *mut *mut NativeComplex) {
    if complex_array.is_null() {
        return;
    }
    let Ok(n) = usize::try_from(n) else {
        return;
    };
    for i in 0..n {
        *complex_array.add(i) = mymath_new_complex(0.0, 0.0);
    }
}

/// # Safety
/// `c` must be null or a pointer from this library that is not owned elsewhere.
#[no_mangle]
pub unsafe extern "C" fn mymath_free_complex(c: *mut NativeComplex) {
    if let Some(c) = ComplexPtr::from_raw(c) {
        complex::free_complex(c);
    }
}

/// # Safety
/// `arr` must be null or valid for `n` pointer reads; non-null elements must be valid.
#[no_mangle]
pub unsafe extern "C" fn mymath_for_each_complex(
    n: c_int,
    arr: *const *mut NativeComplex,
    call_back: Option<ComplexCallback>,
) {
    let Some(call_back) = call_back else {
        return;
    };
    if arr.is_null() {
        return;
    }
    let Ok(n) = usize::try_from(n) else {
        return;
    };
    for &item in slice::from_raw_parts(arr, n) {
        if !item.is_null() {
            call_back(item);
        }
    }
}

/// # Safety
/// `a` must be null or valid.
#[no_mangle]
pub unsafe extern "C" fn mymath_length(a: *const NativeComplex) -> f64 {
    a.as_ref().map_or(0.0, complex::length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::allocation_stats;
    use std::cell::Cell;

    thread_local! {
        static VISITED: Cell<usize> = Cell::new(0);
    }

    extern "C" fn count_visit(_c: *mut NativeComplex) -> c_int {
        VISITED.with(|v| v.set(v.get() + 1));
        0
    }

    #[test]
    fn status_codes_for_null_pointers() {
        let inputs = [0.0_f64; 2];
        let mut outputs = [0.0_f64; 2];
        unsafe {
            assert_eq!(mymath_tan_with_errcode(0.5, ptr::null_mut()), -1);
            assert_eq!(mymath_sin_array(2, ptr::null(), outputs.as_mut_ptr()), -1);
            assert_eq!(mymath_cos_array(2, inputs.as_ptr(), ptr::null_mut()), -1);
            assert_eq!(mymath_tan_array(-1, ptr::null(), outputs.as_mut_ptr()), -1);
            assert_eq!(mymath_sin_array(2, inputs.as_ptr(), outputs.as_mut_ptr()), 0);
            assert_eq!(mymath_parse_int(ptr::null()), 0);
        }
    }

    #[test]
    fn negative_length_batch_touches_nothing() {
        let inputs = [1.0_f64; 2];
        let mut outputs = [7.0_f64; 2];
        unsafe {
            assert_eq!(mymath_sin_array(-3, inputs.as_ptr(), outputs.as_mut_ptr()), 0);
        }
        assert_eq!(outputs, [7.0, 7.0]);
    }

    #[test]
    fn parse_int_through_c_string() {
        let text = CString::new("  123abc").unwrap();
        assert_eq!(unsafe { mymath_parse_int(text.as_ptr()) }, 123);
    }

    #[test]
    fn version_is_fresh_per_call() {
        let first = mymath_version();
        let second = mymath_version();
        assert_ne!(first, second);
        unsafe {
            assert_eq!(CStr::from_ptr(first).to_str().unwrap(), "1.5.0");
            mymath_string_free(first);
            mymath_string_free(second);
            mymath_string_free(ptr::null_mut());
        }
    }

    #[test]
    fn complex_lifecycle_through_abi() {
        let before = allocation_stats();
        unsafe {
            let a = mymath_new_complex(2.0, 3.0);
            let b = mymath_new_complex(4.0, -1.0);
            let mut product: *mut NativeComplex = ptr::null_mut();
            mymath_multiply(a, b, &mut product);
            assert_eq!(*product, NativeComplex::new(11.0, 10.0));

            let mut untouched: *mut NativeComplex = ptr::null_mut();
            mymath_multiply(a, ptr::null(), &mut untouched);
            assert!(untouched.is_null());

            assert_eq!(mymath_length(product), 221.0_f64.sqrt());
            assert_eq!(mymath_length(ptr::null()), 0.0);

            mymath_free_complex(a);
            mymath_free_complex(b);
            mymath_free_complex(product);
            mymath_free_complex(ptr::null_mut());
        }
        assert_eq!(allocation_stats().live(), before.live());
    }

    #[test]
    fn batch_init_and_for_each() {
        let before = allocation_stats();
        let mut slots: [*mut NativeComplex; 3] = [ptr::null_mut(); 3];
        unsafe {
            mymath_init_n_complexes(3, slots.as_mut_ptr());
            assert!(slots.iter().all(|s| !s.is_null() && **s == NativeComplex::ZERO));

            mymath_free_complex(slots[1]);
            slots[1] = ptr::null_mut();

            VISITED.with(|v| v.set(0));
            mymath_for_each_complex(3, slots.as_ptr(), Some(count_visit));
            assert_eq!(VISITED.with(|v| v.get()), 2);

            mymath_for_each_complex(3, slots.as_ptr(), None);
            mymath_for_each_complex(3, ptr::null(), Some(count_visit));
            assert_eq!(VISITED.with(|v| v.get()), 2);

            mymath_free_complex(slots[0]);
            mymath_free_complex(slots[2]);
        }
        assert_eq!(allocation_stats().live(), before.live());
    }
}

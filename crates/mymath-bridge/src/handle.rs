//! Host handles for native complex numbers.
//!
//! A [`ComplexHandle`] is an external heap object holding at most one owned
//! native value. The finalizer registered in [`wrap`] releases that value when
//! the handle is reclaimed. A handle whose value is gone (explicitly freed, or
//! a failed re-initialization) is inert: every operation here treats it like a
//! null handle.

use mymath_gc::{External, Gc, Heap};
use mymath_native::{self as native, ComplexPtr, NativeComplex};

use crate::error::BridgeError;

/// Payload of a complex handle.
#[derive(Debug, Default)]
pub struct ComplexCell {
    val: Option<ComplexPtr>,
}

impl ComplexCell {
    pub fn get(&self) -> Option<&NativeComplex> {
        self.val.as_deref()
    }

    pub fn is_inert(&self) -> bool {
        self.val.is_none()
    }

    /// Releases the owned value, if any. Returns whether something was released.
    pub(crate) fn release(&mut self) -> bool {
        match self.val.take() {
            Some(value) => {
                native::free_complex(value);
                true
            }
            None => false,
        }
    }

    /// Installs `value`, releasing whatever was owned before.
    pub(crate) fn install(&mut self, value: Option<ComplexPtr>) {
        self.release();
        self.val = value;
    }
}

pub type ComplexHandle = Gc<External<ComplexCell>>;

fn free_complex_finalizer(cell: &mut ComplexCell) {
    if cell.release() {
        log::trace!("finalizer released a native complex");
    }
}

/// Hands ownership of `raw` to a new host handle.
pub fn wrap(heap: &mut Heap, raw: ComplexPtr) -> ComplexHandle {
    heap.make_external_object(ComplexCell { val: Some(raw) }, free_complex_finalizer)
}

/// Borrows the native value behind `handle`.
///
/// Returns `None` for a missing handle, a reclaimed handle, or an inert one.
/// The borrow is tied to the heap, so it cannot outlive a collection.
pub fn unwrap(heap: &Heap, handle: Option<ComplexHandle>) -> Option<&NativeComplex> {
    let handle = handle?;
    match heap.get(handle) {
        Ok(external) => external.value().get(),
        Err(err) => {
            log::warn!("cannot unwrap {:?}: {}", handle, err);
            None
        }
    }
}

pub(crate) fn cell_mut(heap: &mut Heap, handle: ComplexHandle) -> Result<&mut ComplexCell, BridgeError> {
    Ok(heap.get_mut(handle)?.value_mut())
}

/// Allocates a native complex and wraps it. `None` if the native allocation fails.
pub fn new_complex(heap: &mut Heap, real: f64, img: f64) -> Option<ComplexHandle> {
    let raw = native::new_complex(real, img)?;
    Some(wrap(heap, raw))
}

/// Multiplies two handles into a freshly wrapped product.
/// Nothing is allocated unless both operands hold values.
pub fn multiply(heap: &mut Heap, a: Option<ComplexHandle>, b: Option<ComplexHandle>) -> Option<ComplexHandle> {
    let product = {
        let a = unwrap(heap, a)?;
        let b = unwrap(heap, b)?;
        native::multiply(a, b)?
    };
    Some(wrap(heap, product))
}

pub fn complex_parts(heap: &Heap, handle: Option<ComplexHandle>) -> Option<(f64, f64)> {
    unwrap(heap, handle).map(|c| (c.real, c.img))
}

/// Modulus of the handle's value; `0.0` when there is none.
pub fn length(heap: &Heap, handle: Option<ComplexHandle>) -> f64 {
    unwrap(heap, handle).map_or(0.0, native::length)
}

/// Releases the handle's value now and leaves the handle inert, so its
/// finalizer later has nothing left to release.
pub fn free_complex(heap: &mut Heap, handle: Option<ComplexHandle>) -> bool {
    let Some(handle) = handle else {
        return false;
    };
    match cell_mut(heap, handle) {
        Ok(cell) => cell.release(),
        Err(err) => {
            log::warn!("cannot free {:?}: {}", handle, err);
            false
        }
    }
}

/// Gives the handle a new value, releasing the one it owned before.
/// If the handle cannot be resolved, `raw` is released instead of leaking.
pub fn replace(heap: &mut Heap, handle: ComplexHandle, raw: Option<ComplexPtr>) -> Result<(), BridgeError> {
    cell_mut(heap, handle)?.install(raw);
    Ok(())
}

//! Heap-allocated complex numbers with explicit create/destroy.

use std::alloc::{self, Layout};
use std::cell::Cell;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Mul};
use std::ptr::NonNull;

/// A complex number as laid out by the native library.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NativeComplex {
    pub real: f64,
    pub img: f64,
}

impl NativeComplex {
    pub const ZERO: NativeComplex = NativeComplex { real: 0.0, img: 0.0 };

    pub fn new(real: f64, img: f64) -> Self {
        Self { real, img }
    }

    /// Modulus, `sqrt(real^2 + img^2)`.
    pub fn norm(&self) -> f64 {
        self.real.hypot(self.img)
    }
}

impl Mul for NativeComplex {
    type Output = NativeComplex;

    fn mul(self, rhs: NativeComplex) -> NativeComplex {
        NativeComplex {
            real: self.real * rhs.real - self.img * rhs.img,
            img: self.real * rhs.img + self.img * rhs.real,
        }
    }
}

/// Counts of native complex allocations made and released on the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocStats {
    pub allocated: usize,
    pub released: usize,
}

impl AllocStats {
    /// Allocations not yet released.
    pub fn live(&self) -> usize {
        self.allocated.saturating_sub(self.released)
    }
}

thread_local! {
    static ALLOC_STATS: Cell<AllocStats> = Cell::new(AllocStats::default());
}

/// Snapshot of this thread's allocation counters.
pub fn allocation_stats() -> AllocStats {
    ALLOC_STATS.with(|cell| cell.get())
}

fn record(update: impl FnOnce(&mut AllocStats)) {
    ALLOC_STATS.with(|cell| {
        let mut stats = cell.get();
        update(&mut stats);
        cell.set(stats);
    });
}

/// Owning pointer to a natively allocated [`NativeComplex`].
///
/// There is exactly one `ComplexPtr` per allocation; moving it transfers
/// ownership and dropping it releases the allocation. `into_raw`/`from_raw`
/// hand ownership across the C ABI.
pub struct ComplexPtr {
    ptr: NonNull<NativeComplex>,
}

impl ComplexPtr {
    pub fn as_ptr(&self) -> *mut NativeComplex {
        self.ptr.as_ptr()
    }

    /// Gives up ownership without releasing the allocation.
    pub fn into_raw(self) -> *mut NativeComplex {
        let raw = self.ptr.as_ptr();
        mem::forget(self);
        raw
    }

    /// Takes ownership of a pointer previously produced by [`ComplexPtr::into_raw`].
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    /// `raw` must be null or come from `into_raw`, and must not be owned elsewhere.
    pub unsafe fn from_raw(raw: *mut NativeComplex) -> Option<Self> {
        NonNull::new(raw).map(|ptr| ComplexPtr { ptr })
    }
}

impl Deref for ComplexPtr {
    type Target = NativeComplex;

    fn deref(&self) -> &NativeComplex {
        // SAFETY: the pointer is owned and initialized for the lifetime of `self`.
        unsafe { self.ptr.as_ref() }
    }
}

impl DerefMut for ComplexPtr {
    fn deref_mut(&mut self) -> &mut NativeComplex {
        // SAFETY: as above; `&mut self` guarantees exclusivity.
        unsafe { self.ptr.as_mut() }
    }
}

impl Drop for ComplexPtr {
    fn drop(&mut self) {
        log::trace!("releasing native complex at {:p}", self.ptr);
        // SAFETY: allocated in `allocate` with the same layout and released only here.
        unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, Layout::new::<NativeComplex>()) };
        record(|stats| stats.released += 1);
    }
}

impl fmt::Debug for ComplexPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexPtr")
            .field("ptr", &self.ptr)
            .field("value", &**self)
            .finish()
    }
}

fn allocate(value: NativeComplex) -> Option<ComplexPtr> {
    let layout = Layout::new::<NativeComplex>();
    // SAFETY: `NativeComplex` is not zero-sized.
    let raw = unsafe { alloc::alloc(layout) } as *mut NativeComplex;
    let Some(ptr) = NonNull::new(raw) else {
        log::warn!("native complex allocation failed");
        return None;
    };
    // SAFETY: freshly allocated with the layout of `NativeComplex`.
    unsafe { ptr.as_ptr().write(value) };
    record(|stats| stats.allocated += 1);
    Some(ComplexPtr { ptr })
}

/// Allocates a complex number. Returns `None` when the allocator is exhausted.
pub fn new_complex(real: f64, img: f64) -> Option<ComplexPtr> {
    allocate(NativeComplex::new(real, img))
}

/// Multiplies two complex numbers into a fresh allocation.
pub fn multiply(a: &NativeComplex, b: &NativeComplex) -> Option<ComplexPtr> {
    allocate(*a * *b)
}

/// Fills every slot with a fresh zero complex. Previous occupants are released.
/// A slot whose allocation fails is left empty.
pub fn init_n_complexes(slots: &mut [Option<ComplexPtr>]) {
    for slot in slots.iter_mut() {
        *slot = new_complex(0.0, 0.0);
    }
}

/// Releases a complex number.
pub fn free_complex(complex: ComplexPtr) {
    drop(complex);
}

/// Calls `call_back` on every present element in order. Return values are ignored.
pub fn for_each_complex<F>(items: &[Option<ComplexPtr>], mut call_back: F)
where
    F: FnMut(&NativeComplex) -> i32,
{
    for item in items.iter().flatten() {
        let _ = call_back(item);
    }
}

pub fn length(a: &NativeComplex) -> f64 {
    a.norm()
}

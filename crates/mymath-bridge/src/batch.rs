use mymath_gc::{Gc, GcError, Heap, ObjectId, RefArray};
use mymath_native as native;

use crate::error::BridgeError;
use crate::handle::{cell_mut, wrap, ComplexHandle};

/// Resets every slot of `handles` to a freshly allocated zero value.
///
/// Slots are handled independently. A slot holding a handle has its old value
/// released before the new one is allocated, and keeps its handle. An empty
/// slot (or one whose handle was already reclaimed) gets a new handle. If the
/// native allocation fails the slot is left inert or empty, never pointing at
/// released memory. Returns the number of slots now holding a zero value.
pub fn reinit_all(heap: &mut Heap, handles: Option<Gc<RefArray>>) -> usize {
    let Some(array) = handles else {
        return 0;
    };
    let len = match heap.get(array) {
        Ok(slots) => slots.len(),
        Err(err) => {
            log::warn!("reinit_all: {}", err);
            return 0;
        }
    };

    // New handles are allocated below, so the array must survive any safepoint.
    heap.push_root(array);
    let mut initialized = 0;
    for index in 0..len {
        match reinit_slot(heap, array, index) {
            Ok(true) => initialized += 1,
            Ok(false) => log::warn!("reinit_all: native allocation failed for slot {}", index),
            Err(err) => log::warn!("reinit_all: skipping slot {}: {}", index, err),
        }
    }
    heap.pop_roots(1);

    log::debug!("reinit_all: {} of {} slots initialized", initialized, len);
    initialized
}

fn reinit_slot(heap: &mut Heap, array: Gc<RefArray>, index: usize) -> Result<bool, BridgeError> {
    let existing = heap.get(array)?.get(index)?.and_then(|id| live_handle(heap, id));

    match existing {
        Some(handle) => {
            let cell = cell_mut(heap, handle)?;
            cell.release();
            let fresh = native::new_complex(0.0, 0.0);
            let ok = fresh.is_some();
            cell.install(fresh);
            Ok(ok)
        }
        None => {
            let Some(fresh) = native::new_complex(0.0, 0.0) else {
                return Ok(false);
            };
            let handle = wrap(heap, fresh);
            heap.get_mut(array)?.set(index, Some(handle.id()))?;
            Ok(true)
        }
    }
}

/// The slot's handle, or `None` if it was already reclaimed.
fn live_handle(heap: &Heap, id: ObjectId) -> Option<ComplexHandle> {
    let handle = ComplexHandle::from_id(id);
    match heap.get(handle) {
        Ok(_) => Some(handle),
        Err(GcError::StaleReference(_)) => None,
        // A foreign object: keep the handle so the slot is reported and skipped.
        Err(_) => Some(handle),
    }
}

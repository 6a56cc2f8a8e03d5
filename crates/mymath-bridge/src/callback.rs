use mymath_gc::{Gc, Heap, RefArray};

use crate::handle::ComplexHandle;

/// Calls `callback` once per non-empty slot of `handles`, in index order.
///
/// The slot is re-read before each call, so a callback that stores into the
/// array affects later iterations. Callbacks receive the heap and may
/// allocate; the array stays rooted for the duration. A missing array or
/// callback is a no-op. Callback return values are ignored.
pub fn for_each<F>(heap: &mut Heap, handles: Option<Gc<RefArray>>, callback: Option<F>)
where
    F: FnMut(&mut Heap, ComplexHandle) -> i32,
{
    let (Some(array), Some(mut callback)) = (handles, callback) else {
        return;
    };
    let len = match heap.get(array) {
        Ok(slots) => slots.len(),
        Err(err) => {
            log::warn!("for_each: {}", err);
            return;
        }
    };

    heap.push_root(array);
    for index in 0..len {
        let slot = match heap.get(array).and_then(|slots| slots.get(index)) {
            Ok(slot) => slot,
            Err(err) => {
                log::warn!("for_each: stopping at slot {}: {}", index, err);
                break;
            }
        };
        if let Some(id) = slot {
            let _ = callback(heap, ComplexHandle::from_id(id));
        }
    }
    heap.pop_roots(1);
}

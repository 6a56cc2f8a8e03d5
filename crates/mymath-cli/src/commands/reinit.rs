use mymath_bridge::{new_complex, reinit_all, ComplexHandle};
use mymath_gc::{Gc, Heap, RefArray};

use super::complex::render;
use crate::error::CliError;

/// Fills even slots with `(i, -i)`, leaves odd slots empty, then resets them all.
pub fn handle_reinit(heap: &mut Heap, count: usize) -> Result<(), CliError> {
    let array = heap.make_array(count);
    heap.push_root(array);

    for index in (0..count).step_by(2) {
        let value = index as f64;
        let handle = new_complex(heap, value, -value);
        heap.get_mut(array)?.set(index, handle.map(|h| h.id()))?;
    }
    print_slots(heap, array, "before")?;

    let initialized = reinit_all(heap, Some(array));
    println!("reinit_all initialized {} of {} slots", initialized, count);
    print_slots(heap, array, "after")?;

    heap.pop_roots(1);
    let reclaimed = heap.collect();
    log::info!("collection after reinit reclaimed {} objects", reclaimed);
    Ok(())
}

fn print_slots(heap: &mut Heap, array: Gc<RefArray>, label: &str) -> Result<(), CliError> {
    let slots: Vec<_> = heap.get(array)?.iter().collect();
    println!("{}:", label);
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(id) => println!("  [{}] {}", index, render(heap, Some(ComplexHandle::from_id(id)))?),
            None => println!("  [{}] null", index),
        }
    }
    Ok(())
}

use std::cell::Cell;

use mymath_bridge::{
    complex_parts, for_each, free_complex, multiply, new_complex, reinit_all, to_host_string, ComplexHandle,
};
use mymath_gc::Heap;
use mymath_native::allocation_stats;

use super::complex::render;
use crate::error::CliError;

/// Exercises every boundary operation, then shuts the heap down and checks
/// that each native allocation was released exactly once.
pub fn handle_demo(mut heap: Heap) -> Result<(), CliError> {
    super::version::handle_version(&mut heap);
    super::trig::handle_trig(&mut heap, 0.5)?;

    let array = heap.make_array(4);
    heap.register_global_root(array);
    let a = new_complex(&mut heap, 2.0, 3.0);
    heap.get_mut(array)?.set(0, a.map(|h| h.id()))?;
    let b = new_complex(&mut heap, 4.0, -1.0);
    heap.get_mut(array)?.set(2, b.map(|h| h.id()))?;

    let product = multiply(&mut heap, a, b);
    if let Some(product) = product {
        heap.push_root(product);
    }
    println!("(2+3i) * (4-1i) = {}", render(&mut heap, product)?);

    let visited = Cell::new(0);
    for_each(
        &mut heap,
        Some(array),
        Some(|heap: &mut Heap, handle: ComplexHandle| {
            visited.set(visited.get() + 1);
            log::debug!("visiting {:?}", complex_parts(heap, Some(handle)));
            0
        }),
    );
    println!("for_each visited {} handles", visited.get());

    println!("reinit_all initialized {} slots", reinit_all(&mut heap, Some(array)));

    if free_complex(&mut heap, product) {
        println!("product released explicitly; it now renders as {:?}", render(&mut heap, product)?);
    }

    let empty = to_host_string(&mut heap, None);
    println!("empty string length {}", heap.get(empty)?.len());

    if product.is_some() {
        heap.pop_roots(1);
    }
    heap.unregister_global_root(array);
    let reclaimed = heap.collect();
    println!("collection reclaimed {} objects", reclaimed);

    let live_before_shutdown = allocation_stats().live();
    let stats = heap.shutdown();
    println!(
        "heap shutdown: {} collections, {} allocated, {} reclaimed, {} finalizers run",
        stats.collections, stats.allocated, stats.reclaimed, stats.finalized
    );
    println!(
        "native values live: {} before shutdown, {} after",
        live_before_shutdown,
        allocation_stats().live()
    );
    Ok(())
}

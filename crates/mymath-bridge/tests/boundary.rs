// Ownership and conversion behaviour at the host/native boundary.

use std::cell::RefCell;

use mymath_bridge::{
    complex_parts, complex_to_host_string, for_each, free_complex, length, multiply, new_complex, reinit_all,
    to_host_string, unwrap, wrap, ComplexHandle, FORMAT_ERROR,
};
use mymath_gc::{Gc, Heap, HeapConfig, RefArray};
use mymath_native::{self as native, allocation_stats};

fn heap() -> Heap {
    let _ = env_logger::builder().is_test(true).try_init();
    Heap::new(HeapConfig::manual())
}

fn text(heap: &Heap, s: Gc<mymath_gc::HostString>) -> String {
    heap.get(s).unwrap().to_string_lossy()
}

fn array_of(heap: &mut Heap, handles: &[Option<ComplexHandle>]) -> Gc<RefArray> {
    let array = heap.make_array(handles.len());
    let slots = heap.get_mut(array).unwrap();
    for (index, handle) in handles.iter().enumerate() {
        slots.set(index, handle.map(|h| h.id())).unwrap();
    }
    array
}

#[test]
fn test_wrap_unwrap_round_trip() {
    let mut heap = heap();
    let raw = native::new_complex(3.5, -0.5).unwrap();
    let handle = wrap(&mut heap, raw);
    assert_eq!(unwrap(&heap, Some(handle)).map(|c| (c.real, c.img)), Some((3.5, -0.5)));
    assert!(unwrap(&heap, None).is_none());
}

#[test]
fn test_multiply_through_handles() {
    let mut heap = heap();
    let a = new_complex(&mut heap, 2.0, 3.0);
    let b = new_complex(&mut heap, 4.0, -1.0);
    let product = multiply(&mut heap, a, b);
    assert_eq!(complex_parts(&heap, product), Some((11.0, 10.0)));
}

#[test]
fn test_multiplication_matches_formula() {
    let mut heap = heap();
    let samples = [-2.5, -1.0, 0.0, 0.75, 3.0];
    for &(a, b) in &[(1.0, 2.0), (-0.5, 4.0)] {
        for &c in &samples {
            for &d in &samples {
                let x = new_complex(&mut heap, a, b);
                let y = new_complex(&mut heap, c, d);
                let product = multiply(&mut heap, x, y);
                assert_eq!(complex_parts(&heap, product), Some((a * c - b * d, a * d + b * c)));
            }
        }
    }
}

#[test]
fn test_multiply_with_missing_operand_allocates_nothing() {
    let mut heap = heap();
    let a = new_complex(&mut heap, 1.0, 1.0);
    let before = allocation_stats();
    assert!(multiply(&mut heap, a, None).is_none());
    assert!(multiply(&mut heap, None, a).is_none());
    assert_eq!(allocation_stats(), before);
}

#[test]
fn test_reinit_mixed_slots() {
    let mut heap = heap();
    let a = new_complex(&mut heap, 1.0, 2.0);
    let b = new_complex(&mut heap, -3.0, 4.0);
    let array = array_of(&mut heap, &[a, None, b, None, None]);
    heap.register_global_root(array);
    let live_before = allocation_stats().live();

    assert_eq!(reinit_all(&mut heap, Some(array)), 5);
    // Two old values released, five fresh ones allocated.
    assert_eq!(allocation_stats().live(), live_before - 2 + 5);

    let slots: Vec<_> = heap.get(array).unwrap().iter().collect();
    assert_eq!(slots[0], a.map(|h| h.id()));
    assert_eq!(slots[2], b.map(|h| h.id()));
    for slot in slots {
        let handle = slot.map(ComplexHandle::from_id);
        assert!(handle.is_some());
        assert_eq!(complex_parts(&heap, handle), Some((0.0, 0.0)));
    }

    heap.collect();
    assert_eq!(heap.stats().finalized, 0);
}

#[test]
fn test_reinit_inert_and_reclaimed_slots() {
    let mut heap = heap();
    let reclaimed = new_complex(&mut heap, 9.0, 9.0).unwrap();
    heap.collect();
    assert!(!heap.is_live(reclaimed.id()));

    let valued = new_complex(&mut heap, 1.0, 2.0);
    let inert = new_complex(&mut heap, 3.0, 4.0);
    assert!(free_complex(&mut heap, inert));
    let other = new_complex(&mut heap, 5.0, 6.0);
    let array = array_of(&mut heap, &[valued, None, inert, Some(reclaimed), other]);
    heap.register_global_root(array);
    let before = allocation_stats();

    assert_eq!(reinit_all(&mut heap, Some(array)), 5);
    let after = allocation_stats();
    // Only the two valued slots had anything to release.
    assert_eq!(after.released - before.released, 2);
    assert_eq!(after.allocated - before.allocated, 5);

    let slots: Vec<_> = heap.get(array).unwrap().iter().collect();
    assert_eq!(slots[0], valued.map(|h| h.id()));
    assert_eq!(slots[2], inert.map(|h| h.id()));
    assert_eq!(slots[4], other.map(|h| h.id()));
    assert!(slots[3].is_some());
    assert_ne!(slots[3], Some(reclaimed.id()));
    for slot in slots {
        assert_eq!(complex_parts(&heap, slot.map(ComplexHandle::from_id)), Some((0.0, 0.0)));
    }
}

#[test]
fn test_reinit_collects_mid_call_without_losing_slots() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut heap = Heap::new(HeapConfig { gc_threshold: 1, initial_capacity: 4 });
    let array = heap.make_array(4);

    assert_eq!(reinit_all(&mut heap, Some(array)), 4);
    assert!(heap.stats().collections > 0);
    for slot in heap.get(array).unwrap().iter() {
        assert_eq!(complex_parts(&heap, slot.map(ComplexHandle::from_id)), Some((0.0, 0.0)));
    }
}

#[test]
fn test_reinit_missing_array_is_noop() {
    let mut heap = heap();
    assert_eq!(reinit_all(&mut heap, None), 0);
    let empty = heap.make_array(0);
    assert_eq!(reinit_all(&mut heap, Some(empty)), 0);
}

#[test]
fn test_empty_and_missing_strings() {
    let mut heap = heap();
    let empty = to_host_string(&mut heap, Some(&b""[..]));
    let missing = to_host_string(&mut heap, None);
    assert_eq!(heap.get(empty).unwrap().len(), 0);
    assert_eq!(heap.get(missing).unwrap().len(), 0);
}

#[test]
fn test_complex_rendering() {
    let mut heap = heap();
    let cases = [
        ((1.5, -2.25), "1.50000000-2.25000000i"),
        ((0.0, f64::NAN), "0.00000000+nani"),
        ((1e106, 0.0), FORMAT_ERROR),
        ((f64::MAX, f64::MAX), FORMAT_ERROR),
    ];
    for ((real, img), expected) in cases {
        let handle = new_complex(&mut heap, real, img);
        let rendered = complex_to_host_string(&mut heap, handle);
        assert_eq!(text(&heap, rendered), expected);
    }

    let nothing = complex_to_host_string(&mut heap, None);
    assert_eq!(text(&heap, nothing), "");
}

#[test]
fn test_for_each_visits_in_order_and_skips_empty_slots() {
    let mut heap = heap();
    let handles = [
        new_complex(&mut heap, 1.0, 0.0),
        None,
        new_complex(&mut heap, 2.0, 0.0),
        new_complex(&mut heap, 3.0, 0.0),
    ];
    let array = array_of(&mut heap, &handles);

    let seen = RefCell::new(Vec::new());
    for_each(
        &mut heap,
        Some(array),
        Some(|heap: &mut Heap, handle: ComplexHandle| {
            seen.borrow_mut().push(complex_parts(heap, Some(handle)).map(|(re, _)| re));
            1
        }),
    );
    assert_eq!(seen.into_inner(), vec![Some(1.0), Some(2.0), Some(3.0)]);
}

#[test]
fn test_for_each_callback_may_allocate() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut heap = Heap::new(HeapConfig { gc_threshold: 2, initial_capacity: 4 });
    let array = heap.make_array(2);
    heap.register_global_root(array);
    // Store each handle before the next allocation can collect it.
    let a = new_complex(&mut heap, 1.0, 1.0);
    heap.get_mut(array).unwrap().set(0, a.map(|h| h.id())).unwrap();
    let b = new_complex(&mut heap, 2.0, 2.0);
    heap.get_mut(array).unwrap().set(1, b.map(|h| h.id())).unwrap();

    let mut squares = Vec::new();
    for_each(
        &mut heap,
        Some(array),
        Some(|heap: &mut Heap, handle: ComplexHandle| {
            let square = multiply(heap, Some(handle), Some(handle));
            squares.push(complex_parts(heap, square));
            0
        }),
    );
    assert_eq!(squares, vec![Some((0.0, 2.0)), Some((0.0, 8.0))]);
}

#[test]
fn test_for_each_without_array_or_callback() {
    let mut heap = heap();
    let mut calls = 0;
    for_each(&mut heap, None, Some(|_: &mut Heap, _: ComplexHandle| {
        calls += 1;
        0
    }));
    let array = array_of(&mut heap, &[]);
    for_each(&mut heap, Some(array), Some(|_: &mut Heap, _: ComplexHandle| {
        calls += 1;
        0
    }));
    for_each::<fn(&mut Heap, ComplexHandle) -> i32>(&mut heap, Some(array), None);
    assert_eq!(calls, 0);
}

#[test]
fn test_finalizer_releases_native_value_once() {
    let before = allocation_stats();
    let mut heap = heap();
    let handle = new_complex(&mut heap, 1.0, 1.0).unwrap();
    assert_eq!(allocation_stats().live(), before.live() + 1);

    assert_eq!(heap.collect(), 1);
    assert_eq!(allocation_stats().live(), before.live());
    heap.collect();
    assert_eq!(allocation_stats().released, before.released + 1);
    assert!(unwrap(&heap, Some(handle)).is_none());
}

#[test]
fn test_explicit_free_then_collect_releases_once() {
    let before = allocation_stats();
    let mut heap = heap();
    let handle = new_complex(&mut heap, 5.0, 5.0);

    assert!(free_complex(&mut heap, handle));
    assert!(heap.get(handle.unwrap()).unwrap().value().is_inert());
    assert!(!free_complex(&mut heap, handle));
    assert_eq!(length(&heap, handle), 0.0);
    assert_eq!(allocation_stats().released, before.released + 1);

    heap.collect();
    assert_eq!(allocation_stats().released, before.released + 1);
    assert_eq!(allocation_stats().live(), before.live());
}

#[test]
fn test_heap_drop_releases_everything() {
    let before = allocation_stats();
    {
        let mut heap = heap();
        let a = new_complex(&mut heap, 1.0, 0.0);
        heap.register_global_root(a.unwrap());
        new_complex(&mut heap, 2.0, 0.0);
    }
    assert_eq!(allocation_stats().live(), before.live());
}

#[test]
fn test_length_is_modulus() {
    let mut heap = heap();
    let handle = new_complex(&mut heap, 3.0, -4.0);
    assert_eq!(length(&heap, handle), 5.0);
    assert_eq!(length(&heap, None), 0.0);
}

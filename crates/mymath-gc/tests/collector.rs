// Reachability and finalization behaviour of the host heap.

use std::cell::Cell;
use std::rc::Rc;

use mymath_gc::{External, Gc, GcError, Heap, HeapConfig};

type Probe = Rc<Cell<u32>>;

fn heap() -> Heap {
    let _ = env_logger::builder().is_test(true).try_init();
    Heap::new(HeapConfig::manual())
}

fn count_finalization(probe: &mut Probe) {
    probe.set(probe.get() + 1);
}

fn probe_object(heap: &mut Heap) -> (Gc<External<Probe>>, Probe) {
    let probe = Probe::default();
    let handle = heap.make_external_object(Rc::clone(&probe), count_finalization);
    (handle, probe)
}

#[test]
fn test_finalizer_runs_exactly_once_across_collections() {
    let mut heap = heap();
    let (handle, probe) = probe_object(&mut heap);

    assert_eq!(heap.collect(), 1);
    assert_eq!(probe.get(), 1);

    heap.collect();
    heap.collect();
    assert_eq!(probe.get(), 1);
    assert!(!heap.is_live(handle.id()));
    assert_eq!(heap.stats().finalized, 1);
}

#[test]
fn test_rooted_objects_survive() {
    let mut heap = heap();
    let (handle, probe) = probe_object(&mut heap);
    heap.push_root(handle);

    heap.collect();
    assert_eq!(probe.get(), 0);
    assert!(heap.is_live(handle.id()));

    heap.pop_roots(1);
    heap.collect();
    assert_eq!(probe.get(), 1);
}

#[test]
fn test_array_elements_are_traced() {
    let mut heap = heap();
    let array = heap.make_array(3);
    heap.register_global_root(array);

    let (first, first_probe) = probe_object(&mut heap);
    let (second, second_probe) = probe_object(&mut heap);
    {
        let slots = heap.get_mut(array).unwrap();
        slots.set(0, Some(first.id())).unwrap();
        slots.set(2, Some(second.id())).unwrap();
    }

    heap.collect();
    assert_eq!((first_probe.get(), second_probe.get()), (0, 0));

    heap.get_mut(array).unwrap().set(0, None).unwrap();
    heap.collect();
    assert_eq!((first_probe.get(), second_probe.get()), (1, 0));

    heap.unregister_global_root(array);
    heap.collect();
    assert_eq!(second_probe.get(), 1);
    assert!(!heap.is_live(array.id()));
}

#[test]
fn test_cycles_are_collected() {
    let mut heap = heap();
    let a = heap.make_array(1);
    let b = heap.make_array(1);
    heap.get_mut(a).unwrap().set(0, Some(b.id())).unwrap();
    heap.get_mut(b).unwrap().set(0, Some(a.id())).unwrap();

    heap.push_root(a);
    assert_eq!(heap.collect(), 0);
    heap.pop_roots(1);
    assert_eq!(heap.collect(), 2);
}

#[test]
fn test_stale_references_are_rejected() {
    let mut heap = heap();
    let (handle, _probe) = probe_object(&mut heap);
    heap.collect();
    assert!(matches!(heap.get(handle), Err(GcError::StaleReference(id)) if id == handle.id()));
    assert!(heap.get_mut(handle).is_err());
}

#[test]
fn test_out_of_bounds_array_access() {
    let mut heap = heap();
    let array = heap.make_array(2);
    let err = heap.get_mut(array).unwrap().set(5, None).unwrap_err();
    assert!(matches!(err, GcError::IndexOutOfBounds { index: 5, len: 2 }));
}

#[test]
fn test_shutdown_finalizes_survivors_once() {
    let mut heap = heap();
    let (kept, kept_probe) = probe_object(&mut heap);
    let (_dropped, dropped_probe) = probe_object(&mut heap);
    heap.register_global_root(kept);

    heap.collect();
    assert_eq!((kept_probe.get(), dropped_probe.get()), (0, 1));

    let stats = heap.shutdown();
    assert_eq!((kept_probe.get(), dropped_probe.get()), (1, 1));
    assert_eq!(stats.finalized, 2);
    assert_eq!(stats.live, 0);
}

#[test]
fn test_drop_runs_pending_finalizers() {
    let probe = {
        let mut heap = heap();
        let (_handle, probe) = probe_object(&mut heap);
        probe
    };
    assert_eq!(probe.get(), 1);
}

#[test]
fn test_strings_round_trip_units() {
    let mut heap = heap();
    let units: Vec<u16> = "hello".encode_utf16().collect();
    let s = heap.alloc_string(&units);
    let string = heap.get(s).unwrap();
    assert_eq!(string.len(), 5);
    assert_eq!(string.to_string(), "hello");

    let empty = heap.make_string(0, 0);
    assert!(heap.get(empty).unwrap().is_empty());
}

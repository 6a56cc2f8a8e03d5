use mymath_bridge::math;
use mymath_gc::Heap;

pub fn handle_version(heap: &mut Heap) {
    math::print_version();
    let version = math::version(heap);
    match heap.get(version) {
        Ok(text) => println!("major {}, full {}", math::version_major(), text),
        Err(err) => log::warn!("version string unavailable: {}", err),
    }
}

use mymath_bridge::math;
use mymath_gc::{FloatArray, Gc, Heap};
use mymath_native::STATUS_OK;

use crate::error::CliError;

type Batch = fn(&mut Heap, i32, Option<Gc<FloatArray>>, Option<Gc<FloatArray>>) -> i32;

pub fn handle_trig(heap: &mut Heap, x: f64) -> Result<(), CliError> {
    println!("x = {} (normal: {})", x, math::is_normal(x));
    println!("sin  {:.8}  cos  {:.8}  tan  {:.8}", math::sin(x), math::cos(x), math::tan(x));
    let xf = x as f32;
    println!("sinf {:.8}  cosf {:.8}  tanf {:.8}", math::sinf(xf), math::cosf(xf), math::tanf(xf));

    let mut tan = 0.0;
    if math::tan_with_errcode(x, Some(&mut tan)) == STATUS_OK {
        println!("tan_with_errcode {:.8}", tan);
    }

    let inputs = heap.make_float_array(vec![x]);
    heap.push_root(inputs);
    let outputs = heap.make_float_array(vec![0.0]);
    heap.push_root(outputs);

    let batches: [(&str, Batch); 3] = [
        ("sin_array", math::sin_array),
        ("cos_array", math::cos_array),
        ("tan_array", math::tan_array),
    ];
    for (name, batch) in batches {
        let status = batch(heap, 1, Some(inputs), Some(outputs));
        if status == STATUS_OK {
            println!("{} {:.8}", name, heap.get(outputs)?.as_slice()[0]);
        } else {
            log::warn!("{} returned status {}", name, status);
        }
    }

    heap.pop_roots(2);
    Ok(())
}

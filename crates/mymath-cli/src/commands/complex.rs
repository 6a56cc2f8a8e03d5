use mymath_bridge::{complex_to_host_string, length, multiply, new_complex, ComplexHandle};
use mymath_gc::Heap;

use crate::error::CliError;

/// Parses `re,im` into its two parts.
pub fn parse_complex(input: &str) -> Result<(f64, f64), CliError> {
    let syntax = || CliError::ComplexSyntax { input: input.to_owned() };
    let (real, img) = input.split_once(',').ok_or_else(syntax)?;
    let real = real.trim().parse().map_err(|_| syntax())?;
    let img = img.trim().parse().map_err(|_| syntax())?;
    Ok((real, img))
}

pub(crate) fn render(heap: &mut Heap, handle: Option<ComplexHandle>) -> Result<String, CliError> {
    let text = complex_to_host_string(heap, handle);
    Ok(heap.get(text)?.to_string_lossy())
}

pub fn handle_complex(heap: &mut Heap, a: &str, b: &str) -> Result<(), CliError> {
    let (ar, ai) = parse_complex(a)?;
    let (br, bi) = parse_complex(b)?;

    let a = new_complex(heap, ar, ai).ok_or(CliError::Allocation { operation: "creating operands" })?;
    heap.push_root(a);
    let b = new_complex(heap, br, bi).ok_or(CliError::Allocation { operation: "creating operands" })?;
    heap.push_root(b);

    let product = multiply(heap, Some(a), Some(b)).ok_or(CliError::Allocation { operation: "multiplying" })?;
    heap.push_root(product);

    println!(
        "({}) * ({}) = {}",
        render(heap, Some(a))?,
        render(heap, Some(b))?,
        render(heap, Some(product))?
    );
    println!("|product| = {:.8}", length(heap, Some(product)));

    heap.pop_roots(3);
    Ok(())
}

use std::path::PathBuf;

use miette::Diagnostic;
use mymath_gc::GcError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Failed to load heap configuration from {path}")]
    #[diagnostic(
        code(mymath::cli::config_error),
        help("the file should contain a [heap] table with gc_threshold and initial_capacity")
    )]
    Config {
        path: PathBuf,
        #[source]
        source: GcError,
    },

    #[error("Invalid environment override")]
    #[diagnostic(code(mymath::cli::env_error))]
    Environment(#[source] GcError),

    #[error("Cannot parse complex number `{input}`")]
    #[diagnostic(code(mymath::cli::complex_syntax), help("write complex numbers as `re,im`, e.g. `2,-3.5`"))]
    ComplexSyntax { input: String },

    #[error("Native allocation failed while {operation}")]
    #[diagnostic(code(mymath::cli::allocation_failed))]
    Allocation { operation: &'static str },

    #[error("Heap error")]
    #[diagnostic(code(mymath::cli::heap_error))]
    Heap(#[from] GcError),
}

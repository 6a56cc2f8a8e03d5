use thiserror::Error;

/// Status code reported across the C ABI on success.
pub const STATUS_OK: i32 = 0;
/// Status code reported across the C ABI on any guarded failure.
pub const STATUS_ERROR: i32 = -1;

/// Errors reported by the native math provider.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeError {
    #[error("Required pointer `{0}` was null.")]
    NullPointer(&'static str),

    #[error("Buffer `{name}` holds {actual} elements but {expected} were requested.")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

}

impl NativeError {
    /// The C-style status code for this error. Every guarded failure maps to `-1`.
    pub fn status(&self) -> i32 {
        STATUS_ERROR
    }
}

/// Collapses a provider result into the `0` / `-1` status convention.
pub fn to_status(result: Result<(), NativeError>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(err) => {
            log::debug!("native call failed: {}", err);
            err.status()
        }
    }
}

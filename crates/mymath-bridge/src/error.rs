use mymath_gc::GcError;
use mymath_native::NativeError;
use thiserror::Error;

/// Failures inside the adapter. The public surface turns these into the
/// sentinel values of the native contract after logging them.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Gc(#[from] GcError),

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("Formatted value does not fit in {capacity} bytes.")]
    FormatOverflow { capacity: usize },
}

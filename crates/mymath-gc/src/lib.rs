//! Host runtime for the mymath bridge: a single-threaded tracing heap.
//!
//! The heap stores host strings, reference arrays, float arrays and
//! *external* objects. An external object wraps memory the collector does not
//! manage (a native allocation, say) and carries a finalizer that releases it
//! when the object becomes unreachable.

pub mod collections;
pub mod config;
pub mod error;
mod heap;
pub mod object;
mod roots;
mod tracer;

pub use crate::collections::array::{FloatArray, RefArray};
pub use crate::collections::external::{External, Finalizer};
pub use crate::collections::string::HostString;
pub use crate::config::HeapConfig;
pub use crate::error::GcError;
pub use crate::heap::{GcStats, Heap};
pub use crate::object::{Gc, Object, ObjectId, Visitor};

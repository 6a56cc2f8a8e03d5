use std::any::Any;
use std::fmt;

use crate::object::Object;

/// Cleanup hook for an external object's payload.
pub type Finalizer<T> = fn(&mut T);

/// A heap object wrapping a payload the collector cannot see into, typically
/// memory owned by a foreign allocator, together with the finalizer that
/// releases it.
///
/// The finalizer is taken out before it runs, so it can fire at most once
/// however many times the object is finalized. It only receives the payload
/// and has no access to the heap.
pub struct External<T> {
    value: T,
    finalizer: Option<Finalizer<T>>,
}

impl<T: 'static> External<T> {
    pub fn new(value: T, finalizer: Finalizer<T>) -> Self {
        External { value, finalizer: Some(finalizer) }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Whether the finalizer is still pending.
    pub fn has_finalizer(&self) -> bool {
        self.finalizer.is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for External<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("External")
            .field("value", &self.value)
            .field("finalizer_pending", &self.finalizer.is_some())
            .finish()
    }
}

impl<T: 'static> Object for External<T> {
    fn finalize(&mut self) -> bool {
        match self.finalizer.take() {
            Some(finalizer) => {
                finalizer(&mut self.value);
                true
            }
            None => false,
        }
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

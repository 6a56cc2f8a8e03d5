use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Untyped identity of a heap object: slot index plus the slot's generation
/// at allocation time. A reclaimed slot bumps its generation, so ids held
/// past collection no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// Receives the outgoing references of an object during marking.
pub trait Visitor {
    fn visit(&mut self, id: ObjectId);
}

/// Anything that can live on the host heap.
pub trait Object: Any {
    /// Reports every heap reference held by this object.
    fn trace(&self, _visitor: &mut dyn Visitor) {}

    /// Called once when the object is reclaimed. Returns whether a
    /// registered finalizer actually ran.
    fn finalize(&mut self) -> bool {
        false
    }

    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Typed reference to a heap object.
///
/// `Gc` is a plain copyable id; all access goes through the [`crate::Heap`],
/// which checks liveness and type on every lookup.
pub struct Gc<T> {
    id: ObjectId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Gc<T> {
    /// Reinterprets an untyped id. The type is checked when the heap resolves it.
    pub fn from_id(id: ObjectId) -> Self {
        Gc { id, _marker: PhantomData }
    }

    pub fn id(self) -> ObjectId {
        self.id
    }
}

impl<T> Clone for Gc<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Gc<T> {}

impl<T> PartialEq for Gc<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Gc<T> {}

impl<T> Hash for Gc<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Gc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gc({})", self.id)
    }
}

impl<T> From<Gc<T>> for ObjectId {
    fn from(gc: Gc<T>) -> ObjectId {
        gc.id
    }
}

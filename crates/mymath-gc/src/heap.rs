use std::any;

use crate::collections::array::{FloatArray, RefArray};
use crate::collections::external::{External, Finalizer};
use crate::collections::string::HostString;
use crate::config::HeapConfig;
use crate::error::GcError;
use crate::object::{Gc, Object, ObjectId};
use crate::roots::RootSet;
use crate::tracer::{self, MarkStack};

pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) object: Option<Box<dyn Object>>,
    pub(crate) marked: bool,
}

/// Running totals kept by the heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GcStats {
    pub collections: usize,
    pub allocated: usize,
    pub reclaimed: usize,
    pub finalized: usize,
    pub live: usize,
}

/// A single-threaded tracing heap.
///
/// Objects are reachable if a root (shadow stack or global) leads to them;
/// everything else is reclaimed by [`Heap::collect`], running its finalizer
/// first. Allocation entry points pass through a safepoint which may collect,
/// so callers must root any object they still need before allocating.
pub struct Heap {
    config: HeapConfig,
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: RootSet,
    stats: GcStats,
    allocations_since_gc: usize,
}

impl Heap {
    pub fn new(config: HeapConfig) -> Self {
        log::debug!("creating heap with {:?}", config);
        Heap {
            slots: Vec::with_capacity(config.initial_capacity),
            free: Vec::new(),
            roots: RootSet::default(),
            stats: GcStats::default(),
            allocations_since_gc: 0,
            config,
        }
    }

    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Places `value` on the heap, after a safepoint.
    pub fn allocate<T: Object>(&mut self, value: T) -> Gc<T> {
        self.safepoint();
        Gc::from_id(self.place(Box::new(value)))
    }

    /// # Panics
    /// If every one of the `u32::MAX + 1` addressable slots is still live
    /// after a full collection.
    fn place(&mut self, object: Box<dyn Object>) -> ObjectId {
        if self.free.is_empty() && slot_index(self.slots.len()).is_none() {
            log::warn!("slot index space exhausted, forcing a collection");
            self.collect();
        }

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.object = Some(object);
                slot.marked = false;
                ObjectId { index, generation: slot.generation }
            }
            None => {
                let Some(index) = slot_index(self.slots.len()) else {
                    panic!("heap exhausted: all {} object slots are live", self.slots.len());
                };
                self.slots.push(Slot { generation: 0, object: Some(object), marked: false });
                ObjectId { index, generation: 0 }
            }
        };
        self.stats.allocated += 1;
        self.stats.live += 1;
        self.allocations_since_gc += 1;
        log::trace!("allocated {}", id);
        id
    }

    /// Allocates an external object whose `finalizer` runs when it is reclaimed.
    pub fn make_external_object<T: 'static>(&mut self, value: T, finalizer: Finalizer<T>) -> Gc<External<T>> {
        self.allocate(External::new(value, finalizer))
    }

    /// Allocates a string of `len` units, each set to `fill`.
    pub fn make_string(&mut self, len: usize, fill: u16) -> Gc<HostString> {
        self.allocate(HostString::filled(len, fill))
    }

    pub fn alloc_string(&mut self, units: &[u16]) -> Gc<HostString> {
        self.allocate(HostString::from_units(units))
    }

    /// Allocates a reference array of `len` null slots.
    pub fn make_array(&mut self, len: usize) -> Gc<RefArray> {
        self.allocate(RefArray::with_len(len))
    }

    pub fn make_float_array(&mut self, values: Vec<f64>) -> Gc<FloatArray> {
        self.allocate(FloatArray::new(values))
    }

    fn resolve(&self, id: ObjectId) -> Result<&(dyn Object + 'static), GcError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.object.as_deref())
            .ok_or(GcError::StaleReference(id))
    }

    fn resolve_mut(&mut self, id: ObjectId) -> Result<&mut (dyn Object + 'static), GcError> {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation => match slot.object.as_deref_mut() {
                Some(object) => Ok(object),
                None => Err(GcError::StaleReference(id)),
            },
            _ => Err(GcError::StaleReference(id)),
        }
    }

    pub fn get<T: Object>(&self, gc: Gc<T>) -> Result<&T, GcError> {
        let id = gc.id();
        let object = self.resolve(id)?;
        let found = object.type_name();
        object.as_any().downcast_ref::<T>().ok_or(GcError::TypeMismatch {
            id,
            expected: any::type_name::<T>(),
            found,
        })
    }

    pub fn get_mut<T: Object>(&mut self, gc: Gc<T>) -> Result<&mut T, GcError> {
        let id = gc.id();
        let object = self.resolve_mut(id)?;
        let found = object.type_name();
        object.as_any_mut().downcast_mut::<T>().ok_or(GcError::TypeMismatch {
            id,
            expected: any::type_name::<T>(),
            found,
        })
    }

    pub fn is_live(&self, id: ObjectId) -> bool {
        self.resolve(id).is_ok()
    }

    /// Pushes a scoped root. Pair with [`Heap::pop_roots`].
    pub fn push_root(&mut self, id: impl Into<ObjectId>) {
        self.roots.push(id.into());
    }

    pub fn pop_roots(&mut self, count: usize) {
        self.roots.pop(count);
    }

    pub fn root_depth(&self) -> usize {
        self.roots.depth()
    }

    pub fn register_global_root(&mut self, id: impl Into<ObjectId>) {
        let id = id.into();
        if !self.roots.register_global(id) {
            log::trace!("{} already registered as a global root", id);
        }
    }

    pub fn unregister_global_root(&mut self, id: impl Into<ObjectId>) {
        let id = id.into();
        if !self.roots.unregister_global(id) {
            log::trace!("{} was not a global root", id);
        }
    }

    /// Collects if the allocation threshold has been reached. Returns whether it did.
    pub fn safepoint(&mut self) -> bool {
        let threshold = self.config.gc_threshold;
        if threshold > 0 && self.allocations_since_gc >= threshold {
            self.collect();
            true
        } else {
            false
        }
    }

    /// Runs a full mark/sweep cycle and returns the number of objects reclaimed.
    pub fn collect(&mut self) -> usize {
        self.stats.collections += 1;
        log::debug!("collection #{} starting, {} live objects", self.stats.collections, self.stats.live);

        let mut stack = MarkStack::default();
        self.roots.visit(&mut stack);
        let marked = tracer::mark_reachable(&mut self.slots, &mut stack);

        let mut reclaimed = 0;
        let mut finalized = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.marked {
                slot.marked = false;
                continue;
            }
            let Some(mut object) = slot.object.take() else {
                continue;
            };
            if object.finalize() {
                finalized += 1;
            }
            log::trace!("reclaimed #{}@{} ({})", index, slot.generation, object.type_name());
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index as u32);
            reclaimed += 1;
        }

        self.stats.reclaimed += reclaimed;
        self.stats.finalized += finalized;
        self.stats.live -= reclaimed;
        self.allocations_since_gc = 0;

        log::debug!(
            "collection #{} done: {} marked, {} reclaimed, {} finalizers run",
            self.stats.collections,
            marked,
            reclaimed,
            finalized
        );
        reclaimed
    }

    pub fn stats(&self) -> GcStats {
        self.stats
    }

    /// Finalizes and drops every remaining object, returning the final statistics.
    pub fn shutdown(mut self) -> GcStats {
        self.release_all();
        self.stats
    }

    fn release_all(&mut self) {
        let mut finalized = 0;
        let mut released = 0;
        for slot in &mut self.slots {
            if let Some(mut object) = slot.object.take() {
                if object.finalize() {
                    finalized += 1;
                }
                slot.generation = slot.generation.wrapping_add(1);
                released += 1;
            }
        }
        self.stats.finalized += finalized;
        self.stats.reclaimed += released;
        self.stats.live -= released;
        if released > 0 {
            log::info!("heap shutdown: released {} objects, {} finalizers run", released, finalized);
        }
    }
}

/// Index for a new slot appended at `len`, if it is still addressable by an [`ObjectId`].
fn slot_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

impl Default for Heap {
    fn default() -> Self {
        Heap::new(HeapConfig::default())
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        self.release_all();
    }
}

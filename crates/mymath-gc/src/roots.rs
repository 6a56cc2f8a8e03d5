use rustc_hash::FxHashSet;

use crate::object::{ObjectId, Visitor};

/// The collector's root set: a shadow stack for scoped roots and a set of
/// global roots that stay registered until explicitly removed.
#[derive(Debug, Default)]
pub(crate) struct RootSet {
    shadow_stack: Vec<ObjectId>,
    globals: FxHashSet<ObjectId>,
}

impl RootSet {
    pub(crate) fn push(&mut self, id: ObjectId) {
        self.shadow_stack.push(id);
    }

    pub(crate) fn pop(&mut self, count: usize) {
        let keep = self.shadow_stack.len().saturating_sub(count);
        self.shadow_stack.truncate(keep);
    }

    pub(crate) fn depth(&self) -> usize {
        self.shadow_stack.len()
    }

    /// Returns `false` if `id` was already registered.
    pub(crate) fn register_global(&mut self, id: ObjectId) -> bool {
        self.globals.insert(id)
    }

    pub(crate) fn unregister_global(&mut self, id: ObjectId) -> bool {
        self.globals.remove(&id)
    }

    pub(crate) fn visit(&self, visitor: &mut dyn Visitor) {
        for &id in &self.shadow_stack {
            visitor.visit(id);
        }
        for &id in &self.globals {
            visitor.visit(id);
        }
    }
}

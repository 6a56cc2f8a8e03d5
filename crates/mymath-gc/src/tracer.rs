use crate::heap::Slot;
use crate::object::{ObjectId, Visitor};

/// Worklist of ids discovered but not yet scanned.
#[derive(Debug, Default)]
pub(crate) struct MarkStack {
    pending: Vec<ObjectId>,
}

impl Visitor for MarkStack {
    fn visit(&mut self, id: ObjectId) {
        self.pending.push(id);
    }
}

/// Marks everything reachable from the ids already on `stack`.
/// Stale ids are skipped. Returns the number of objects marked.
pub(crate) fn mark_reachable(slots: &mut [Slot], stack: &mut MarkStack) -> usize {
    let mut marked = 0;
    while let Some(id) = stack.pending.pop() {
        let Some(slot) = slots.get_mut(id.index as usize) else {
            continue;
        };
        if slot.generation != id.generation || slot.marked {
            continue;
        }
        let Some(object) = slot.object.as_deref() else {
            continue;
        };
        log::trace!("marking {} ({})", id, object.type_name());
        object.trace(stack);
        slot.marked = true;
        marked += 1;
    }
    marked
}

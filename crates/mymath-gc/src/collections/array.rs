use std::any::Any;

use crate::error::GcError;
use crate::object::{Object, ObjectId, Visitor};

/// Fixed-length array of nullable heap references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefArray {
    slots: Vec<Option<ObjectId>>,
}

impl RefArray {
    pub fn with_len(len: usize) -> Self {
        RefArray { slots: vec![None; len] }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<Option<ObjectId>, GcError> {
        self.slots
            .get(index)
            .copied()
            .ok_or(GcError::IndexOutOfBounds { index, len: self.slots.len() })
    }

    pub fn set(&mut self, index: usize, value: Option<ObjectId>) -> Result<(), GcError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(GcError::IndexOutOfBounds { index, len })?;
        *slot = value;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<ObjectId>> + '_ {
        self.slots.iter().copied()
    }
}

impl Object for RefArray {
    fn trace(&self, visitor: &mut dyn Visitor) {
        for id in self.slots.iter().flatten() {
            visitor.visit(*id);
        }
    }

    fn type_name(&self) -> &'static str {
        "RefArray"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Fixed-length array of doubles, used for batch transfers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatArray {
    values: Vec<f64>,
}

impl FloatArray {
    pub fn new(values: Vec<f64>) -> Self {
        FloatArray { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl Object for FloatArray {
    fn type_name(&self) -> &'static str {
        "FloatArray"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

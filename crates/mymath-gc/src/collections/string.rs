use std::any::Any;
use std::fmt;

use crate::object::Object;

/// A host string: a fixed sequence of 16-bit code units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostString {
    units: Vec<u16>,
}

impl HostString {
    /// A string of `len` copies of `fill`.
    pub fn filled(len: usize, fill: u16) -> Self {
        HostString { units: vec![fill; len] }
    }

    pub fn from_units(units: &[u16]) -> Self {
        HostString { units: units.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Decodes the units as UTF-16, replacing unpaired surrogates.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl fmt::Display for HostString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in char::decode_utf16(self.units.iter().copied()) {
            write!(f, "{}", c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}

impl Object for HostString {
    fn type_name(&self) -> &'static str {
        "HostString"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

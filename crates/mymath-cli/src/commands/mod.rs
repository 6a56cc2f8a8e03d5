pub mod complex;
pub mod demo;
pub mod reinit;
pub mod trig;
pub mod version;

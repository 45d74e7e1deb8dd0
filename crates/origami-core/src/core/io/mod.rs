//! Loading of origami system descriptions.

pub mod input;

pub mod check;
pub mod thermo;

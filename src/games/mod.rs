//! Game implementations.

pub mod wordgrid;

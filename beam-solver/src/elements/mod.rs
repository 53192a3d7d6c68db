//! Materials and patch geometry

mod material;
mod patch;

pub use material::{Material, MaterialStore};
pub use patch::{NodeLocator, Patch, PatchMesh};

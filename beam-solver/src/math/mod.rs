//! Linear algebra types and the structural assembly interface

pub mod sam;

use nalgebra::{DVector, Vector3};

pub use sam::{Sam, StructuralAssembly};

pub type Vec = DVector<f64>;
pub type Vec3 = Vector3<f64>;

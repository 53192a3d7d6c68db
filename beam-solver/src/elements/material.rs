//! Material properties and the material/thickness store

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Linear isotropic material for beam and plate bending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus)
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Mass density
    pub rho: f64,
    /// Plane stress constitutive assumption
    pub plane_stress: bool,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, nu: f64, rho: f64, plane_stress: bool) -> Self {
        Self {
            e,
            nu,
            rho,
            plane_stress,
        }
    }

    /// Beam material: no lateral contraction, plane stress
    pub fn beam(e: f64, rho: f64) -> Self {
        Self::new(e, 0.0, rho, true)
    }

    /// Bending stiffness per unit width, E t^3 / 12 (1 - nu^2)
    pub fn flexural_rigidity(&self, thickness: f64) -> f64 {
        self.e * thickness.powi(3) / (12.0 * (1.0 - self.nu * self.nu))
    }

    /// Mass per unit area for the given thickness
    pub fn mass_density(&self, thickness: f64) -> f64 {
        self.rho * thickness
    }
}

/// Materials and their thicknesses, indexed in registration order.
///
/// The two collections always have the same length; entry `i` of each
/// belongs to the same material property.
#[derive(Debug, Clone, Default)]
pub struct MaterialStore {
    materials: Vec<Arc<Material>>,
    thicknesses: Vec<f64>,
}

impl MaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material with its thickness (0 = keep current), returning its index
    pub fn push(&mut self, material: Material, thickness: f64) -> usize {
        self.materials.push(Arc::new(material));
        self.thicknesses.push(thickness);
        self.materials.len() - 1
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material and thickness at `index`, clamped to the last entry.
    ///
    /// Returns `None` only when the store is empty.
    pub fn get_clamped(&self, index: usize) -> Option<(&Arc<Material>, f64)> {
        let last = self.materials.len().checked_sub(1)?;
        let index = index.min(last);
        Some((&self.materials[index], self.thicknesses[index]))
    }

    pub fn first(&self) -> Option<(&Arc<Material>, f64)> {
        self.get_clamped(0)
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn thicknesses(&self) -> &[f64] {
        &self.thicknesses
    }
}

//! Kirchhoff-Love plate/beam problem data consumed by the integrand

use std::sync::Arc;

use crate::elements::Material;
use crate::loads::ScalarFuncHandle;
use crate::math::Vec3;

/// Default plate/beam thickness
pub const DEFAULT_THICKNESS: f64 = 0.1;

/// Active material, thickness and loading of a Kirchhoff-Love plate or
/// Euler-Bernoulli beam (`nsd == 1`).
///
/// The material is shared with the model's material store, never copied.
#[derive(Debug, Clone)]
pub struct KirchhoffLovePlate {
    nsd: usize,
    version: i32,
    gravity: f64,
    thickness: f64,
    material: Option<Arc<Material>>,
    pressure: Option<ScalarFuncHandle>,
}

impl KirchhoffLovePlate {
    pub fn new(nsd: usize, version: i32) -> Self {
        Self {
            nsd,
            version,
            gravity: 0.0,
            thickness: DEFAULT_THICKNESS,
            material: None,
            pressure: None,
        }
    }

    pub fn nsd(&self) -> usize {
        self.nsd
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn set_gravity(&mut self, g: f64) {
        self.gravity = g;
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn set_thickness(&mut self, t: f64) {
        self.thickness = t;
    }

    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = Some(material);
    }

    pub fn pressure(&self) -> Option<&ScalarFuncHandle> {
        self.pressure.as_ref()
    }

    /// Set the active pressure; `None` means zero pressure
    pub fn set_pressure(&mut self, pressure: Option<ScalarFuncHandle>) {
        self.pressure = pressure;
    }

    pub fn pressure_at(&self, x: &Vec3) -> f64 {
        self.pressure.as_ref().map_or(0.0, |p| p.value(x))
    }

    /// Transverse load per unit length/area: pressure plus self weight
    pub fn body_force_at(&self, x: &Vec3) -> f64 {
        let weight = self
            .material
            .as_ref()
            .map_or(0.0, |m| m.mass_density(self.thickness) * self.gravity);
        self.pressure_at(x) + weight
    }
}

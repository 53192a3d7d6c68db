//! Beam model - load and material bookkeeping for C1 beam analysis

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::AnalysisOptions;
use crate::anasol::AnalyticSolution;
use crate::elements::{Material, MaterialStore, NodeLocator};
use crate::error::{FEAError, FEAResult};
use crate::loads::{self, PointLoad, PressureRegistry, ScalarFuncHandle};
use crate::math::{StructuralAssembly, Vec as FEVec};
use crate::problem::KirchhoffLovePlate;
use crate::property::{PropertyKind, PropertyTable};
use crate::results::ErrorNorms;

/// Driver state for a NURBS-based analysis of C1-continuous beams.
///
/// Holds the materials, pressures and point loads declared in the input,
/// and hands the right ones to the [`KirchhoffLovePlate`] problem as the
/// surrounding solver walks through its phases: parse, preprocess,
/// assemble/solve and report.
#[derive(Debug, Clone, Default)]
pub struct BeamModel {
    options: AnalysisOptions,
    problem: Option<KirchhoffLovePlate>,
    materials: MaterialStore,
    pressures: PressureRegistry,
    props: PropertyTable,
    point_loads: Vec<PointLoad>,
    anasol: Option<AnalyticSolution>,
}

impl BeamModel {
    /// Create an empty model with default beam options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with validated options
    pub fn with_options(options: AnalysisOptions) -> FEAResult<Self> {
        options.validate()?;
        debug!("Analysis options: {options:?}");
        Ok(Self {
            options,
            ..Self::default()
        })
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    // ========================
    // Problem access
    // ========================

    pub fn problem(&self) -> Option<&KirchhoffLovePlate> {
        self.problem.as_ref()
    }

    /// The beam problem, or an error if none is attached
    pub fn problem_mut(&mut self) -> FEAResult<&mut KirchhoffLovePlate> {
        self.problem.as_mut().ok_or(FEAError::NoBeamProblem)
    }

    /// Attach a problem, replacing any existing one
    pub fn set_problem(&mut self, problem: KirchhoffLovePlate) {
        self.problem = Some(problem);
    }

    /// The beam problem, created from the options if missing
    pub(crate) fn ensure_problem(&mut self, version: Option<i32>) -> &mut KirchhoffLovePlate {
        let nsd = self.options.elasticity.dimension.nsd();
        let version = version.unwrap_or(self.options.version);
        self.problem
            .get_or_insert_with(|| KirchhoffLovePlate::new(nsd, version))
    }

    // ========================
    // Model building
    // ========================

    pub fn properties(&self) -> &PropertyTable {
        &self.props
    }

    pub fn properties_mut(&mut self) -> &mut PropertyTable {
        &mut self.props
    }

    /// Set gravity on the beam problem
    pub fn set_gravity(&mut self, g: f64) -> FEAResult<()> {
        self.problem_mut()?.set_gravity(g);
        info!("Gravitation constant: {g}");
        Ok(())
    }

    /// Register a material with its thickness (0 = keep current thickness).
    ///
    /// A positive `code` is bound to the new material index. The first
    /// material becomes the active one on the problem. Returns the index.
    pub fn add_material(&mut self, code: i32, material: Material, thickness: f64) -> FEAResult<usize> {
        if self.problem.is_none() {
            return Err(FEAError::NoBeamProblem);
        }

        info!(
            "Material code {code}: {} {} {thickness}",
            material.e, material.rho
        );
        let index = self.materials.push(material, thickness);
        self.props
            .set_property_type(code, PropertyKind::Material, Some(index));

        if index == 0 {
            self.activate_material(0)?;
        }
        Ok(index)
    }

    /// Register a pressure function under a property code
    pub fn add_pressure(&mut self, code: i32, func: ScalarFuncHandle) {
        self.pressures.insert(code, func);
        self.props.set_property_type(code, PropertyKind::BodyLoad, None);
    }

    /// Declare a point load; it is resolved to a node by [`Self::preprocess`]
    pub fn add_point_load(&mut self, load: PointLoad) {
        info!(
            "Point: P{} xi = {} load = {}",
            load.patch, load.xi, load.magnitude
        );
        self.point_loads.push(load);
    }

    /// Set the analytical solution unless one is already defined
    pub fn set_analytic_solution(&mut self, sol: AnalyticSolution) -> bool {
        if self.anasol.is_some() {
            return false;
        }
        self.anasol = Some(sol);
        true
    }

    pub fn analytic_solution(&self) -> Option<&AnalyticSolution> {
        self.anasol.as_ref()
    }

    pub fn has_analytic_solution(&self) -> bool {
        self.anasol.is_some()
    }

    pub fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    pub fn pressures(&self) -> &PressureRegistry {
        &self.pressures
    }

    pub fn point_loads(&self) -> &[PointLoad] {
        &self.point_loads
    }

    // ========================
    // Per-patch initialisation
    // ========================

    /// Make material `index` active, clamped to the last defined material
    pub fn init_material(&mut self, index: usize) -> FEAResult<()> {
        debug!("Initialising material {index}");
        self.activate_material(index)
    }

    fn activate_material(&mut self, index: usize) -> FEAResult<()> {
        let (material, thickness) = self
            .materials
            .get_clamped(index)
            .ok_or(FEAError::NoMaterials)?;
        let material = Arc::clone(material);

        let klp = self.problem_mut()?;
        klp.set_material(material);
        if thickness != 0.0 {
            klp.set_thickness(thickness);
        }
        Ok(())
    }

    /// Make the pressure of a 1-based patch active (zero if it has none)
    pub fn init_body_load(&mut self, patch: usize) -> FEAResult<()> {
        let pressure = self.pressures.for_patch(&self.props, patch);
        debug!(
            "Initialising body load on patch #{patch}: {}",
            if pressure.is_some() { "pressure" } else { "none" }
        );
        self.problem_mut()?.set_pressure(pressure);
        Ok(())
    }

    // ========================
    // Solution phases
    // ========================

    /// Resolve point loads to mesh nodes, dropping those not at a node
    pub fn preprocess(&mut self, mesh: &dyn NodeLocator) -> FEAResult<()> {
        let declared = std::mem::take(&mut self.point_loads);
        self.point_loads = loads::resolve_point_loads(declared, mesh);
        Ok(())
    }

    /// Add the resolved point loads to the system load vector
    pub fn assemble_discrete_terms(
        &self,
        sam: &dyn StructuralAssembly,
        vector: &mut FEVec,
    ) -> FEAResult<()> {
        loads::assemble_point_loads(&self.point_loads, sam, vector)
    }

    /// External energy: `base` plus the work of the point loads on the
    /// first (primary) solution vector, indexed by node.
    ///
    /// Fails if a load is not resolved to a node or the primary solution
    /// does not cover its node.
    pub fn external_energy(&self, base: f64, solution: &[FEVec]) -> FEAResult<f64> {
        let primary = solution.first();
        let work = loads::point_load_energy(&self.point_loads, |node| {
            primary.and_then(|u| u.get(node.checked_sub(1)?).copied())
        })?;
        Ok(base + work)
    }

    /// Log the error estimate report for one group of norms
    pub fn print_norm_group(&self, g_norm: &[f64], r_norm: &[f64], name: &str) -> FEAResult<ErrorNorms> {
        let norms = ErrorNorms::new(g_norm, r_norm, self.has_analytic_solution())?;
        info!("{}", norms.report(name));
        Ok(norms)
    }
}

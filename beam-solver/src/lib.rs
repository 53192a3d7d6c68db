//! Beam Solver - load and material binding for C1 beam analysis
//!
//! This library is the property-driven layer between the input description
//! of an isogeometric Euler-Bernoulli beam analysis and the solver stages
//! that consume it:
//! - Materials and thicknesses bound to property codes
//! - Distributed pressures as scalar functions, selected per patch
//! - Point loads resolved from parametric positions to mesh nodes
//! - Point load assembly and external energy
//! - Error norm reports with effectivity indices
//!
//! ## Example
//! ```rust
//! use beam_solver::prelude::*;
//!
//! let mut model = BeamModel::new();
//! model
//!     .parse_xml_str(
//!         r#"<eulerbernoulli>
//!              <isotropic E="2.1e11" rho="7850" thickness="0.05"/>
//!              <pointload patch="1" xi="0.5">-1000</pointload>
//!              <pointload patch="1" xi="0.3">-1000</pointload>
//!            </eulerbernoulli>"#,
//!     )
//!     .unwrap();
//!
//! // Resolve load points against a patch with 5 nodes
//! let mut mesh = PatchMesh::new();
//! mesh.add_straight_patch(5, 2.0).unwrap();
//! model.preprocess(&mesh).unwrap();
//! assert_eq!(model.point_loads().len(), 1);
//!
//! // Scatter into a load vector, node 1 clamped
//! let sam = Sam::new(5, &[1]);
//! let mut b = sam.zero_vector();
//! model.assemble_discrete_terms(&sam, &mut b).unwrap();
//! assert_eq!(b[1], -1000.0);
//! ```

pub mod analysis;
pub mod anasol;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod parser;
pub mod problem;
pub mod property;
pub mod results;

#[cfg(test)]
mod testing;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, Dimension, ElasticityOptions};
    pub use crate::anasol::AnalyticSolution;
    pub use crate::elements::{Material, MaterialStore, NodeLocator, Patch, PatchMesh};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::loads::{PointLoad, PressureFunction, PressureRegistry, ScalarFunc};
    pub use crate::math::{Sam, StructuralAssembly};
    pub use crate::model::BeamModel;
    pub use crate::problem::KirchhoffLovePlate;
    pub use crate::property::{Property, PropertyKind, PropertyTable};
    pub use crate::results::{ErrorNorms, NormReport};
}

//! Analysis configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FEAError, FEAResult};

/// Number of parametric/spatial dimensions of the discretisation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Dimension {
    #[default]
    One,
    Two,
    Three,
}

impl Dimension {
    pub fn nsd(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            n => Err(format!("unsupported dimension {n}")),
        }
    }
}

impl From<Dimension> for usize {
    fn from(dim: Dimension) -> Self {
        dim.nsd()
    }
}

/// Elasticity options that only have a meaning for some dimensions.
///
/// Plane strain and axisymmetry are 2D options; for 1D and 3D models they
/// must stay off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticityOptions {
    /// Dimension of the model these options apply to
    pub dimension: Dimension,
    /// Plane strain instead of plane stress (2D only)
    pub plane_strain: bool,
    /// Axisymmetric formulation (2D only)
    pub axisymmetry: bool,
    /// Output of integration point results for visualisation
    pub gauss_point_output: bool,
}

impl ElasticityOptions {
    /// Options for a model of the given dimension with every flag off
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FEAResult<()> {
        if self.dimension != Dimension::Two && (self.plane_strain || self.axisymmetry) {
            return Err(FEAError::InvalidOptions(format!(
                "plane strain and axisymmetry require a 2D model, got {}D",
                self.dimension.nsd()
            )));
        }
        Ok(())
    }
}

/// Options for a beam analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Dimension-specific elasticity flags
    pub elasticity: ElasticityOptions,
    /// Integrand version used when the problem is created from keyword input
    pub version: i32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            elasticity: ElasticityOptions::new(Dimension::One),
            version: 1,
        }
    }
}

impl AnalysisOptions {
    /// Options for a C1 beam (1D) analysis
    pub fn beam() -> Self {
        Self::default()
    }

    /// Load options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> FEAResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate options from a JSON string
    pub fn from_json(text: &str) -> FEAResult<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> FEAResult<()> {
        self.elasticity.validate()
    }

    /// Set the integrand version
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Enable integration point output
    pub fn with_gauss_point_output(mut self) -> Self {
        self.elasticity.gauss_point_output = true;
        self
    }
}

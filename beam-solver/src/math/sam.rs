//! Node-to-equation bookkeeping for scattering nodal values into system vectors
//!
//! A C1 beam discretisation carries a single unknown (the transverse
//! deflection) per control point, so each node maps to at most one equation.

use super::Vec;
use crate::error::{FEAError, FEAResult};

/// Assembly primitive used to add nodal contributions to a system vector
pub trait StructuralAssembly {
    /// Number of equations (length of a system vector)
    fn num_equations(&self) -> usize;

    /// Add `value` to the equation of the 1-based `node`.
    ///
    /// Contributions to constrained nodes are dropped. A node outside the
    /// node table is an error.
    fn scatter(&self, vector: &mut Vec, value: f64, node: usize) -> FEAResult<()>;
}

/// Simple node-to-equation table
#[derive(Debug, Clone, Default)]
pub struct Sam {
    /// Equation number per node, 1-based, 0 = constrained
    meqn: std::vec::Vec<usize>,
    neq: usize,
}

impl Sam {
    /// Number the equations of `num_nodes` nodes, skipping the constrained ones
    pub fn new(num_nodes: usize, constrained: &[usize]) -> Self {
        let mut meqn = vec![0; num_nodes];
        let mut neq = 0;
        for (i, eqn) in meqn.iter_mut().enumerate() {
            if !constrained.contains(&(i + 1)) {
                neq += 1;
                *eqn = neq;
            }
        }
        Self { meqn, neq }
    }

    pub fn num_nodes(&self) -> usize {
        self.meqn.len()
    }

    /// Equation number of a 1-based node, `None` if constrained
    pub fn equation(&self, node: usize) -> FEAResult<Option<usize>> {
        if node < 1 || node > self.meqn.len() {
            return Err(FEAError::NodeOutOfRange {
                node,
                max: self.meqn.len(),
            });
        }
        Ok(match self.meqn[node - 1] {
            0 => None,
            eqn => Some(eqn),
        })
    }

    /// Create a zero vector sized for this equation system
    pub fn zero_vector(&self) -> Vec {
        Vec::zeros(self.neq)
    }
}

impl StructuralAssembly for Sam {
    fn num_equations(&self) -> usize {
        self.neq
    }

    fn scatter(&self, vector: &mut Vec, value: f64, node: usize) -> FEAResult<()> {
        if let Some(eqn) = self.equation(node)? {
            if eqn > vector.len() {
                return Err(FEAError::EquationOutOfRange {
                    eqn,
                    len: vector.len(),
                });
            }
            vector[eqn - 1] += value;
        }
        Ok(())
    }
}

//! One-dimensional spline patches and nodal point lookup

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::math::Vec3;

/// Relative tolerance for matching a parameter value to a nodal parameter
const PARAM_TOL: f64 = 1.0e-10;

/// Mesh query used to resolve parametric load points.
///
/// Patch and node numbers are 1-based.
pub trait NodeLocator {
    /// Global node located exactly at parameter `xi` of `patch`, with its
    /// physical coordinates. `None` if `xi` is not a nodal parameter.
    fn locate_node(&self, patch: usize, xi: f64) -> Option<(usize, Vec3)>;
}

/// A 1D patch described by its nodal parameter grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patch {
    /// Nodal parameter values, strictly ascending
    params: Vec<f64>,
    /// Physical coordinates of the nodes
    coords: Vec<[f64; 3]>,
    /// Global number of the first node minus one
    node_offset: usize,
}

impl Patch {
    /// Create a patch from matching nodal parameters and coordinates
    pub fn new(params: Vec<f64>, coords: Vec<[f64; 3]>, node_offset: usize) -> FEAResult<Self> {
        if params.len() != coords.len() {
            return Err(FEAError::InvalidInput(format!(
                "patch has {} nodal parameters but {} nodes",
                params.len(),
                coords.len()
            )));
        }
        if params.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FEAError::InvalidInput(
                "nodal parameters must be strictly ascending".to_string(),
            ));
        }
        Ok(Self {
            params,
            coords,
            node_offset,
        })
    }

    /// Straight patch along X with `num_nodes` equidistant nodal parameters on [0,1]
    pub fn straight(num_nodes: usize, length: f64, node_offset: usize) -> FEAResult<Self> {
        if num_nodes < 2 {
            return Err(FEAError::InvalidInput(format!(
                "a patch needs at least two nodes, got {num_nodes}"
            )));
        }
        let n = (num_nodes - 1) as f64;
        let params: Vec<f64> = (0..num_nodes).map(|i| i as f64 / n).collect();
        let coords = params.iter().map(|&u| [u * length, 0.0, 0.0]).collect();
        Self::new(params, coords, node_offset)
    }

    pub fn num_nodes(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Local 0-based index of the node at parameter `xi`, if any
    pub fn find_param(&self, xi: f64) -> Option<usize> {
        let tol = |u: f64| PARAM_TOL * u.abs().max(1.0);
        let pos = self.params.partition_point(|&u| u < xi - tol(u));
        self.params
            .get(pos)
            .filter(|&&u| (u - xi).abs() <= tol(u))
            .map(|_| pos)
    }
}

/// A collection of patches with a global node numbering
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchMesh {
    patches: Vec<Patch>,
}

impl PatchMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a patch; its node offset must continue the global numbering
    pub fn add_patch(&mut self, patch: Patch) -> usize {
        self.patches.push(patch);
        self.patches.len()
    }

    /// Append a straight patch numbered after the existing nodes
    pub fn add_straight_patch(&mut self, num_nodes: usize, length: f64) -> FEAResult<usize> {
        let patch = Patch::straight(num_nodes, length, self.num_nodes())?;
        Ok(self.add_patch(patch))
    }

    pub fn patch(&self, patch: usize) -> Option<&Patch> {
        patch.checked_sub(1).and_then(|i| self.patches.get(i))
    }

    pub fn num_patches(&self) -> usize {
        self.patches.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.patches
            .iter()
            .map(|p| p.node_offset + p.num_nodes())
            .max()
            .unwrap_or(0)
    }
}

impl NodeLocator for PatchMesh {
    fn locate_node(&self, patch: usize, xi: f64) -> Option<(usize, Vec3)> {
        let p = self.patch(patch)?;
        let local = p.find_param(xi)?;
        let [x, y, z] = p.coords[local];
        Some((p.node_offset + local + 1, Vec3::new(x, y, z)))
    }
}

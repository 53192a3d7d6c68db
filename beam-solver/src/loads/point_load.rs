//! Concentrated loads at parametric points of a patch

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::elements::NodeLocator;
use crate::error::{FEAError, FEAResult};
use crate::math::{StructuralAssembly, Vec as FEVec, Vec3};

/// A transverse point load given by patch and parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// 1-based patch number
    pub patch: usize,
    /// Parameter value of the load point
    pub xi: f64,
    /// Load magnitude
    pub magnitude: f64,
    /// Global node at the load point, set by [`resolve_point_loads`]
    pub node: Option<usize>,
    /// Physical coordinates of the load point, set with `node`
    pub x: Vec3,
}

impl PointLoad {
    /// Create an unresolved point load
    pub fn new(patch: usize, xi: f64, magnitude: f64) -> Self {
        Self {
            patch,
            xi,
            magnitude,
            node: None,
            x: Vec3::zeros(),
        }
    }

    /// Node the load was resolved to
    pub fn resolved_node(&self) -> FEAResult<usize> {
        self.node.ok_or(FEAError::UnresolvedPointLoad {
            patch: self.patch,
            xi: self.xi,
        })
    }
}

/// Resolve load points to mesh nodes.
///
/// Loads whose parameter value is not a nodal parameter of their patch are
/// dropped with a warning. The surviving loads keep their relative order and
/// are reported with their position in the filtered list.
pub fn resolve_point_loads(loads: Vec<PointLoad>, mesh: &dyn NodeLocator) -> Vec<PointLoad> {
    let resolved: Vec<PointLoad> = loads
        .into_iter()
        .filter_map(|mut load| match mesh.locate_node(load.patch, load.xi) {
            Some((node, x)) => {
                load.node = Some(node);
                load.x = x;
                Some(load)
            }
            None => {
                warn!(
                    "Load point ({}) on patch #{} is not a nodal point (ignored).",
                    load.xi, load.patch
                );
                None
            }
        })
        .collect();

    for (i, load) in resolved.iter().enumerate() {
        if let Some(node) = load.node {
            info!(
                "Load point #{}: patch #{} u=({}), node #{}, X = {} {} {}",
                i + 1,
                load.patch,
                load.xi,
                node,
                load.x.x,
                load.x.y,
                load.x.z
            );
        }
    }

    resolved
}

/// Add resolved point loads to a system load vector.
///
/// Any failing scatter, or a load not yet resolved to a node, aborts the
/// whole call.
pub fn assemble_point_loads(
    loads: &[PointLoad],
    sam: &dyn StructuralAssembly,
    vector: &mut FEVec,
) -> FEAResult<()> {
    for load in loads {
        sam.scatter(vector, load.magnitude, load.resolved_node()?)?;
    }
    Ok(())
}

/// Work done by resolved point loads on the primary solution.
///
/// `displacement` gives the primary solution value at a 1-based node.
pub fn point_load_energy(
    loads: &[PointLoad],
    displacement: impl Fn(usize) -> Option<f64>,
) -> FEAResult<f64> {
    loads.iter().try_fold(0.0, |acc, load| {
        let node = load.resolved_node()?;
        let u = displacement(node).ok_or(FEAError::SolutionOutOfRange(node))?;
        Ok(acc + load.magnitude * u)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::PatchMesh;
    use crate::math::Sam;

    fn mesh() -> PatchMesh {
        let mut mesh = PatchMesh::new();
        mesh.add_straight_patch(5, 4.0).unwrap();
        mesh
    }

    #[test]
    fn test_resolve_keeps_nodal_points() {
        let loads = vec![PointLoad::new(1, 0.5, 10.0), PointLoad::new(1, 1.0, -2.0)];
        let resolved = resolve_point_loads(loads, &mesh());
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].node, Some(3));
        assert_eq!(resolved[0].x, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(resolved[1].node, Some(5));
    }

    #[test]
    fn test_resolve_drops_non_nodal_points() {
        let loads = vec![
            PointLoad::new(1, 0.3, 1.0),
            PointLoad::new(2, 0.5, 2.0),
            PointLoad::new(1, 0.25, 3.0),
        ];
        let resolved = resolve_point_loads(loads, &mesh());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].magnitude, 3.0);
        assert_eq!(resolved[0].node, Some(2));
    }

    #[test]
    fn test_assemble_point_loads() {
        let sam = Sam::new(5, &[1]);
        let loads = resolve_point_loads(
            vec![PointLoad::new(1, 0.5, 10.0), PointLoad::new(1, 0.5, 5.0)],
            &mesh(),
        );
        let mut b = sam.zero_vector();
        assemble_point_loads(&loads, &sam, &mut b).unwrap();
        assert_eq!(b[1], 15.0);
        assert_eq!(b.sum(), 15.0);
    }

    #[test]
    fn test_assemble_aborts_on_bad_node() {
        let sam = Sam::new(3, &[]);
        let mut load = PointLoad::new(1, 1.0, 1.0);
        load.node = Some(9);
        let mut b = sam.zero_vector();
        assert!(assemble_point_loads(&[load], &sam, &mut b).is_err());
    }

    #[test]
    fn test_non_nodal_point_is_reported() {
        let logs = crate::testing::capture_logs();
        resolve_point_loads(vec![PointLoad::new(1, 0.3125, 1.0)], &mesh());
        assert!(logs
            .warnings()
            .iter()
            .any(|msg| msg.contains("(0.3125)") && msg.contains("patch #1")));
    }

    #[test]
    fn test_assemble_unresolved_load_fails() {
        let sam = Sam::new(5, &[]);
        let mut b = sam.zero_vector();
        let result = assemble_point_loads(&[PointLoad::new(1, 0.5, -100.0)], &sam, &mut b);
        assert!(matches!(
            result,
            Err(FEAError::UnresolvedPointLoad { patch: 1, xi }) if xi == 0.5
        ));
    }

    #[test]
    fn test_point_load_energy() {
        let mut a = PointLoad::new(1, 0.0, 2.0);
        a.node = Some(1);
        let mut b = PointLoad::new(1, 1.0, 3.0);
        b.node = Some(2);
        let u = [0.5, -1.0];
        let w = point_load_energy(&[a.clone(), b], |n| u.get(n - 1).copied()).unwrap();
        assert_eq!(w, 2.0 * 0.5 - 3.0);

        a.node = Some(7);
        assert!(matches!(
            point_load_energy(&[a], |n| u.get(n - 1).copied()),
            Err(FEAError::SolutionOutOfRange(7))
        ));
    }

    #[test]
    fn test_point_load_from_json() {
        let load: PointLoad = serde_json::from_str(
            r#"{ "patch": 2, "xi": 0.5, "magnitude": -10.0, "node": null, "x": [0.0, 0.0, 0.0] }"#,
        )
        .unwrap();
        assert_eq!(load, PointLoad::new(2, 0.5, -10.0));
    }

    #[test]
    fn test_energy_of_unresolved_load_fails() {
        let loads = [PointLoad::new(2, 0.25, 1.0)];
        assert!(matches!(
            point_load_energy(&loads, |_| Some(1.0)),
            Err(FEAError::UnresolvedPointLoad { patch: 2, .. })
        ));
    }
}

use std::io::Cursor;

use approx::assert_relative_eq;
use beam_solver::math::Vec as FEVec;
use beam_solver::prelude::*;

/// Two-patch beam: patch 1 has 5 nodes on [0,2], patch 2 has 3 nodes on [2,4]
fn two_patch_mesh() -> PatchMesh {
    let mut mesh = PatchMesh::new();
    mesh.add_straight_patch(5, 2.0).unwrap();
    let params = vec![0.0, 0.5, 1.0];
    let coords = vec![[2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [4.0, 0.0, 0.0]];
    mesh.add_patch(Patch::new(params, coords, 5).unwrap());
    mesh
}

const XML_INPUT: &str = r#"
<simulation>
  <eulerbernoulli>
    <gravity g="0"/>
    <isotropic set="Left" E="2.1e11" rho="7850" thickness="0.05"/>
    <isotropic set="Right" E="7.0e10" rho="2700" thickness="0.04"/>
    <pointload patch="1" xi="1.0">-1000</pointload>
    <pointload patch="2" xi="0.3">-500</pointload>
    <pointload patch="2" xi="1.0">250</pointload>
    <pressure set="Right">-20</pressure>
  </eulerbernoulli>
</simulation>"#;

fn xml_model() -> BeamModel {
    let mut model = BeamModel::new();
    model.properties_mut().add_set("Left", &[1]);
    model.properties_mut().add_set("Right", &[2]);
    assert_eq!(model.parse_xml_str(XML_INPUT).unwrap(), 1);
    model
}

#[test]
fn test_xml_materials_follow_declaration_order() {
    let model = xml_model();
    assert_eq!(model.materials().len(), 2);
    assert_eq!(model.materials().thicknesses(), &[0.05, 0.04]);

    let right: Vec<_> = model
        .properties()
        .on_patch(PropertyKind::Material, 2)
        .collect();
    assert_eq!(right.len(), 1);
    assert_eq!(right[0].index, 1);
}

#[test]
fn test_per_patch_initialisation() {
    let mut model = xml_model();
    let x = nalgebra::Vector3::new(3.0, 0.0, 0.0);

    model.init_material(1).unwrap();
    model.init_body_load(2).unwrap();
    let klp = model.problem().unwrap();
    assert_eq!(klp.material().unwrap().e, 7.0e10);
    assert_eq!(klp.thickness(), 0.04);
    assert_eq!(klp.pressure_at(&x), -20.0);

    model.init_material(0).unwrap();
    model.init_body_load(1).unwrap();
    let klp = model.problem().unwrap();
    assert_eq!(klp.material().unwrap().e, 2.1e11);
    assert_eq!(klp.pressure_at(&x), 0.0);
}

#[test]
fn test_full_load_cycle() {
    let mesh = two_patch_mesh();
    let mut model = xml_model();

    model.preprocess(&mesh).unwrap();
    let loads = model.point_loads();
    assert_eq!(loads.len(), 2);
    assert_eq!(loads[0].node, Some(5));
    assert_eq!(loads[1].node, Some(8));
    assert_eq!(loads[1].x.x, 4.0);

    // Clamped at the left end: node 1 carries no equation
    let sam = Sam::new(mesh.num_nodes(), &[1]);
    let mut b = sam.zero_vector();
    model.assemble_discrete_terms(&sam, &mut b).unwrap();
    assert_eq!(b.len(), 7);
    assert_eq!(b[3], -1000.0);
    assert_eq!(b[6], 250.0);

    let u = FEVec::from_fn(mesh.num_nodes(), |i, _| -(i as f64) * 1.0e-3);
    let energy = model.external_energy(0.25, &[u]).unwrap();
    assert_relative_eq!(energy, 0.25 + (-1000.0) * (-4.0e-3) + 250.0 * (-7.0e-3), epsilon = 1e-12);
}

#[test]
fn test_assembly_failure_is_reported() {
    let mut model = xml_model();
    model.preprocess(&two_patch_mesh()).unwrap();

    // Equation table that only knows the first patch
    let sam = Sam::new(5, &[]);
    let mut b = sam.zero_vector();
    assert!(matches!(
        model.assemble_discrete_terms(&sam, &mut b),
        Err(FEAError::NodeOutOfRange { node: 8, max: 5 })
    ));
}

#[test]
fn test_keyword_input_with_analytic_norms() {
    let input = "\
ISOTROPIC 2
1 1000.0 1.0 0.1
2 2000.0
POINTLOAD 2
1 0.25 1.0
1 0.3 2.0
ANASOL EXPRESSION 1
x*(1-x)
";
    let mut model = BeamModel::new();
    assert_eq!(model.parse_keyword_input(&mut Cursor::new(input)).unwrap(), 3);
    assert_eq!(model.materials().len(), 2);

    model.preprocess(&two_patch_mesh()).unwrap();
    assert_eq!(model.point_loads().len(), 1);
    assert_eq!(model.point_loads()[0].node, Some(2));

    let g = [1.0, 0.5, 0.0, 0.0, 0.1, 0.3, 0.0, 0.0];
    let r = [0.0, 0.0, 0.8, 1.6];
    let norms = model.print_norm_group(&g, &r, "Global").unwrap();
    assert_eq!(norms.exact_error, Some(0.3));
    assert_relative_eq!(norms.effectivity().unwrap(), 0.5 / 1.6);
    assert_relative_eq!(norms.effectivity_exact().unwrap(), 0.8 / 1.6);
    assert_relative_eq!(norms.effectivity_residual().unwrap(), 0.6 / 1.6);
    assert_relative_eq!(norms.relative(norms.error), 62.5);
}

#[test]
fn test_options_drive_problem_creation() {
    let options = AnalysisOptions::beam().with_version(3);
    let mut model = BeamModel::with_options(options).unwrap();
    model
        .parse_keyword_input(&mut Cursor::new("GRAVITY 9.81\n"))
        .unwrap();
    let klp = model.problem().unwrap();
    assert_eq!(klp.nsd(), 1);
    assert_eq!(klp.version(), 3);
}

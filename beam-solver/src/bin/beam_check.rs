//! Beam input checker
//!
//! Parses a beam input file, optionally resolves its point loads on a
//! straight patch, and prints what the solver would receive.
//!
//! usage: beam-check <input> [nodes] [length]
//!
//! Analysis options are read from the JSON file named by `BEAM_OPTIONS`
//! when set.

use anyhow::{bail, Context};
use beam_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        bail!("usage: beam-check <input> [nodes] [length]");
    }

    let options = match std::env::var("BEAM_OPTIONS") {
        Ok(path) => AnalysisOptions::from_json_file(&path)
            .with_context(|| format!("reading options from {path}"))?,
        Err(_) => AnalysisOptions::beam(),
    };

    let mut model = BeamModel::from_input_file(&args[1], options)
        .with_context(|| format!("parsing {}", args[1]))?;

    println!("=== Beam input: {} ===\n", args[1]);
    println!("Materials: {}", model.materials().len());
    for (i, (mat, thk)) in model
        .materials()
        .materials()
        .iter()
        .zip(model.materials().thicknesses())
        .enumerate()
    {
        println!("  #{}: E = {}, rho = {}, thickness = {}", i + 1, mat.e, mat.rho, thk);
    }
    println!("Pressures: {}", model.pressures().len());
    println!("Point loads: {}", model.point_loads().len());
    println!(
        "Analytical solution: {}",
        if model.has_analytic_solution() { "yes" } else { "no" }
    );

    let Some(nodes) = args.get(2) else {
        return Ok(());
    };
    let nodes: usize = nodes.parse().context("invalid node count")?;
    let length: f64 = match args.get(3) {
        Some(l) => l.parse().context("invalid patch length")?,
        None => 1.0,
    };

    let mut mesh = PatchMesh::new();
    mesh.add_straight_patch(nodes, length)?;
    model.preprocess(&mesh)?;

    let sam = Sam::new(mesh.num_nodes(), &[]);
    let mut load_vector = sam.zero_vector();
    model.assemble_discrete_terms(&sam, &mut load_vector)?;

    println!("\n=== Resolved on a straight patch: {nodes} nodes, length {length} ===");
    for (i, load) in model.point_loads().iter().enumerate() {
        if let Some(node) = load.node {
            println!(
                "  Load #{}: node {} at X = {:.4}, P = {}",
                i + 1,
                node,
                load.x.x,
                load.magnitude
            );
        }
    }
    println!("Total nodal load: {}", load_vector.sum());

    Ok(())
}

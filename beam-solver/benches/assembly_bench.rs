//! Benchmarks for point load resolution and assembly

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use beam_solver::prelude::*;

fn create_loaded_model(num_nodes: usize, num_loads: usize) -> (BeamModel, PatchMesh) {
    let mut mesh = PatchMesh::new();
    mesh.add_straight_patch(num_nodes, 10.0).unwrap();

    let mut model = BeamModel::new();
    model
        .parse_xml_str(r#"<eulerbernoulli><isotropic E="2.1e11"/></eulerbernoulli>"#)
        .unwrap();

    let n = (num_nodes - 1) as f64;
    for i in 0..num_loads {
        // Every other load misses the nodal grid
        let xi = if i % 2 == 0 {
            (i % num_nodes) as f64 / n
        } else {
            0.5 / n
        };
        model.add_point_load(PointLoad::new(1, xi, -1.0));
    }
    (model, mesh)
}

fn bench_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");
    for &(nodes, loads) in &[(101, 100), (1001, 1000)] {
        group.bench_function(format!("{nodes}_nodes_{loads}_loads"), |b| {
            b.iter_batched(
                || create_loaded_model(nodes, loads),
                |(mut model, mesh)| {
                    model.preprocess(&mesh).unwrap();
                    black_box(model)
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let (mut model, mesh) = create_loaded_model(1001, 1000);
    model.preprocess(&mesh).unwrap();
    let sam = Sam::new(mesh.num_nodes(), &[1]);

    c.bench_function("assemble_1000_point_loads", |b| {
        b.iter(|| {
            let mut rhs = sam.zero_vector();
            model.assemble_discrete_terms(&sam, &mut rhs).unwrap();
            black_box(rhs)
        })
    });
}

criterion_group!(benches, bench_preprocess, bench_assembly);
criterion_main!(benches);

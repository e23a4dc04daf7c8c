//! Benchmarks for shader generation and CPU-side stepping.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sparkstorm::gpu::fbo::simulation_shader_wgsl;
use sparkstorm::gpu::points::point_cloud_shader_wgsl;
use sparkstorm::{Attractor, FieldConfig, IntegrationConfig, Integrator, Vec3};

fn bench_shader_gen(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader_gen");

    for attractor in Attractor::ALL {
        group.bench_function(attractor.tag(), |b| {
            let config = FieldConfig::new(attractor, 512, 512);
            b.iter(|| black_box(simulation_shader_wgsl(&config)))
        });
    }

    group.bench_function("point_cloud", |b| {
        b.iter(|| black_box(point_cloud_shader_wgsl()))
    });

    group.finish();
}

fn bench_cpu_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_step");

    let integrator = Integrator::new(
        Attractor::Lorenz,
        IntegrationConfig::new(0.005).with_axis_scale(Vec3::new(1.0, 1.18, 0.8)),
    )
    .unwrap();

    group.bench_function("lorenz_single_step", |b| {
        let p = Vec3::new(2.0, 4.0, 4.0);
        b.iter(|| black_box(integrator.step(black_box(p))))
    });

    group.bench_function("lorenz_bulk_5000", |b| {
        b.iter(|| black_box(integrator.integrate(Vec3::new(2.0, 4.0, 4.0), 5000)))
    });

    group.finish();
}

criterion_group!(benches, bench_shader_gen, bench_cpu_step);
criterion_main!(benches);

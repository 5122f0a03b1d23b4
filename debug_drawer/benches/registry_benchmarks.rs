use criterion::{black_box, criterion_group, criterion_main, Criterion};

use omni_debug_draw::{
    DebugDrawConfig, DebugDrawer, DebugShapeRegistry, DrawCommand, DrawShape, Quat, ShapeKind,
    Vec3, VisualLog,
};

fn shape_for(kind: ShapeKind, i: usize) -> DrawShape {
    let p = Vec3::new(i as f32, 0.0, 0.0);
    match kind {
        ShapeKind::Circle => DrawShape::circle(p, 1.0, Quat::IDENTITY),
        ShapeKind::Line => DrawShape::line(p, p + Vec3::Y),
        ShapeKind::Box => DrawShape::aabb(p, Vec3::ONE),
        ShapeKind::Sphere => DrawShape::sphere(p, 1.0),
        ShapeKind::Capsule => DrawShape::capsule(p, 0.5, 1.0, Quat::IDENTITY),
        ShapeKind::Arrow => DrawShape::arrow(p, p + Vec3::Z, 0.2),
        ShapeKind::Text => DrawShape::text(p),
        ShapeKind::Cone => DrawShape::cone(p, Vec3::X, 1.0, 15.0, 15.0),
    }
}

fn populated(config: DebugDrawConfig, count: usize) -> DebugShapeRegistry {
    let mut registry = DebugShapeRegistry::new(config);
    for i in 0..count {
        let kind = ShapeKind::ALL[i % ShapeKind::ALL.len()];
        registry.add_shape(
            DrawCommand::new(shape_for(kind, i)).with_lifetime(f32::MAX),
            format!("shape{i}"),
        );
    }
    registry
}

// ---------------------------------------------------------------------------
// Tick
// ---------------------------------------------------------------------------

fn bench_tick_both_sinks(c: &mut Criterion) {
    let drawer = DebugDrawer::new();
    let mut log = VisualLog::new(4096);
    let mut registry = populated(DebugDrawConfig::default(), 1000);
    c.bench_function("tick_1000_shapes_both_sinks", |b| {
        b.iter(|| {
            drawer.advance_frame();
            black_box(registry.tick(black_box(0.016), &drawer, &mut log));
        });
    });
}

fn bench_tick_no_sinks(c: &mut Criterion) {
    let drawer = DebugDrawer::new();
    let mut log = VisualLog::new(16);
    let mut registry = populated(DebugDrawConfig::disabled(), 1000);
    c.bench_function("tick_1000_shapes_no_sinks", |b| {
        b.iter(|| black_box(registry.tick(black_box(0.016), &drawer, &mut log)));
    });
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

fn bench_add_generated_keys(c: &mut Criterion) {
    c.bench_function("add_shape_generated_key", |b| {
        let mut registry = DebugShapeRegistry::default();
        b.iter(|| {
            black_box(registry.add_shape_auto(DrawCommand::new(DrawShape::sphere(Vec3::ZERO, 1.0))))
        });
    });
}

criterion_group!(
    benches,
    bench_tick_both_sinks,
    bench_tick_no_sinks,
    bench_add_generated_keys
);
criterion_main!(benches);

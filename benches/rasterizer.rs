use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minirender::camera::Camera;
use minirender::light::DirectionalLight;
use minirender::math::{Vec2i, Vec3};
use minirender::mesh::parse_obj;
use minirender::model::Model;
use minirender::projection::Projection;
use minirender::render::{draw_line, draw_triangle, Framebuffer, Pipeline, RenderMode};

const BUFFER_WIDTH: i32 = 800;
const BUFFER_HEIGHT: i32 = 600;

fn create_buffer() -> Framebuffer {
    Framebuffer::new(0, 0, BUFFER_WIDTH, BUFFER_HEIGHT).unwrap()
}

fn small_triangle() -> [Vec2i; 3] {
    [Vec2i::new(100, 100), Vec2i::new(120, 100), Vec2i::new(110, 120)]
}

fn medium_triangle() -> [Vec2i; 3] {
    [Vec2i::new(100, 100), Vec2i::new(300, 100), Vec2i::new(200, 300)]
}

fn large_triangle() -> [Vec2i; 3] {
    [Vec2i::new(50, 50), Vec2i::new(750, 100), Vec2i::new(400, 550)]
}

fn benchmark_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");

    for (name, end) in [
        ("horizontal", (799, 300)),
        ("diagonal", (799, 599)),
        ("steep", (420, 599)),
    ] {
        group.bench_with_input(BenchmarkId::new("bresenham", name), &end, |b, &(x1, y1)| {
            let mut fb = create_buffer();
            b.iter(|| draw_line(black_box(0), black_box(0), x1, y1, 0xFF0000, &mut fb));
        });
    }

    group.finish();
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("barycentric", name), &triangle, |b, tri| {
            let mut fb = create_buffer();
            b.iter(|| draw_triangle(black_box(*tri), 0xFF0000, &mut fb));
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // Grid of small triangles
    let triangles: Vec<[Vec2i; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col * 40;
                let y = row * 30;
                [Vec2i::new(x, y), Vec2i::new(x + 35, y), Vec2i::new(x + 17, y + 25)]
            })
        })
        .collect();

    group.bench_function("barycentric_400_triangles", |b| {
        let mut fb = create_buffer();
        b.iter(|| {
            for tri in &triangles {
                draw_triangle(black_box(*tri), 0xFF0000, &mut fb);
            }
        });
    });

    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let cube = parse_obj(include_str!("../assets/cube.obj").as_bytes()).unwrap();
    let model = Model::new("cube", cube);
    let view = Camera::new(Vec3::new(0.0, 0.0, 3.0)).view_matrix();

    for mode in [RenderMode::Filled, RenderMode::Wireframe] {
        let pipeline = Pipeline::new(
            Projection::from_degrees(60.0, 800.0 / 600.0, 0.1, 100.0),
            DirectionalLight::default(),
            mode,
        );
        group.bench_function(format!("cube_{mode:?}"), |b| {
            let mut fb = create_buffer();
            b.iter(|| pipeline.draw_model(black_box(&model), &view, &mut fb));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_lines,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_pipeline
);
criterion_main!(benches);

// Copyright 2026 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the transform pass, hit testing, and pointer-move dispatch
//! over a spreadsheet-shaped scene: a sheet container holding a grid of cells.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use tabula_dispatch::EventBoundary;
use tabula_scene::{Cursor, EventKind, NodeId, Point, PointerEvent, Scene};

const CELL_W: f64 = 80.0;
const CELL_H: f64 = 24.0;

fn build_sheet(rows: usize, cols: usize) -> (Scene, NodeId) {
    let mut scene = Scene::new();
    let root = scene.root();
    let sheet = scene.insert_named("sheet");
    scene.add_child(root, sheet).unwrap();
    scene.transform_mut(sheet).unwrap().set_position((40.0, 20.0));
    for r in 0..rows {
        for c in 0..cols {
            let cell = scene.insert();
            scene.add_child(sheet, cell).unwrap();
            scene
                .transform_mut(cell)
                .unwrap()
                .set_position((c as f64 * CELL_W, r as f64 * CELL_H));
            let node = scene.node_mut(cell).unwrap();
            node.set_hit_area(Some(Box::new(Rect::new(0.0, 0.0, CELL_W, CELL_H))));
            node.set_cursor(Cursor::Cell);
        }
    }
    scene.update_transforms();
    (scene, sheet)
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_transforms");
    for &(rows, cols) in &[(10, 10), (50, 26), (200, 26)] {
        let (mut scene, sheet) = build_sheet(rows, cols);
        group.bench_function(BenchmarkId::new("clean", rows * cols), |b| {
            b.iter(|| black_box(scene.update_transforms()));
        });
        group.bench_function(BenchmarkId::new("scrolled", rows * cols), |b| {
            let mut y = 0.0;
            b.iter(|| {
                y -= 1.0;
                scene.transform_mut(sheet).unwrap().set_y(y);
                black_box(scene.update_transforms())
            });
        });
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &(rows, cols) in &[(10, 10), (50, 26), (200, 26)] {
        let (scene, _) = build_sheet(rows, cols);
        let last = Point::new(
            40.0 + (cols as f64 - 0.5) * CELL_W,
            20.0 + (rows as f64 - 0.5) * CELL_H,
        );
        let first = Point::new(40.0 + CELL_W / 2.0, 20.0 + CELL_H / 2.0);
        let miss = Point::new(-10.0, -10.0);
        for (name, pt) in [("topmost", last), ("bottommost", first), ("miss", miss)] {
            group.bench_with_input(BenchmarkId::new(name, rows * cols), &pt, |b, &pt| {
                b.iter(|| black_box(scene.hit_test(black_box(pt))));
            });
        }
    }
    group.finish();
}

fn bench_pointer_move(c: &mut Criterion) {
    let (mut scene, _) = build_sheet(50, 26);
    let mut boundary = EventBoundary::default();
    c.bench_function("pointer_move_sweep", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 7.0) % (26.0 * CELL_W);
            let mut ev = PointerEvent::new(EventKind::MouseMove, Point::new(40.0 + x, 200.0));
            boundary.dispatch(&mut scene, &mut ev);
            black_box(boundary.cursor())
        });
    });
}

criterion_group!(benches, bench_transforms, bench_hit_test, bench_pointer_move);
criterion_main!(benches);

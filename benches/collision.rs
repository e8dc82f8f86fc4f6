//! Benchmarks for drop-target resolution.
//!
//! These benchmarks measure collision detection over boards large enough
//! that per-frame resolution cost would be visible during a drag.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ratatui::layout::Rect;
use std::collections::HashMap;
use triage_tui::board::{BoardStore, Column, Priority, Status, Task, User};
use triage_tui::dnd::{CollisionState, DragId, DroppableMap};

fn flat_task(id: String) -> Task {
    Task {
        id,
        name: "bench task".to_string(),
        description: String::new(),
        status: Status::Open,
        priority: Priority::Medium,
        assignees: vec![],
        reporter: User {
            id: "u1".to_string(),
            name: "Bench".to_string(),
            email: String::new(),
        },
        labels: vec![],
        comments: vec![],
        attachments: vec![],
        due: None,
    }
}

/// Build a board of `columns` columns with `per_column` tasks each, plus
/// the matching droppable registry laid out side by side.
///
fn build(columns: usize, per_column: usize) -> (BoardStore, DroppableMap) {
    let mut column_list = Vec::new();
    let mut tasks = HashMap::new();
    let mut map = DroppableMap::default();
    for c in 0..columns {
        let column_id = format!("col-{}", c);
        column_list.push(Column {
            id: column_id.clone(),
            name: column_id.clone(),
        });
        let x = (c * 30) as u16;
        map.register_column(&column_id, Rect::new(x, 0, 30, 200));
        let mut list = Vec::new();
        for t in 0..per_column {
            let task_id = format!("task-{}-{}", c, t);
            map.register_task(&task_id, &column_id, Rect::new(x + 1, (t * 3) as u16 + 1, 28, 3));
            list.push(flat_task(task_id));
        }
        tasks.insert(column_id, list);
    }
    (BoardStore::new(column_list, tasks), map)
}

fn bench_pointer_within(c: &mut Criterion) {
    let (store, map) = build(8, 60);
    c.bench_function("collision_pointer_within_480_cards", |b| {
        let mut state = CollisionState::default();
        let active = DragId::Task("task-0-0".to_string());
        b.iter(|| {
            state.resolve(
                black_box(&active),
                black_box((95, 50)),
                black_box(Rect::new(91, 49, 28, 3)),
                &map,
                &store,
            )
        })
    });
}

fn bench_rect_fallback(c: &mut Criterion) {
    let (store, map) = build(8, 60);
    c.bench_function("collision_rect_fallback_480_cards", |b| {
        let mut state = CollisionState::default();
        let active = DragId::Task("task-0-0".to_string());
        // Pointer outside every region; the dragged rect still overlaps.
        b.iter(|| {
            state.resolve(
                black_box(&active),
                black_box((250, 250)),
                black_box(Rect::new(100, 40, 28, 3)),
                &map,
                &store,
            )
        })
    });
}

fn bench_column_drag(c: &mut Criterion) {
    let (store, map) = build(12, 40);
    c.bench_function("collision_column_drag_12_columns", |b| {
        let mut state = CollisionState::default();
        let active = DragId::Column("col-0".to_string());
        b.iter(|| {
            state.resolve(
                black_box(&active),
                black_box((200, 10)),
                black_box(Rect::new(185, 0, 30, 200)),
                &map,
                &store,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_pointer_within,
    bench_rect_fallback,
    bench_column_drag
);
criterion_main!(benches);

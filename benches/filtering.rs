//! Benchmarks for the board filter overlay.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use triage_tui::board::{
    filter_board, BoardStore, Column, Priority, Status, Task, TaskFilters, User,
};

fn build_board(columns: usize, per_column: usize) -> BoardStore {
    let mut column_list = Vec::new();
    let mut tasks = HashMap::new();
    for c in 0..columns {
        let column_id = format!("col-{}", c);
        column_list.push(Column {
            id: column_id.clone(),
            name: column_id.clone(),
        });
        let list: Vec<Task> = (0..per_column)
            .map(|t| Task {
                id: format!("task-{}-{}", c, t),
                name: format!("Review flagged submission {}", t),
                description: String::new(),
                status: if t % 2 == 0 {
                    Status::Open
                } else {
                    Status::Resolved
                },
                priority: if t % 3 == 0 {
                    Priority::High
                } else {
                    Priority::Low
                },
                assignees: vec![],
                reporter: User {
                    id: format!("u{}", t % 7),
                    name: "Reporter".to_string(),
                    email: String::new(),
                },
                labels: vec!["content".to_string()],
                comments: vec![],
                attachments: vec![],
                due: None,
            })
            .collect();
        tasks.insert(column_id, list);
    }
    BoardStore::new(column_list, tasks)
}

fn bench_name_query(c: &mut Criterion) {
    let store = build_board(6, 200);
    let filters = TaskFilters {
        name_query: "flagged submission 19".to_string(),
        ..TaskFilters::default()
    };
    c.bench_function("filter_name_query_1200_tasks", |b| {
        b.iter(|| filter_board(black_box(&store), black_box(&filters)))
    });
}

fn bench_conjunction(c: &mut Criterion) {
    let store = build_board(6, 200);
    let filters = TaskFilters {
        statuses: vec![Status::Open],
        priorities: vec![Priority::High],
        reporter_ids: vec!["u3".to_string()],
        label: Some("content".to_string()),
        ..TaskFilters::default()
    };
    c.bench_function("filter_conjunction_1200_tasks", |b| {
        b.iter(|| filter_board(black_box(&store), black_box(&filters)))
    });
}

criterion_group!(benches, bench_name_query, bench_conjunction);
criterion_main!(benches);

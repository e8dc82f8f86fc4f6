//! Offline sample boards.
//!
//! When no Console API endpoint is configured the application still needs
//! boards to drive; these generators fabricate plausible data with `fake`.

use super::resource::{BoardKind, Column, Priority, Status, Task, User};
use super::store::BoardStore;
use fake::{Fake, Faker};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

const MODERATION_COLUMNS: [&str; 4] = ["Reported", "In Review", "Actioned", "Dismissed"];
const SUPPORT_COLUMNS: [&str; 4] = ["New", "Waiting on Customer", "Escalated", "Resolved"];
const IMPROVEMENT_COLUMNS: [&str; 3] = ["Suggested", "Drafting", "Published"];

const MODERATION_SUBJECTS: [&str; 5] = [
    "Flagged comment in lesson discussion",
    "Reported profile avatar",
    "Inappropriate quiz submission",
    "Spam link in course review",
    "Abusive direct message report",
];
const SUPPORT_SUBJECTS: [&str; 5] = [
    "Parent cannot link child account",
    "Subscription renewal charged twice",
    "Progress report email not delivered",
    "Classroom seats not provisioned",
    "Password reset loop on tablet app",
];
const IMPROVEMENT_SUBJECTS: [&str; 5] = [
    "Rework fractions video narration",
    "Add captions to chemistry labs",
    "Split reading unit into two levels",
    "Refresh outdated geography maps",
    "Clarify algebra practice hints",
];

const LABELS: [&str; 6] = ["video", "quiz", "billing", "accounts", "content", "abuse"];

/// Return the column names used for a board kind.
///
fn column_names(kind: BoardKind) -> &'static [&'static str] {
    match kind {
        BoardKind::Moderation => &MODERATION_COLUMNS,
        BoardKind::Support => &SUPPORT_COLUMNS,
        BoardKind::Improvement => &IMPROVEMENT_COLUMNS,
    }
}

fn subjects(kind: BoardKind) -> &'static [&'static str] {
    match kind {
        BoardKind::Moderation => &MODERATION_SUBJECTS,
        BoardKind::Support => &SUPPORT_SUBJECTS,
        BoardKind::Improvement => &IMPROVEMENT_SUBJECTS,
    }
}

/// Fabricate one task for the board kind with the given id.
///
fn sample_task<R: Rng>(rng: &mut R, kind: BoardKind, id: String, staff: &[User]) -> Task {
    let mut task: Task = Faker.fake();
    task.id = id;
    task.name = subjects(kind).choose(rng).unwrap().to_string();
    task.status = *[Status::Open, Status::InProgress, Status::Resolved]
        .choose(rng)
        .unwrap();
    task.priority = *[
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ]
    .choose(rng)
    .unwrap();
    task.assignees = staff.choose(rng).map(|u| vec![u.to_owned()]).unwrap_or_default();
    task.reporter = staff.choose(rng).cloned().unwrap_or_else(|| Faker.fake());
    task.labels = vec![LABELS.choose(rng).unwrap().to_string()];
    task.comments.truncate(2);
    task.attachments.truncate(1);
    task
}

/// Fabricate a full board of the given kind. Ids are stable per position so
/// repeated generation produces comparable boards.
///
pub fn sample_board(kind: BoardKind) -> BoardStore {
    let mut rng = rand::thread_rng();
    let staff: Vec<User> = (0..4)
        .map(|i| {
            let mut user: User = Faker.fake();
            user.id = format!("{}-staff-{}", kind.key(), i);
            user
        })
        .collect();

    let columns: Vec<Column> = column_names(kind)
        .iter()
        .enumerate()
        .map(|(i, name)| Column {
            id: format!("{}-col-{}", kind.key(), i),
            name: name.to_string(),
        })
        .collect();

    let mut tasks = HashMap::new();
    let mut serial = 0;
    for column in &columns {
        let count = rng.gen_range(1..=5);
        let list: Vec<Task> = (0..count)
            .map(|_| {
                serial += 1;
                sample_task(
                    &mut rng,
                    kind,
                    format!("{}-task-{}", kind.key(), serial),
                    &staff,
                )
            })
            .collect();
        tasks.insert(column.id.to_owned(), list);
    }

    BoardStore::new(columns, tasks)
}

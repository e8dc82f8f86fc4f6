use chrono::NaiveDate;
use fake::Dummy;

/// Defines user data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Defines ticket status values.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Hash)]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// Return the display label for the status.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In progress",
            Status::Resolved => "Resolved",
            Status::Closed => "Closed",
        }
    }
}

/// Defines ticket priority values, lowest first.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Return the display label for the priority.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

/// Defines comment data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub author: User,
    pub text: String,
    pub created_at: Option<String>,
}

/// Defines attachment data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Defines an inclusive start/end due range.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq)]
pub struct DueRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Defines task data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assignees: Vec<User>,
    pub reporter: User,
    pub labels: Vec<String>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
    pub due: Option<DueRange>,
}

impl Task {
    /// Return whether any of the task's assignees has the given user id.
    ///
    pub fn has_assignee(&self, user_id: &str) -> bool {
        self.assignees.iter().any(|u| u.id == user_id)
    }
}

/// Defines column data structure. Display order of columns is the position
/// in the board's column list, not a field.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Column {
    pub id: String,
    pub name: String,
}

/// Identifies one of the three triage boards served by the console.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardKind {
    Moderation,
    Support,
    Improvement,
}

impl BoardKind {
    /// Return every board kind in display order.
    ///
    pub fn all() -> [BoardKind; 3] {
        [
            BoardKind::Moderation,
            BoardKind::Support,
            BoardKind::Improvement,
        ]
    }

    /// Return the backend key for the board.
    ///
    pub fn key(&self) -> &'static str {
        match self {
            BoardKind::Moderation => "moderation",
            BoardKind::Support => "support",
            BoardKind::Improvement => "improvement",
        }
    }

    /// Return the display title for the board.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            BoardKind::Moderation => "Moderation",
            BoardKind::Support => "Support Tickets",
            BoardKind::Improvement => "Content Improvement",
        }
    }

    /// Parse a backend key into a board kind.
    ///
    pub fn from_key(key: &str) -> Option<BoardKind> {
        match key {
            "moderation" => Some(BoardKind::Moderation),
            "support" => Some(BoardKind::Support),
            "improvement" => Some(BoardKind::Improvement),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn has_assignee() {
        let user: User = Faker.fake();
        let mut task: Task = Faker.fake();
        task.assignees = vec![user.to_owned()];
        assert!(task.has_assignee(&user.id));
        assert!(!task.has_assignee("not-an-assignee"));
    }

    #[test]
    fn board_kind_keys_round_trip() {
        for kind in BoardKind::all() {
            assert_eq!(Some(kind), BoardKind::from_key(kind.key()));
        }
        assert_eq!(None, BoardKind::from_key("analytics"));
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Urgent);
        assert!(Priority::Medium < Priority::High);
    }
}

// 🎓 Domain Models - Students and Courses
// A Student is a flat identity record; a Course owns the enrollment state
// (roster + waitlist) that the registrar mutates.

use serde::{Deserialize, Serialize};

// ============================================================================
// STUDENT
// ============================================================================

/// Student record keyed by Banner ID.
///
/// The id is validated once at the registrar boundary (non-blank, "B" prefix,
/// case-insensitive) and treated as opaque afterwards. Email format is not
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Banner ID - unique key, starts with "B" (case-insensitive)
    pub id: String,

    /// Full name (non-empty)
    pub name: String,

    /// Contact email (non-empty, format unvalidated)
    pub email: String,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Student {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// One-line display form: `B001 Alice <alice@uca.edu>`
    pub fn summary(&self) -> String {
        format!("{} {} <{}>", self.id, self.name, self.email)
    }
}

// ============================================================================
// COURSE
// ============================================================================

/// Course record keyed by course code, owning its roster and waitlist.
///
/// Invariants (upheld by the registrar, not enforced here):
/// - `roster.len() <= capacity` after every registrar mutation
/// - a student id appears in at most one of {roster, waitlist}
/// - roster order = enrollment order, waitlist order = FIFO wait order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Course code - unique key (e.g. "CSCI4490")
    pub code: String,

    /// Course title (non-empty)
    pub title: String,

    /// Seat capacity, 1..=500
    pub capacity: u32,

    /// Student ids currently holding a seat, in enrollment order
    pub roster: Vec<String>,

    /// Student ids awaiting a seat, in FIFO order
    pub waitlist: Vec<String>,
}

impl Course {
    /// Create a course with an empty roster and waitlist.
    pub fn new(code: impl Into<String>, title: impl Into<String>, capacity: u32) -> Self {
        Course {
            code: code.into(),
            title: title.into(),
            capacity,
            roster: Vec::new(),
            waitlist: Vec::new(),
        }
    }

    /// Is there a free seat on the roster?
    pub fn has_seat(&self) -> bool {
        (self.roster.len() as u32) < self.capacity
    }

    /// Is this student holding a seat?
    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.roster.iter().any(|id| id == student_id)
    }

    /// Is this student waiting for a seat?
    pub fn is_waitlisted(&self, student_id: &str) -> bool {
        self.waitlist.iter().any(|id| id == student_id)
    }

    /// One-line display form: `CSCI4490 Software Engineering cap=2 enrolled=1 wait=0`
    pub fn summary(&self) -> String {
        format!(
            "{} {} cap={} enrolled={} wait={}",
            self.code,
            self.title,
            self.capacity,
            self.roster.len(),
            self.waitlist.len()
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

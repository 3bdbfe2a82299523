// 📚 Course Catalog - code-keyed store of course records
// Insertion-ordered; re-adding an existing code replaces the whole course
// object (upsert), roster and waitlist included.

use crate::models::Course;

/// In-memory catalog of all known courses.
///
/// Same contract shape as the student directory. The registrar is the only
/// component that mutates roster/waitlist state through `find_mut`.
#[derive(Debug, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn new() -> Self {
        CourseCatalog {
            courses: Vec::new(),
        }
    }

    /// Insert or overwrite by code. Overwriting replaces the entire course
    /// object in place, so a re-added course starts with an empty roster and
    /// waitlist.
    pub fn upsert(&mut self, course: Course) {
        match self.courses.iter_mut().find(|c| c.code == course.code) {
            Some(existing) => *existing = course,
            None => self.courses.push(course),
        }
    }

    /// Look up a course by exact code.
    pub fn find(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Mutable lookup for roster/waitlist transitions.
    pub fn find_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.code == code)
    }

    /// All courses, in insertion order.
    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    pub fn count(&self) -> usize {
        self.courses.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 📇 Student Directory - id-keyed store of student records
// Insertion-ordered; re-adding an existing id overwrites the record in place
// (upsert), keeping its original listing position.

use crate::models::Student;

/// In-memory directory of all known students.
///
/// Holds records in insertion order. Validation lives at the registrar
/// boundary; the directory itself accepts whatever it is given (loaded files
/// may legally contain records that would fail add-time validation today).
#[derive(Debug, Default)]
pub struct StudentDirectory {
    students: Vec<Student>,
}

impl StudentDirectory {
    pub fn new() -> Self {
        StudentDirectory {
            students: Vec::new(),
        }
    }

    /// Insert or overwrite by id. An overwrite keeps the record's original
    /// position; a new id goes to the tail.
    pub fn upsert(&mut self, student: Student) {
        match self.students.iter_mut().find(|s| s.id == student.id) {
            Some(existing) => *existing = student,
            None => self.students.push(student),
        }
    }

    /// Look up a student by exact id.
    pub fn find(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// All students, in insertion order.
    pub fn all(&self) -> &[Student] {
        &self.students
    }

    pub fn count(&self) -> usize {
        self.students.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_find() {
        let mut dir = StudentDirectory::new();
        dir.upsert(Student::new("B001", "Alice", "alice@uca.edu"));

        assert_eq!(dir.count(), 1);
        assert_eq!(dir.find("B001").unwrap().name, "Alice");
        assert!(dir.find("B999").is_none());
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut dir = StudentDirectory::new();
        dir.upsert(Student::new("B001", "Alice", "alice@uca.edu"));
        dir.upsert(Student::new("B002", "Brian", "brian@uca.edu"));

        // Overwriting B001 must not move it to the tail
        dir.upsert(Student::new("B001", "Alicia", "alicia@uca.edu"));

        assert_eq!(dir.count(), 2);
        assert_eq!(dir.all()[0].id, "B001");
        assert_eq!(dir.all()[0].name, "Alicia");
        assert_eq!(dir.all()[1].id, "B002");
    }

    #[test]
    fn test_find_is_case_sensitive() {
        // Exact key match: "b001" and "B001" are distinct directory keys
        let mut dir = StudentDirectory::new();
        dir.upsert(Student::new("b001", "Alice", "a@b.c"));

        assert!(dir.find("b001").is_some());
        assert!(dir.find("B001").is_none());
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let mut dir = StudentDirectory::new();
        for id in ["B003", "B001", "B002"] {
            dir.upsert(Student::new(id, "X", "x@y.z"));
        }

        let ids: Vec<&str> = dir.all().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["B003", "B001", "B002"]);
    }
}

// 🗂️ Enrollment Registrar - the enroll/drop state machine
// Owns the student directory and course catalog, applies validation, and
// triggers persistence after every mutation.
//
// Per (course, student) pair there are three logical states - not enrolled,
// enrolled, waitlisted - defined purely by list membership. Transitions:
//
//   enroll: seat free       -> roster tail      (Enrolled)
//           roster full     -> waitlist tail    (Waitlisted)
//   drop:   from roster     -> promote waitlist head, if any (Promoted)
//           from waitlist   -> removed          (WaitlistRemoved)

use crate::catalog::CourseCatalog;
use crate::directory::StudentDirectory;
use crate::models::{Course, Student};
use crate::storage::{apply_links, Storage};
use crate::validation::{validate_course_input, validate_student_input, ValidationError};
use anyhow::Result;

// ============================================================================
// OUTCOMES
// ============================================================================

/// Which required input was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankField {
    StudentId,
    CourseCode,
}

impl BlankField {
    pub fn message(&self) -> &'static str {
        match self {
            BlankField::StudentId => "Student ID cannot be empty",
            BlankField::CourseCode => "Course code cannot be empty",
        }
    }
}

/// Outcome of an enroll attempt. These are expected domain results, not
/// errors, so they are returned as a tagged value rather than thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollOutcome {
    /// A required input was blank after trimming
    BlankInput(BlankField),
    /// No course with that code
    NoSuchCourse,
    /// Student already holds a seat
    AlreadyEnrolled,
    /// Student is already waiting for a seat
    AlreadyWaitlisted,
    /// Seat taken, appended to the roster
    Enrolled,
    /// Course full, appended to the waitlist
    Waitlisted,
}

impl EnrollOutcome {
    /// Did this attempt change any state?
    pub fn mutated(&self) -> bool {
        matches!(self, EnrollOutcome::Enrolled | EnrollOutcome::Waitlisted)
    }
}

/// Outcome of a drop attempt. `Promoted` carries the promoted student id as a
/// typed field; callers never parse strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A required input was blank after trimming
    BlankInput(BlankField),
    /// No course with that code
    NoSuchCourse,
    /// Seat vacated, nobody waiting
    Dropped,
    /// Seat vacated and the waitlist head took it (FIFO, never reordered)
    Promoted(String),
    /// Removed from the waitlist without touching the roster
    WaitlistRemoved,
    /// Student was on neither list; nothing changed, nothing persisted
    NotEnrolled,
}

impl DropOutcome {
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            DropOutcome::Dropped | DropOutcome::Promoted(_) | DropOutcome::WaitlistRemoved
        )
    }
}

// ============================================================================
// REGISTRAR
// ============================================================================

/// Coordinator for the whole registration state.
///
/// Single-threaded by design: all mutating operations take `&mut self` and
/// no locking happens anywhere. Sharing a registrar across threads would need
/// per-course mutual exclusion around the enroll/drop read-modify-write, as
/// an extension on top of this type.
///
/// The storage backend is constructor-injected and substitutable; a failed
/// save is reported on stderr and the in-memory mutation is NOT rolled back,
/// so memory and disk may diverge until the next successful save.
pub struct Registrar {
    directory: StudentDirectory,
    catalog: CourseCatalog,
    storage: Box<dyn Storage>,
}

impl Registrar {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Registrar {
            directory: StudentDirectory::new(),
            catalog: CourseCatalog::new(),
            storage,
        }
    }

    // ========================================================================
    // ADD OPERATIONS (validated, may fail before any mutation)
    // ========================================================================

    /// Add or overwrite a student record, then persist the student store.
    pub fn add_student(
        &mut self,
        id: &str,
        name: &str,
        email: &str,
    ) -> Result<(), ValidationError> {
        validate_student_input(id, name, email)?;
        self.directory.upsert(Student::new(id, name, email));
        self.persist_students();
        Ok(())
    }

    /// Add or overwrite a course record, then persist the course stores.
    /// Overwriting an existing code replaces its roster and waitlist with
    /// empty ones.
    pub fn add_course(
        &mut self,
        code: &str,
        title: &str,
        capacity: u32,
    ) -> Result<(), ValidationError> {
        validate_course_input(code, title, capacity)?;
        self.catalog.upsert(Course::new(code, title, capacity));
        self.persist_courses();
        Ok(())
    }

    // ========================================================================
    // ENROLL / DROP STATE MACHINE
    // ========================================================================

    /// Enroll a student in a course, or waitlist them if the course is full.
    ///
    /// The student id is NOT checked against the directory: enrolling an id
    /// with no student record is legal (boundary simplification).
    pub fn enroll_student(&mut self, student_id: &str, course_code: &str) -> EnrollOutcome {
        if student_id.trim().is_empty() {
            return EnrollOutcome::BlankInput(BlankField::StudentId);
        }
        if course_code.trim().is_empty() {
            return EnrollOutcome::BlankInput(BlankField::CourseCode);
        }

        let Some(course) = self.catalog.find_mut(course_code) else {
            return EnrollOutcome::NoSuchCourse;
        };
        if course.is_enrolled(student_id) {
            return EnrollOutcome::AlreadyEnrolled;
        }
        if course.is_waitlisted(student_id) {
            return EnrollOutcome::AlreadyWaitlisted;
        }

        let outcome = if course.has_seat() {
            course.roster.push(student_id.to_string());
            EnrollOutcome::Enrolled
        } else {
            course.waitlist.push(student_id.to_string());
            EnrollOutcome::Waitlisted
        };
        self.persist_courses();
        outcome
    }

    /// Drop a student from a course.
    ///
    /// Vacating a seat promotes the waitlist HEAD (earliest waiter) onto the
    /// roster tail - strictly FIFO, never reordered by priority - so the
    /// roster size is unchanged and the waitlist shrinks by one. A student on
    /// neither list yields `NotEnrolled` with no mutation and no persistence
    /// call.
    pub fn drop_student(&mut self, student_id: &str, course_code: &str) -> DropOutcome {
        if student_id.trim().is_empty() {
            return DropOutcome::BlankInput(BlankField::StudentId);
        }
        if course_code.trim().is_empty() {
            return DropOutcome::BlankInput(BlankField::CourseCode);
        }

        let Some(course) = self.catalog.find_mut(course_code) else {
            return DropOutcome::NoSuchCourse;
        };

        if let Some(pos) = course.roster.iter().position(|id| id == student_id) {
            course.roster.remove(pos);
            let outcome = if course.waitlist.is_empty() {
                DropOutcome::Dropped
            } else {
                let promoted = course.waitlist.remove(0);
                course.roster.push(promoted.clone());
                DropOutcome::Promoted(promoted)
            };
            self.persist_courses();
            outcome
        } else if let Some(pos) = course.waitlist.iter().position(|id| id == student_id) {
            course.waitlist.remove(pos);
            self.persist_courses();
            DropOutcome::WaitlistRemoved
        } else {
            DropOutcome::NotEnrolled
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.directory.find(id)
    }

    pub fn find_course(&self, code: &str) -> Option<&Course> {
        self.catalog.find(code)
    }

    /// All students in insertion order.
    pub fn list_students(&self) -> &[Student] {
        self.directory.all()
    }

    /// All courses in insertion order.
    pub fn list_courses(&self) -> &[Course] {
        self.catalog.all()
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Populate directory and catalog from storage, then apply enrollment
    /// links in file order. Links naming an unknown course are silently
    /// discarded.
    pub fn load_all(&mut self) -> Result<()> {
        for student in self.storage.load_students()? {
            self.directory.upsert(student);
        }
        for course in self.storage.load_courses()? {
            self.catalog.upsert(course);
        }
        let links = self.storage.load_links()?;
        apply_links(&mut self.catalog, &links);
        Ok(())
    }

    /// Flush every store. Called on shutdown; per-mutation saves make this
    /// mostly redundant but cheap.
    pub fn save_all(&self) -> Result<()> {
        self.storage.save_students(self.directory.all())?;
        self.storage.save_courses(self.catalog.all())?;
        self.storage.save_enrollments(self.catalog.all())?;
        Ok(())
    }

    fn persist_students(&self) {
        if let Err(e) = self.storage.save_students(self.directory.all()) {
            eprintln!("Failed to save students: {}", e);
        }
    }

    /// Course state spans two stores (identity columns + membership links).
    /// The two writes are not atomic with each other: a crash between them
    /// can leave the files inconsistent after restart.
    fn persist_courses(&self) {
        if let Err(e) = self.storage.save_courses(self.catalog.all()) {
            eprintln!("Failed to save courses: {}", e);
        }
        if let Err(e) = self.storage.save_enrollments(self.catalog.all()) {
            eprintln!("Failed to save enrollments: {}", e);
        }
    }

    // ========================================================================
    // DEMO DATA
    // ========================================================================

    /// Seed the demo records used by the interactive walkthrough.
    pub fn seed_demo_data(&mut self) -> Result<(), ValidationError> {
        self.add_student("B001", "Alice", "alice@uca.edu")?;
        self.add_student("B002", "Brian", "brian@uca.edu")?;
        self.add_course("CSCI4490", "Software Engineering", 2)?;
        self.add_course("MATH1496", "Calculus I", 50)?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CsvStorage, MemoryStorage};

    fn registrar() -> Registrar {
        Registrar::new(Box::new(MemoryStorage::new()))
    }

    fn roster(r: &Registrar, code: &str) -> Vec<String> {
        r.find_course(code).unwrap().roster.clone()
    }

    fn waitlist(r: &Registrar, code: &str) -> Vec<String> {
        r.find_course(code).unwrap().waitlist.clone()
    }

    // ------------------------------------------------------------------
    // add operations
    // ------------------------------------------------------------------

    #[test]
    fn test_add_student_validates_banner_id() {
        let mut r = registrar();

        assert!(r.add_student("001", "Alice", "a@b.c").is_err());
        assert!(r.add_student("b001", "Alice", "a@b.c").is_ok());
        assert!(r.find_student("b001").is_some());
    }

    #[test]
    fn test_add_student_failure_leaves_store_unchanged() {
        let mut r = registrar();

        let _ = r.add_student("", "Alice", "a@b.c");
        assert!(r.list_students().is_empty());
    }

    #[test]
    fn test_add_course_capacity_bounds() {
        let mut r = registrar();

        assert!(r.add_course("C0", "X", 0).is_err());
        assert!(r.add_course("C501", "X", 501).is_err());
        assert!(r.add_course("C1", "X", 1).is_ok());
        assert!(r.add_course("C500", "X", 500).is_ok());
        assert_eq!(r.list_courses().len(), 2);
    }

    #[test]
    fn test_add_student_is_upsert() {
        let mut r = registrar();
        r.add_student("B001", "Alice", "alice@uca.edu").unwrap();
        r.add_student("B001", "Alicia", "alicia@uca.edu").unwrap();

        assert_eq!(r.list_students().len(), 1);
        assert_eq!(r.find_student("B001").unwrap().name, "Alicia");
    }

    #[test]
    fn test_add_persists_students() {
        let storage = MemoryStorage::new();
        let mut r = Registrar::new(Box::new(storage.clone()));
        r.add_student("B001", "Alice", "a@b.c").unwrap();

        assert_eq!(storage.load_students().unwrap().len(), 1);
    }

    // ------------------------------------------------------------------
    // enroll
    // ------------------------------------------------------------------

    #[test]
    fn test_enroll_blank_inputs() {
        // Scenario B: blank fields short-circuit before any lookup
        let mut r = registrar();
        r.add_course("C1", "X", 2).unwrap();

        assert_eq!(
            r.enroll_student("", "C1"),
            EnrollOutcome::BlankInput(BlankField::StudentId)
        );
        assert_eq!(
            r.enroll_student("S1", "  "),
            EnrollOutcome::BlankInput(BlankField::CourseCode)
        );
    }

    #[test]
    fn test_enroll_no_such_course() {
        let mut r = registrar();
        assert_eq!(r.enroll_student("B001", "NOPE101"), EnrollOutcome::NoSuchCourse);
    }

    #[test]
    fn test_enroll_fills_roster_then_waitlists() {
        let mut r = registrar();
        r.add_course("C1", "X", 2).unwrap();

        assert_eq!(r.enroll_student("S1", "C1"), EnrollOutcome::Enrolled);
        assert_eq!(r.enroll_student("S2", "C1"), EnrollOutcome::Enrolled);
        let third = r.enroll_student("S3", "C1");
        assert_eq!(third, EnrollOutcome::Waitlisted);
        assert!(third.mutated());

        assert_eq!(roster(&r, "C1"), vec!["S1", "S2"]);
        assert_eq!(waitlist(&r, "C1"), vec!["S3"]);
    }

    #[test]
    fn test_enroll_twice_never_duplicates() {
        let mut r = registrar();
        r.add_course("C1", "X", 1).unwrap();

        r.enroll_student("S1", "C1");
        assert_eq!(r.enroll_student("S1", "C1"), EnrollOutcome::AlreadyEnrolled);

        r.enroll_student("S2", "C1");
        assert_eq!(r.enroll_student("S2", "C1"), EnrollOutcome::AlreadyWaitlisted);

        assert_eq!(roster(&r, "C1"), vec!["S1"]);
        assert_eq!(waitlist(&r, "C1"), vec!["S2"]);
    }

    #[test]
    fn test_roster_never_exceeds_capacity() {
        let mut r = registrar();
        r.add_course("C1", "X", 3).unwrap();

        for i in 0..10 {
            r.enroll_student(&format!("S{}", i), "C1");
            assert!(roster(&r, "C1").len() <= 3);
        }
        assert_eq!(roster(&r, "C1").len(), 3);
        assert_eq!(waitlist(&r, "C1").len(), 7);
    }

    // ------------------------------------------------------------------
    // drop
    // ------------------------------------------------------------------

    #[test]
    fn test_drop_with_promotion_is_fifo() {
        // Scenario A
        let mut r = registrar();
        r.add_course("C1", "X", 2).unwrap();
        r.enroll_student("S1", "C1");
        r.enroll_student("S2", "C1");
        r.enroll_student("S3", "C1");

        assert_eq!(
            r.drop_student("S1", "C1"),
            DropOutcome::Promoted("S3".to_string())
        );
        assert_eq!(roster(&r, "C1"), vec!["S2", "S3"]);
        assert!(waitlist(&r, "C1").is_empty());
    }

    #[test]
    fn test_promotion_takes_waitlist_head() {
        let mut r = registrar();
        r.add_course("C1", "X", 1).unwrap();
        r.enroll_student("S1", "C1");
        r.enroll_student("S2", "C1");
        r.enroll_student("S3", "C1");

        // Earliest waiter wins, regardless of anything else
        assert_eq!(
            r.drop_student("S1", "C1"),
            DropOutcome::Promoted("S2".to_string())
        );
        assert_eq!(roster(&r, "C1"), vec!["S2"]);
        assert_eq!(waitlist(&r, "C1"), vec!["S3"]);
    }

    #[test]
    fn test_drop_without_waiters() {
        let mut r = registrar();
        r.add_course("C1", "X", 2).unwrap();
        r.enroll_student("S1", "C1");

        assert_eq!(r.drop_student("S1", "C1"), DropOutcome::Dropped);
        assert!(roster(&r, "C1").is_empty());
    }

    #[test]
    fn test_drop_from_waitlist() {
        let mut r = registrar();
        r.add_course("C1", "X", 1).unwrap();
        r.enroll_student("S1", "C1");
        r.enroll_student("S2", "C1");

        assert_eq!(r.drop_student("S2", "C1"), DropOutcome::WaitlistRemoved);
        assert_eq!(roster(&r, "C1"), vec!["S1"]);
        assert!(waitlist(&r, "C1").is_empty());
    }

    #[test]
    fn test_drop_uninvolved_student_mutates_nothing() {
        let mut r = registrar();
        r.add_course("C1", "X", 2).unwrap();
        r.enroll_student("S1", "C1");

        let outcome = r.drop_student("S9", "C1");
        assert_eq!(outcome, DropOutcome::NotEnrolled);
        assert!(!outcome.mutated());
        assert_eq!(roster(&r, "C1"), vec!["S1"]);
        assert!(waitlist(&r, "C1").is_empty());
    }

    #[test]
    fn test_drop_blank_and_missing_course() {
        let mut r = registrar();

        assert_eq!(
            r.drop_student("", "C1"),
            DropOutcome::BlankInput(BlankField::StudentId)
        );
        assert_eq!(
            r.drop_student("S1", ""),
            DropOutcome::BlankInput(BlankField::CourseCode)
        );
        assert_eq!(r.drop_student("S1", "NOPE101"), DropOutcome::NoSuchCourse);
    }

    // ------------------------------------------------------------------
    // persistence round trips
    // ------------------------------------------------------------------

    #[test]
    fn test_reload_reproduces_membership_and_order() {
        // Scenario C over the in-memory backend
        let storage = MemoryStorage::new();
        let mut r = Registrar::new(Box::new(storage.clone()));
        r.add_course("C1", "X", 2).unwrap();
        r.enroll_student("S1", "C1");
        r.enroll_student("S2", "C1");
        r.enroll_student("S3", "C1");
        r.drop_student("S1", "C1");

        let mut reloaded = Registrar::new(Box::new(storage));
        reloaded.load_all().unwrap();

        assert_eq!(roster(&reloaded, "C1"), vec!["S2", "S3"]);
        assert!(waitlist(&reloaded, "C1").is_empty());
    }

    #[test]
    fn test_reload_from_csv_files() {
        // Scenario C over real files
        let dir = tempfile::tempdir().unwrap();

        let mut r = Registrar::new(Box::new(CsvStorage::new(dir.path())));
        r.add_student("B001", "Alice", "alice@uca.edu").unwrap();
        r.add_course("C1", "X", 2).unwrap();
        r.enroll_student("B001", "C1");
        r.enroll_student("B002", "C1");
        r.enroll_student("B003", "C1");
        r.drop_student("B001", "C1");
        r.save_all().unwrap();

        let mut reloaded = Registrar::new(Box::new(CsvStorage::new(dir.path())));
        reloaded.load_all().unwrap();

        assert_eq!(reloaded.list_students().len(), 1);
        assert_eq!(roster(&reloaded, "C1"), vec!["B002", "B003"]);
        assert!(waitlist(&reloaded, "C1").is_empty());
    }

    #[test]
    fn test_roster_may_reference_unknown_students() {
        // Membership is never cross-checked against the directory
        let mut r = registrar();
        r.add_course("C1", "X", 2).unwrap();

        assert_eq!(r.enroll_student("GHOST", "C1"), EnrollOutcome::Enrolled);
        assert!(r.find_student("GHOST").is_none());
    }

    #[test]
    fn test_seed_demo_data() {
        let mut r = registrar();
        r.seed_demo_data().unwrap();

        assert_eq!(r.list_students().len(), 2);
        assert_eq!(r.list_courses().len(), 2);
        assert_eq!(r.find_course("CSCI4490").unwrap().capacity, 2);
    }
}

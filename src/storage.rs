// 💾 Persistence Synchronizer - durable flat storage
// Loads/saves the three record sets (students, courses, enrollment links) and
// reconciles links against loaded courses.
//
// File formats are line-oriented with NO delimiter escaping: a comma inside a
// name or a pipe inside an id corrupts that record on reload. This is the
// historical on-disk contract and is preserved, not fixed.
//
//   students.csv     id,name,email
//   courses.csv      code,title,capacity
//   enrollments.csv  code|studentId|STATUS   (ENROLLED | WAITLIST)
//
// Each save is a full rewrite of one file, staged to a sibling temp file and
// renamed into place. There is no cross-store atomicity: a crash between the
// course save and the enrollment save can leave the two files inconsistent
// after restart.

use crate::catalog::CourseCatalog;
use crate::models::{Course, Student};
use anyhow::{Context, Result};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

const STUDENTS_FILE: &str = "students.csv";
const COURSES_FILE: &str = "courses.csv";
const ENROLLMENTS_FILE: &str = "enrollments.csv";

const LINK_DELIMITER: u8 = b'|';

// ============================================================================
// ENROLLMENT LINKS
// ============================================================================

/// Membership status carried by one enrollment link row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Holds a seat on the roster
    Enrolled,
    /// Waiting for a seat, FIFO
    Waitlist,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Enrolled => "ENROLLED",
            LinkStatus::Waitlist => "WAITLIST",
        }
    }

    /// Parse a status token, case-insensitively. Unknown tokens yield `None`
    /// and the surrounding row is skipped.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("ENROLLED") {
            Some(LinkStatus::Enrolled)
        } else if token.eq_ignore_ascii_case("WAITLIST") {
            Some(LinkStatus::Waitlist)
        } else {
            None
        }
    }
}

/// One `(course, student, status)` row from the enrollment store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentLink {
    pub code: String,
    pub student_id: String,
    pub status: LinkStatus,
}

/// Apply loaded links to the catalog, in link order.
///
/// Links naming a course the catalog does not know are silently discarded
/// (dangling references are tolerated, not reported). A student already
/// present on the target list is not appended twice. Link order determines
/// resulting roster/waitlist order.
pub fn apply_links(catalog: &mut CourseCatalog, links: &[EnrollmentLink]) {
    for link in links {
        let Some(course) = catalog.find_mut(&link.code) else {
            continue;
        };
        match link.status {
            LinkStatus::Enrolled => {
                if !course.is_enrolled(&link.student_id) {
                    course.roster.push(link.student_id.clone());
                }
            }
            LinkStatus::Waitlist => {
                if !course.is_waitlisted(&link.student_id) {
                    course.waitlist.push(link.student_id.clone());
                }
            }
        }
    }
}

/// Flatten courses into link rows: every roster entry as ENROLLED, then every
/// waitlist entry as WAITLIST, course by course in catalog order.
fn links_of(courses: &[Course]) -> Vec<EnrollmentLink> {
    let mut links = Vec::new();
    for course in courses {
        for sid in &course.roster {
            links.push(EnrollmentLink {
                code: course.code.clone(),
                student_id: sid.clone(),
                status: LinkStatus::Enrolled,
            });
        }
        for sid in &course.waitlist {
            links.push(EnrollmentLink {
                code: course.code.clone(),
                student_id: sid.clone(),
                status: LinkStatus::Waitlist,
            });
        }
    }
    links
}

// ============================================================================
// STORAGE CONTRACT
// ============================================================================

/// Durable backend for the three record sets.
///
/// Constructor-injected into the registrar and fully substitutable: tests use
/// `MemoryStorage` through the same contract the CSV backend implements.
/// Every save is a complete snapshot of one store, never incremental.
pub trait Storage {
    fn load_students(&self) -> Result<Vec<Student>>;
    fn load_courses(&self) -> Result<Vec<Course>>;
    fn load_links(&self) -> Result<Vec<EnrollmentLink>>;

    fn save_students(&self, students: &[Student]) -> Result<()>;
    fn save_courses(&self, courses: &[Course]) -> Result<()>;
    fn save_enrollments(&self, courses: &[Course]) -> Result<()>;
}

// ============================================================================
// CSV STORAGE
// ============================================================================

/// Row shape for `courses.csv` - the course snapshot stores only the three
/// identity columns; membership lives in the enrollment store.
#[derive(Serialize)]
struct CourseRow<'a> {
    code: &'a str,
    title: &'a str,
    capacity: u32,
}

#[derive(Serialize)]
struct LinkRow<'a> {
    code: &'a str,
    student_id: &'a str,
    status: &'a str,
}

/// Flat-file backend: three headerless delimited files in one directory.
///
/// Reads are tolerant: a missing file is an empty snapshot, and malformed
/// rows (too few fields, non-numeric capacity, unknown status) are skipped
/// without complaint. Writes stage to `<name>.tmp` and rename into place, so
/// a crash mid-write cannot corrupt the previously committed snapshot.
pub struct CsvStorage {
    dir: PathBuf,
}

impl CsvStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvStorage { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read all rows of a headerless delimited file, skipping unreadable
    /// records. Missing file = no rows.
    fn read_rows(path: &Path, delimiter: u8) -> Result<Vec<csv::StringRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let Ok(record) = result else { continue };
            rows.push(record);
        }
        Ok(rows)
    }

    /// Rewrite one file as a whole: serialize every row to a temp sibling,
    /// then rename over the real path.
    fn write_rows<S: Serialize>(path: &Path, delimiter: u8, rows: &[S]) -> Result<()> {
        let tmp = path.with_extension("tmp");
        {
            let mut wtr = WriterBuilder::new()
                .has_headers(false)
                .delimiter(delimiter)
                .quote_style(QuoteStyle::Never)
                .from_path(&tmp)
                .with_context(|| format!("Failed to create {}", tmp.display()))?;
            for row in rows {
                wtr.serialize(row)
                    .with_context(|| format!("Failed to write {}", tmp.display()))?;
            }
            wtr.flush()
                .with_context(|| format!("Failed to flush {}", tmp.display()))?;
        }
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

impl Storage for CsvStorage {
    fn load_students(&self) -> Result<Vec<Student>> {
        let rows = Self::read_rows(&self.path(STUDENTS_FILE), b',')?;
        let mut students = Vec::new();
        for row in rows {
            let (Some(id), Some(name), Some(email)) = (row.get(0), row.get(1), row.get(2)) else {
                continue;
            };
            students.push(Student::new(id, name, email));
        }
        Ok(students)
    }

    fn load_courses(&self) -> Result<Vec<Course>> {
        let rows = Self::read_rows(&self.path(COURSES_FILE), b',')?;
        let mut courses = Vec::new();
        for row in rows {
            let (Some(code), Some(title), Some(cap)) = (row.get(0), row.get(1), row.get(2)) else {
                continue;
            };
            // Rows with a non-numeric capacity are skipped, matching the
            // historical loader
            let Ok(capacity) = cap.trim().parse::<u32>() else {
                continue;
            };
            courses.push(Course::new(code, title, capacity));
        }
        Ok(courses)
    }

    fn load_links(&self) -> Result<Vec<EnrollmentLink>> {
        let rows = Self::read_rows(&self.path(ENROLLMENTS_FILE), LINK_DELIMITER)?;
        let mut links = Vec::new();
        for row in rows {
            let (Some(code), Some(sid), Some(status)) = (row.get(0), row.get(1), row.get(2))
            else {
                continue;
            };
            let Some(status) = LinkStatus::parse(status) else {
                continue;
            };
            links.push(EnrollmentLink {
                code: code.to_string(),
                student_id: sid.to_string(),
                status,
            });
        }
        Ok(links)
    }

    fn save_students(&self, students: &[Student]) -> Result<()> {
        Self::write_rows(&self.path(STUDENTS_FILE), b',', students)
    }

    fn save_courses(&self, courses: &[Course]) -> Result<()> {
        let rows: Vec<CourseRow> = courses
            .iter()
            .map(|c| CourseRow {
                code: &c.code,
                title: &c.title,
                capacity: c.capacity,
            })
            .collect();
        Self::write_rows(&self.path(COURSES_FILE), b',', &rows)
    }

    fn save_enrollments(&self, courses: &[Course]) -> Result<()> {
        let links = links_of(courses);
        let rows: Vec<LinkRow> = links
            .iter()
            .map(|l| LinkRow {
                code: &l.code,
                student_id: &l.student_id,
                status: l.status.as_str(),
            })
            .collect();
        Self::write_rows(&self.path(ENROLLMENTS_FILE), LINK_DELIMITER, &rows)
    }
}

// ============================================================================
// MEMORY STORAGE
// ============================================================================

#[derive(Debug, Default)]
struct MemorySnapshots {
    students: Vec<Student>,
    courses: Vec<Course>,
    links: Vec<EnrollmentLink>,
}

/// In-memory backend with the same snapshot semantics as the CSV files.
///
/// Course snapshots keep only the identity columns and membership is kept as
/// link rows, so a load through `MemoryStorage` exercises the same
/// reconciliation path as a reload from disk. Cloning shares the underlying
/// snapshots, which lets a test persist through one handle and reload through
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<MemorySnapshots>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load_students(&self) -> Result<Vec<Student>> {
        Ok(self.inner.read().unwrap().students.clone())
    }

    fn load_courses(&self) -> Result<Vec<Course>> {
        Ok(self.inner.read().unwrap().courses.clone())
    }

    fn load_links(&self) -> Result<Vec<EnrollmentLink>> {
        Ok(self.inner.read().unwrap().links.clone())
    }

    fn save_students(&self, students: &[Student]) -> Result<()> {
        self.inner.write().unwrap().students = students.to_vec();
        Ok(())
    }

    fn save_courses(&self, courses: &[Course]) -> Result<()> {
        // Snapshot the identity columns only, as courses.csv does
        self.inner.write().unwrap().courses = courses
            .iter()
            .map(|c| Course::new(c.code.clone(), c.title.clone(), c.capacity))
            .collect();
        Ok(())
    }

    fn save_enrollments(&self, courses: &[Course]) -> Result<()> {
        self.inner.write().unwrap().links = links_of(courses);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

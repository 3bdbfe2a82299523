// 📐 Input Validation - Add-time checks
// Validates student and course input before any store mutation.

/// Seat capacity bounds, inclusive.
pub const MIN_CAPACITY: u32 = 1;
pub const MAX_CAPACITY: u32 = 500;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Synchronous validation failure raised by add operations.
///
/// Raised before any mutation: when an add fails, the stores are unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// VALIDATORS
// ============================================================================

/// Validate student input: all fields non-blank after trimming, Banner ID
/// starts with "B" (case-insensitive).
pub fn validate_student_input(id: &str, name: &str, email: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::new("banner_id", "Banner ID cannot be empty"));
    }
    if name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name cannot be empty"));
    }
    if email.trim().is_empty() {
        return Err(ValidationError::new("email", "Email cannot be empty"));
    }
    if !id.trim().to_uppercase().starts_with('B') {
        return Err(ValidationError::new(
            "banner_id",
            "Banner ID must start with 'B'",
        ));
    }
    Ok(())
}

/// Validate course input: code and title non-blank after trimming, capacity
/// within [MIN_CAPACITY, MAX_CAPACITY].
pub fn validate_course_input(code: &str, title: &str, capacity: u32) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("code", "Course code cannot be empty"));
    }
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", "Course title cannot be empty"));
    }
    if capacity < MIN_CAPACITY {
        return Err(ValidationError::new("capacity", "Capacity must be at least 1"));
    }
    if capacity > MAX_CAPACITY {
        return Err(ValidationError::new("capacity", "Capacity cannot exceed 500"));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

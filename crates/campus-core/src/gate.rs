//! Submission gate: decides whether a student may record another attempt.
//!
//! There is no stored submission status. Eligibility is derived at evaluation
//! time from the assignment row, the student row, the attempt slots already
//! taken, the payload, and the wall clock. Checks run in a fixed order and the first
//! failure is reported:
//!
//! ```text
//! assignment exists → active → has due date → now <= due date
//!   → student exists → a slot in 1..=3 is free → content or file → file type allowed
//!   → ACCEPTED (attempt = lowest free slot)
//! ```
//!
//! Without deleted rows the lowest free slot is `prior + 1`. A row removed
//! after a failed upload leaves a gap, and the gap is handed out again.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Assignment;
use crate::errors::ErrorKind;

/// Maximum number of attempts per (student, assignment).
pub const MAX_ATTEMPTS: u32 = 3;

/// File extensions accepted for submission uploads (lowercase).
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "docx", "jpg", "jpeg", "png"];

/// Why the gate refused an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateRejection {
    AssignmentNotFound,
    AssignmentInactive,
    DueDateMissing,
    PastDeadline,
    StudentNotFound,
    AttemptLimitReached,
    EmptySubmission,
    InvalidFileType { extension: String },
}

impl GateRejection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::AssignmentInactive => "ASSIGNMENT_INACTIVE",
            Self::DueDateMissing => "DUE_DATE_MISSING",
            Self::PastDeadline => "PAST_DEADLINE",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::AttemptLimitReached => "ATTEMPT_LIMIT_REACHED",
            Self::EmptySubmission => "EMPTY_SUBMISSION",
            Self::InvalidFileType { .. } => "INVALID_FILE_TYPE",
        }
    }

    /// Error class of this rejection.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AssignmentNotFound | Self::StudentNotFound => ErrorKind::NotFound,
            Self::AttemptLimitReached => ErrorKind::Conflict,
            Self::AssignmentInactive
            | Self::DueDateMissing
            | Self::PastDeadline
            | Self::EmptySubmission
            | Self::InvalidFileType { .. } => ErrorKind::Validation,
        }
    }

    /// Message suitable for showing to the student.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AssignmentNotFound => "Assignment not found".to_string(),
            Self::AssignmentInactive => "Assignment is not active".to_string(),
            Self::DueDateMissing => "Assignment due_date not set".to_string(),
            Self::PastDeadline => "Submission deadline has passed".to_string(),
            Self::StudentNotFound => "Student not found".to_string(),
            Self::AttemptLimitReached => format!(
                "You have reached the maximum of {MAX_ATTEMPTS} submission attempts"
            ),
            Self::EmptySubmission => {
                "You must submit either text content or a file".to_string()
            }
            Self::InvalidFileType { extension } => format!("Invalid file type: {extension}"),
        }
    }
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded file accompanying a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl SubmissionFile {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Lowercased text after the last `.` in the file name, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    /// Whether the extension is in [`ALLOWED_EXTENSIONS`].
    #[must_use]
    pub fn has_allowed_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// What the student is handing in. Either part may be absent, not both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub content: Option<String>,
    pub file: Option<SubmissionFile>,
}

impl SubmissionPayload {
    /// Text content with blank strings treated as absent.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && self.file.is_none()
    }
}

/// Persisted facts the gate needs, read just before evaluation.
#[derive(Debug, Clone, Copy)]
pub struct GateSnapshot<'a> {
    pub assignment: Option<&'a Assignment>,
    pub student_exists: bool,
    /// Attempt numbers already recorded for the pair.
    pub taken_attempts: &'a [u32],
}

/// A granted attempt slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Attempt(u32);

impl Attempt {
    /// Lowest slot in `1..=MAX_ATTEMPTS` not in `taken`, if one is left.
    #[must_use]
    pub fn first_free(taken: &[u32]) -> Option<Self> {
        (1..=MAX_ATTEMPTS).find(|n| !taken.contains(n)).map(Self)
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Counter shown to the student, e.g. `"2 of 3"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} of {MAX_ATTEMPTS}", self.0)
    }

    /// Stored file name for an upload made in this attempt.
    ///
    /// Path separators in the original name are replaced so the artifact always
    /// lands directly in the upload directory.
    #[must_use]
    pub fn artifact_name(self, student_id: i64, assignment_id: i64, filename: &str) -> String {
        let flat: String = filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!(
            "student{student_id}_assignment{assignment_id}_attempt{}_{flat}",
            self.0
        )
    }
}

/// Run the ordered eligibility checks.
///
/// # Errors
///
/// Returns the first [`GateRejection`] that applies.
pub fn evaluate(
    snapshot: &GateSnapshot<'_>,
    payload: &SubmissionPayload,
    now: DateTime<Utc>,
) -> Result<Attempt, GateRejection> {
    let assignment = snapshot
        .assignment
        .ok_or(GateRejection::AssignmentNotFound)?;
    if !assignment.is_active {
        return Err(GateRejection::AssignmentInactive);
    }
    let due = assignment.due_date.ok_or(GateRejection::DueDateMissing)?;
    if now > due {
        return Err(GateRejection::PastDeadline);
    }
    if !snapshot.student_exists {
        return Err(GateRejection::StudentNotFound);
    }
    let attempt =
        Attempt::first_free(snapshot.taken_attempts).ok_or(GateRejection::AttemptLimitReached)?;
    if payload.is_empty() {
        return Err(GateRejection::EmptySubmission);
    }
    if let Some(file) = &payload.file {
        if !file.has_allowed_extension() {
            return Err(GateRejection::InvalidFileType {
                extension: file.extension().unwrap_or_default(),
            });
        }
    }
    Ok(attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn assignment(is_active: bool, due_date: Option<DateTime<Utc>>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 9,
            unit_id: 1,
            title: "Essay".into(),
            description: None,
            due_date,
            file_path: None,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn text(content: &str) -> SubmissionPayload {
        SubmissionPayload {
            content: Some(content.into()),
            file: None,
        }
    }

    fn file(name: &str) -> SubmissionPayload {
        SubmissionPayload {
            content: None,
            file: Some(SubmissionFile::new(name, b"data".to_vec())),
        }
    }

    fn open_snapshot<'a>(a: &'a Assignment, taken: &'a [u32]) -> GateSnapshot<'a> {
        GateSnapshot {
            assignment: Some(a),
            student_exists: true,
            taken_attempts: taken,
        }
    }

    #[test]
    fn accepts_first_attempt() {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::days(1)));
        let attempt = evaluate(&open_snapshot(&a, &[]), &text("my essay"), now).unwrap();
        assert_eq!(attempt.number(), 1);
        assert_eq!(attempt.label(), "1 of 3");
    }

    #[test]
    fn due_date_is_inclusive() {
        let now = Utc::now();
        let a = assignment(true, Some(now));
        assert!(evaluate(&open_snapshot(&a, &[]), &text("on the dot"), now).is_ok());
    }

    #[test]
    fn missing_assignment_wins_over_everything() {
        let snapshot = GateSnapshot {
            assignment: None,
            student_exists: false,
            taken_attempts: &[1, 2, 3],
        };
        let err = evaluate(&snapshot, &SubmissionPayload::default(), Utc::now()).unwrap_err();
        assert_eq!(err, GateRejection::AssignmentNotFound);
    }

    #[test]
    fn inactive_checked_before_due_date() {
        let a = assignment(false, None);
        let err = evaluate(&open_snapshot(&a, &[]), &text("x"), Utc::now()).unwrap_err();
        assert_eq!(err, GateRejection::AssignmentInactive);
    }

    #[test]
    fn missing_due_date() {
        let a = assignment(true, None);
        let err = evaluate(&open_snapshot(&a, &[]), &text("x"), Utc::now()).unwrap_err();
        assert_eq!(err, GateRejection::DueDateMissing);
    }

    #[rstest]
    #[case::valid_text(text("finished work"))]
    #[case::valid_file(file("report.pdf"))]
    #[case::empty(SubmissionPayload::default())]
    #[case::bad_file(file("virus.exe"))]
    fn past_deadline_regardless_of_payload(#[case] payload: SubmissionPayload) {
        let now = Utc::now();
        let a = assignment(true, Some(now - Duration::minutes(1)));
        let snapshot = GateSnapshot {
            assignment: Some(&a),
            student_exists: false,
            taken_attempts: &[1, 2, 3],
        };
        assert_eq!(
            evaluate(&snapshot, &payload, now).unwrap_err(),
            GateRejection::PastDeadline
        );
    }

    #[test]
    fn student_checked_before_attempts() {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        let snapshot = GateSnapshot {
            assignment: Some(&a),
            student_exists: false,
            taken_attempts: &[1, 2, 3],
        };
        assert_eq!(
            evaluate(&snapshot, &text("x"), now).unwrap_err(),
            GateRejection::StudentNotFound
        );
    }

    #[rstest]
    #[case::text(text("fourth try"))]
    #[case::file(file("final.docx"))]
    fn fourth_attempt_is_refused(#[case] payload: SubmissionPayload) {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        assert_eq!(
            evaluate(&open_snapshot(&a, &[1, 2, 3]), &payload, now).unwrap_err(),
            GateRejection::AttemptLimitReached
        );
    }

    #[test]
    fn limit_checked_before_empty_payload() {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        assert_eq!(
            evaluate(&open_snapshot(&a, &[1, 2, 3]), &SubmissionPayload::default(), now).unwrap_err(),
            GateRejection::AttemptLimitReached
        );
    }

    #[rstest]
    #[case::none(SubmissionPayload::default())]
    #[case::empty_string(text(""))]
    #[case::whitespace(text("   \n"))]
    fn empty_payload_is_refused(#[case] payload: SubmissionPayload) {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        assert_eq!(
            evaluate(&open_snapshot(&a, &[]), &payload, now).unwrap_err(),
            GateRejection::EmptySubmission
        );
    }

    #[rstest]
    #[case("report.pdf")]
    #[case("REPORT.PDF")]
    #[case("essay.final.docx")]
    #[case("scan.jpg")]
    #[case("scan.JPEG")]
    #[case("diagram.png")]
    fn allowed_extensions_pass(#[case] name: &str) {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        assert!(evaluate(&open_snapshot(&a, &[1, 2]), &file(name), now).is_ok());
    }

    #[rstest]
    #[case("notes.txt", "txt")]
    #[case("archive.zip", "zip")]
    #[case("README", "")]
    #[case("trailing.", "")]
    fn disallowed_extensions_fail(#[case] name: &str, #[case] ext: &str) {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        assert_eq!(
            evaluate(&open_snapshot(&a, &[]), &file(name), now).unwrap_err(),
            GateRejection::InvalidFileType {
                extension: ext.to_string()
            }
        );
    }

    #[test]
    fn file_type_checked_even_with_text() {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        let payload = SubmissionPayload {
            content: Some("see attached".into()),
            file: Some(SubmissionFile::new("a.exe", Vec::new())),
        };
        assert!(matches!(
            evaluate(&open_snapshot(&a, &[]), &payload, now),
            Err(GateRejection::InvalidFileType { .. })
        ));
    }

    #[rstest]
    #[case(&[], Some(1))]
    #[case(&[1], Some(2))]
    #[case(&[1, 2], Some(3))]
    #[case(&[1, 3], Some(2))]
    #[case(&[2, 3], Some(1))]
    #[case(&[1, 2, 3], None)]
    fn lowest_free_slot(#[case] taken: &[u32], #[case] expected: Option<u32>) {
        assert_eq!(Attempt::first_free(taken).map(Attempt::number), expected);
    }

    #[test]
    fn gap_left_by_removed_attempt_is_reused() {
        let now = Utc::now();
        let a = assignment(true, Some(now + Duration::hours(1)));
        let attempt = evaluate(&open_snapshot(&a, &[1, 3]), &text("retry"), now).unwrap();
        assert_eq!(attempt.number(), 2);
        assert_eq!(attempt.label(), "2 of 3");
    }

    #[test]
    fn artifact_name_embeds_attempt() {
        let attempt = Attempt::first_free(&[1]).unwrap();
        assert_eq!(
            attempt.artifact_name(5, 9, "essay.pdf"),
            "student5_assignment9_attempt2_essay.pdf"
        );
        assert_eq!(
            attempt.artifact_name(5, 9, "../../etc/passwd.pdf"),
            "student5_assignment9_attempt2_.._.._etc_passwd.pdf"
        );
    }

    #[test]
    fn rejection_kinds_and_tags() {
        assert_eq!(GateRejection::AssignmentNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(GateRejection::StudentNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(GateRejection::AttemptLimitReached.kind(), ErrorKind::Conflict);
        assert_eq!(GateRejection::PastDeadline.kind(), ErrorKind::Validation);

        let json = serde_json::to_value(GateRejection::InvalidFileType {
            extension: "exe".into(),
        })
        .unwrap();
        assert_eq!(json["reason"], "INVALID_FILE_TYPE");
        assert_eq!(json["extension"], "exe");
        assert_eq!(
            serde_json::to_value(GateRejection::PastDeadline).unwrap()["reason"],
            GateRejection::PastDeadline.as_str()
        );
    }
}

use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AnswerCommands, AssignmentCommands, CourseCommands, FlashcardCommands, GradeCommands,
    NoteCommands, QuestionCommands, SubmissionCommands, UnitCommands, UserCommands, VoteCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users (students, instructors, admins).
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Courses.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Units within a course.
    Unit {
        #[command(subcommand)]
        action: UnitCommands,
    },
    /// Study notes attached to a unit.
    Note {
        #[command(subcommand)]
        action: NoteCommands,
    },
    /// Flashcards derived from notes.
    Flashcard {
        #[command(subcommand)]
        action: FlashcardCommands,
    },
    /// Forum questions.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Answers to forum questions.
    Answer {
        #[command(subcommand)]
        action: AnswerCommands,
    },
    /// Answer votes and ranking.
    Vote {
        #[command(subcommand)]
        action: VoteCommands,
    },
    /// Assignments within a unit.
    Assignment {
        #[command(subcommand)]
        action: AssignmentCommands,
    },
    /// Submission attempts.
    Submission {
        #[command(subcommand)]
        action: SubmissionCommands,
    },
    /// Grades and AI grade suggestions.
    Grade {
        #[command(subcommand)]
        action: GradeCommands,
    },
    /// Query the activity log.
    Activity(ActivityArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// Entity type (user, course, unit, note, flashcard, question, answer, assignment, submission, grade)
    #[arg(long)]
    pub entity: Option<String>,
    /// Entity id
    #[arg(long)]
    pub id: Option<i64>,
    /// Action (created, updated, deleted)
    #[arg(long)]
    pub action: Option<String>,
}

pub mod answer;
pub mod assignment;
pub mod course;
pub mod flashcard;
pub mod grade;
pub mod note;
pub mod question;
pub mod submission;
pub mod unit;
pub mod user;
pub mod vote;

pub use answer::AnswerCommands;
pub use assignment::AssignmentCommands;
pub use course::CourseCommands;
pub use flashcard::FlashcardCommands;
pub use grade::GradeCommands;
pub use note::NoteCommands;
pub use question::QuestionCommands;
pub use submission::SubmissionCommands;
pub use unit::UnitCommands;
pub use user::UserCommands;
pub use vote::VoteCommands;

pub mod activity;
pub mod answer;
pub mod assignment;
pub mod course;
pub mod dispatch;
pub mod flashcard;
pub mod grade;
pub mod note;
pub mod question;
pub mod shared;
pub mod submission;
pub mod unit;
pub mod user;
pub mod vote;

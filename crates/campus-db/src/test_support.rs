//! Shared test utilities for campus-db unit tests.

pub(crate) mod helpers {
    use chrono::{DateTime, Duration, Utc};

    use campus_core::entities::{Answer, Assignment, Question, Unit, User};
    use campus_core::enums::UserRole;

    use crate::CampusDb;
    use crate::service::CampusService;
    use crate::uploads::UploadStore;

    /// In-memory service with file storage disabled.
    pub async fn test_service() -> CampusService {
        let db = CampusDb::open_local(":memory:").await.unwrap();
        CampusService::from_db(db, UploadStore::disabled())
    }

    /// In-memory service storing uploads in `dir`.
    pub async fn test_service_with_uploads(dir: std::path::PathBuf) -> CampusService {
        let db = CampusDb::open_local(":memory:").await.unwrap();
        CampusService::from_db(db, UploadStore::new(dir).unwrap())
    }

    pub async fn seed_student(svc: &CampusService, username: &str) -> User {
        svc.create_user(
            username,
            &format!("{username}@example.edu"),
            UserRole::Student,
            None,
        )
        .await
        .unwrap()
    }

    pub async fn seed_instructor(svc: &CampusService) -> User {
        svc.create_user("grace", "grace@example.edu", UserRole::Instructor, None)
            .await
            .unwrap()
    }

    /// A course with one unit taught by `instructor`.
    pub async fn seed_unit(svc: &CampusService, instructor: &User) -> Unit {
        let course = svc.create_course("Chemistry", None).await.unwrap();
        svc.create_unit(course.id, instructor.id, "Acids and bases", None)
            .await
            .unwrap()
    }

    pub async fn seed_assignment(
        svc: &CampusService,
        unit: &Unit,
        title: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Assignment {
        svc.create_assignment(unit.id, title, Some("Write it up"), due_date, None)
            .await
            .unwrap()
    }

    /// An assignment due a week from now.
    pub async fn seed_open_assignment(svc: &CampusService) -> (Unit, Assignment) {
        let instructor = seed_instructor(svc).await;
        let unit = seed_unit(svc, &instructor).await;
        let assignment =
            seed_assignment(svc, &unit, "Lab report", Some(Utc::now() + Duration::days(7))).await;
        (unit, assignment)
    }

    pub async fn seed_question(svc: &CampusService, author: &User, title: &str) -> Question {
        svc.create_question(author.id, title, "Details inside")
            .await
            .unwrap()
    }

    pub async fn seed_answer(svc: &CampusService, question: &Question, author: &User) -> Answer {
        svc.create_answer(question.id, author.id, "Try this")
            .await
            .unwrap()
    }
}

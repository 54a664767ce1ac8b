//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{Duration, Utc};
use schemars::schema_for;
use campus_core::entities::*;
use campus_core::enums::*;
use campus_core::gate::{Attempt, GateRejection};
use campus_core::responses::*;
use campus_core::voting::{RankedAnswer, VoteTally};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn submission() -> Submission {
    Submission {
        id: 14,
        student_id: 5,
        assignment_id: 9,
        attempt: 2,
        content: Some("Second draft".into()),
        file_path: Some("uploads/student5_assignment9_attempt2_essay.pdf".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: 1,
        username: "ada".into(),
        email: "ada@example.edu".into(),
        role: UserRole::Instructor,
        bio: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    assignment_roundtrip,
    Assignment,
    Assignment {
        id: 9,
        unit_id: 2,
        title: "Lab report".into(),
        description: Some("Write up the titration lab".into()),
        due_date: Some(Utc::now() + Duration::days(7)),
        file_path: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(submission_roundtrip, Submission, submission());

roundtrip_and_validate!(
    vote_roundtrip,
    Vote,
    Vote {
        id: 3,
        user_id: 4,
        answer_id: 8,
        vote_type: VoteType::Down,
    }
);

roundtrip_and_validate!(
    flashcard_roundtrip,
    Flashcard,
    Flashcard {
        id: 1,
        note_id: 2,
        question: "What is osmosis?".into(),
        answer: "Diffusion of water".into(),
        options: vec![
            "Diffusion of water".into(),
            "Active transport".into(),
            "Endocytosis".into(),
            "Exocytosis".into(),
        ],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    activity_roundtrip,
    ActivityEntry,
    ActivityEntry {
        id: 1,
        entity_type: EntityType::Submission,
        entity_id: 14,
        action: WriteOp::Created,
        detail: Some(serde_json::json!({"attempt": 2})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    ranked_answers_roundtrip,
    RankedAnswers,
    RankedAnswers {
        total_answers: 1,
        answers: vec![RankedAnswer::new(
            3,
            7,
            "Use a buffer".into(),
            VoteTally::new(11, 4, 1)
        )],
    }
);

roundtrip_and_validate!(
    gate_accepted_roundtrip,
    GateDecision,
    GateDecision::Accepted(SubmissionReceipt::new(
        submission(),
        Attempt::first_free(&[1]).unwrap()
    ))
);

roundtrip_and_validate!(
    gate_rejected_roundtrip,
    GateDecision,
    GateDecision::Rejected(GateRejection::InvalidFileType {
        extension: "exe".into()
    })
);

#[test]
fn receipt_reports_attempt_counter() {
    let receipt = SubmissionReceipt::new(submission(), Attempt::first_free(&[1]).unwrap());
    assert_eq!(receipt.attempts, "2 of 3");
    assert_eq!(receipt.message, "Submission successful (Attempt 2 of 3)");

    let json = serde_json::to_value(GateDecision::Accepted(receipt)).unwrap();
    assert_eq!(json["status"], "accepted");
    assert_eq!(json["attempt"], 2);
}

#[test]
fn rejected_decision_is_flat() {
    let json =
        serde_json::to_value(GateDecision::Rejected(GateRejection::AttemptLimitReached)).unwrap();
    assert_eq!(json["status"], "rejected");
    assert_eq!(json["reason"], "ATTEMPT_LIMIT_REACHED");
}

//! Integration tests for the reference store's compare-and-swap transitions.
//!
//! Exercises the repository layer against a real database to verify that:
//! - References are created in draft with no audit timestamps
//! - Each transition stamps exactly its own audit fields
//! - CAS guards make the second of two conflicting transitions fail
//! - Role-scoped listings only surface the expected rows

use merit_core::status::AchievementStatus;
use merit_core::types::DbId;
use merit_db::models::achievement::{AchievementDetails, AchievementDoc};
use merit_db::models::lecturer::CreateLecturer;
use merit_db::models::student::CreateStudent;
use merit_db::models::user::CreateUser;
use merit_db::repositories::{ContentRepo, LecturerRepo, ReferenceRepo, RoleRepo, StudentRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str, role_name: &str) -> DbId {
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .unwrap()
        .expect("seeded role should exist");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@campus.test"),
            password_hash: "$argon2id$test".to_string(),
            full_name: username.to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();
    user.id
}

async fn seed_student(pool: &PgPool, username: &str, advisor_id: Option<DbId>) -> DbId {
    let user_id = seed_user(pool, username, "student").await;
    let student = StudentRepo::create(
        pool,
        &CreateStudent {
            user_id,
            student_number: format!("S-{username}"),
            program_study: "Computer Science".to_string(),
            academic_year: "2025/2026".to_string(),
            advisor_id,
        },
    )
    .await
    .unwrap();
    student.id
}

async fn seed_advisor(pool: &PgPool, username: &str) -> (DbId, DbId) {
    let user_id = seed_user(pool, username, "advisor").await;
    let lecturer = LecturerRepo::create(
        pool,
        &CreateLecturer {
            user_id,
            lecturer_number: format!("L-{username}"),
            department: "Informatics".to_string(),
        },
    )
    .await
    .unwrap();
    (user_id, lecturer.id)
}

fn sample_doc(title: &str) -> AchievementDoc {
    AchievementDoc {
        achievement_type: "competition".to_string(),
        title: title.to_string(),
        description: "Regional round".to_string(),
        details: AchievementDetails::default(),
        tags: vec!["programming".to_string()],
        points: 25.0,
        attachments: Vec::new(),
    }
}

async fn seed_reference(pool: &PgPool, student_id: DbId, title: &str) -> DbId {
    let content = ContentRepo::create(pool, student_id, &sample_doc(title))
        .await
        .unwrap();
    let reference = ReferenceRepo::create(pool, student_id, content.id)
        .await
        .unwrap();
    reference.id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_new_reference_is_clean_draft(pool: PgPool) {
    let student_id = seed_student(&pool, "alice", None).await;
    let ref_id = seed_reference(&pool, student_id, "Chess Cup").await;

    let reference = ReferenceRepo::find_by_id(&pool, ref_id).await.unwrap().unwrap();
    assert_eq!(reference.status, AchievementStatus::Draft);
    assert!(reference.submitted_at.is_none());
    assert!(reference.verified_at.is_none());
    assert!(reference.verified_by.is_none());
    assert!(reference.rejection_note.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_stamps_timestamp_once(pool: PgPool) {
    let student_id = seed_student(&pool, "bob", None).await;
    let ref_id = seed_reference(&pool, student_id, "Math Olympiad").await;

    assert!(ReferenceRepo::mark_submitted(&pool, ref_id).await.unwrap());

    let reference = ReferenceRepo::find_by_id(&pool, ref_id).await.unwrap().unwrap();
    assert_eq!(reference.status, AchievementStatus::Submitted);
    assert!(reference.submitted_at.is_some());

    // A second submit loses the CAS: the row is no longer draft.
    assert!(!ReferenceRepo::mark_submitted(&pool, ref_id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_verify_requires_observed_status(pool: PgPool) {
    let student_id = seed_student(&pool, "carol", None).await;
    let verifier = seed_user(&pool, "dean", "admin").await;
    let ref_id = seed_reference(&pool, student_id, "Robotics Finals").await;

    // Verifying with an observed status of submitted fails while still draft.
    assert!(
        !ReferenceRepo::mark_verified(&pool, ref_id, verifier, AchievementStatus::Submitted)
            .await
            .unwrap()
    );

    ReferenceRepo::mark_submitted(&pool, ref_id).await.unwrap();
    assert!(
        ReferenceRepo::mark_verified(&pool, ref_id, verifier, AchievementStatus::Submitted)
            .await
            .unwrap()
    );

    let reference = ReferenceRepo::find_by_id(&pool, ref_id).await.unwrap().unwrap();
    assert_eq!(reference.status, AchievementStatus::Verified);
    assert_eq!(reference.verified_by, Some(verifier));
    assert!(reference.verified_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_conflicting_decisions_have_one_winner(pool: PgPool) {
    let student_id = seed_student(&pool, "dave", None).await;
    let verifier = seed_user(&pool, "prof", "admin").await;
    let ref_id = seed_reference(&pool, student_id, "Hackathon").await;
    ReferenceRepo::mark_submitted(&pool, ref_id).await.unwrap();

    // Both callers observed `submitted`; only the first write applies.
    let rejected = ReferenceRepo::mark_rejected(
        &pool,
        ref_id,
        verifier,
        "Missing certificate",
        AchievementStatus::Submitted,
    )
    .await
    .unwrap();
    let verified =
        ReferenceRepo::mark_verified(&pool, ref_id, verifier, AchievementStatus::Submitted)
            .await
            .unwrap();

    assert!(rejected);
    assert!(!verified, "second conflicting decision must lose the CAS");

    let reference = ReferenceRepo::find_by_id(&pool, ref_id).await.unwrap().unwrap();
    assert_eq!(reference.status, AchievementStatus::Rejected);
    assert_eq!(reference.rejection_note.as_deref(), Some("Missing certificate"));
    assert!(reference.verified_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_only_from_draft(pool: PgPool) {
    let student_id = seed_student(&pool, "erin", None).await;
    let ref_id = seed_reference(&pool, student_id, "Essay Contest").await;

    ReferenceRepo::mark_submitted(&pool, ref_id).await.unwrap();
    assert!(!ReferenceRepo::mark_deleted(&pool, ref_id).await.unwrap());

    let fresh_id = seed_reference(&pool, student_id, "Poster Session").await;
    assert!(ReferenceRepo::mark_deleted(&pool, fresh_id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_advisor_listing_sees_only_advisees(pool: PgPool) {
    let (advisor_user_id, lecturer_id) = seed_advisor(&pool, "walters").await;
    let advisee_id = seed_student(&pool, "frank", Some(lecturer_id)).await;
    let other_id = seed_student(&pool, "grace", None).await;

    seed_reference(&pool, advisee_id, "Advisee Entry").await;
    seed_reference(&pool, other_id, "Unrelated Entry").await;

    let listed = ReferenceRepo::list_for_advisor(&pool, advisor_user_id, None, 50, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].student_id, advisee_id);

    let total = ReferenceRepo::count_for_advisor(&pool, advisor_user_id, None)
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_filter_applies_to_listings(pool: PgPool) {
    let student_id = seed_student(&pool, "heidi", None).await;
    let draft_id = seed_reference(&pool, student_id, "Draft Entry").await;
    let submitted_id = seed_reference(&pool, student_id, "Submitted Entry").await;
    ReferenceRepo::mark_submitted(&pool, submitted_id).await.unwrap();

    let drafts =
        ReferenceRepo::list_by_student(&pool, student_id, Some(AchievementStatus::Draft), 50, 0)
            .await
            .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft_id);

    let all = ReferenceRepo::count_by_student(&pool, student_id, None)
        .await
        .unwrap();
    assert_eq!(all, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_is_advisee_resolution(pool: PgPool) {
    let (advisor_user_id, lecturer_id) = seed_advisor(&pool, "nguyen").await;
    let advisee_id = seed_student(&pool, "ivan", Some(lecturer_id)).await;
    let stranger_id = seed_student(&pool, "judy", None).await;

    assert!(StudentRepo::is_advisee(&pool, advisor_user_id, advisee_id)
        .await
        .unwrap());
    assert!(!StudentRepo::is_advisee(&pool, advisor_user_id, stranger_id)
        .await
        .unwrap());
}

//! Integration tests for role-scoped visibility and authorization.
//!
//! Covers the row-level rules end-to-end: ownership for students, advisee
//! scoping for advisors, the advisor decision window, and the admin
//! override, including the listings.

mod common;

use assert_matches::assert_matches;
use common::{sample_create, seed_admin, seed_advisor, seed_student};
use merit_api::error::AppError;
use merit_api::query::{AchievementFilter, PaginationParams};
use merit_api::workflow::engine;
use merit_core::error::CoreError;
use merit_core::status::AchievementStatus;
use merit_db::repositories::ReferenceRepo;
use sqlx::PgPool;

fn default_page() -> PaginationParams {
    PaginationParams {
        page: None,
        page_size: None,
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_cannot_touch_another_students_record(pool: PgPool) {
    let owner = seed_student(&pool, "alice", None).await;
    let intruder = seed_student(&pool, "mallory", None).await;

    let reference = engine::create(&pool, &owner.principal, sample_create(None))
        .await
        .unwrap();

    let read_err = engine::read(&pool, &intruder.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(read_err, AppError::Core(CoreError::Forbidden(_)));

    let submit_err = engine::submit(&pool, &intruder.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(submit_err, AppError::Core(CoreError::Forbidden(_)));

    let delete_err = engine::delete(&pool, &intruder.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(delete_err, AppError::Core(CoreError::Forbidden(_)));

    let history_err = engine::history(&pool, &intruder.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(history_err, AppError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_capability_is_forbidden_before_data_access(pool: PgPool) {
    let mut student = seed_student(&pool, "bob", None).await;
    // Strip every capability; the row-level rules never get a say.
    student.principal.permissions = Default::default();

    let err = engine::create(&pool, &student.principal, sample_create(None))
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));

    let err = engine::list(
        &pool,
        &student.principal,
        AchievementFilter::default(),
        default_page(),
    )
    .await
    .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_advisor_limited_to_advisees(pool: PgPool) {
    let advisor = seed_advisor(&pool, "walters").await;
    let stranger_advisor = seed_advisor(&pool, "nguyen").await;
    let student = seed_student(&pool, "carol", Some(advisor.lecturer_id)).await;

    let reference = engine::create(&pool, &student.principal, sample_create(None))
        .await
        .unwrap();
    engine::submit(&pool, &student.principal, reference.id)
        .await
        .unwrap();

    // The assigned advisor can read and decide.
    engine::read(&pool, &advisor.principal, reference.id)
        .await
        .unwrap();

    // An unrelated advisor can do neither.
    let err = engine::read(&pool, &stranger_advisor.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    let err = engine::verify(&pool, &stranger_advisor.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_advisor_decision_window_is_submitted_only(pool: PgPool) {
    let advisor = seed_advisor(&pool, "okafor").await;
    let student = seed_student(&pool, "dave", Some(advisor.lecturer_id)).await;

    let reference = engine::create(&pool, &student.principal, sample_create(None))
        .await
        .unwrap();

    // Still draft: the advisor's refusal is role-specific Forbidden, not a
    // state-machine error.
    let err = engine::verify(&pool, &advisor.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        AppError::Core(CoreError::Forbidden(ref msg)) if msg.contains("Final decision")
    );

    engine::submit(&pool, &student.principal, reference.id)
        .await
        .unwrap();
    engine::verify(&pool, &advisor.principal, reference.id)
        .await
        .unwrap();

    // Already decided: the window has closed again.
    let err = engine::reject(&pool, &advisor.principal, reference.id, "changed my mind")
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_override_verifies_a_draft(pool: PgPool) {
    let admin = seed_admin(&pool, "root").await;
    let student = seed_student(&pool, "erin", None).await;

    let reference = engine::create(&pool, &student.principal, sample_create(None))
        .await
        .unwrap();

    // Never submitted, yet the admin may decide.
    engine::verify(&pool, &admin, reference.id).await.unwrap();

    let verified = ReferenceRepo::find_by_id(&pool, reference.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(verified.status, AchievementStatus::Verified);
    assert_eq!(verified.verified_by, Some(admin.user_id));

    // Deleted rows stay untouchable even for admins.
    let doomed = engine::create(&pool, &student.principal, sample_create(None))
        .await
        .unwrap();
    engine::delete(&pool, &student.principal, doomed.id)
        .await
        .unwrap();
    let err = engine::verify(&pool, &admin, doomed.id).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InvalidTransition { .. }));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_students_never_decide(pool: PgPool) {
    let advisor = seed_advisor(&pool, "patel").await;
    let student = seed_student(&pool, "frank", Some(advisor.lecturer_id)).await;

    let reference = engine::create(&pool, &student.principal, sample_create(None))
        .await
        .unwrap();
    engine::submit(&pool, &student.principal, reference.id)
        .await
        .unwrap();

    // Even on their own record the verify capability is missing, and the
    // role rule would refuse regardless.
    let err = engine::verify(&pool, &student.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
    let err = engine::reject(&pool, &student.principal, reference.id, "self-reject")
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_listings_are_role_scoped(pool: PgPool) {
    let advisor = seed_advisor(&pool, "quinn").await;
    let advisee = seed_student(&pool, "grace", Some(advisor.lecturer_id)).await;
    let outsider = seed_student(&pool, "heidi", None).await;
    let admin = seed_admin(&pool, "root").await;

    engine::create(&pool, &advisee.principal, sample_create(None))
        .await
        .unwrap();
    engine::create(&pool, &outsider.principal, sample_create(None))
        .await
        .unwrap();

    let (views, total) = engine::list(
        &pool,
        &advisee.principal,
        AchievementFilter::default(),
        default_page(),
    )
    .await
    .unwrap();
    assert_eq!((views.len(), total), (1, 1));
    assert_eq!(views[0].reference.student_id, advisee.student_id);

    let (views, total) = engine::list(
        &pool,
        &advisor.principal,
        AchievementFilter::default(),
        default_page(),
    )
    .await
    .unwrap();
    assert_eq!((views.len(), total), (1, 1));
    assert_eq!(views[0].reference.student_id, advisee.student_id);

    let (views, total) = engine::list(
        &pool,
        &admin,
        AchievementFilter::default(),
        default_page(),
    )
    .await
    .unwrap();
    assert_eq!((views.len(), total), (2, 2));

    // Admin drill-down to one student.
    let (views, total) = engine::list(
        &pool,
        &admin,
        AchievementFilter {
            status: None,
            student_id: Some(outsider.student_id),
        },
        default_page(),
    )
    .await
    .unwrap();
    assert_eq!((views.len(), total), (1, 1));
    assert_eq!(views[0].reference.student_id, outsider.student_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reassignment_is_admin_only_and_keeps_stores_consistent(pool: PgPool) {
    let admin = seed_admin(&pool, "root").await;
    let from_student = seed_student(&pool, "ivan", None).await;
    let to_student = seed_student(&pool, "judy", None).await;

    let reference = engine::create(&pool, &from_student.principal, sample_create(None))
        .await
        .unwrap();

    let err = engine::reassign_student(
        &pool,
        &from_student.principal,
        reference.id,
        to_student.student_id,
    )
    .await
    .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));

    engine::reassign_student(&pool, &admin, reference.id, to_student.student_id)
        .await
        .unwrap();

    let view = engine::read(&pool, &to_student.principal, reference.id)
        .await
        .unwrap();
    assert_eq!(view.reference.student_id, to_student.student_id);
    // The denormalized copy in the document moved with it.
    assert_eq!(view.content.student_id, to_student.student_id);

    // The previous owner lost visibility.
    let err = engine::read(&pool, &from_student.principal, reference.id)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Forbidden(_)));
}

//! Shared helpers for API integration tests.
//!
//! Seeds identity/directory rows through the real repositories and builds
//! the matching [`Principal`] values, so engine tests exercise the same
//! capability sets the login flow would embed in a JWT.

use std::sync::Arc;

use axum::Router;
use merit_core::permissions::{
    PERM_CREATE_ACHIEVEMENT, PERM_DELETE_ACHIEVEMENT, PERM_READ_ACHIEVEMENT, PERM_READ_REPORT,
    PERM_UPDATE_ACHIEVEMENT, PERM_VERIFY_ACHIEVEMENT, PERM_WILDCARD,
};
use merit_core::principal::Principal;
use merit_core::roles::Role;
use merit_core::types::DbId;
use merit_db::models::achievement::{AchievementDetails, CreateAchievement};
use merit_db::models::lecturer::CreateLecturer;
use merit_db::models::student::CreateStudent;
use merit_db::models::user::CreateUser;
use merit_db::repositories::{LecturerRepo, RoleRepo, StudentRepo, UserRepo};
use sqlx::PgPool;

use merit_api::auth::jwt::JwtConfig;
use merit_api::config::ServerConfig;
use merit_api::router::build_app_router;
use merit_api::state::AppState;

/// A seeded student account: user row, student row, and ready-made principal.
pub struct TestStudent {
    pub user_id: DbId,
    pub student_id: DbId,
    pub principal: Principal,
}

/// A seeded advisor account: user row, lecturer row, and ready-made principal.
pub struct TestAdvisor {
    pub user_id: DbId,
    pub lecturer_id: DbId,
    pub principal: Principal,
}

/// Insert a user with the given seeded role. The password hash is a fixed
/// argon2id digest of `"secret-password-1"`.
pub async fn seed_user(pool: &PgPool, username: &str, role_name: &str) -> DbId {
    let role = RoleRepo::find_by_name(pool, role_name)
        .await
        .unwrap()
        .expect("seeded role should exist");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@campus.test"),
            password_hash: merit_api::auth::password::hash_password("secret-password-1")
                .expect("hashing should succeed"),
            full_name: username.to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();
    user.id
}

pub async fn seed_admin(pool: &PgPool, username: &str) -> Principal {
    let user_id = seed_user(pool, username, "admin").await;
    Principal::new(user_id, Role::Admin, [PERM_WILDCARD].into_iter().collect())
}

pub async fn seed_student(pool: &PgPool, username: &str, advisor_id: Option<DbId>) -> TestStudent {
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

    TestStudent {
        user_id,
        student_id: student.id,
        principal: Principal::new(
            user_id,
            Role::Student,
            [
                PERM_READ_ACHIEVEMENT,
                PERM_CREATE_ACHIEVEMENT,
                PERM_UPDATE_ACHIEVEMENT,
                PERM_DELETE_ACHIEVEMENT,
            ]
            .into_iter()
            .collect(),
        ),
    }
}

pub async fn seed_advisor(pool: &PgPool, username: &str) -> TestAdvisor {
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

    TestAdvisor {
        user_id,
        lecturer_id: lecturer.id,
        principal: Principal::new(
            user_id,
            Role::Advisor,
            [PERM_READ_ACHIEVEMENT, PERM_VERIFY_ACHIEVEMENT, PERM_READ_REPORT]
                .into_iter()
                .collect(),
        ),
    }
}

/// A create payload with realistic content.
pub fn sample_create(student_id: Option<DbId>) -> CreateAchievement {
    CreateAchievement {
        student_id,
        achievement_type: "competition".to_string(),
        title: "National Programming Contest".to_string(),
        description: "Second place, team division".to_string(),
        details: AchievementDetails {
            competition_name: "NPC".to_string(),
            competition_level: "national".to_string(),
            rank: 2,
            medal_type: "silver".to_string(),
            event_date: None,
            location: "Bandung".to_string(),
            organizer: "Dikti".to_string(),
            custom_fields: Vec::new(),
        },
        tags: vec!["programming".to_string()],
        points: 40.0,
    }
}

/// Build a test `ServerConfig` with a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-key".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the construction in `main.rs` so tests
/// exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

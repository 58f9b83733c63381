//! `MySqlStore` round trips.
//!
//! These tests require a running MySQL server and `DB_USER`, `DB_PASSWORD`
//! and `DB_NAME` in the environment. They clear both tables.
//!
//! Run with: `cargo test -p synthseed-integration-tests -- --ignored`

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use secrecy::SecretString;

use synthseed::db::{self, MySqlStore};
use synthseed::persist::{save_contact_requests, save_users};
use synthseed::{DatabaseConfig, SeedPlan, Seeder};
use synthseed_core::{ContactStatus, UserRole};
use synthseed_integration_tests::{ScriptedGenerator, to_reply, valid_contact_request, valid_user};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

async fn store() -> MySqlStore {
    let config = DatabaseConfig {
        host: env_or("DB_HOST", "127.0.0.1"),
        port: env_or("DB_PORT", "3306").parse().unwrap(),
        username: env_or("DB_USER", "root"),
        password: SecretString::from(env_or("DB_PASSWORD", "root")),
        database: env_or("DB_NAME", "synthseed_test"),
    };
    let pool = db::create_pool(&config).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    let store = MySqlStore::new(pool);
    store.clear().await.unwrap();
    store
}

#[tokio::test]
#[ignore = "Requires a running MySQL database"]
async fn test_users_saved_with_defaults_and_duplicates_skipped() {
    let store = store().await;

    let summary = save_users(&store, vec![valid_user(1), valid_user(2), valid_user(1)])
        .await
        .unwrap();
    assert_eq!(summary.saved, 2);
    assert_eq!(summary.conflicts, 1);

    let rows: Vec<(String, String, bool, i32)> = sqlx::query_as(
        "SELECT email, role, enabled, failed_login_attempts FROM users ORDER BY id",
    )
    .fetch_all(store.pool())
    .await
    .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, "user1@example.com");
    assert_eq!(rows[0].1, UserRole::User.as_str());
    assert!(rows[0].2);
    assert_eq!(rows[0].3, 0);

    let emails = store.user_emails().await.unwrap();
    assert!(emails.contains("user2@example.com"));
}

#[tokio::test]
#[ignore = "Requires a running MySQL database"]
async fn test_contact_request_defaults_to_new_status() {
    let store = store().await;

    let mut request = valid_contact_request(1);
    request.user_id = Some(synthseed_core::UserId::new(9999));
    let summary = save_contact_requests(&store, vec![request]).await.unwrap();
    assert_eq!(summary.saved, 1);

    let (user_id, status): (Option<u64>, String) =
        sqlx::query_as("SELECT user_id, status FROM contact_requests")
            .fetch_one(store.pool())
            .await
            .unwrap();
    assert_eq!(user_id, Some(9999));
    assert_eq!(status.parse::<ContactStatus>().unwrap(), ContactStatus::New);
}

#[tokio::test]
#[ignore = "Requires a running MySQL database"]
async fn test_seeder_writes_through_mysql_store() {
    let store = store().await;
    let seeder = Seeder::new(
        ScriptedGenerator::new().user_reply(to_reply(&[valid_user(1), valid_user(2)])),
        store,
        SeedPlan {
            users: 2,
            contact_requests: 0,
            batch_size: 2,
        },
    );

    let report = seeder.run().await.unwrap();
    assert_eq!(report.users.saved, 2);
    assert_eq!(seeder.store().user_emails().await.unwrap().len(), 2);

    let (users, contact_requests) = seeder.store().clear().await.unwrap();
    assert_eq!((users, contact_requests), (2, 0));
}

#[tokio::test]
#[ignore = "Requires a running MySQL database"]
async fn test_long_unvalidated_fields_are_stored() {
    let store = store().await;

    let mut user = valid_user(1);
    user.city = "Llanfairpwllgwyngyll ".repeat(15).trim_end().to_string();
    let mut request = valid_contact_request(1);
    request.subject = "s".repeat(300);

    assert_eq!(save_users(&store, vec![user.clone()]).await.unwrap().saved, 1);
    assert_eq!(
        save_contact_requests(&store, vec![request]).await.unwrap().saved,
        1
    );

    let city: String = sqlx::query_scalar("SELECT city FROM users")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(city, user.city);
    let subject_len: i64 = sqlx::query_scalar("SELECT CHAR_LENGTH(subject) FROM contact_requests")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(subject_len, 300);
}

//! End-to-end seeding scenarios against the in-memory store.
//!
//! The generator replays raw model replies, so these tests cover parsing,
//! validation, persistence and the loop together without network or MySQL.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::Value;

use synthseed::{GenerationError, SeedError, SeedPlan, Seeder};
use synthseed_core::{ContactStatus, UserRole};
use synthseed_integration_tests::{
    InMemoryStore, ScriptedGenerator, to_reply, valid_contact_request, valid_user,
};

fn plan(users: usize, contact_requests: usize) -> SeedPlan {
    SeedPlan {
        users,
        contact_requests,
        batch_size: 50,
    }
}

#[tokio::test]
async fn test_user_with_leading_digit_is_not_persisted() {
    let mut bob = valid_user(2);
    bob.first_name = "123Bob".to_string();
    let reply = to_reply(&[valid_user(1), bob]);

    let seeder = Seeder::new(
        ScriptedGenerator::new().user_reply(reply),
        InMemoryStore::new(),
        plan(2, 0),
    );
    let report = seeder.run().await.unwrap();

    assert_eq!(report.users.attempted, 2);
    assert_eq!(report.users.saved, 1);
    assert_eq!(report.users.rejected, 1);
    let stored = seeder.store().users();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "user1@example.com");
    assert_eq!(stored[0].role, UserRole::User);
}

#[tokio::test]
async fn test_short_contact_message_is_skipped() {
    let mut short = valid_contact_request(1);
    short.message = "m".repeat(40);
    let reply = to_reply(&[short, valid_contact_request(2)]);

    let seeder = Seeder::new(
        ScriptedGenerator::new().contact_request_reply(reply),
        InMemoryStore::new(),
        plan(0, 2),
    );
    let report = seeder.run().await.unwrap();

    assert_eq!(report.contact_requests.saved, 1);
    assert_eq!(report.contact_requests.rejected, 1);
    let stored = seeder.store().contact_requests();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].email, "contact2@example.com");
    assert_eq!(stored[0].status, ContactStatus::New);
}

#[tokio::test]
async fn test_full_valid_batch_is_persisted_in_one_call() {
    let users: Vec<_> = (1..=50).map(valid_user).collect();

    let seeder = Seeder::new(
        ScriptedGenerator::new().user_reply(to_reply(&users)),
        InMemoryStore::new(),
        plan(50, 0),
    );
    let report = seeder.run().await.unwrap();

    assert_eq!(report.user_batches, 1);
    assert_eq!(report.users.saved, 50);
    assert_eq!(seeder.store().users().len(), 50);
}

#[tokio::test]
async fn test_fenced_reply_is_parsed() {
    let reply = format!("```json\n{}\n```", to_reply(&[valid_user(1)]));

    let seeder = Seeder::new(
        ScriptedGenerator::new().user_reply(reply),
        InMemoryStore::new(),
        plan(1, 0),
    );
    let report = seeder.run().await.unwrap();

    assert_eq!(report.users.saved, 1);
}

#[tokio::test]
async fn test_null_email_is_rejected_not_fatal() {
    let mut nameless = serde_json::to_value(valid_user(2)).unwrap();
    nameless["email"] = Value::Null;
    let reply = Value::Array(vec![serde_json::to_value(valid_user(1)).unwrap(), nameless]);

    let seeder = Seeder::new(
        ScriptedGenerator::new().user_reply(reply.to_string()),
        InMemoryStore::new(),
        plan(2, 0),
    );
    let report = seeder.run().await.unwrap();

    assert_eq!(report.users.attempted, 2);
    assert_eq!(report.users.saved, 1);
    assert_eq!(report.users.rejected, 1);
    assert_eq!(seeder.store().users()[0].email, "user1@example.com");
}

#[tokio::test]
async fn test_malformed_reply_aborts_run() {
    let seeder = Seeder::new(
        ScriptedGenerator::new()
            .user_reply(to_reply(&[valid_user(1)]))
            .user_reply("Sure! Here are your users: [{\"firstName\": "),
        InMemoryStore::new(),
        SeedPlan {
            users: 2,
            contact_requests: 0,
            batch_size: 1,
        },
    );
    let err = seeder.run().await.unwrap_err();

    assert!(matches!(err, SeedError::Generation(GenerationError::Json(_))));
    // The first batch was already written.
    assert_eq!(seeder.store().users().len(), 1);
}

#[tokio::test]
async fn test_remaining_counts_returned_not_saved() {
    let mut invalid = valid_user(2);
    invalid.phone = "12-34".to_string();
    let seeder = Seeder::new(
        ScriptedGenerator::new()
            .user_reply(to_reply(&[valid_user(1), invalid]))
            .user_reply(to_reply(&[valid_user(3)])),
        InMemoryStore::new(),
        SeedPlan {
            users: 3,
            contact_requests: 0,
            batch_size: 2,
        },
    );
    let report = seeder.run().await.unwrap();

    // Two batches cover three returned records; the invalid one is not replaced.
    assert_eq!(report.user_batches, 2);
    assert_eq!(report.users.saved, 2);
    assert_eq!(seeder.generator().requested(), vec![2, 2]);
}

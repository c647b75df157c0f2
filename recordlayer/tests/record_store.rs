//! Integration tests for recordlayer
//!
//! These tests drive the store through the public facade, with schema types declared by
//! `#[derive(Record)]` or by hand.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use recordlayer::prelude::*;

#[derive(Debug, Clone, PartialEq, Record)]
#[record(name = "users")]
struct User {
    #[record(index)]
    username: String,
    firstname: String,
    lastname: String,
    #[record(index)]
    num: u32,
    #[record(index)]
    email: String,
}

fn user(username: &str, num: u32, email: &str) -> User {
    User {
        username: username.to_string(),
        firstname: "First".to_string(),
        lastname: "Last".to_string(),
        num,
        email: email.to_string(),
    }
}

fn usernames(rows: &[Arc<User>]) -> Vec<String> {
    rows.iter().map(|row| row.username.clone()).collect()
}

// =============================================================================
// Derive Tests
// =============================================================================

#[derive(Debug, Record)]
struct AuditEntry {
    #[record(index, name = "entry_id")]
    id: u64,
    #[record(index)]
    actor: Option<String>,
    note: String,
}

#[test]
fn test_derive_declares_indexed_attributes() {
    assert_eq!(User::record_name(), "users");
    assert_eq!(User::indexed_attributes(), &["username", "num", "email"]);

    assert_eq!(AuditEntry::record_name(), "audit_entry");
    assert_eq!(AuditEntry::indexed_attributes(), &["entry_id", "actor"]);
}

#[test]
fn test_derive_reads_private_fields() {
    let row = user("chris1", 1, "chris@example.com");

    assert_eq!(row.index_value("num"), Ok(IndexValue::Int(1)));
    assert_eq!(row.index_value("username"), Ok(IndexValue::from("chris1")));
    assert_eq!(
        row.index_value("firstname"),
        Err(RecordStoreError::UnknownAttribute {
            attribute: "firstname".to_string(),
            record: "users".to_string(),
        })
    );
}

#[test]
fn test_derive_maps_none_and_reports_conversion_failures() {
    let entry = AuditEntry {
        id: u64::MAX,
        actor: None,
        note: String::new(),
    };

    assert_eq!(entry.index_value("actor"), Ok(IndexValue::Null));
    assert!(matches!(
        entry.index_value("entry_id"),
        Err(RecordStoreError::AttributeAccess { ref attribute, .. }) if attribute == "entry_id"
    ));
}

// =============================================================================
// Admission Tests
// =============================================================================

#[tokio::test]
async fn test_user_scenario() {
    let store = RecordStore::<User>::new();
    store
        .register_predicate(|user: &User| user.username != "admin", "Protect admin username")
        .await;

    store.add_row(user("admin", 0, "admin@example.com")).await;
    store.add_row(user("chris1", 1, "chris1@example.com")).await;
    store.add_row(user("chris2", 2, "chris2@example.com")).await;

    assert_eq!(store.row_count().await, 2);
    assert_eq!(usernames(&store.find_rows(1u32, |_: &User| false).await), vec!["chris1"]);
    assert!(store.find_rows(99u32, |_: &User| false).await.is_empty());
}

#[tokio::test]
async fn test_failing_first_predicate_never_runs_the_second() {
    let second_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&second_calls);

    let store = RecordStore::<User>::new();
    store
        .register_predicate(
            |user: &User| !user.email.contains(".tv"),
            "Do not allow any .tv emails",
        )
        .await;
    store
        .register_predicate(
            move |_: &User| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            },
            "",
        )
        .await;

    store.add_row(user("tv", 1, "tv@example.tv")).await;
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.row_count().await, 0);
}

#[tokio::test]
async fn test_unique_predicate_in_any_order_where_first_match_leads() {
    let store = RecordStore::<User>::builder()
        .require_unique(|user: &User| user.email.ends_with(".au"), "Single AU email")
        .build();

    store.add_row(user("c", 3, "c@example.com")).await;
    store.add_row(user("a", 1, "a@example.au")).await;
    store.add_row(user("b", 2, "b@example.au")).await;

    assert_eq!(usernames(&store.rows().await), vec!["c", "a"]);
}

#[tokio::test]
async fn test_absent_rows_are_rejected_by_default() {
    let store = RecordStore::<User>::new();

    assert_eq!(
        store.try_add_row(None::<User>).await,
        Admission::Rejected {
            position: 0,
            description: "Null object check".to_string(),
        }
    );
    assert!(store.try_add_row(Some(user("x", 1, "x@example.com"))).await.is_accepted());
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[tokio::test]
async fn test_index_hit_preempts_matching_scan() {
    let store = RecordStore::<User>::new();

    store.add_row(user("older", 1, "shared@example.com")).await;
    store.add_row(user("newer", 2, "shared@example.com")).await;
    store.add_row(user("third", 3, "third@example.com")).await;

    let found = store
        .find_rows("shared@example.com", |user: &User| user.email.ends_with("example.com"))
        .await;

    assert_eq!(usernames(&found), vec!["newer"]);
}

#[tokio::test]
async fn test_index_is_shared_across_attributes() {
    let store = RecordStore::<User>::new();

    store.add_row(user("x@y.com", 1, "a@y.com")).await;
    store.add_row(user("bob", 2, "x@y.com")).await;

    let found = store.find_rows("x@y.com", |_: &User| false).await;
    assert_eq!(usernames(&found), vec!["bob"]);

    let found = store.find_rows("a@y.com", |_: &User| false).await;
    assert_eq!(usernames(&found), vec!["x@y.com"]);
}

#[tokio::test]
async fn test_bound_query_equals_find_rows_for_unindexed_values() {
    fn email_contains(user: &User) -> Matcher<'_> {
        matcher(move |value| user.email.contains(&value.to_string()))
    }

    let store = RecordStore::<User>::new();
    store.add_row(user("chris1", 1, "chris1@example.com")).await;
    store.add_row(user("chris2", 2, "chris2@example.au")).await;
    store.add_row(user("pat", 3, "pat@example.com")).await;

    let query = store.build_query(email_contains);

    for raw in ["example", ".au", "chris", "missing"] {
        let value = IndexValue::from(raw);
        let direct = store
            .find_rows(value.clone(), |user: &User| email_contains(user)(&value))
            .await;

        assert_eq!(usernames(&query.find(value.clone()).await), usernames(&direct));
    }
}

// =============================================================================
// Index Resilience Tests
// =============================================================================

struct Flaky {
    name: String,
}

impl Record for Flaky {
    fn record_name() -> &'static str {
        "flaky"
    }

    fn indexed_attributes() -> &'static [&'static str] {
        &["broken", "name"]
    }

    fn index_value(&self, attribute: &str) -> RecordStoreResult<IndexValue> {
        match attribute {
            "name" => Ok(IndexValue::from(&self.name)),
            _ => Err(RecordStoreError::AttributeAccess {
                attribute: attribute.to_string(),
                record: Self::record_name().to_string(),
                reason: "not readable".to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn test_unreadable_attribute_does_not_block_admission() {
    let store = RecordStore::<Flaky>::new();

    let outcome = store
        .try_add_row(Flaky {
            name: "kept".to_string(),
        })
        .await;

    assert!(outcome.is_accepted());
    assert_eq!(store.row_count().await, 1);
    assert_eq!(store.index_len().await, 1);
    assert_eq!(store.find_rows("kept", |_: &Flaky| false).await.len(), 1);
}

#[tokio::test]
async fn test_out_of_range_index_value_is_skipped() {
    let store = RecordStore::<AuditEntry>::new();

    store
        .add_row(AuditEntry {
            id: u64::MAX,
            actor: Some("ops".to_string()),
            note: "rotated keys".to_string(),
        })
        .await;

    assert_eq!(store.row_count().await, 1);
    assert_eq!(store.index_len().await, 1);

    let found = store.find_rows("ops", |_: &AuditEntry| false).await;
    assert_eq!(found[0].note, "rotated keys");
}

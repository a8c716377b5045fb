//! Repository-level tests for the request ledger: the pending-uniqueness
//! invariant under both dedup scopes, and request consumption via `resolve`.

mod common;

use sqlx::PgPool;

use changerawr_core::publication::{DedupScope, RequestStatus, RequestType};
use changerawr_db::models::request::SubmitRequest;
use changerawr_db::repositories::entry_repo::EntryRepo;
use changerawr_db::repositories::request_repo::RequestRepo;

fn submit_input(staff_id: i64, project_id: i64, entry_id: i64, ty: RequestType) -> SubmitRequest {
    SubmitRequest {
        request_type: ty,
        staff_id,
        project_id,
        changelog_entry_id: entry_id,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn submit_creates_pending_request(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    let request = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .expect("first submission should succeed");

    assert_eq!(request.status, "PENDING");
    assert_eq!(request.request_type, "ALLOW_PUBLISH");
    assert_eq!(request.staff_id, staff);
    assert_eq!(request.changelog_entry_id, entry);
    assert!(request.reviewed_by.is_none());
    assert!(request.reviewed_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_submission_is_rejected_without_inserting(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    let input = submit_input(staff, project, entry, RequestType::AllowPublish);
    RequestRepo::submit(&pool, &input, DedupScope::default())
        .await
        .unwrap()
        .expect("first submission should succeed");

    let duplicate = RequestRepo::submit(&pool, &input, DedupScope::default())
        .await
        .unwrap();
    assert!(duplicate.is_none());

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM changelog_requests WHERE changelog_entry_id = $1")
            .bind(entry)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn per_type_scope_allows_a_second_type(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::PerEntryAndType,
    )
    .await
    .unwrap()
    .expect("publish request should succeed");

    let delete = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::DeleteEntry),
        DedupScope::PerEntryAndType,
    )
    .await
    .unwrap();
    assert!(delete.is_some(), "a different type is not a duplicate");
}

#[sqlx::test(migrations = "./migrations")]
async fn per_entry_scope_blocks_any_second_request(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::PerEntry,
    )
    .await
    .unwrap()
    .expect("publish request should succeed");

    let delete = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::DeleteEntry),
        DedupScope::PerEntry,
    )
    .await
    .unwrap();
    assert!(delete.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn requests_for_different_entries_are_independent(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry_a = common::seed_entry(&pool, project, "A").await;
    let entry_b = common::seed_entry(&pool, project, "B").await;

    RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry_a, RequestType::AllowPublish),
        DedupScope::PerEntry,
    )
    .await
    .unwrap()
    .expect("first entry should queue");

    let other = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry_b, RequestType::AllowPublish),
        DedupScope::PerEntry,
    )
    .await
    .unwrap();
    assert!(other.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn approving_publish_request_publishes_entry(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let admin = common::seed_staff(&pool, "admin@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    let request = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();

    let resolved = RequestRepo::resolve(&pool, request.id, RequestStatus::Approved, admin)
        .await
        .unwrap()
        .expect("pending request should resolve");
    assert_eq!(resolved.status, "APPROVED");
    assert_eq!(resolved.reviewed_by, Some(admin));
    assert!(resolved.reviewed_at.is_some());

    let entry = EntryRepo::find_by_id(&pool, project, entry)
        .await
        .unwrap()
        .unwrap();
    assert!(entry.is_published());
}

#[sqlx::test(migrations = "./migrations")]
async fn approving_delete_request_removes_entry_and_cascades(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let admin = common::seed_staff(&pool, "admin@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Doomed").await;

    let request = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::DeleteEntry),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();

    let resolved = RequestRepo::resolve(&pool, request.id, RequestStatus::Approved, admin)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, "APPROVED");

    assert!(EntryRepo::find_by_id(&pool, project, entry)
        .await
        .unwrap()
        .is_none());

    // The request row went with the entry via the FK cascade.
    assert!(RequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn rejecting_request_leaves_entry_untouched(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let admin = common::seed_staff(&pool, "admin@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    let request = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();

    let resolved = RequestRepo::resolve(&pool, request.id, RequestStatus::Rejected, admin)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.status, "REJECTED");

    let entry_row = EntryRepo::find_by_id(&pool, project, entry)
        .await
        .unwrap()
        .unwrap();
    assert!(!entry_row.is_published());

    // A rejected request no longer blocks the entry.
    let again = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap();
    assert!(again.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn resolve_is_single_use(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let admin = common::seed_staff(&pool, "admin@example.com").await;
    let project = common::seed_project(&pool, "Ledger").await;
    let entry = common::seed_entry(&pool, project, "Draft").await;

    let request = RequestRepo::submit(
        &pool,
        &submit_input(staff, project, entry, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();

    RequestRepo::resolve(&pool, request.id, RequestStatus::Rejected, admin)
        .await
        .unwrap()
        .unwrap();

    let second = RequestRepo::resolve(&pool, request.id, RequestStatus::Approved, admin)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_pending_is_scoped_and_ordered(pool: PgPool) {
    let staff = common::seed_staff(&pool, "staff@example.com").await;
    let admin = common::seed_staff(&pool, "admin@example.com").await;
    let project_a = common::seed_project(&pool, "A").await;
    let project_b = common::seed_project(&pool, "B").await;
    let entry_a1 = common::seed_entry(&pool, project_a, "A1").await;
    let entry_a2 = common::seed_entry(&pool, project_a, "A2").await;
    let entry_b1 = common::seed_entry(&pool, project_b, "B1").await;

    let first = RequestRepo::submit(
        &pool,
        &submit_input(staff, project_a, entry_a1, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();
    let second = RequestRepo::submit(
        &pool,
        &submit_input(staff, project_a, entry_a2, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();
    let other_project = RequestRepo::submit(
        &pool,
        &submit_input(staff, project_b, entry_b1, RequestType::AllowPublish),
        DedupScope::default(),
    )
    .await
    .unwrap()
    .unwrap();

    // A resolved request drops out of the queue.
    RequestRepo::resolve(&pool, other_project.id, RequestStatus::Approved, admin)
        .await
        .unwrap();

    let pending = RequestRepo::list_pending(&pool, project_a).await.unwrap();
    let ids: Vec<i64> = pending.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    assert!(RequestRepo::list_pending(&pool, project_b)
        .await
        .unwrap()
        .is_empty());
}

//! Tests for the awards record service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::MockAwardRepository;
use crate::domain::{ErrorCode, RecordStatus};

fn make_service(repo: MockAwardRepository) -> AwardsService<MockAwardRepository> {
    AwardsService::new(Arc::new(repo))
}

fn new_award(name: &str) -> NewAward {
    NewAward::try_new(name, None, None, Some(3), None).expect("valid payload")
}

fn stored_award(id: i32, name: &str) -> Award {
    let now = chrono::Utc::now();
    Award {
        id,
        name: name.to_owned(),
        description: None,
        status: RecordStatus::Planned,
        quantity: 3,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
#[tokio::test]
async fn create_returns_the_stored_row() {
    let mut repo = MockAwardRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|new| Ok(stored_award(1, new.name())));

    let award = make_service(repo)
        .create(new_award("MVP Trophy"))
        .await
        .expect("create succeeds");
    assert_eq!(award.id, 1);
    assert_eq!(award.name, "MVP Trophy");
}

#[rstest]
#[tokio::test]
async fn empty_patch_is_rejected_without_a_store_call() {
    // No expectations: any repository call would panic the mock.
    let repo = MockAwardRepository::new();

    let err = make_service(repo)
        .update(1, AwardPatch::default())
        .await
        .expect_err("empty patch rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_row_maps_to_not_found() {
    let mut repo = MockAwardRepository::new();
    repo.expect_update().times(1).return_once(|_, _| Ok(None));

    let patch = AwardPatch {
        status: Some(RecordStatus::Delivered),
        ..AwardPatch::default()
    };
    let err = make_service(repo)
        .update(42, patch)
        .await
        .expect_err("missing row");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn connection_failures_map_to_service_unavailable() {
    let mut repo = MockAwardRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Err(AwardPersistenceError::connection("refused")));

    let err = make_service(repo).list().await.expect_err("store down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn query_failures_map_to_internal() {
    let mut repo = MockAwardRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Err(AwardPersistenceError::query("syntax error")));

    let err = make_service(repo).list().await.expect_err("query failed");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

mod common;

use common::{people_store, Person};
use groundwork_core::spec::{Filter, FilterSpec};
use groundwork_core::{AsyncRepository, RepoError};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn create_and_query_through_the_async_facade() {
    let repo = AsyncRepository::<Person>::new(people_store());
    let token = CancellationToken::new();

    let created = repo.create(Person::new("Ada", 36), &token).await.unwrap();
    let loaded = repo.find_by_id(created.id, &token).await.unwrap().unwrap();
    assert_eq!(loaded.id, created.id);

    let adults = FilterSpec::<Person>::new(Filter::ge("age", 18));
    let matched = repo.find(Some(adults), &token).await.unwrap();
    assert_eq!(matched.len(), 1);
}

#[tokio::test]
async fn cancelled_write_leaves_the_store_untouched() {
    let repo = AsyncRepository::<Person>::new(people_store());

    let cancelled = CancellationToken::new();
    cancelled.cancel();
    let err = repo
        .create(Person::new("Ada", 36), &cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Cancelled));

    let fresh = CancellationToken::new();
    let all = repo
        .find(None::<FilterSpec<Person>>, &fresh)
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn cancelled_read_reports_cancelled() {
    let repo = AsyncRepository::<Person>::new(people_store());
    let cancelled = CancellationToken::new();
    cancelled.cancel();

    let err = repo
        .find(None::<FilterSpec<Person>>, &cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Cancelled));
}

#[tokio::test]
async fn semantic_errors_propagate_through_the_facade() {
    let repo = AsyncRepository::<Person>::new(people_store());
    let token = CancellationToken::new();

    let ghost = Person::new("ghost", 1);
    let err = repo.update(ghost, &token).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn native_filters_run_through_the_facade() {
    let repo = AsyncRepository::<Person>::new(people_store());
    let token = CancellationToken::new();

    repo.create(Person::new("Ada", 36), &token).await.unwrap();
    repo.create(Person::new("Barbara", 19), &token).await.unwrap();

    let matched = repo.find_native(Filter::ge("age", 30), &token).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Ada");

    let err = repo
        .find_native(Filter::eq("nickname", "x"), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Translation(_)));
}

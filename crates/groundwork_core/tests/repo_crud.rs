mod common;

use common::{people_store, Person};
use groundwork_core::spec::{from_fn, Filter, FilterSpec, Specification};
use groundwork_core::{RepoError, Repository, SqliteRepository};

#[test]
fn create_then_find_by_id_returns_the_same_identity() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    let person = Person::new("Ada", 36);
    let key = repo.create(&person).unwrap();
    assert_eq!(key, person.id);

    let loaded = repo.find_by_id(&person.id).unwrap().unwrap();
    assert_eq!(loaded.id, person.id);
    assert_eq!(loaded.name, "Ada");
    assert_eq!(loaded.age, 36);
}

#[test]
fn find_by_unknown_id_is_none_not_an_error() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);
    assert!(repo.find_by_id(&Person::new("x", 1).id).unwrap().is_none());
}

#[test]
fn find_without_predicate_returns_every_row() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    for (name, age) in [("Ada", 36), ("Grace", 45), ("Edsger", 72)] {
        repo.create(&Person::new(name, age)).unwrap();
    }

    assert_eq!(repo.find(None).unwrap().len(), 3);
    assert!(repo.find_one(None).unwrap().is_some());
}

#[test]
fn find_one_returns_the_first_row_in_id_order() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    for (name, age) in [("Ada", 36), ("Grace", 45), ("Edsger", 72)] {
        repo.create(&Person::new(name, age)).unwrap();
    }

    let first = repo.find_one(None).unwrap().unwrap();
    assert_eq!(first.id, repo.find(None).unwrap()[0].id);

    let seniors = FilterSpec::<Person>::new(Filter::ge("age", 40));
    let one = repo.find_one(Some(&seniors)).unwrap().unwrap();
    assert!(one.age >= 40);

    let odd_age = from_fn(|p: &Person| p.age % 2 == 1);
    let fallback = repo.find_one(Some(&odd_age)).unwrap().unwrap();
    assert_eq!(fallback.age, 45);
}

#[test]
fn find_with_no_match_returns_an_empty_list() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);
    repo.create(&Person::new("Ada", 36)).unwrap();

    let nobody = from_fn(|p: &Person| p.age > 1000);
    assert!(repo.find(Some(&nobody)).unwrap().is_empty());
    assert!(repo.find_one(Some(&nobody)).unwrap().is_none());
}

#[test]
fn age_band_predicate_selects_exactly_the_middle_entity() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    repo.create(&Person::new("young", 5)).unwrap();
    let middle = Person::new("middle", 15);
    repo.create(&middle).unwrap();
    repo.create(&Person::new("old", 25)).unwrap();

    let at_least_ten = FilterSpec::<Person>::new(Filter::ge("age", 10));
    let at_least_twenty = FilterSpec::<Person>::new(Filter::ge("age", 20));
    let band = at_least_ten.and_not(at_least_twenty);

    let matched = repo.find(Some(&band)).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, middle.id);
}

#[test]
fn update_rewrites_an_existing_row() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    let mut person = Person::new("Ada", 36);
    repo.create(&person).unwrap();

    person.age = 37;
    person.email = Some("ada@example.org".to_string());
    repo.update(&person).unwrap();

    let loaded = repo.find_by_id(&person.id).unwrap().unwrap();
    assert_eq!(loaded.age, 37);
    assert_eq!(loaded.email.as_deref(), Some("ada@example.org"));
}

#[test]
fn update_of_a_never_created_entity_is_not_found() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    let ghost = Person::new("ghost", 1);
    let err = repo.update(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == ghost.id.to_string()));
}

#[test]
fn delete_removes_the_row_and_repeats_as_not_found() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    let person = Person::new("Ada", 36);
    repo.create(&person).unwrap();
    repo.delete(&person).unwrap();

    assert!(repo.find_by_id(&person.id).unwrap().is_none());
    assert!(matches!(
        repo.delete(&person).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn writes_reject_invalid_entities_before_touching_the_store() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    let blank = Person::new("   ", 36);
    assert!(matches!(
        repo.create(&blank).unwrap_err(),
        RepoError::Validation(_)
    ));

    let ancient = Person::new("Ada", 200);
    assert!(matches!(
        repo.create(&ancient).unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(repo.find(None).unwrap().is_empty());
}

#[test]
fn staged_writes_follow_the_callers_transaction() {
    let conn = people_store();
    let repo = SqliteRepository::<Person>::new(&conn);

    conn.execute_batch("BEGIN").unwrap();
    repo.create(&Person::new("Ada", 36)).unwrap();
    conn.execute_batch("ROLLBACK").unwrap();
    assert!(repo.find(None).unwrap().is_empty());

    conn.execute_batch("BEGIN").unwrap();
    repo.create(&Person::new("Grace", 45)).unwrap();
    conn.execute_batch("COMMIT").unwrap();
    assert_eq!(repo.find(None).unwrap().len(), 1);
}

//! Integration tests for the Features mutation/read facade.

use curtain_flags::{Curtain, CurtainConfig, Features, MemoryFlagStore};
use std::collections::HashSet;
use std::sync::Arc;

fn users(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn setup() -> (Arc<MemoryFlagStore>, Features, Curtain) {
    let store = Arc::new(MemoryFlagStore::new());
    let features = Features::new(store.clone());
    let curtain = Curtain::new(store.clone(), CurtainConfig::default());
    (store, features, curtain)
}

#[tokio::test]
async fn added_single_user_is_enabled() {
    let (_, features, curtain) = setup();
    let ids = users(&["MPA-00000000000"]);

    features.add_users("feature", &ids).await.unwrap();

    assert!(curtain.is_open("feature", &ids).await);
}

#[tokio::test]
async fn added_multiple_users_are_enabled() {
    let (_, features, curtain) = setup();
    let ids = users(&["MPA-000000000000", "MPA-111111111111"]);

    features.add_users("feature", &ids).await.unwrap();

    assert!(curtain.is_open("feature", &ids).await);
}

#[tokio::test]
async fn removed_users_are_disabled() {
    let (_, features, curtain) = setup();
    let ids = users(&["MPA-000000000000", "MPA-111111111111"]);

    features.add_users("feature", &ids).await.unwrap();
    features.remove_users("feature", &ids).await.unwrap();

    assert!(!curtain.is_open("feature", &ids).await);
}

#[tokio::test]
async fn removing_one_user_keeps_the_other() {
    let (_, features, curtain) = setup();
    let ids = users(&["MPA-000000000000", "MPA-111111111111"]);

    features.add_users("feature", &ids).await.unwrap();
    features
        .remove_users("feature", &users(&["MPA-111111111111"]))
        .await
        .unwrap();

    assert!(curtain.is_open("feature", &users(&["MPA-000000000000"])).await);
    assert!(!curtain.is_open("feature", &ids).await);
}

#[tokio::test]
async fn percentage_100_opens_for_everyone() {
    let (_, features, curtain) = setup();

    features.set_percentage("feature", 100).await.unwrap();

    assert!(curtain.is_open("feature", &[]).await);
    assert!(curtain.is_open("feature", &users(&["anyone"])).await);
}

#[tokio::test]
async fn percentage_0_closes_for_everyone() {
    let (_, features, curtain) = setup();

    features.set_percentage("feature", 0).await.unwrap();

    assert!(!curtain.is_open("feature", &[]).await);
    assert!(!curtain.is_open("feature", &users(&["anyone"])).await);
}

#[tokio::test]
async fn list_users_returns_exactly_the_added_users() {
    let (_, features, _) = setup();
    let ids = users(&["MPA-000000000000", "MPA-111111111111"]);

    features.add_users("feature", &ids).await.unwrap();

    let listed = features.list_users("feature").await.unwrap();
    let expected: HashSet<String> = ids.iter().cloned().collect();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn list_users_is_empty_by_default() {
    let (_, features, _) = setup();
    assert!(features.list_users("feature").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_users_has_no_duplicates() {
    let (_, features, _) = setup();
    let ids = users(&["MPA-000000000000"]);

    features.add_users("feature", &ids).await.unwrap();
    features.add_users("feature", &ids).await.unwrap();

    assert_eq!(features.list_users("feature").await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_percentage_round_trips() {
    let (_, features, _) = setup();

    for pct in [0u8, 1, 37, 99, 100] {
        features.set_percentage("feature", pct).await.unwrap();
        assert_eq!(
            features.get_percentage("feature").await.unwrap(),
            Some(pct)
        );
    }
}

#[tokio::test]
async fn unset_percentage_reads_back_as_none() {
    let (_, features, _) = setup();
    assert_eq!(features.get_percentage("never_set").await.unwrap(), None);
}

#[tokio::test]
async fn percentage_over_100_is_rejected() {
    let (_, features, _) = setup();

    let err = features.set_percentage("feature", 101).await.unwrap_err();
    assert!(matches!(
        err,
        curtain_flags::FlagError::InvalidPercentage(101)
    ));

    // Nothing was written
    assert_eq!(features.get_percentage("feature").await.unwrap(), None);
}

#[tokio::test]
async fn allow_list_and_percentage_are_independent() {
    let (_, features, _) = setup();
    let ids = users(&["MPA-000000000000"]);

    features.add_users("feature", &ids).await.unwrap();
    assert_eq!(features.get_percentage("feature").await.unwrap(), None);

    features.set_percentage("feature", 50).await.unwrap();
    let expected: HashSet<String> = ids.iter().cloned().collect();
    assert_eq!(features.list_users("feature").await.unwrap(), expected);
}

#[tokio::test]
async fn mutation_failures_propagate() {
    use curtain_flags::StoreOp;

    let (store, features, _) = setup();
    store.fail_on(StoreOp::SetAdd).await;

    let err = features
        .add_users("feature", &users(&["u1"]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        curtain_flags::FlagError::StoreUnavailable(_)
    ));
}

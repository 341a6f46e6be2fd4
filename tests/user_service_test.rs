//! User service unit tests: profiles, follows and admin operations.

mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use bookclub::errors::AppError;
use bookclub::services::{UserManager, UserService};
use bookclub::types::PaginationParams;

use common::{test_user, TestMocks};

#[tokio::test]
async fn get_user_returns_user() {
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(test_user(id))));

    let service = UserManager::new(mocks.build());
    let user = service.get_user(user_id).await.unwrap();

    assert_eq!(user.id, user_id);
}

#[tokio::test]
async fn get_user_not_found() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_id().returning(|_| Ok(None));

    let service = UserManager::new(mocks.build());
    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn profile_includes_follow_counts() {
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks
        .follows
        .expect_count_followers()
        .with(eq(user_id))
        .returning(|_| Ok(3));
    mocks
        .follows
        .expect_count_following()
        .with(eq(user_id))
        .returning(|_| Ok(7));

    let service = UserManager::new(mocks.build());
    let profile = service.profile(user_id).await.unwrap();

    assert_eq!(profile.followers, 3);
    assert_eq!(profile.following, 7);
}

#[tokio::test]
async fn update_profile_rejects_email_taken_by_another_user() {
    let user_id = Uuid::new_v4();
    let other_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(test_user(other_id))));

    let service = UserManager::new(mocks.build());
    let result = service
        .update_profile(user_id, Some("taken@example.com".to_string()), None, None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn update_profile_allows_keeping_own_email() {
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_email()
        .returning(move |_| Ok(Some(test_user(user_id))));
    mocks
        .users
        .expect_update_profile()
        .returning(|id, _, _, _| Ok(test_user(id)));

    let service = UserManager::new(mocks.build());
    let result = service
        .update_profile(
            user_id,
            Some("reader@example.com".to_string()),
            Some("New bio".to_string()),
            None,
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn delete_own_account_is_rejected() {
    let user_id = Uuid::new_v4();

    let mocks = TestMocks::default();
    let service = UserManager::new(mocks.build());
    let result = service.delete_user(user_id, user_id).await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn delete_other_account_succeeds() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_delete().returning(|_| Ok(()));

    let service = UserManager::new(mocks.build());
    let result = service.delete_user(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn follow_yourself_is_rejected() {
    let user_id = Uuid::new_v4();

    let mocks = TestMocks::default();
    let service = UserManager::new(mocks.build());
    let result = service.follow(user_id, user_id).await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn follow_unknown_user_is_not_found() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_id().returning(|_| Ok(None));

    let service = UserManager::new(mocks.build());
    let result = service.follow(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn new_follow_inserts_edge_and_notification() {
    let follower = Uuid::new_v4();
    let followed = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks
        .follows
        .expect_exists()
        .with(eq(follower), eq(followed))
        .returning(|_, _| Ok(false));
    mocks
        .follows
        .expect_insert()
        .with(eq(follower), eq(followed))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks
        .notifications
        .expect_insert()
        .withf(move |recipient, actor, verb| {
            *recipient == followed && *actor == follower && verb == "started following you"
        })
        .times(1)
        .returning(|recipient, actor, _| {
            Ok(common::test_notification(Uuid::new_v4(), recipient, actor))
        });

    let service = UserManager::new(mocks.build());
    service.follow(follower, followed).await.unwrap();
}

#[tokio::test]
async fn repeat_follow_is_a_noop_without_notification() {
    let follower = Uuid::new_v4();
    let followed = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks.follows.expect_exists().returning(|_, _| Ok(true));
    // No insert expectations: a second follow must not write anything
    mocks.follows.expect_insert().times(0);
    mocks.notifications.expect_insert().times(0);

    let service = UserManager::new(mocks.build());
    service.follow(follower, followed).await.unwrap();
}

#[tokio::test]
async fn unfollow_is_idempotent() {
    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks.follows.expect_delete().returning(|_, _| Ok(()));

    let service = UserManager::new(mocks.build());
    let result = service.unfollow(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn followers_resolves_users_from_edge_ids() {
    let user_id = Uuid::new_v4();
    let follower_a = Uuid::new_v4();
    let follower_b = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks
        .follows
        .expect_follower_ids()
        .with(eq(user_id))
        .returning(move |_| Ok(vec![follower_a, follower_b]));
    mocks
        .users
        .expect_find_many()
        .returning(|ids| Ok(ids.into_iter().map(test_user).collect()));

    let service = UserManager::new(mocks.build());
    let followers = service.followers(user_id).await.unwrap();

    assert_eq!(followers.len(), 2);
}

#[tokio::test]
async fn list_users_is_paginated() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_list().returning(|_| {
        Ok((vec![test_user(Uuid::new_v4()), test_user(Uuid::new_v4())], 12))
    });

    let service = UserManager::new(mocks.build());
    let (users, total) = service
        .list_users(PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(total, 12);
}

#[tokio::test]
async fn create_admin_assigns_admin_role() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_username().returning(|_| Ok(None));
    mocks.users.expect_find_by_email().returning(|_| Ok(None));
    mocks
        .users
        .expect_create()
        .withf(|_, _, _, role, _, _| role == "admin")
        .returning(|username, email, password_hash, _, _, _| {
            let mut user = common::test_admin(Uuid::new_v4());
            user.username = username;
            user.email = email;
            user.password_hash = password_hash;
            Ok(user)
        });

    let service = UserManager::new(mocks.build());
    let admin = service
        .create_admin(
            "librarian".to_string(),
            "librarian@example.com".to_string(),
            "secure_password_123".to_string(),
        )
        .await
        .unwrap();

    assert!(admin.is_admin());
}

//! Access control service unit tests: permission checks, caching and
//! group seeding.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use bookclub::domain::{Group, Permission, UserRole};
use bookclub::errors::AppError;
use bookclub::infra::MockPermissionCache;
use bookclub::services::{AccessManager, AccessService};

use common::{test_user, TestMocks};

fn group(id: Uuid, name: &str) -> Group {
    Group {
        id,
        name: name.to_string(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn admin_role_bypasses_permission_lookup() {
    let mocks = TestMocks::default();
    let mut cache = MockPermissionCache::new();
    // Neither the cache nor the database may be consulted
    cache.expect_cached_permissions().times(0);

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    let result = service
        .require(Uuid::new_v4(), UserRole::Admin, Permission::CanDelete)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn member_with_permission_passes() {
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .access
        .expect_permission_codes_for()
        .with(eq(user_id))
        .returning(|_| Ok(vec!["can_create".to_string(), "can_edit".to_string()]));

    let mut cache = MockPermissionCache::new();
    cache.expect_cached_permissions().returning(|_| Ok(None));
    cache.expect_store_permissions().returning(|_, _| Ok(()));

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    let result = service
        .require(user_id, UserRole::Member, Permission::CanEdit)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn editor_without_view_grant_is_forbidden_to_view() {
    // The seeded editors group grants create and edit but not view
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .access
        .expect_permission_codes_for()
        .returning(|_| Ok(vec!["can_create".to_string(), "can_edit".to_string()]));

    let mut cache = MockPermissionCache::new();
    cache.expect_cached_permissions().returning(|_| Ok(None));
    cache.expect_store_permissions().returning(|_, _| Ok(()));

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    let result = service
        .require(user_id, UserRole::Member, Permission::CanView)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn cache_hit_skips_the_database() {
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks.access.expect_permission_codes_for().times(0);

    let mut cache = MockPermissionCache::new();
    cache
        .expect_cached_permissions()
        .with(eq(user_id))
        .returning(|_| Ok(Some(vec!["can_view".to_string()])));

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    let codes = service.effective_permissions(user_id).await.unwrap();

    assert_eq!(codes, vec!["can_view".to_string()]);
}

#[tokio::test]
async fn cache_failure_falls_back_to_the_database() {
    let user_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .access
        .expect_permission_codes_for()
        .returning(|_| Ok(vec!["can_view".to_string()]));

    let mut cache = MockPermissionCache::new();
    cache
        .expect_cached_permissions()
        .returning(|_| Err(AppError::internal("redis down")));
    cache
        .expect_store_permissions()
        .returning(|_, _| Err(AppError::internal("redis down")));

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    let codes = service.effective_permissions(user_id).await.unwrap();

    assert_eq!(codes, vec!["can_view".to_string()]);
}

#[tokio::test]
async fn add_member_invalidates_the_permission_cache() {
    let user_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks
        .access
        .expect_find_group_by_name()
        .withf(|name| name == "viewers")
        .returning(move |name| Ok(Some(group(group_id, name))));
    mocks
        .access
        .expect_add_member()
        .with(eq(group_id), eq(user_id))
        .times(1)
        .returning(|_, _| Ok(()));

    let mut cache = MockPermissionCache::new();
    cache
        .expect_invalidate()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    service.add_member("viewers", user_id).await.unwrap();
}

#[tokio::test]
async fn add_member_to_unknown_group_is_not_found() {
    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id))));
    mocks
        .access
        .expect_find_group_by_name()
        .returning(|_| Ok(None));

    let cache = MockPermissionCache::new();
    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    let result = service.add_member("no-such-group", Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn remove_member_invalidates_the_permission_cache() {
    let user_id = Uuid::new_v4();
    let group_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .access
        .expect_find_group_by_name()
        .returning(move |name| Ok(Some(group(group_id, name))));
    mocks
        .access
        .expect_remove_member()
        .with(eq(group_id), eq(user_id))
        .returning(|_, _| Ok(()));

    let mut cache = MockPermissionCache::new();
    cache
        .expect_invalidate()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    service.remove_member("viewers", user_id).await.unwrap();
}

#[tokio::test]
async fn seed_creates_the_default_grant_sets() {
    let editors_id = Uuid::new_v4();
    let viewers_id = Uuid::new_v4();
    let admins_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks.access.expect_ensure_group().returning(move |name| {
        let id = match name {
            "editors" => editors_id,
            "viewers" => viewers_id,
            "admins" => admins_id,
            other => panic!("unexpected group {}", other),
        };
        Ok(group(id, name))
    });
    // editors: create + edit (no view), viewers: view, admins: all four
    mocks
        .access
        .expect_grant()
        .withf(move |group_id, code| {
            if *group_id == editors_id {
                code == "can_create" || code == "can_edit"
            } else if *group_id == viewers_id {
                code == "can_view"
            } else {
                *group_id == admins_id
            }
        })
        .times(7)
        .returning(|_, _| Ok(()));

    let cache = MockPermissionCache::new();
    let service = AccessManager::new(mocks.build(), Arc::new(cache));
    service.seed_groups().await.unwrap();
}

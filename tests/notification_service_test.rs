//! Notification service unit tests.

mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use bookclub::errors::AppError;
use bookclub::services::{NotificationManager, NotificationService};
use bookclub::types::PaginationParams;

use common::{test_notification, TestMocks};

#[tokio::test]
async fn list_is_scoped_to_the_recipient() {
    let recipient = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .notifications
        .expect_list_for()
        .withf(move |id, unread_only, _| *id == recipient && !unread_only)
        .returning(|recipient_id, _, _| {
            Ok((
                vec![test_notification(Uuid::new_v4(), recipient_id, Uuid::new_v4())],
                1,
            ))
        });

    let service = NotificationManager::new(mocks.build());
    let (notifications, total) = service
        .list(recipient, false, PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(notifications[0].recipient_id, recipient);
}

#[tokio::test]
async fn unread_filter_is_forwarded() {
    let recipient = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .notifications
        .expect_list_for()
        .withf(|_, unread_only, _| *unread_only)
        .returning(|_, _, _| Ok((vec![], 0)));

    let service = NotificationManager::new(mocks.build());
    let result = service
        .list(recipient, true, PaginationParams::default())
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn mark_read_succeeds_for_own_notification() {
    let recipient = Uuid::new_v4();
    let notification_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .notifications
        .expect_mark_read()
        .with(eq(recipient), eq(notification_id))
        .returning(|_, _| Ok(true));

    let service = NotificationManager::new(mocks.build());
    service.mark_read(recipient, notification_id).await.unwrap();
}

#[tokio::test]
async fn mark_read_on_foreign_notification_is_not_found() {
    // The repository matches on recipient too, so another user's
    // notification updates zero rows
    let mut mocks = TestMocks::default();
    mocks
        .notifications
        .expect_mark_read()
        .returning(|_, _| Ok(false));

    let service = NotificationManager::new(mocks.build());
    let result = service.mark_read(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn mark_all_read_reports_the_updated_count() {
    let recipient = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .notifications
        .expect_mark_all_read()
        .with(eq(recipient))
        .returning(|_| Ok(5));

    let service = NotificationManager::new(mocks.build());
    let marked = service.mark_all_read(recipient).await.unwrap();

    assert_eq!(marked, 5);
}

#[tokio::test]
async fn unread_count_is_forwarded() {
    let mut mocks = TestMocks::default();
    mocks
        .notifications
        .expect_unread_count()
        .returning(|_| Ok(2));

    let service = NotificationManager::new(mocks.build());
    let count = service.unread_count(Uuid::new_v4()).await.unwrap();

    assert_eq!(count, 2);
}

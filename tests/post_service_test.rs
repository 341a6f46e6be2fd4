//! Post service unit tests: author-only writes and the follow feed.

mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use bookclub::errors::AppError;
use bookclub::services::{PostManager, PostService};
use bookclub::types::PaginationParams;

use common::{test_post, TestMocks};

#[tokio::test]
async fn get_post_not_found() {
    let mut mocks = TestMocks::default();
    mocks.posts.expect_find_by_id().returning(|_| Ok(None));

    let service = PostManager::new(mocks.build());
    let result = service.get_post(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn create_post_records_the_caller_as_author() {
    let author = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .posts
        .expect_create()
        .withf(move |author_id, _, _| *author_id == author)
        .returning(|author_id, title, content| {
            let mut post = test_post(Uuid::new_v4(), author_id);
            post.title = title;
            post.content = content;
            Ok(post)
        });

    let service = PostManager::new(mocks.build());
    let post = service
        .create_post(author, "Title".to_string(), "Body".to_string())
        .await
        .unwrap();

    assert_eq!(post.author_id, author);
}

#[tokio::test]
async fn update_by_author_succeeds() {
    let author = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .posts
        .expect_find_by_id()
        .with(eq(post_id))
        .returning(move |id| Ok(Some(test_post(id, author))));
    mocks
        .posts
        .expect_update()
        .returning(move |id, _, _| Ok(test_post(id, author)));

    let service = PostManager::new(mocks.build());
    let result = service
        .update_post(author, post_id, Some("New title".to_string()), None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn update_by_non_author_is_forbidden() {
    let author = Uuid::new_v4();
    let someone_else = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .posts
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_post(id, author))));
    mocks.posts.expect_update().times(0);

    let service = PostManager::new(mocks.build());
    let result = service
        .update_post(someone_else, Uuid::new_v4(), Some("Hijack".to_string()), None)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn delete_by_non_author_is_forbidden() {
    let author = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .posts
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_post(id, author))));
    mocks.posts.expect_delete().times(0);

    let service = PostManager::new(mocks.build());
    let result = service.delete_post(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn delete_by_author_succeeds() {
    let author = Uuid::new_v4();
    let post_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .posts
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_post(id, author))));
    mocks.posts.expect_delete().with(eq(post_id)).returning(|_| Ok(()));

    let service = PostManager::new(mocks.build());
    service.delete_post(author, post_id).await.unwrap();
}

#[tokio::test]
async fn feed_queries_posts_from_followed_users() {
    let user_id = Uuid::new_v4();
    let followed_a = Uuid::new_v4();
    let followed_b = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .follows
        .expect_followed_ids()
        .with(eq(user_id))
        .returning(move |_| Ok(vec![followed_a, followed_b]));
    mocks
        .posts
        .expect_list_by_authors()
        .withf(move |authors, _| authors.contains(&followed_a) && authors.contains(&followed_b))
        .returning(|authors, _| {
            let posts = authors
                .into_iter()
                .map(|a| test_post(Uuid::new_v4(), a))
                .collect::<Vec<_>>();
            let total = posts.len() as u64;
            Ok((posts, total))
        });

    let service = PostManager::new(mocks.build());
    let (posts, total) = service
        .feed(user_id, PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(total, 2);
}

#[tokio::test]
async fn feed_is_empty_when_following_nobody() {
    let mut mocks = TestMocks::default();
    mocks.follows.expect_followed_ids().returning(|_| Ok(vec![]));
    mocks
        .posts
        .expect_list_by_authors()
        .returning(|_, _| Ok((vec![], 0)));

    let service = PostManager::new(mocks.build());
    let (posts, total) = service
        .feed(Uuid::new_v4(), PaginationParams::default())
        .await
        .unwrap();

    assert!(posts.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn list_can_filter_by_author() {
    let author = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .posts
        .expect_list()
        .withf(move |filter, _| *filter == Some(author))
        .returning(|filter, _| {
            let author = filter.unwrap();
            Ok((vec![test_post(Uuid::new_v4(), author)], 1))
        });

    let service = PostManager::new(mocks.build());
    let (posts, _) = service
        .list_posts(Some(author), PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(posts[0].author_id, author);
}

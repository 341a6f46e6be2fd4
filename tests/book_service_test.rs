//! Book service unit tests.

mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use bookclub::errors::AppError;
use bookclub::services::{BookManager, BookService};
use bookclub::types::PaginationParams;

use common::{test_book, TestMocks};

#[tokio::test]
async fn get_book_not_found() {
    let mut mocks = TestMocks::default();
    mocks.books.expect_find_by_id().returning(|_| Ok(None));

    let service = BookManager::new(mocks.build());
    let result = service.get_book(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn create_book_records_who_added_it() {
    let adder = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .books
        .expect_create()
        .withf(move |_, _, _, added_by| *added_by == adder)
        .returning(|title, author, year, added_by| {
            let mut book = test_book(Uuid::new_v4(), added_by);
            book.title = title;
            book.author = author;
            book.publication_year = year;
            Ok(book)
        });

    let service = BookManager::new(mocks.build());
    let book = service
        .create_book(
            "The Dispossessed".to_string(),
            "Ursula K. Le Guin".to_string(),
            1974,
            adder,
        )
        .await
        .unwrap();

    assert_eq!(book.added_by, Some(adder));
    assert_eq!(book.publication_year, 1974);
}

#[tokio::test]
async fn update_book_forwards_partial_fields() {
    let book_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .books
        .expect_update()
        .withf(move |id, title, author, year| {
            *id == book_id
                && title.as_deref() == Some("New title")
                && author.is_none()
                && year.is_none()
        })
        .returning(|id, _, _, _| Ok(test_book(id, Uuid::new_v4())));

    let service = BookManager::new(mocks.build());
    let result = service
        .update_book(book_id, Some("New title".to_string()), None, None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn delete_book_forwards_to_repository() {
    let book_id = Uuid::new_v4();

    let mut mocks = TestMocks::default();
    mocks
        .books
        .expect_delete()
        .with(eq(book_id))
        .times(1)
        .returning(|_| Ok(()));

    let service = BookManager::new(mocks.build());
    service.delete_book(book_id).await.unwrap();
}

#[tokio::test]
async fn list_books_is_paginated() {
    let mut mocks = TestMocks::default();
    mocks.books.expect_list().returning(|_| {
        Ok((
            vec![
                test_book(Uuid::new_v4(), Uuid::new_v4()),
                test_book(Uuid::new_v4(), Uuid::new_v4()),
            ],
            30,
        ))
    });

    let service = BookManager::new(mocks.build());
    let (books, total) = service
        .list_books(PaginationParams::default())
        .await
        .unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(total, 30);
}

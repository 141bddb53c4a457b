#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! ListModel 分页的集成测试，驱动按 offset / limit 切片的网关

mod common;

use std::sync::Arc;

use bangumi_core::error::CoreError;
use bangumi_core::session::{ListModel, PageOutcome};
use bangumi_core::types::CollectionStatus;

use common::{collection_service, PagedCollectionGateway};

#[tokio::test]
async fn watching_bucket_pages_through_45_entries() {
    let gateway = Arc::new(PagedCollectionGateway::new(45));
    let service = collection_service(&gateway);
    let mut model = ListModel::new("alice", CollectionStatus::Watching, 20);
    assert_eq!(model.loaded_count(), 0);

    model.load(&service, 0, 20).await.unwrap();
    assert_eq!(model.loaded_count(), 20);
    assert_eq!(model.total(), 45);

    let outcome = model.load_next_page(&service).await.unwrap();
    assert_eq!(outcome, PageOutcome::Appended(20));
    assert_eq!(model.loaded_count(), 40);

    let outcome = model.load_next_page(&service).await.unwrap();
    assert_eq!(outcome, PageOutcome::Appended(5));
    assert_eq!(model.loaded_count(), 45);

    let before = gateway.requests().len();
    let outcome = model.load_next_page(&service).await.unwrap();
    assert_eq!(outcome, PageOutcome::Exhausted);
    assert_eq!(model.loaded_count(), 45);
    assert_eq!(gateway.requests().len(), before, "exhausted list must not fetch");

    // 顺序与服务端一致，无重复
    let ids: Vec<u32> = model.entries().iter().map(|e| e.subject_id).collect();
    assert_eq!(ids, (1..=45).collect::<Vec<u32>>());
}

#[tokio::test]
async fn loaded_count_is_sum_of_pages_and_bounded_by_total() {
    for total in [0_u32, 1, 7, 20, 21, 63] {
        let gateway = Arc::new(PagedCollectionGateway::new(total));
        let service = collection_service(&gateway);
        let mut model = ListModel::new("bob", CollectionStatus::Wish, 7);
        model.refresh(&service).await.unwrap();

        let mut sum = model.loaded_count();
        for _ in 0..20 {
            match model.load_next_page(&service).await.unwrap() {
                PageOutcome::Appended(n) => sum += n,
                PageOutcome::Exhausted => break,
            }
            assert_eq!(model.loaded_count(), sum);
            assert!(model.loaded_count() as u32 <= model.total());
        }
        assert_eq!(model.loaded_count(), total as usize);
    }
}

#[tokio::test]
async fn next_page_requests_from_loaded_count() {
    let gateway = Arc::new(PagedCollectionGateway::new(30));
    let service = collection_service(&gateway);
    let mut model = ListModel::new("carol", CollectionStatus::Done, 10);

    model.refresh(&service).await.unwrap();
    model.load_next_page(&service).await.unwrap();

    let requests = gateway.requests();
    assert!(requests[0].contains("type=2&limit=10&offset=0"));
    assert!(requests[1].contains("type=2&limit=10&offset=10"));
}

#[tokio::test]
async fn failed_load_keeps_previous_state() {
    let gateway = Arc::new(PagedCollectionGateway::new(30));
    let service = collection_service(&gateway);
    let mut model = ListModel::new("dave", CollectionStatus::Watching, 10);
    model.refresh(&service).await.unwrap();

    gateway.fail_next(1);
    let err = model.load_next_page(&service).await.unwrap_err();
    assert!(matches!(err, CoreError::NetworkError(_)));
    assert_eq!(model.loaded_count(), 10);
    assert!(!model.is_loading());

    gateway.fail_next(1);
    assert!(model.refresh(&service).await.is_err());
    assert_eq!(model.loaded_count(), 10);

    // 重试成功
    assert_eq!(
        model.load_next_page(&service).await.unwrap(),
        PageOutcome::Appended(10)
    );
}

#[tokio::test]
async fn refresh_discards_pagination_progress() {
    let gateway = Arc::new(PagedCollectionGateway::new(30));
    let service = collection_service(&gateway);
    let mut model = ListModel::new("erin", CollectionStatus::Watching, 10);
    model.refresh(&service).await.unwrap();
    model.load_next_page(&service).await.unwrap();
    model.move_to_front(15);
    assert_eq!(model.loaded_count(), 20);

    model.refresh(&service).await.unwrap();
    assert_eq!(model.loaded_count(), 10);
    assert_eq!(model.entries()[0].subject_id, 1);
}

#[tokio::test]
async fn zero_limit_is_rejected() {
    let gateway = Arc::new(PagedCollectionGateway::new(3));
    let service = collection_service(&gateway);
    let mut model = ListModel::new("frank", CollectionStatus::Watching, 10);
    let err = model.load(&service, 0, 0).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationError(_)));
    assert!(gateway.requests().is_empty());
}

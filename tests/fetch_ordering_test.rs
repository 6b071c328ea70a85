use httpmock::prelude::*;
use smashing_wallpapers::core::fetcher::ImageFetcher;
use smashing_wallpapers::core::persister::persist;
use smashing_wallpapers::domain::model::{FetchFailure, FetchOutcome};
use smashing_wallpapers::{ImageLink, LocalStorage};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[tokio::test]
async fn test_results_follow_input_order_not_completion_order() {
    let server = MockServer::start();

    // 越前面的請求回應越慢，完成順序與輸入順序相反
    let delays = [400u64, 300, 200, 100, 0];
    for (i, delay) in delays.iter().enumerate() {
        let path = format!("/order/wall-{}-1280x1024.jpg", i);
        let body = format!("wallpaper #{}", i);
        server.mock(move |when, then| {
            when.method(GET).path(path.as_str());
            then.status(200)
                .delay(Duration::from_millis(*delay))
                .body(body.as_str());
        });
    }

    let links: Vec<ImageLink> = (0..delays.len())
        .map(|i| ImageLink::new(server.url(format!("/order/wall-{}-1280x1024.jpg", i))))
        .collect();

    let results = ImageFetcher::new(reqwest::Client::new(), 0)
        .fetch_all(links)
        .await;

    assert_eq!(results.len(), delays.len());
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.link.file_name, format!("wall-{}-1280x1024.jpg", i));
        assert_eq!(
            result.outcome,
            FetchOutcome::Success(format!("wallpaper #{}", i).into_bytes())
        );
    }
}

#[tokio::test]
async fn test_unbounded_fetches_run_concurrently() {
    let server = MockServer::start();
    for i in 0..4 {
        let path = format!("/slow/{}.jpg", i);
        server.mock(move |when, then| {
            when.method(GET).path(path.as_str());
            then.status(200).delay(Duration::from_millis(500)).body("x");
        });
    }

    let links: Vec<ImageLink> = (0..4)
        .map(|i| ImageLink::new(server.url(format!("/slow/{}.jpg", i))))
        .collect();

    let started = Instant::now();
    let results = ImageFetcher::new(reqwest::Client::new(), 0)
        .fetch_all(links)
        .await;

    assert!(results.iter().all(|r| r.is_success()));
    // 依序執行至少需要 2 秒
    assert!(started.elapsed() < Duration::from_millis(1800));
}

#[tokio::test]
async fn test_one_failure_does_not_affect_siblings() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    for i in 0..5 {
        let path = format!("/batch/img-{}-800x600.jpg", i);
        server.mock(move |when, then| {
            when.method(GET).path(path.as_str());
            if i == 2 {
                then.status(502);
            } else {
                then.status(200).delay(Duration::from_millis(50 * i)).body(format!("img{}", i));
            }
        });
    }

    let links: Vec<ImageLink> = (0..5)
        .map(|i| ImageLink::new(server.url(format!("/batch/img-{}-800x600.jpg", i))))
        .collect();

    let results = ImageFetcher::new(reqwest::Client::new(), 2)
        .fetch_all(links)
        .await;

    assert_eq!(
        results[2].outcome,
        FetchOutcome::Failed(FetchFailure::HttpStatus(502))
    );
    assert_eq!(results.iter().filter(|r| r.is_success()).count(), 4);

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let report = persist(&storage, results).await;

    assert_eq!(report.saved.len(), 4);
    assert_eq!(report.failed.len(), 1);
    assert!(!temp_dir.path().join("img-2-800x600.jpg").exists());
    for i in [0, 1, 3, 4] {
        let written = std::fs::read(temp_dir.path().join(format!("img-{}-800x600.jpg", i))).unwrap();
        assert_eq!(written, format!("img{}", i).into_bytes());
    }
}

//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the real pipeline
//! (reqwest transport, envelope decoding, aggregation) over HTTP. Scripted
//! overrides on the mock exercise each failure class.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mock_server::{rejection, MockState, Scripted, StatusCode};
use serde_json::{json, Value};
use storefront_core::{
    Aggregator, ApiClient, ApiError, BannerResult, CategoryAd, ClientConfig, Endpoint, HomeFeed,
    Marquee, ReqwestTransport,
};

async fn start_mock(state: MockState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with_state(listener, state));
    addr
}

/// Accepts connections and never writes a byte back.
async fn start_silent() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

fn client_for(addr: SocketAddr, token: &str) -> ApiClient {
    let config = ClientConfig::new(format!("http://{addr}"), token)
        .with_user("user-token", "uid-7")
        .with_app_version(Some("3.1.0".to_string()));
    ApiClient::new(config).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_marquee_list() {
    let addr = start_mock(MockState::default()).await;
    let client = client_for(addr, "test-token");

    let marquees: Vec<Marquee> = client.fetch(Endpoint::MarqueeList).await.unwrap();
    assert_eq!(marquees.len(), 2);
    assert_eq!(marquees[0].subject.as_deref(), Some("Free shipping over 499"));
    let app = marquees[0].app.as_ref().unwrap();
    assert_eq!(app.link_type.as_deref(), Some("search"));
}

#[tokio::test(flavor = "multi_thread")]
async fn banner_endpoints_resolve_both_shapes() {
    let addr = start_mock(MockState::default()).await;
    let client = client_for(addr, "test-token");

    let main: BannerResult = client.fetch(Endpoint::SwpMainAd).await.unwrap();
    let BannerResult::Slots(slots) = &main else {
        panic!("expected slots, got {main:?}");
    };
    let ad1 = slots.ad1.as_ref().unwrap();
    assert_eq!(ad1[0].img_url(), "https://cdn.vivatv.com.tw/ad/main1.jpg");
    assert_eq!(ad1[1].img_url(), "https://cdn.vivatv.com.tw/ad/main2_m.jpg");

    let center: BannerResult = client.fetch(Endpoint::MiddleCategoryCenterAd).await.unwrap();
    assert!(matches!(center, BannerResult::List(ref list) if list.len() == 2));

    let flagship: BannerResult = client.fetch(Endpoint::FlagshipStoreAd).await.unwrap();
    assert_eq!(flagship.banners().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn search_sends_body_and_merged_headers() {
    let addr = start_mock(MockState::default()).await;
    let client = client_for(addr, "test-token");

    let criteria = json!({ "order_no": "A001", "phone": "0912345678" });
    let overrides = [("uid".to_string(), "override-uid".to_string())];
    let echoed: Value = client
        .request(Endpoint::SearchOrder, Some(&overrides[..]), Some(&criteria))
        .await
        .unwrap();

    assert_eq!(echoed["operation"], "SearchOrder");
    assert_eq!(echoed["criteria"], criteria);
    let headers = &echoed["headers"];
    assert_eq!(headers["authorization"], "test-token");
    assert_eq!(headers["platform"], "iOS");
    assert_eq!(headers["user-token"], "user-token");
    assert_eq!(headers["uid"], "override-uid");
    assert_eq!(headers["app-version"], "3.1.0");
    assert_eq!(headers["content-type"], "application/json");
}

#[tokio::test(flavor = "multi_thread")]
async fn home_feed_loads_all_sections() {
    let addr = start_mock(MockState::default()).await;
    let aggregator = Aggregator::new(client_for(addr, "test-token"));

    let feed = HomeFeed::spawn_load(&aggregator).await.unwrap().unwrap();
    assert_eq!(feed.marquees.len(), 2);
    assert_eq!(feed.campaign_links.len(), 1);
    assert!(matches!(feed.main_banners, BannerResult::Slots(_)));
    assert_eq!(feed.category_ads[0].name, "Kitchen");
    assert_eq!(feed.portrait_ads[0].campaign_id.as_deref(), Some("C12"));
}

#[tokio::test(flavor = "multi_thread")]
async fn home_feed_surfaces_server_rejection() {
    let state = MockState::default();
    state
        .script("CategoryAD", Scripted::Body(rejection(500, Some("maintenance"))))
        .await;
    let addr = start_mock(state).await;
    let aggregator = Aggregator::new(client_for(addr, "test-token"));

    let err = HomeFeed::load(&aggregator).await.unwrap_err();
    assert_eq!(err, ApiError::ServerRejected("maintenance".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_is_request_failed() {
    let state = MockState::default();
    state
        .script("CategoryAD", Scripted::Status(StatusCode::SERVICE_UNAVAILABLE))
        .await;
    let addr = start_mock(state).await;
    let client = client_for(addr, "test-token");

    let err = client.fetch::<Vec<CategoryAd>>(Endpoint::CategoryAd).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::RequestFailed("Request failed with status code: 503".to_string())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_token_is_rejected_by_transport_status() {
    let addr = start_mock(MockState::default()).await;
    let client = client_for(addr, "");

    let err = client.fetch::<Vec<Marquee>>(Endpoint::MarqueeList).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::RequestFailed("Request failed with status code: 401".to_string())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatched_payload_is_decoding_failure() {
    let state = MockState::default();
    state
        .script("MarqueeList", Scripted::Body(json!({ "code": 200, "data": { "not": "a list" } })))
        .await;
    let addr = start_mock(state).await;
    let client = client_for(addr, "test-token");

    let err = client.fetch::<Vec<Marquee>>(Endpoint::MarqueeList).await.unwrap_err();
    assert!(matches!(err, ApiError::DecodingFailed(_)), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_request_failed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client_for(addr, "test-token");

    let err = client.fetch::<Vec<Marquee>>(Endpoint::MarqueeList).await.unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed(_)), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_timeout_fails_silent_server() {
    let addr = start_silent().await;
    let config = ClientConfig::new(format!("http://{addr}"), "test-token")
        .with_request_timeout(Some(Duration::from_millis(200)));
    let client = ApiClient::new(config).unwrap();

    let started = Instant::now();
    let err = client.fetch::<Vec<Marquee>>(Endpoint::MarqueeList).await.unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed(_)), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test(flavor = "multi_thread")]
async fn prebuilt_reqwest_client_keeps_its_timeout() {
    let addr = start_silent().await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let config =
        ClientConfig::new(format!("http://{addr}"), "test-token").with_request_timeout(None);
    let client = ApiClient::with_transport(config, Arc::new(ReqwestTransport::from_client(http)));

    let started = Instant::now();
    let err = client.fetch::<Vec<Marquee>>(Endpoint::MarqueeList).await.unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed(_)), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

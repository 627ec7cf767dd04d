//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use linkscout::config::Config;
use linkscout::crawler::{crawl, Coordinator};
use linkscout::output::{write_summary, SCRIPT_SECTION_HEADER};
use linkscout::{FetchError, PageBudget, ScoutError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with fast retries
fn create_test_config(max_pages: i64, num_workers: usize) -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;
    config.crawler.num_workers = num_workers;
    config.fetcher.timeout_secs = 2;
    config.fetcher.max_attempts = 2;
    config.fetcher.base_delay_ms = 10;
    config
}

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into().into_bytes(), "text/html")
}

/// Mounts a GET mock for `route` that must be hit exactly `times` times
async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<html><body>
            <a href="/page1">Page 1</a>
            <a href="/page2?tab=info#top">Page 2</a>
            </body></html>"#,
        ),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/page1",
        html(r#"<a href="/">Home</a><a href="/page2">Page 2</a>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/page2", html("<p>No links here</p>"), 1).await;

    let report = crawl(&base_url, create_test_config(-1, 4))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 3);
    assert_eq!(
        report.visited_urls,
        vec![
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url),
        ]
    );
    assert!(report.script_resources.is_empty());
    // Wiremock verifies the expect(1) counts when the server drops
}

#[tokio::test]
async fn test_out_of_scope_links_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = mock_server.address().port();

    // Same server, but reached through a host outside the crawl scope
    mount_page(
        &mock_server,
        "/",
        html(format!(
            r#"<a href="http://localhost:{}/elsewhere">Elsewhere</a>"#,
            port
        )),
        1,
    )
    .await;
    mount_page(&mock_server, "/elsewhere", html("<p>should not be here</p>"), 0).await;

    let report = crawl(&base_url, create_test_config(-1, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 1);
    assert_eq!(report.visited_urls, vec![format!("{}/", base_url)]);
}

#[tokio::test]
async fn test_script_files_recorded_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<html><head><script src="/static/app.js"></script></head>
            <body><a href="/vendor.js">vendor</a></body></html>"#,
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/static/app.js", html("console.log(1)"), 0).await;
    mount_page(&mock_server, "/vendor.js", html("console.log(2)"), 0).await;

    let report = crawl(&base_url, create_test_config(-1, 3))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 1);
    assert_eq!(
        report.script_resources,
        vec![
            format!("{}/static/app.js", base_url),
            format!("{}/vendor.js", base_url),
        ]
    );
}

#[tokio::test]
async fn test_inline_script_endpoints_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            r#"<script>
                fetch("/api/data").then(r => r.json());
                axios.get('/api/users');
            </script>"#,
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/api/data", html("<p>data</p>"), 1).await;
    mount_page(&mock_server, "/api/users", html("<p>users</p>"), 1).await;

    let report = crawl(&base_url, create_test_config(-1, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 3);
    assert!(report
        .visited_urls
        .contains(&format!("{}/api/data", base_url)));
    assert!(report
        .visited_urls
        .contains(&format!("{}/api/users", base_url)));
}

#[tokio::test]
async fn test_page_budget_is_exact() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let mut body = String::new();
    for i in 0..25 {
        body.push_str(&format!(r#"<a href="/p{}">p{}</a>"#, i, i));
    }
    Mock::given(method("GET"))
        .respond_with(html(body))
        .mount(&mock_server)
        .await;

    let report = crawl(&base_url, create_test_config(4, 6))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 4);
    assert_eq!(report.visited_urls.len(), 4);
    assert_eq!(report.page_budget, PageBudget::Limited(4));

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_non_html_page_not_parsed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .set_body_raw(r#"{"next": "/hidden"}"#.as_bytes().to_vec(), "application/json"),
        1,
    )
    .await;
    mount_page(&mock_server, "/hidden", html("<p>hidden</p>"), 0).await;

    let report = crawl(&base_url, create_test_config(-1, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 1);
}

#[tokio::test]
async fn test_transient_failure_retried() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // First request fails, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/", html(r#"<a href="/next">next</a>"#), 1).await;
    mount_page(&mock_server, "/next", html("<p>end</p>"), 1).await;

    let report = crawl(&base_url, create_test_config(-1, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.crawled_count, 2);
}

#[tokio::test]
async fn test_failed_child_page_does_not_abort() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/broken">broken</a><a href="/fine">fine</a>"#),
        1,
    )
    .await;
    // Two attempts, both failing
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500), 2).await;
    mount_page(&mock_server, "/fine", html("<p>ok</p>"), 1).await;

    let report = crawl(&base_url, create_test_config(-1, 2))
        .await
        .expect("Crawl failed");

    // The failed page was admitted before fetching, so it still counts
    assert_eq!(report.crawled_count, 3);
}

#[tokio::test]
async fn test_seed_unreachable() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", ResponseTemplate::new(500), 2).await;

    let result = crawl(&base_url, create_test_config(-1, 3)).await;

    match result {
        Err(ScoutError::SeedUnreachable { url, source }) => {
            assert_eq!(url, format!("{}/", base_url));
            assert_eq!(source, FetchError::Status(500));
        }
        other => panic!("expected SeedUnreachable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_summary_written_to_output_file() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/about">About</a><script src="/app.js"></script>"#),
        1,
    )
    .await;
    mount_page(&mock_server, "/about", html("<p>about</p>"), 1).await;

    let config = create_test_config(-1, 2);
    let report = Coordinator::new(&config)
        .expect("Failed to create coordinator")
        .run(&base_url)
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("urls.txt");
    let mut stdout = Vec::new();
    write_summary(&mut stdout, &report, Some(&output_path)).expect("Failed to write summary");

    let saved = std::fs::read_to_string(&output_path).expect("Failed to read output file");
    assert_eq!(
        saved,
        format!(
            "{base}/\n{base}/about\n\n{header}\n{base}/app.js\n",
            base = base_url,
            header = SCRIPT_SECTION_HEADER
        )
    );

    let printed = String::from_utf8(stdout).unwrap();
    assert!(printed.contains("Crawled 2 pages."));
    assert!(printed.contains(&format!("Saved 2 URLs to {}", output_path.display())));
    assert!(printed.contains(&format!(
        "Saved 1 JavaScript files to {}",
        output_path.display()
    )));
    assert!(printed.contains(&format!("Found JavaScript files:\n{}/app.js", base_url)));
}

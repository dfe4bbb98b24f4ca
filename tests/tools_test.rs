use mcp_protocol_sdk::prelude::*;
use mcp_web_browsing::tools::utils::DEFAULT_USER_AGENT;
use mcp_web_browsing::tools::{ErrorKind, ExtractRequest, FetchRequest, Fetcher, MetadataField, MetadataRequest, WeatherRequest};
use mcp_web_browsing::{ExtractElementsHandler, FetchWebpageHandler, GetMetadataHandler, WeatherHandler};
use reqwest::Client;
use serde_json::{Value, json};
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ARTICLE: &str = r#"
    <!DOCTYPE html>
    <html lang="en">
    <head>
        <title>Test Article</title>
        <meta property="og:description" content="Only the OG description">
        <link rel="canonical" href="/articles/1">
    </head>
    <body>
        <nav><a href="/">Home</a> <a href="/about">About</a></nav>
        <main>
            <h1>Hello</h1>
            <p>This is the main content of the page.</p>
            <img src="/images/cat.png" alt="A cat">
        </main>
        <footer>Footer text</footer>
    </body>
    </html>
"#;

fn fetcher() -> Fetcher {
    Fetcher::with_defaults(Client::new())
}

fn args(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

fn result_text(result: ToolResult) -> String {
    let v = serde_json::to_value(result).unwrap();
    let content = v["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    content[0]["text"].as_str().unwrap().to_string()
}

/// A loopback URL with nothing listening behind it.
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn serve_html(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn fetch_webpage_sends_browser_user_agent_and_formats_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(|req: &Request| {
            req.headers.get("user-agent").and_then(|v| v.to_str().ok()) == Some(DEFAULT_USER_AGENT)
        })
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/", server.uri());
    let handler = FetchWebpageHandler { fetcher: fetcher() };
    let text = result_text(
        handler
            .call(args(json!({ "url": url, "includeImages": true })))
            .await
            .unwrap(),
    );

    assert!(text.starts_with("# Test Article\n\n"), "{text}");
    assert!(text.contains(&format!("**URL:** {url}\n")));
    assert!(text.contains("**Word Count:** 9\n"), "{text}");
    assert!(text.contains("## Content\n\nHello This is the main content of the page."));
    assert!(!text.contains("Footer text"));
    assert!(text.ends_with(&format!("## Images Found\n- ![A cat]({}/images/cat.png)", server.uri())));
}

#[tokio::test]
async fn fetch_webpage_is_idempotent_on_static_page() {
    let server = serve_html(ARTICLE).await;
    let handler = FetchWebpageHandler { fetcher: fetcher() };
    let request = FetchRequest::new(format!("{}/", server.uri()));

    let first = handler.fetch(&request).await.unwrap().to_string();
    let second = handler.fetch(&request).await.unwrap().to_string();
    assert_eq!(first, second);
}

#[tokio::test]
async fn fetch_webpage_truncates_to_max_length() {
    let long = "word ".repeat(50);
    let server = serve_html(&format!("<html><body><article>{long}</article></body></html>")).await;
    let handler = FetchWebpageHandler { fetcher: fetcher() };

    let mut request = FetchRequest::new(format!("{}/", server.uri()));
    request.max_length = Some(12);
    let summary = handler.fetch(&request).await.unwrap();

    assert_eq!(summary.content, "word word wo...");
    assert_eq!(summary.content.trim_end_matches("...").chars().count(), 12);
    assert_eq!(summary.word_count, 3);
}

#[tokio::test]
async fn non_success_status_fails_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let handler = FetchWebpageHandler { fetcher: fetcher() };
    let err = handler.fetch(&FetchRequest::new(url.clone())).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.url(), Some(url.as_str()));

    let mcp_err = handler.call(args(json!({ "url": url }))).await.unwrap_err();
    let msg = mcp_err.to_string();
    assert!(msg.contains("Failed to fetch webpage: HTTP 404: Not Found"), "{msg}");

    let extract = ExtractElementsHandler { fetcher: fetcher() };
    let msg = extract
        .call(args(json!({ "url": url, "selector": "a" })))
        .await
        .unwrap_err()
        .to_string();
    assert!(msg.contains("Failed to extract elements: HTTP 404"), "{msg}");

    let metadata = GetMetadataHandler { fetcher: fetcher() };
    let msg = metadata.call(args(json!({ "url": url }))).await.unwrap_err().to_string();
    assert!(msg.contains("Failed to get metadata: HTTP 404"), "{msg}");
}

#[tokio::test]
async fn fetch_webpage_ignores_content_and_images_inside_noise() {
    let server = serve_html(
        r#"<html><body><footer><article>Copyright junk</article><img src="/ad.png"></footer>
           <p>Real body text</p></body></html>"#,
    )
    .await;
    let handler = FetchWebpageHandler { fetcher: fetcher() };
    let text = result_text(
        handler
            .call(args(json!({ "url": format!("{}/", server.uri()), "includeImages": true })))
            .await
            .unwrap(),
    );

    assert!(text.ends_with("## Content\n\nReal body text"), "{text}");
    assert!(!text.contains("Copyright junk"));
    assert!(!text.contains("ad.png"));
    assert!(!text.contains("Images Found"));
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    let url = format!("{}/", unreachable_url());
    let handler = FetchWebpageHandler { fetcher: fetcher() };

    let err = handler.fetch(&FetchRequest::new(url.clone())).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status(), None);
    assert_eq!(err.url(), Some(url.as_str()));

    let mcp_err = handler.call(args(json!({ "url": url }))).await.unwrap_err();
    assert!(matches!(mcp_err, McpError::Internal(_)), "{mcp_err}");
    assert!(mcp_err.to_string().contains("Failed to fetch webpage"), "{mcp_err}");
}

#[tokio::test]
async fn missing_url_is_a_validation_error() {
    let handler = FetchWebpageHandler { fetcher: fetcher() };
    let err = handler.call(HashMap::new()).await.unwrap_err();
    assert!(matches!(err, McpError::Validation(_)), "{err}");
}

#[tokio::test]
async fn extract_elements_resolves_relative_links() {
    let server = serve_html(ARTICLE).await;
    let handler = ExtractElementsHandler { fetcher: fetcher() };
    let request = ExtractRequest {
        url: format!("{}/", server.uri()),
        selector: "nav a".into(),
        attribute: Some("href".into()),
    };

    let found = handler.extract(&request).await.unwrap();
    assert_eq!(
        found.values,
        vec![format!("{}/", server.uri()), format!("{}/about", server.uri())]
    );
}

#[tokio::test]
async fn extract_elements_with_no_matches_succeeds() {
    let server = serve_html(ARTICLE).await;
    let handler = ExtractElementsHandler { fetcher: fetcher() };
    let text = result_text(
        handler
            .call(args(json!({ "url": format!("{}/", server.uri()), "selector": ".does-not-exist" })))
            .await
            .unwrap(),
    );
    assert!(text.contains("**Found:** 0 elements"), "{text}");
    assert!(!text.contains("**Attribute:**"));
}

#[tokio::test]
async fn get_metadata_uses_open_graph_description() {
    let server = serve_html(ARTICLE).await;
    let handler = GetMetadataHandler { fetcher: fetcher() };
    let request = MetadataRequest { url: format!("{}/", server.uri()) };

    let metadata = handler.metadata(&request).await.unwrap();
    assert_eq!(metadata.get(MetadataField::Description), Some("Only the OG description"));
    assert_eq!(metadata.get(MetadataField::Canonical), Some("/articles/1"));
    assert_eq!(metadata.get(MetadataField::Language), Some("en"));

    let text = result_text(handler.call(args(json!({ "url": request.url }))).await.unwrap());
    assert_eq!(
        text,
        format!(
            "# Metadata for {}/\n\n**title:** Test Article\n**description:** Only the OG description\n**canonical:** /articles/1\n**language:** en",
            server.uri()
        )
    );
}

#[tokio::test]
async fn weather_passes_json_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/london"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "temperature": "+12 °C", "wind": "9 km/h" })))
        .mount(&server)
        .await;

    let handler = WeatherHandler::new(fetcher(), &format!("{}/weather", server.uri())).unwrap();
    let text = handler
        .lookup(&WeatherRequest { city: "London".into() })
        .await
        .unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["temperature"], "+12 °C");
    assert_eq!(value["wind"], "9 km/h");
}

#[tokio::test]
async fn weather_failure_names_the_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let handler = WeatherHandler::new(fetcher(), &format!("{}/weather", server.uri())).unwrap();
    let err = handler
        .lookup(&WeatherRequest { city: "Atlantis".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().starts_with("Failed to fetch weather for Atlantis"), "{err}");
}

#[tokio::test]
async fn weather_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather/paris"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let handler = WeatherHandler::new(fetcher(), &format!("{}/weather", server.uri())).unwrap();
    let err = handler
        .lookup(&WeatherRequest { city: "Paris".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.status(), None);
    assert!(err.to_string().starts_with("Failed to fetch weather for Paris"), "{err}");
    assert!(err.to_string().contains("not JSON"), "{err}");

    let mcp_err = handler.call(args(json!({ "city": "Paris" }))).await.unwrap_err();
    assert!(matches!(mcp_err, McpError::Internal(_)), "{mcp_err}");
}

#[tokio::test]
async fn weather_unreachable_endpoint_names_the_city() {
    let handler = WeatherHandler::new(fetcher(), &format!("{}/weather", unreachable_url())).unwrap();
    let err = handler
        .lookup(&WeatherRequest { city: "Oslo".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.status(), None);
    assert!(err.to_string().starts_with("Failed to fetch weather for Oslo"), "{err}");
}

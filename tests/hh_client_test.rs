use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vacancy_ingest::config::FetchSettings;
use vacancy_ingest::error::Error;
use vacancy_ingest::models::employer::Employer;
use vacancy_ingest::services::employer_service::EmployerService;
use vacancy_ingest::services::hh_client::{HhClient, PageQuery, VacancySource};
use vacancy_ingest::services::vacancy_collector::VacancyCollector;

enum Reply {
    Json(u16, String),
    /// Read the request, then close the socket without answering.
    Hangup,
    /// Promise a longer body than is sent, then close the socket.
    Truncated(String),
}

fn response(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    )
}

/// Serves one scripted reply per connection and returns the request lines it saw.
async fn serve(replies: Vec<Reply>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for reply in replies {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request = String::from_utf8_lossy(&request).to_string();
            seen.push(request.lines().next().unwrap_or_default().to_string());

            match reply {
                Reply::Json(status, body) => {
                    socket
                        .write_all(response(status, &body).as_bytes())
                        .await
                        .expect("write");
                    socket.shutdown().await.ok();
                }
                Reply::Hangup => drop(socket),
                Reply::Truncated(body) => {
                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len() + 512
                    );
                    socket.write_all(head.as_bytes()).await.expect("write head");
                    socket.write_all(body.as_bytes()).await.expect("write body");
                    socket.flush().await.ok();
                    drop(socket);
                }
            }
        }
        seen
    });

    (base_url, handle)
}

fn search_page(employer_id: &str, count: usize, pages: u32) -> String {
    let items: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "id": format!("{}{}", employer_id, i),
                "name": "Rust Engineer",
                "employer": { "id": employer_id, "name": format!("Employer {}", employer_id), "url": null },
            })
        })
        .collect();
    json!({ "items": items, "page": 0, "pages": pages, "per_page": 100, "found": count }).to_string()
}

fn client(base_url: &str) -> HhClient {
    HhClient::new(base_url.to_string(), "vacancy-ingest-test").expect("client")
}

#[tokio::test]
async fn decodes_a_vacancy_page_and_sends_search_params() {
    let (base_url, server) = serve(vec![Reply::Json(200, search_page("7", 2, 1))]).await;

    let page = client(&base_url)
        .fetch_page(
            &PageQuery::Search {
                text: "rust".into(),
                area: 113,
            },
            0,
            100,
        )
        .await
        .expect("page");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pages, Some(1));
    assert!(page.is_last(0));

    let requests = server.await.expect("server");
    assert!(requests[0].starts_with("GET /vacancies?"), "{}", requests[0]);
    for param in ["text=rust", "area=113", "page=0", "per_page=100"] {
        assert!(requests[0].contains(param), "{} missing {}", requests[0], param);
    }
}

#[tokio::test]
async fn non_success_status_is_an_upstream_error() {
    let (base_url, _server) = serve(vec![Reply::Json(
        400,
        json!({ "errors": [{ "type": "bad_argument" }] }).to_string(),
    )])
    .await;

    let err = client(&base_url)
        .fetch_page(&PageQuery::Employer { employer_id: 1 }, 0, 100)
        .await
        .unwrap_err();

    match err {
        Error::UpstreamStatus { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("bad_argument"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn hangup_before_response_is_a_connection_error() {
    let (base_url, _server) = serve(vec![Reply::Hangup]).await;

    let err = client(&base_url)
        .fetch_page(&PageQuery::Employer { employer_id: 1 }, 0, 100)
        .await
        .unwrap_err();

    assert!(err.is_connection(), "unexpected error: {err}");
}

#[tokio::test]
async fn truncated_body_is_a_connection_error() {
    let (base_url, _server) = serve(vec![Reply::Truncated("{\"items\": [".to_string())]).await;

    let err = client(&base_url)
        .fetch_page(&PageQuery::Employer { employer_id: 1 }, 0, 100)
        .await
        .unwrap_err();

    assert!(err.is_connection(), "unexpected error: {err}");
}

#[tokio::test]
async fn discovery_survives_a_dropped_connection_with_reset() {
    let (base_url, server) = serve(vec![
        Reply::Json(200, search_page("1", 4, 3)),
        Reply::Hangup,
        Reply::Json(200, search_page("2", 4, 3)),
    ])
    .await;

    let service = EmployerService::new(
        Arc::new(client(&base_url)),
        FetchSettings {
            search_pages: 3,
            ..FetchSettings::default()
        },
    );
    let employers = service.discover("rust").await.expect("discover");

    assert_eq!(employers.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(server.await.expect("server").len(), 3);
}

#[tokio::test]
async fn collector_survives_a_dropped_connection_with_reset() {
    let vacancy = |id: &str| {
        json!({
            "id": id,
            "name": "Rust Engineer",
            "alternate_url": format!("https://hh.ru/vacancy/{}", id),
            "created_at": "2024-01-15T10:00:00+0300",
            "employer": { "id": "1", "name": "Acme", "url": null },
            "salary": { "from": 100000, "to": null },
            "area": { "name": "Москва" },
            "schedule": { "name": "Удаленная работа" },
        })
    };
    let page = |id: &str| json!({ "items": [vacancy(id)], "pages": 5 }).to_string();

    let (base_url, _server) = serve(vec![
        Reply::Json(200, page("10")),
        Reply::Hangup,
        Reply::Json(200, page("12")),
    ])
    .await;

    let collector = VacancyCollector::new(
        Arc::new(client(&base_url)),
        FetchSettings {
            employer_pages: 3,
            employer_delay: Duration::ZERO,
            ..FetchSettings::default()
        },
    );
    let vacancies = collector
        .collect(&[Employer {
            id: 1,
            name: "Acme".to_string(),
            url: None,
        }])
        .await
        .expect("collect");

    assert_eq!(vacancies.len(), 1);
    assert_eq!(vacancies[0].vacancy_id, 12);
    assert_eq!(
        (vacancies[0].salary_from, vacancies[0].salary_to),
        (Some(100000), Some(100000))
    );
}

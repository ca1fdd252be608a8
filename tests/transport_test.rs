//! Transport client tests against canned HTTP responses served from a local
//! socket: the JSON / non-JSON / error-body mapping and network failures.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use frontdesk::{ApiClient, ClientConfig, FrontdeskError, Ticket, TicketApi};

/// Serve exactly one canned response on a fresh local port and return the
/// origin to point the client at.
async fn serve_once(status_line: &'static str, content_type: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request head before answering.
        let mut buf = vec![0u8; 8192];
        let mut read = 0;
        loop {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            if n == 0 {
                break;
            }
            read += n;
            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
    });
    format!("http://{addr}")
}

fn client(origin: &str) -> ApiClient {
    ApiClient::new(&ClientConfig::new(origin)).unwrap()
}

#[tokio::test]
async fn test_get_parses_json_success() {
    let origin = serve_once(
        "200 OK",
        "application/json",
        r#"[{"id":1,"title":"Printer on fire","status":"open","priority":"high","user_id":2}]"#,
    )
    .await;

    let tickets: Vec<Ticket> = client(&origin).get("/api/tickets").await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, 1);
    assert_eq!(tickets[0].title, "Printer on fire");
}

#[tokio::test]
async fn test_error_body_message_surfaces_verbatim() {
    let origin = serve_once("404 Not Found", "application/json", r#"{"error":"Ticket not found"}"#).await;

    let err = client(&origin)
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    match err {
        FrontdeskError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Ticket not found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_error_field_falls_back_to_status() {
    let origin = serve_once("500 Internal Server Error", "application/json", r#"{"detail":"boom"}"#).await;

    let err = client(&origin)
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_non_json_error_body() {
    let origin = serve_once("502 Bad Gateway", "text/html", "<html>bad gateway</html>").await;

    let err = client(&origin)
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Non-JSON response");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn test_malformed_json_error_body() {
    let origin = serve_once("400 Bad Request", "application/json", "{oops").await;

    let err = client(&origin)
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid JSON response");
}

#[tokio::test]
async fn test_non_json_success_is_decode_error() {
    let origin = serve_once("200 OK", "text/plain", "all good").await;

    let err = client(&origin)
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    assert!(matches!(err, FrontdeskError::Decode(_)));
    assert_eq!(err.to_string(), "decode error: Non-JSON response");
}

#[tokio::test]
async fn test_malformed_json_success_is_decode_error() {
    let origin = serve_once("200 OK", "application/json", "{oops").await;

    let err = client(&origin)
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "decode error: Invalid JSON response");
}

#[tokio::test]
async fn test_delete_discards_success_body() {
    let origin = serve_once("200 OK", "application/json", r#"{"message":"Ticket deleted successfully"}"#).await;

    client(&origin).delete_ticket(3).await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind to grab a free port, then drop the listener so nothing answers.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .get::<Vec<Ticket>>("/api/tickets")
        .await
        .unwrap_err();
    assert!(matches!(err, FrontdeskError::Network(_)));
}

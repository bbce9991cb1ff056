//! End-to-end tests of the client over the reqwest transport, against a local
//! listener that answers every connection with a fixed status line.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use hockey_api::ApiClient;
use hockey_client::Client;
use hockey_core::config::ServerConfig;
use hockey_core::error::HockeyError;
use hockey_models::App;

/// Serve `status` with an empty body to every connection; returns the base URL.
async fn serve_status(status: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response =
        format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}")
}

fn http_client(address: String) -> Client {
    let config = ServerConfig {
        address,
        api_token: "token".into(),
        ..ServerConfig::default()
    };
    Client::new(ApiClient::new(&config).unwrap())
}

#[tokio::test]
async fn remove_app_succeeds_on_200() {
    let client = http_client(serve_status("200 OK").await);
    assert!(client.remove_app(&App::with_identifier("abc")).await.unwrap());
}

#[tokio::test]
async fn remove_app_rejects_every_other_status() {
    for status in [
        "204 No Content",
        "401 Unauthorized",
        "403 Forbidden",
        "404 Not Found",
        "500 Internal Server Error",
        "503 Service Unavailable",
    ] {
        let client = http_client(serve_status(status).await);
        match client.remove_app(&App::with_identifier("abc")).await {
            Err(HockeyError::UnexpectedResponse(message)) => {
                let code = &status[..3];
                assert!(message.ends_with(&format!("HTTP {code}")), "{message}");
            }
            other => panic!("{status}: expected UnexpectedResponse, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn apps_still_map_auth_failures() {
    let client = http_client(serve_status("401 Unauthorized").await);
    assert!(matches!(
        client.apps().await,
        Err(HockeyError::AuthFailed(_))
    ));
}

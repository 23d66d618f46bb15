#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves a single canned HTTP response and returns the base URL.
pub async fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{address}/api/records/1.0/search/")
}

/// Accepts the connection and never answers.
pub async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    format!("http://{address}/api/records/1.0/search/")
}

pub fn catalog_body() -> String {
    serde_json::json!({
        "nhits": 4,
        "records": [
            { "fields": {
                "title": "Nuit du jazz",
                "tags": "Concert;Musique",
                "date_start": "2024-05-01T20:00:00+02:00",
                "date_end": "2024-05-01T23:00:00+02:00",
                "address_name": "Le Sunset",
                "address_zipcode": "75001",
                "lat_lon": [48.859, 2.347],
                "price_detail": "15€"
            }},
            { "fields": {
                "title": "Portraits",
                "tags": "Expo",
                "date_start": "2024-04-20T10:00:00+02:00",
                "date_end": "2024-06-30T18:00:00+02:00",
                "address_name": "Centre Pompidou",
                "address_zipcode": "75 004",
                "lat_lon": [48.860, 2.352],
                "price_type": "gratuit"
            }},
            { "fields": {
                "title": "Sans adresse",
                "tags": "Concert",
                "date_start": "2024-05-01T20:00:00+02:00",
                "address_zipcode": "Boulogne"
            }},
            { "fields": {
                "title": 2046,
                "tags": "Cinéma;Concert",
                "date_start": "2024-05-03T21:00:00+02:00",
                "date_end": "2024-05-03T23:00:00+02:00",
                "address_name": "Le Grand Rex",
                "address_zipcode": 75002
            }}
        ]
    })
    .to_string()
}

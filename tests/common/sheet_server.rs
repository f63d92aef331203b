//! Minimal HTTP/1.1 server that answers every GET with a fixed status and body.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Starts a server in a background thread. Returns the URL of `/export.csv`.
pub fn start(status: u16, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = body.to_string();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = body.clone();
            thread::spawn(move || handle(stream, status, &body));
        }
    });
    format!("http://127.0.0.1:{}/export.csv", port)
}

fn handle(mut stream: TcpStream, status: u16, body: &str) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 4096];
    // one read is enough for a bodiless GET
    if matches!(stream.read(&mut buf), Ok(0) | Err(_)) {
        return;
    }
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

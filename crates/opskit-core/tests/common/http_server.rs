//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes by path: `/ok/<name>` serves the registered body, `/missing` 404s,
//! `/stall` sends headers then hangs, `/truncated` advertises more bytes than
//! it sends, `/echo` returns a POSTed body wrapped in JSON, `/html` returns a
//! non-JSON body. Every response carries `X-Test: opskit`.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Starts the server in a background thread with `bodies` served under `/ok/<name>`.
/// Returns the base URL (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(bodies: HashMap<String, Vec<u8>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let bodies = Arc::new(bodies);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let bodies = Arc::clone(&bodies);
            thread::spawn(move || handle(stream, &bodies));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/gone", port)
}

struct Request {
    method: String,
    path: String,
    body: Vec<u8>,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let mut first = lines.next()?.split_whitespace();
    let method = first.next()?.to_string();
    let path = first.next()?.to_string();
    let content_length = lines
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    Some(Request { method, path, body })
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nX-Test: opskit\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn handle(mut stream: TcpStream, bodies: &HashMap<String, Vec<u8>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(req) = read_request(&mut stream) else {
        return;
    };

    if let Some(name) = req.path.strip_prefix("/ok/") {
        match bodies.get(name) {
            Some(body) => respond(&mut stream, "200 OK", "text/plain", body),
            None => respond(&mut stream, "404 Not Found", "text/plain", b"not found"),
        }
        return;
    }

    match (req.method.as_str(), req.path.as_str()) {
        (_, "/redirect") => {
            let _ = stream.write_all(
                b"HTTP/1.1 302 Found\r\nLocation: /ok/hello\r\nContent-Length: 0\r\n\r\n",
            );
        }
        (_, "/stall") => {
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 100\r\n\r\nfirst bytes",
            );
            let _ = stream.flush();
            thread::sleep(Duration::from_secs(10));
        }
        (_, "/truncated") => {
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 100\r\n\r\nonly ten b",
            );
        }
        ("POST", "/echo") => {
            let received = String::from_utf8_lossy(&req.body);
            let body = format!("{{\"json\":{},\"method\":\"POST\"}}", received);
            respond(&mut stream, "200 OK", "application/json", body.as_bytes());
        }
        ("POST", "/html") => {
            respond(&mut stream, "200 OK", "text/html", b"<html>hi</html>");
        }
        _ => respond(&mut stream, "404 Not Found", "text/plain", b"not found"),
    }
}

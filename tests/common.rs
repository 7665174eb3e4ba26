#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use fleetdesk::backend::MemoryBackend;
use fleetdesk::core::Repository;
use fleetdesk::models::Row;
use std::env;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Binary under test, isolated from the caller's config and credentials.
pub fn fd(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("fleetdesk");
    cmd.env("FLEETDESK_HOME", home)
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_dir(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("fleetdesk_test_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path.to_string_lossy().to_string()
}

/// Path of a file inside the system temp dir, removed if it exists.
pub fn temp_file(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("fleetdesk_test_{name}"));
    fs::remove_file(&path).ok();
    path.to_string_lossy().to_string()
}

/// Memory backend plus a repository (one session) over it.
pub fn memory_session() -> (Arc<MemoryBackend>, Repository) {
    let backend = Arc::new(MemoryBackend::new());
    let repo = Repository::new(backend.clone());
    (backend, repo)
}

pub fn fuel_row(id: &str, liters: f64, price: f64) -> Row {
    Row::new()
        .with("Log_ID", id)
        .with("Liters", liters)
        .with("Price_Total", price)
}

pub fn user_row(username: &str, role: &str) -> Row {
    Row::new()
        .with("Username", username)
        .with("Role", role)
        .with("Name", format!("{username} name"))
}

/// One HTTP request as received by [`StubServer`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Local HTTP server answering canned replies, one connection per reply.
pub struct StubServer {
    pub url: String,
    requests: Receiver<Recorded>,
}

impl StubServer {
    /// Serve `replies` as `(status, body)` pairs, in order.
    pub fn start(replies: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}", listener.local_addr().expect("stub address"));
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let Some(recorded) = answer(stream, status, body) else {
                    return;
                };
                if tx.send(recorded).is_err() {
                    return;
                }
            }
        });

        Self { url, requests: rx }
    }

    pub fn next_request(&self) -> Recorded {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server received no request")
    }

    pub fn received_nothing_more(&self) -> bool {
        self.requests
            .recv_timeout(Duration::from_millis(200))
            .is_err()
    }
}

fn answer(stream: TcpStream, status: u16, body: &str) -> Option<Recorded> {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .ok()?;
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut payload = vec![0; length];
    reader.read_exact(&mut payload).ok()?;

    let reason = if status < 400 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = stream;
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()?;

    Some(Recorded {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8_lossy(&payload).into_owned(),
    })
}

//! Shared harness for the scenario suites.
//!
//! # Design
//! A `Harness` owns the one `PetFriends` value a suite uses and the settings
//! it runs with. Scenarios borrow it; nothing is global. Mock-backed
//! harnesses start a fresh server on a random port so that tests running in
//! parallel never see each other's pets.

#![allow(dead_code)]

pub mod scenarios;

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use petfriends_core::{PetFriends, Settings};
use tracing_subscriber::EnvFilter;

pub struct Harness {
    pub api: PetFriends,
    pub settings: Settings,
}

impl Harness {
    pub fn new(settings: Settings) -> Self {
        init_tracing();
        Self {
            api: PetFriends::new(&settings.base_url),
            settings,
        }
    }

    /// Harness against a freshly started mock server.
    pub fn mock() -> Self {
        Self::new(Settings::for_base_url(start_mock_server()))
    }

    /// Harness against the deployment named by the environment.
    pub fn live() -> Self {
        Self::new(Settings::from_env())
    }
}

/// Start the mock server on a random port and return its base URL.
pub fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Answer the next connection with `status` and a raw `body`, then close.
///
/// For responses the mock server would never produce, such as oversized or
/// non-UTF-8 bodies.
pub fn serve_once(status: u16, content_type: &str, body: Vec<u8>) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let head = format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: {content_type}\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );

    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        // GET and DELETE carry no body; the request ends at the blank line.
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = reader.into_inner();
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}")
}

/// Absolute path of a fixture under `tests/`, e.g. `images/cat1.jpg`.
pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(relative)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

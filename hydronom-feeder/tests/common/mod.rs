//! Shared helpers for integration tests.

#![allow(dead_code)]

use hydronom_feeder::FeederConfig;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

/// Default configuration with a fixed heading so runs are deterministic.
pub fn config(heading: f64) -> FeederConfig {
    let mut config = FeederConfig::default();
    config.vehicle.initial_heading_deg = Some(heading);
    config
}

/// Minimal HTTP endpoint that answers `requests` POSTs with `status` and
/// hands each request body back through the channel.
pub struct CaptureServer {
    pub addr: SocketAddr,
    pub bodies: Receiver<String>,
    handle: JoinHandle<()>,
}

impl CaptureServer {
    pub fn start(status: u16, requests: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, bodies) = mpsc::channel();

        let handle = thread::spawn(move || {
            for _ in 0..requests {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 {
                        break;
                    }
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':')
                        && name.eq_ignore_ascii_case("content-length")
                    {
                        content_length = value.trim().parse().unwrap();
                    }
                }

                let mut body = vec![0u8; content_length];
                reader.read_exact(&mut body).unwrap();
                let _ = tx.send(String::from_utf8(body).unwrap());

                let response = format!(
                    "HTTP/1.1 {} Test\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    status
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
        });

        Self {
            addr,
            bodies,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/telemetry", self.addr)
    }

    pub fn join(self) {
        self.handle.join().unwrap();
    }
}

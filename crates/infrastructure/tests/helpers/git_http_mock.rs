#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

/// Minimal HTTP/1.1 server answering every request with one canned response.
pub struct MockGitHttpServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockGitHttpServer {
    pub async fn start(
        status: u16,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Self, std::io::Error> {
        Self::start_with_headers(status, &[("Content-Type", content_type)], body).await
    }

    /// Answers `302 Found` pointing at `location`.
    pub async fn redirect_to(location: &str) -> Result<Self, std::io::Error> {
        Self::start_with_headers(
            302,
            &[("Location", location), ("Content-Type", "text/plain")],
            Vec::new(),
        )
        .await
    }

    pub async fn start_with_headers(
        status: u16,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let mut head = format!("HTTP/1.1 {} Mock\r\n", status);
        for (name, value) in headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        ));
        let recorded = requests.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };

                        let mut buf = vec![0u8; 8192];
                        let mut read = 0;
                        while read < buf.len() {
                            match stream.read(&mut buf[read..]).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => read += n,
                            }
                            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }

                        let request = String::from_utf8_lossy(&buf[..read]).to_string();
                        if let Some(line) = request.lines().next() {
                            recorded.lock().await.push(line.to_string());
                        }

                        let _ = stream.write_all(head.as_bytes()).await;
                        let _ = stream.write_all(&body).await;
                        let _ = stream.shutdown().await;
                    }
                }
            }
        });

        Ok(Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Repository URL served by this mock.
    pub fn repository_url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path)
    }

    /// Request lines received so far (`GET /path HTTP/1.1`).
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

impl Drop for MockGitHttpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

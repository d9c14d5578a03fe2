use axum::Router;
use gitlink_dns_api::{create_doh_routes, AppState};
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tower::Service;
use tracing::{debug, info, warn};

/// Serve DNS-over-HTTPS. Without a TLS configuration the router is served
/// over plain HTTP, which only makes sense behind a terminating proxy.
pub async fn start_doh_server(
    bind_addr: SocketAddr,
    state: AppState,
    tls: Option<Arc<rustls::ServerConfig>>,
) -> anyhow::Result<()> {
    let app = create_doh_routes(state);
    let listener = TcpListener::bind(&bind_addr).await?;

    match tls {
        Some(tls) => {
            info!(
                bind_address = %bind_addr,
                doh_url = format!("https://{}/dns-query", bind_addr),
                "Starting DoH server"
            );
            serve_tls(listener, app, TlsAcceptor::from(tls)).await
        }
        None => {
            warn!(
                bind_address = %bind_addr,
                doh_url = format!("http://{}/dns-query", bind_addr),
                "No TLS configured, serving DoH over plain HTTP"
            );
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}

async fn serve_tls(listener: TcpListener, app: Router, acceptor: TlsAcceptor) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Failed to accept DoH connection");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let app = app.clone();

        tokio::spawn(async move {
            let tls_stream = match acceptor.accept(stream).await {
                Ok(s) => s,
                Err(e) => {
                    debug!(peer = %peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            let service = hyper::service::service_fn(move |request: hyper::Request<Incoming>| {
                app.clone().call(request)
            });

            if let Err(e) = Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(tls_stream), service)
                .await
            {
                debug!(peer = %peer, error = %e, "DoH connection closed with error");
            }
        });
    }
}

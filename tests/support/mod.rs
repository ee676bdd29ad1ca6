//! Instrumented fake HTTP endpoint for dispatcher tests
//!
//! Every endpoint answers any GET with a fixed status after a fixed delay
//! and tracks how many requests it is serving at once.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Router;
use fullcycle_stress::{Dispatcher, StressConfig};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Default)]
pub struct EndpointStats {
    pub hits: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl EndpointStats {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight count even if the client gives up mid-request
struct InFlightGuard(Arc<EndpointStats>);

impl InFlightGuard {
    fn enter(stats: Arc<EndpointStats>) -> Self {
        let current = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        stats.hits.fetch_add(1, Ordering::SeqCst);
        Self(stats)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
struct EndpointState {
    status: StatusCode,
    latency: Duration,
    stats: Arc<EndpointStats>,
}

pub struct FakeEndpoint {
    pub addr: SocketAddr,
    pub stats: Arc<EndpointStats>,
}

impl FakeEndpoint {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

async fn respond(State(state): State<EndpointState>) -> StatusCode {
    let _guard = InFlightGuard::enter(state.stats.clone());
    if !state.latency.is_zero() {
        tokio::time::sleep(state.latency).await;
    }
    state.status
}

/// Start an endpoint on a random local port
pub async fn spawn_endpoint(status: StatusCode, latency: Duration) -> FakeEndpoint {
    let stats = Arc::new(EndpointStats::default());
    let state = EndpointState {
        status,
        latency,
        stats: stats.clone(),
    };
    let app = Router::new().fallback(respond).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeEndpoint { addr, stats }
}

/// Start an endpoint that answers 200 and then streams a body forever
pub async fn spawn_streaming_endpoint() -> FakeEndpoint {
    let stats = Arc::new(EndpointStats::default());
    let handler_stats = stats.clone();
    let app = Router::new().fallback(move || {
        let stats = handler_stats.clone();
        async move {
            stats.hits.fetch_add(1, Ordering::SeqCst);
            let chunks = futures::stream::unfold((), |_| async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Some((Ok::<_, std::io::Error>(vec![0u8; 1024]), ()))
            });
            Body::from_stream(chunks)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeEndpoint { addr, stats }
}

/// A local address with nothing listening on it
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

/// Dispatcher whose client ignores proxy settings from the environment
pub fn local_dispatcher(config: StressConfig) -> Dispatcher {
    let mut builder = reqwest::Client::builder().no_proxy();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    Dispatcher::with_client(config, builder.build().unwrap()).unwrap()
}

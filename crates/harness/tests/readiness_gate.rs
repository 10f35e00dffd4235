//! Readiness gate integration tests against a loopback HTTP stub.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use posverify_harness::readiness::ReadinessGate;

/// Minimal HTTP stub: serves `failures` 503 responses, then 200s.
fn spawn_health_stub(failures: usize) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let served = counter.fetch_add(1, Ordering::SeqCst);

            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);

            let response = if served < failures {
                "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            } else {
                "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok"
            };
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (format!("http://{}/api/health", addr), hits)
}

#[tokio::test]
async fn succeeds_on_first_healthy_response() {
    let (url, hits) = spawn_health_stub(2);
    let gate = ReadinessGate::new(&url, 15, Duration::from_millis(20));

    assert!(gate.wait_until_ready().await);
    // Two failed probes, then success on the third; the remaining budget
    // is not waited out.
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn immediately_ready_backend_needs_one_probe() {
    let (url, hits) = spawn_health_stub(0);
    let gate = ReadinessGate::new(&url, 15, Duration::from_secs(1));

    assert!(gate.wait_until_ready().await);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn gives_up_after_attempt_budget() {
    let (url, hits) = spawn_health_stub(usize::MAX);
    let gate = ReadinessGate::new(&url, 4, Duration::from_millis(10));

    assert!(!gate.wait_until_ready().await);
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn connection_refused_counts_as_an_attempt() {
    // Bind and immediately drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let gate = ReadinessGate::new(
        &format!("http://127.0.0.1:{}/api/health", port),
        3,
        Duration::from_millis(10),
    );

    assert!(!gate.wait_until_ready().await);
}

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const EXPERIMENT_NAME: &str = "HTTP Test Experiment";

#[derive(Debug, Deserialize)]
struct TrackerResponse {
    name: String,
    total_days: u32,
    current_day: u32,
    current_streak: u32,
    longest_streak: u32,
    percent_complete: u32,
    completed: Vec<u32>,
    missed: Vec<u32>,
    notes: BTreeMap<String, String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("streak_lab_http_{}_{}", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/tracker")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = unique_data_dir();
    let child = Command::new(env!("CARGO_BIN_EXE_streak_lab"))
        .env("PORT", port.to_string())
        .env("STREAK_DATA_DIR", data_dir)
        .env("EXPERIMENT_KEY", "http-test")
        .env("EXPERIMENT_NAME", EXPERIMENT_NAME)
        .env("TOTAL_DAYS", "30")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_tracker(client: &Client, base_url: &str) -> TrackerResponse {
    client
        .get(format!("{base_url}/api/tracker"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn toggle(client: &Client, base_url: &str, day: u32) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/toggle"))
        .json(&serde_json::json!({ "day": day }))
        .send()
        .await
        .unwrap()
}

fn classify(tracker: &TrackerResponse, day: u32) -> &'static str {
    if tracker.completed.contains(&day) {
        "completed"
    } else if tracker.missed.contains(&day) {
        "missed"
    } else {
        "unmarked"
    }
}

#[tokio::test]
async fn http_tracker_reflects_startup_config() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let tracker = fetch_tracker(&client, &server.base_url).await;
    assert_eq!(tracker.name, EXPERIMENT_NAME);
    assert_eq!(tracker.total_days, 30);
    assert!(tracker.current_day >= 1);
    assert!(tracker.longest_streak >= tracker.current_streak);
}

#[tokio::test]
async fn http_toggle_cycles_through_all_three_states() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_tracker(&client, &server.base_url).await;
    let start = classify(&before, 1);

    let first: TrackerResponse = toggle(&client, &server.base_url, 1).await.json().await.unwrap();
    assert_ne!(classify(&first, 1), start);

    toggle(&client, &server.base_url, 1).await;
    let third: TrackerResponse = toggle(&client, &server.base_url, 1).await.json().await.unwrap();

    // three toggles bring the day back to where it started
    assert_eq!(classify(&third, 1), start);
}

#[tokio::test]
async fn http_future_day_toggle_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_tracker(&client, &server.base_url).await;
    let future_day = before.current_day + 1;

    let response = toggle(&client, &server.base_url, future_day).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let after = fetch_tracker(&client, &server.base_url).await;
    assert_eq!(after.completed, before.completed);
    assert_eq!(after.missed, before.missed);
}

#[tokio::test]
async fn http_note_set_and_blank_clear() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let with_note: TrackerResponse = client
        .post(format!("{}/api/note", server.base_url))
        .json(&serde_json::json!({ "day": 7, "text": "  solid effort  " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(with_note.notes.get("7").map(String::as_str), Some("solid effort"));

    let cleared: TrackerResponse = client
        .post(format!("{}/api/note", server.base_url))
        .json(&serde_json::json!({ "day": 7, "text": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!cleared.notes.contains_key("7"));
}

#[tokio::test]
async fn http_export_serves_a_summary_download() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("http-test-summary.txt"));

    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("HTTP Test Experiment Summary"));
    assert!(body.contains("Current day:"));
    assert!(body.contains("Notes:"));
}

#[tokio::test]
async fn http_reset_clears_everything() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    toggle(&client, &server.base_url, 1).await;

    let reset: TrackerResponse = client
        .post(format!("{}/api/reset", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(reset.current_day, 1);
    assert_eq!(reset.current_streak, 0);
    assert_eq!(reset.percent_complete, 0);
    assert!(reset.completed.is_empty());
    assert!(reset.missed.is_empty());
    assert!(reset.notes.is_empty());
}

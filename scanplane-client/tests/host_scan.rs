use std::sync::{Arc, Mutex};
use std::time::Duration;

use scanplane_client::{
    CancellationToken, ClientError, ControlPlaneClient, JobPoller, PollEvent, PollSettings,
    StatusSink, Termination,
};
use scanplane_core::diagram;
use scanplane_core::domain::plan::Plan;
use scanplane_core::dto::job::ScanHostRequest;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<PollEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<PollEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl StatusSink for TestSink {
    fn emit(&self, event: &PollEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn fast_settings() -> PollSettings {
    PollSettings {
        interval: Duration::from_millis(10),
        max_attempts: 5,
    }
}

#[tokio::test]
async fn host_scan_polls_until_done_and_renders_plan() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scanHost"))
        .and(body_json(json!({"source_id": "src-1a2b3c4d"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "running",
            "progress": {"phase": "scanning", "pct": 30}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "abc123",
            "status": "done",
            "progress": {"phase": "complete", "pct": 100}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/abc123/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plan": {
                "selected_plan": "basic",
                "bill_of_materials": ["fetch", "analyze", "report"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ControlPlaneClient::new(server.uri());
    let poller = JobPoller::new(Arc::new(client.clone()), fast_settings());
    let sink = TestSink::default();

    let outcome = poller
        .run(
            client.start_host_scan(ScanHostRequest::new("src-1a2b3c4d")),
            &sink,
            &CancellationToken::new(),
        )
        .await
        .expect("host scan succeeds");

    assert_eq!(outcome.job_id, "abc123");
    assert_eq!(outcome.termination, Termination::Terminal { attempts: 2 });

    let snapshots: Vec<(String, f64)> = sink
        .take()
        .into_iter()
        .filter_map(|e| match e {
            PollEvent::Snapshot(s) => Some((s.status, s.pct)),
            _ => None,
        })
        .collect();
    assert_eq!(
        snapshots,
        vec![("running".to_string(), 30.0), ("done".to_string(), 100.0)]
    );

    let plan = Plan::from_payload(&outcome.results);
    assert_eq!(plan.selected_plan.as_deref(), Some("basic"));

    let rendered = diagram::render(Some(plan.bill_of_materials.as_slice()));
    let layout = rendered.layout().expect("three steps drawn");
    assert_eq!((layout.width, layout.height), (708, 92));
    assert_eq!(layout.nodes.len(), 3);
    assert_eq!(layout.connectors.len(), 2);
}

#[tokio::test]
async fn missing_job_id_is_reported_without_polling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scanHost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"queued": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/abc123/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ControlPlaneClient::new(server.uri());
    let poller = JobPoller::new(Arc::new(client.clone()), fast_settings());

    let err = poller
        .run(
            client.start_host_scan(ScanHostRequest::new("src-1")),
            &TestSink::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    match err {
        ClientError::MissingJobId { payload } => assert!(payload.contains("\"queued\": true")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn start_rejection_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scanHost"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "source not enrolled/online"})),
        )
        .mount(&server)
        .await;

    let client = ControlPlaneClient::new(server.uri());
    let err = client
        .start_host_scan(ScanHostRequest::new("src-1"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("/scanHost: HTTP 400 Bad Request"));
    assert!(message.contains("source not enrolled/online"));
}

#[tokio::test]
async fn status_failure_aborts_before_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/abc123/status"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/abc123/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ControlPlaneClient::new(server.uri());
    let poller = JobPoller::new(Arc::new(client), fast_settings());

    let err = poller
        .poll("abc123", &TestSink::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "/scanJobs/abc123/status: HTTP 404 Not Found\njob not found"
    );
}

#[tokio::test]
async fn exhausted_budget_still_fetches_partial_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/slow-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "running"})))
        .expect(5)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/slow-1/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"partial": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ControlPlaneClient::new(server.uri());
    let poller = JobPoller::new(Arc::new(client), fast_settings());
    let sink = TestSink::default();

    let outcome = poller
        .poll("slow-1", &sink, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.termination, Termination::BudgetExhausted { attempts: 5 });
    assert_eq!(outcome.results, json!({"partial": true}));

    let last = outcome.last_snapshot.unwrap();
    assert_eq!(last.phase, "unknown");
    assert_eq!(last.pct, 0.0);
}

#[tokio::test]
async fn job_ids_are_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scanJobs/job%2F1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ControlPlaneClient::new(server.uri());
    let report = client.job_status("job/1").await.unwrap();
    assert_eq!(report.status(), "done");
}

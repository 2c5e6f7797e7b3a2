use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scorer::{ScorerConfig, ScoringClient};
use server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, WorkflowConfig};
use server::orchestrator::InterviewOrchestrator;
use server::state::AppState;
use server::store::MemoryResultStore;

pub mod routes {
    pub const INTERVIEWS: &str = "/api/v1/interviews";

    pub fn interview(id: &str) -> String {
        format!("/api/v1/interviews/{id}")
    }

    pub fn interview_result(id: &str) -> String {
        format!("/api/v1/interviews/{id}/result")
    }

    pub fn question_video(id: &str) -> String {
        format!("/api/v1/questions/{id}/video")
    }
}

/// A running test server backed by the in-memory store and a mock scorer.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryResultStore>,
    pub scorer: MockServer,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    /// Spawn with interview `I1` (candidate `c1`) holding questions `q1`, `q2`.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryResultStore::new());
        store.add_question("q1", "Why Go?").await;
        store.add_question("q2", "Tell us about yourself").await;
        store.add_interview("I1", "c1", &["q1", "q2"]).await;
        Self::spawn_with_store(store).await
    }

    pub async fn spawn_with_store(store: Arc<MemoryResultStore>) -> Self {
        let scorer = MockServer::start().await;

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: String::new(),
                timeout_secs: 5,
                max_connections: 1,
            },
            scoring: ScorerConfig {
                url: scorer.uri(),
                connect_timeout_secs: 5,
                request_timeout_secs: Some(10),
            },
            workflow: WorkflowConfig::default(),
        };

        let client = ScoringClient::new(&app_config.scoring).expect("Failed to create scorer");
        let orchestrator = InterviewOrchestrator::new(store.clone(), Arc::new(client));
        let state = AppState {
            orchestrator: Arc::new(orchestrator),
            config: app_config,
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            store,
            scorer,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Make the scorer answer every request with `status` and a JSON body.
    pub async fn scorer_responds(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/process_interview"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.scorer)
            .await;
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

use poem::{
    Endpoint, EndpointExt, Route, Server as PoemServer,
    listener::TcpListener,
    middleware::{Cors, NormalizePath, Tracing, TrailingSlash},
};
use poem_openapi::OpenApiService;

use crate::api::host_guard::HostGuard;
use crate::config::{app_config::AppConfig, host_config::AllowedHosts};
use crate::setup::dependency_injection::DependencyContainer;

pub struct Server;

impl Server {
    /// Routes live under `/api` and answer with or without a trailing slash;
    /// host validation wraps everything, CORS sits inside it.
    pub fn build_app(
        container: DependencyContainer,
        cors: Cors,
        allowed_hosts: AllowedHosts,
    ) -> impl Endpoint {
        let api_service = OpenApiService::new(
            (container.health_api, container.chat_api),
            "Chatbot Backend API",
            env!("CARGO_PKG_VERSION"),
        );

        Route::new()
            .nest("/api", api_service)
            .with(NormalizePath::new(TrailingSlash::Trim))
            .with(cors)
            .with(HostGuard::new(allowed_hosts))
            .with(Tracing)
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        match &config.allowed_hosts {
            AllowedHosts::Any => tracing::warn!("ALLOWED_HOSTS is empty, accepting any host"),
            AllowedHosts::Only(hosts) => tracing::info!(?hosts, "Host validation enabled"),
        }
        if config.openai.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set, /api/chat/ will fail");
        }

        let app = Self::build_app(container, config.cors, config.allowed_hosts);
        tracing::info!("Server running at http://{}", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use mockall::mock;
    use poem::http::StatusCode;
    use poem::test::{TestClient, TestResponse};
    use serde_json::{Value, json};

    use business::domain::chat::errors::ChatError;
    use business::domain::chat::model::ChatPrompt;
    use business::domain::chat::services::ChatCompletionService;

    use crate::config::openai_config::OpenAIConfig;

    mock! {
        pub ChatCompletion {}

        #[async_trait]
        impl ChatCompletionService for ChatCompletion {
            async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ChatError>;
        }
    }

    fn app_with(completion: MockChatCompletion, allowed_hosts: AllowedHosts) -> impl Endpoint {
        Server::build_app(
            DependencyContainer::with_completion_service(Arc::new(completion)),
            Cors::new(),
            allowed_hosts,
        )
    }

    fn answering(answer: &'static str) -> MockChatCompletion {
        let mut completion = MockChatCompletion::new();
        completion
            .expect_complete()
            .returning(move |_| Ok(answer.to_string()));
        completion
    }

    fn never_called() -> MockChatCompletion {
        let mut completion = MockChatCompletion::new();
        completion.expect_complete().never();
        completion
    }

    async fn body_json(resp: TestResponse) -> Value {
        resp.0.into_body().into_json().await.unwrap()
    }

    #[tokio::test]
    async fn should_report_server_up() {
        let cli = TestClient::new(app_with(never_called(), AllowedHosts::Any));

        for _ in 0..2 {
            let resp = cli.get("/api/health/").send().await;
            resp.assert_status_is_ok();
            assert_eq!(body_json(resp).await, json!({"message": "Server is up!"}));
        }
    }

    #[tokio::test]
    async fn should_serve_routes_without_trailing_slash() {
        let cli = TestClient::new(app_with(answering("Hi there"), AllowedHosts::Any));

        let health = cli.get("/api/health").send().await;
        health.assert_status_is_ok();
        assert_eq!(body_json(health).await, json!({"message": "Server is up!"}));

        let chat = cli
            .post("/api/chat")
            .body_json(&json!({"question": "Hello?"}))
            .send()
            .await;
        chat.assert_status_is_ok();
        assert_eq!(body_json(chat).await, json!({"answer": "Hi there"}));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let cli = TestClient::new(app_with(never_called(), AllowedHosts::Any));

        cli.get("/api/unknown/")
            .send()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_answer_from_provider() {
        let mut completion = MockChatCompletion::new();
        completion
            .expect_complete()
            .withf(|prompt| prompt.question.as_str() == "Hello?")
            .times(1)
            .returning(|_| Ok("Hi there".to_string()));
        let cli = TestClient::new(app_with(completion, AllowedHosts::Any));

        let resp = cli
            .post("/api/chat/")
            .body_json(&json!({"question": "Hello?"}))
            .send()
            .await;

        resp.assert_status_is_ok();
        assert_eq!(body_json(resp).await, json!({"answer": "Hi there"}));
    }

    #[tokio::test]
    async fn should_pass_optional_overrides_to_provider() {
        let mut completion = MockChatCompletion::new();
        completion
            .expect_complete()
            .withf(|prompt| {
                prompt.model == "gpt-4o" && prompt.system_prompt == "Answer in one word."
            })
            .times(1)
            .returning(|_| Ok("Paris".to_string()));
        let cli = TestClient::new(app_with(completion, AllowedHosts::Any));

        let resp = cli
            .post("/api/chat/")
            .body_json(&json!({
                "question": "Capital of France?",
                "model": "gpt-4o",
                "system_prompt": "Answer in one word."
            }))
            .send()
            .await;

        resp.assert_status_is_ok();
        assert_eq!(body_json(resp).await, json!({"answer": "Paris"}));
    }

    #[tokio::test]
    async fn should_reject_empty_question() {
        let cli = TestClient::new(app_with(never_called(), AllowedHosts::Any));

        for question in ["", "   "] {
            let resp = cli
                .post("/api/chat/")
                .body_json(&json!({"question": question}))
                .send()
                .await;

            resp.assert_status(StatusCode::BAD_REQUEST);
            let body = body_json(resp).await;
            assert_eq!(
                body["error"],
                "Field 'question' is required and must be a non-empty string."
            );
        }
    }

    #[tokio::test]
    async fn should_reject_missing_or_mistyped_question() {
        let cli = TestClient::new(app_with(never_called(), AllowedHosts::Any));

        for payload in [
            json!({}),
            json!({"question": 42}),
            json!({"question": true}),
            json!({"question": null}),
            json!({"question": ["Hello?"]}),
            json!({"question": "Hello?", "model": 4}),
            json!({"question": "Hello?", "system_prompt": false}),
            json!("Hello?"),
        ] {
            let resp = cli.post("/api/chat/").body_json(&payload).send().await;

            resp.assert_status(StatusCode::BAD_REQUEST);
            assert!(body_json(resp).await.get("error").is_some());
        }
    }

    #[tokio::test]
    async fn should_reject_malformed_or_missing_body() {
        let cli = TestClient::new(app_with(never_called(), AllowedHosts::Any));

        let malformed = cli
            .post("/api/chat/")
            .content_type("application/json")
            .body("{not json")
            .send()
            .await;
        malformed.assert_status(StatusCode::BAD_REQUEST);

        let missing = cli.post("/api/chat/").send().await;
        missing.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_fail_with_server_error_without_api_key() {
        let container = DependencyContainer::new(&OpenAIConfig {
            api_key: None,
            base_url: "http://127.0.0.1:1/v1".to_string(),
            timeout: Duration::from_secs(1),
        });
        let cli = TestClient::new(Server::build_app(container, Cors::new(), AllowedHosts::Any));

        let resp = cli
            .post("/api/chat/")
            .body_json(&json!({"question": "Hello?"}))
            .send()
            .await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(
            body["error"],
            "OPENAI_API_KEY environment variable is not set."
        );
        assert!(body.get("answer").is_none());
    }

    #[tokio::test]
    async fn should_fail_with_server_error_when_provider_fails() {
        let mut completion = MockChatCompletion::new();
        completion
            .expect_complete()
            .times(1)
            .returning(|_| Err(ChatError::upstream("OpenAI returned 401 Unauthorized")));
        let cli = TestClient::new(app_with(completion, AllowedHosts::Any));

        let resp = cli
            .post("/api/chat/")
            .body_json(&json!({"question": "Hello?"}))
            .send()
            .await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert!(body.get("answer").is_none());
        assert_eq!(body["detail"], "OpenAI returned 401 Unauthorized");
    }

    #[tokio::test]
    async fn should_reject_disallowed_host_before_any_route() {
        let allowed = AllowedHosts::parse(Some("api.example.com"));
        let cli = TestClient::new(app_with(never_called(), allowed));

        let health = cli
            .get("/api/health/")
            .header("host", "evil.com")
            .send()
            .await;
        health.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(body_json(health).await["error"], "Invalid Host header");

        let chat = cli
            .post("/api/chat/")
            .header("host", "evil.com")
            .body_json(&json!({"question": "Hello?"}))
            .send()
            .await;
        chat.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(body_json(chat).await["error"], "Invalid Host header");
    }

    #[tokio::test]
    async fn should_serve_allowed_host() {
        let allowed = AllowedHosts::parse(Some("api.example.com"));
        let cli = TestClient::new(app_with(answering("Hi there"), allowed));

        let health = cli
            .get("/api/health/")
            .header("host", "api.example.com:8080")
            .send()
            .await;
        health.assert_status_is_ok();

        let chat = cli
            .post("/api/chat/")
            .header("host", "api.example.com")
            .body_json(&json!({"question": "Hello?"}))
            .send()
            .await;
        chat.assert_status_is_ok();
        assert_eq!(body_json(chat).await, json!({"answer": "Hi there"}));
    }

    #[tokio::test]
    async fn should_reject_forwarded_host_chain() {
        let allowed = AllowedHosts::parse(Some("api.example.com"));
        let cli = TestClient::new(app_with(never_called(), allowed));

        let resp = cli
            .get("/api/health/")
            .header("host", "api.example.com")
            .header("x-forwarded-host", "api.example.com, proxy.local")
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Invalid Host header");
    }
}

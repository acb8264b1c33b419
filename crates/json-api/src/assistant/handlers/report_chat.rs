//! Report Chat Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::Value;
use tracing::{error, info};

use brankas_app::auth::SessionHolder;

use crate::{
    assistant::models::{AssistantErrorBody, ReportChatReply, chat_messages},
    extensions::*,
    state::State,
};

fn fail(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status)
        .render(Json(AssistantErrorBody::new(message)));
}

/// Report Chat Handler
///
/// Answers an admin's questions about a weekly report.
#[endpoint(
    tags("assistant", "admin"),
    summary = "Report Chat",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Assistant reply", body = ReportChatReply),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing report or messages", body = AssistantErrorBody),
        (status_code = StatusCode::UNAUTHORIZED, description = "No session", body = AssistantErrorBody),
        (status_code = StatusCode::FORBIDDEN, description = "Not an admin", body = AssistantErrorBody),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Assistant unavailable", body = AssistantErrorBody),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(user) = depot.obtain::<SessionHolder>().ok().and_then(SessionHolder::user) else {
        fail(res, StatusCode::UNAUTHORIZED, "Unauthorized");

        return Ok(());
    };

    match state.app.users.is_admin(user.uuid).await {
        Ok(true) => {}
        Ok(false) => {
            fail(res, StatusCode::FORBIDDEN, "Forbidden");

            return Ok(());
        }
        Err(source) => {
            error!("failed to verify admin role: {source}");
            fail(res, StatusCode::INTERNAL_SERVER_ERROR, "Could not verify user role.");

            return Ok(());
        }
    }

    let body = req.parse_json::<Value>().await.unwrap_or(Value::Null);
    let report = body.get("reportData").filter(|report| !report.is_null());

    let (Some(report), Some(messages)) = (report, chat_messages(&body)) else {
        fail(res, StatusCode::BAD_REQUEST, "Missing reportData or messages.");

        return Ok(());
    };

    let assistant = &state.app.assistant;

    if !assistant.is_configured() {
        error!("report chat requested without a generative API key");
        fail(res, StatusCode::INTERNAL_SERVER_ERROR, "API key not configured.");

        return Ok(());
    }

    match assistant.report_chat(report.clone(), messages).await {
        Ok(answer) => {
            res.render(Json(ReportChatReply {
                reply: answer.reply,
                reply_html: answer.reply_html,
            }));
        }
        Err(source) => {
            info!("report chat upstream failure: {source}");
            fail(res, StatusCode::INTERNAL_SERVER_ERROR, source.to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use brankas_app::{
        assistant::{AssistantError, MockAssistantService, ReportReply},
        domain::users::MockUsersService,
    };

    use crate::test_helpers::{StateBuilder, TEST_USER_UUID};

    use super::*;

    fn body() -> Value {
        json!({
            "reportData": { "total_revenue": "44.97" },
            "messages": [{ "role": "user", "content": "Summarise" }],
        })
    }

    fn admin_users() -> MockUsersService {
        let mut users = MockUsersService::new();

        users
            .expect_is_admin()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(true));

        users
    }

    #[tokio::test]
    async fn test_report_chat_returns_reply_and_html() -> TestResult {
        let mut assistant = MockAssistantService::new();

        assistant.expect_is_configured().return_const(true);
        assistant
            .expect_report_chat()
            .once()
            .withf(|report, messages| {
                report.get("total_revenue").is_some() && messages.len() == 1
            })
            .return_once(|_, _| {
                Ok(ReportReply {
                    reply: "**Good week**".to_string(),
                    reply_html: "<p><strong>Good week</strong></p>\n".to_string(),
                })
            });

        let service = StateBuilder::new()
            .users(admin_users())
            .assistant(assistant)
            .signed_in(Router::with_path("api/report-ai").post(handler));

        let mut res = TestClient::post("http://example.com/api/report-ai")
            .json(&body())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let reply: ReportChatReply = res.take_json().await?;

        assert_eq!(reply.reply, "**Good week**");
        assert!(reply.reply_html.contains("<strong>"), "{}", reply.reply_html);

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_gets_401() -> TestResult {
        let mut assistant = MockAssistantService::new();

        assistant.expect_report_chat().never();

        let service = StateBuilder::new()
            .assistant(assistant)
            .anonymous(Router::with_path("api/report-ai").post(handler));

        let mut res = TestClient::post("http://example.com/api/report-ai")
            .json(&body())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let error: AssistantErrorBody = res.take_json().await?;

        assert_eq!(error.error, "Unauthorized");

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_gets_403() {
        let mut users = MockUsersService::new();
        let mut assistant = MockAssistantService::new();

        users.expect_is_admin().once().return_once(|_| Ok(false));
        assistant.expect_report_chat().never();

        let service = StateBuilder::new()
            .users(users)
            .assistant(assistant)
            .signed_in(Router::with_path("api/report-ai").post(handler));

        let res = TestClient::post("http://example.com/api/report-ai")
            .json(&body())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_missing_report_data_returns_400() {
        let mut assistant = MockAssistantService::new();

        assistant.expect_report_chat().never();

        let service = StateBuilder::new()
            .users(admin_users())
            .assistant(assistant)
            .signed_in(Router::with_path("api/report-ai").post(handler));

        let res = TestClient::post("http://example.com/api/report-ai")
            .json(&json!({ "messages": [] }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_500_with_error() -> TestResult {
        let mut assistant = MockAssistantService::new();

        assistant.expect_is_configured().return_const(true);
        assistant
            .expect_report_chat()
            .once()
            .return_once(|_, _| Err(AssistantError::Upstream("model overloaded".to_string())));

        let service = StateBuilder::new()
            .users(admin_users())
            .assistant(assistant)
            .signed_in(Router::with_path("api/report-ai").post(handler));

        let mut res = TestClient::post("http://example.com/api/report-ai")
            .json(&body())
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let error: AssistantErrorBody = res.take_json().await?;

        assert_eq!(error.error, "model overloaded");

        Ok(())
    }
}

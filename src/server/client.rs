// src/server/client.rs
// POSTs approve/delete requests to the backend's per-view endpoints.

use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::Url;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::csrf::CsrfTokenProvider;
use crate::errors::{Result, RowdeckError};
use crate::listview::{ActionKind, ActionResponse, ActionTicket};

pub const ID_PLACEHOLDER: &str = "{id}";

pub trait MutationClient: Send + Sync {
    /// Sends the request described by `ticket`. The future owns everything it
    /// needs so it can be spawned.
    fn submit(&self, ticket: ActionTicket) -> BoxFuture<'static, Result<ActionResponse>>;
}

/// Path templates per (view, action), e.g. `/delete-lead/{id}/`.
#[derive(Clone, Debug, Default)]
pub struct Routes {
    templates: HashMap<(String, ActionKind), String>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, view: &str, kind: ActionKind, template: &str) {
        self.templates.insert((view.to_string(), kind), template.to_string());
    }

    pub fn supports(&self, view: &str, kind: ActionKind) -> bool {
        self.templates.contains_key(&(view.to_string(), kind))
    }

    /// The request path with `id` substituted. Each segment is
    /// percent-encoded, so an id holding `/`, `?` or `#` stays one segment.
    pub fn path(&self, view: &str, kind: ActionKind, id: &str) -> Option<String> {
        let template = self.templates.get(&(view.to_string(), kind))?;
        let mut url = Url::parse("http://localhost/").ok()?;
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.clear();
            for segment in template.trim_start_matches('/').split('/') {
                segments.push(&segment.replace(ID_PLACEHOLDER, id));
            }
        }
        Some(url.path().to_string())
    }
}

pub struct HttpMutationClient {
    client: reqwest::Client,
    base_url: String,
    routes: Routes,
    csrf: Arc<CsrfTokenProvider>,
}

impl HttpMutationClient {
    pub fn new(base_url: &str, timeout: Duration, routes: Routes, csrf: Arc<CsrfTokenProvider>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            routes,
            csrf,
        })
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    fn url_for(&self, ticket: &ActionTicket) -> Result<String> {
        let path = self
            .routes
            .path(&ticket.view, ticket.kind, ticket.id.as_str())
            .ok_or_else(|| RowdeckError::ActionNotConfigured {
                action: ticket.kind.to_string(),
                view: ticket.view.clone(),
            })?;
        Ok(format!("{}{}", self.base_url, path))
    }
}

impl MutationClient for HttpMutationClient {
    fn submit(&self, ticket: ActionTicket) -> BoxFuture<'static, Result<ActionResponse>> {
        let url = match self.url_for(&ticket) {
            Ok(url) => url,
            Err(e) => return futures::future::ready(Err(e)).boxed(),
        };
        let mut request = self
            .client
            .post(&url)
            .header("X-Request-Id", ticket.request_id.to_string());
        match self.csrf.token() {
            Some(token) => request = request.header("X-CSRFToken", token),
            None => warn!("Sending {} without a CSRF token", ticket.kind),
        }
        if let Some(cookies) = self.csrf.cookie_header() {
            request = request.header(COOKIE, cookies.to_string());
        }

        async move {
            debug!("POST {} ({})", url, ticket.request_id);
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(RowdeckError::HttpStatus {
                    status: status.as_u16(),
                });
            }
            let body = response.text().await?;
            parse_response(&body)
        }
        .boxed()
    }
}

pub fn parse_response(body: &str) -> Result<ActionResponse> {
    serde_json::from_str(body).map_err(|e| RowdeckError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listview::{ListViewController, Record, RecordId, RowSource, SnapshotTarget, ViewSpec};
    use crate::server::{perform_action, TracingNotifier};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use uuid::Uuid;

    fn routes() -> Routes {
        let mut routes = Routes::new();
        routes.insert("leads", ActionKind::Delete, "/delete-lead/{id}/");
        routes.insert("agents", ActionKind::Approve, "/approve-agent/{id}/");
        routes
    }

    #[test]
    fn paths_substitute_the_id() {
        let routes = routes();
        assert_eq!(
            routes.path("leads", ActionKind::Delete, "42").as_deref(),
            Some("/delete-lead/42/")
        );
        assert!(routes.path("leads", ActionKind::Approve, "42").is_none());
        assert!(routes.supports("agents", ActionKind::Approve));
    }

    #[test]
    fn malformed_bodies_are_failures() {
        assert!(matches!(
            parse_response("<html>Forbidden</html>"),
            Err(RowdeckError::MalformedResponse(_))
        ));
        let ok = parse_response(r#"{"success": false, "message": "nope"}"#).unwrap();
        assert!(!ok.success);
    }

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let routes = routes();
        assert_eq!(
            routes.path("leads", ActionKind::Delete, "a/b?c#d").as_deref(),
            Some("/delete-lead/a%2Fb%3Fc%23d/")
        );
        assert_eq!(
            routes.path("agents", ActionKind::Approve, "Ana Ruiz").as_deref(),
            Some("/approve-agent/Ana%20Ruiz/")
        );
    }

    fn ticket(view: &str, id: &str, kind: ActionKind) -> ActionTicket {
        ActionTicket {
            view: view.to_string(),
            id: RecordId::from(id),
            kind,
            request_id: Uuid::new_v4(),
        }
    }

    fn client_for(base_url: &str) -> HttpMutationClient {
        let csrf = Arc::new(CsrfTokenProvider::new(
            "csrftoken",
            Some("sessionid=s1; csrftoken=T0k3n".to_string()),
        ));
        HttpMutationClient::new(base_url, Duration::from_secs(5), routes(), csrf).unwrap()
    }

    /// Answers a single request with `status_line` and `body`; resolves to the
    /// request head as received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).to_string()
        });
        (base_url, handle)
    }

    #[tokio::test]
    async fn unrouted_action_fails_without_a_request() {
        let client = client_for("http://127.0.0.1:9/");
        let result = client.submit(ticket("projects", "7", ActionKind::Delete)).await;
        assert!(matches!(result, Err(RowdeckError::ActionNotConfigured { .. })));
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let (base_url, server) = serve_once("403 Forbidden", r#"{"detail":"CSRF failed"}"#).await;
        let result = client_for(&base_url).submit(ticket("leads", "42", ActionKind::Delete)).await;
        assert!(matches!(result, Err(RowdeckError::HttpStatus { status: 403 })));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn posts_carry_the_ajax_headers() {
        let (base_url, server) = serve_once("200 OK", r#"{"success":true,"message":"ok"}"#).await;
        let ticket = ticket("leads", "42", ActionKind::Delete);
        let request_id = ticket.request_id.to_string();
        let response = client_for(&base_url).submit(ticket).await.unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("ok"));

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("post /delete-lead/42/ http/1.1\r\n"), "{}", head);
        assert!(head.contains("x-csrftoken: t0k3n\r\n"));
        assert!(head.contains("x-requested-with: xmlhttprequest\r\n"));
        assert!(head.contains(&format!("x-request-id: {}\r\n", request_id)));
        assert!(head.contains("cookie: sessionid=s1; csrftoken=t0k3n\r\n"));
    }

    #[tokio::test]
    async fn malformed_reply_becomes_an_error_notice() {
        let (base_url, server) = serve_once("200 OK", "<html>Login required</html>").await;
        let spec = ViewSpec::builder("leads")
            .search_fields(["name"])
            .standard_sorts()
            .build()
            .unwrap();
        let source = RowSource::new(vec![
            Record::new("42").with("name", "Lead 42").with("date", 2i64),
            Record::new("43").with("name", "Lead 43").with("date", 1i64),
        ])
        .unwrap();
        let mut view = ListViewController::mount(spec, Some(source), SnapshotTarget::new()).unwrap();

        let client = client_for(&base_url);
        let notice = perform_action(
            &mut view,
            &client,
            &TracingNotifier,
            &RecordId::from("42"),
            ActionKind::Delete,
            true,
        )
        .await
        .unwrap()
        .unwrap();
        server.await.unwrap();

        assert!(notice.is_error());
        assert_eq!(view.source().len(), 2);
        assert!(!view.is_pending(&RecordId::from("42")));
    }
}

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::AppState;

const SECURITY_HEADERS: [(&str, &str); 3] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

/// `GET /metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// What a request was about: the collection it hit and, for item routes,
/// the raw id segment from the path.
#[derive(Debug, PartialEq, Eq)]
struct RouteTarget<'a> {
    resource: &'a str,
    id: Option<&'a str>,
}

/// Reads the target off a matched route template such as `/api/blogs/{id}`.
/// Segments are aligned from the end so the result does not depend on
/// whether `path` still carries the `/api` prefix.
fn route_target<'a>(route: Option<&'a str>, path: &'a str) -> RouteTarget<'a> {
    let Some(route) = route else {
        return RouteTarget {
            resource: "unmatched",
            id: None,
        };
    };

    let resource = route
        .split('/')
        .find(|segment| !segment.is_empty() && *segment != "api")
        .unwrap_or("root");

    let id = route
        .rsplit('/')
        .zip(path.rsplit('/'))
        .find_map(|(template, actual)| (template == "{id}").then_some(actual));

    RouteTarget { resource, id }
}

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

/// Wraps each request in a span tagged with the blog list resource it
/// touched, then records one summary event and the HTTP metrics.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let target = route_target(route.as_deref(), &path);
    let resource = target.resource.to_string();

    let span = info_span!(
        "api_request",
        %request_id,
        %method,
        resource = %target.resource,
        resource_id = target.id,
        route = route.as_deref(),
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        let labels = [
            ("method", method.to_string()),
            ("resource", resource),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        info!(
            event = "api_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            outcome = outcome(status),
            "{method} {path} -> {}",
            status.as_u16()
        );

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_route_yields_resource_and_id() {
        let target = route_target(Some("/api/blogs/{id}"), "/api/blogs/17");
        assert_eq!(
            target,
            RouteTarget {
                resource: "blogs",
                id: Some("17"),
            }
        );
    }

    #[test]
    fn id_is_found_without_the_api_prefix() {
        let target = route_target(Some("/api/blogs/{id}"), "/blogs/not-an-id");
        assert_eq!(target.id, Some("not-an-id"));
    }

    #[test]
    fn collection_routes_have_no_id() {
        assert_eq!(
            route_target(Some("/api/users"), "/api/users"),
            RouteTarget {
                resource: "users",
                id: None,
            }
        );
        assert_eq!(route_target(Some("/metrics"), "/metrics").resource, "metrics");
    }

    #[test]
    fn unmatched_requests_are_grouped() {
        let target = route_target(None, "/api/nope/1");
        assert_eq!(target.resource, "unmatched");
        assert_eq!(target.id, None);
    }

    #[test]
    fn outcome_follows_status_class() {
        assert_eq!(outcome(StatusCode::CREATED), "success");
        assert_eq!(outcome(StatusCode::NO_CONTENT), "success");
        assert_eq!(outcome(StatusCode::BAD_REQUEST), "client_error");
        assert_eq!(outcome(StatusCode::INTERNAL_SERVER_ERROR), "error");
    }
}

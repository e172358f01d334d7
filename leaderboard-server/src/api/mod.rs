//! HTTP API
//!
//! | 路径 | 方法 | 说明 | 权限 |
//! |------|------|------|------|
//! | /health | GET | 存活检查 | 无 |
//! | /api/status | GET | 服务状态与上次同步时间 | 无 |
//! | /api/sync | POST | 手动触发同步 | 无 |
//! | /api/analytics | GET | 时间段分析 | Admin |
//! | /api/view | GET | 按角色裁剪的看板 | 已登记邮箱 |
//! | /api/transactions | GET | 按角色裁剪的交易流 | 已登记邮箱 |

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod sync;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use auth::CurrentUser;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(sync::router())
        .merge(analytics::router())
        .merge(dashboard::router())
}

/// Routes with middleware and state, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .with_state(state)
}

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::*;

use crate::service::AuditService;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub audit: Arc<AuditService>,
    pub sample_size: usize,
}

/// 构建路由
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/audit", get(idle_audit))
        .route("/api/audit/upload", post(upload_audit))
        .route("/api/audit/sample", post(sample_audit))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

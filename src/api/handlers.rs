use super::{ApiError, AppState};
use crate::models::RenderedReport;
use crate::service::AuditTrigger;
use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 报表输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

/// 样例审计参数
#[derive(Debug, Default, Deserialize)]
pub struct SampleQuery {
    pub count: Option<usize>,
    #[serde(default)]
    pub format: ReportFormat,
}

/// 响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct AuditResponse {
    pub success: bool,
    pub message: String,
    pub report: Option<RenderedReport>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 未触发审计时的空闲状态
pub async fn idle_audit(State(state): State<AppState>) -> Result<Response, ApiError> {
    let report = state.audit.run(None)?;
    let response = AuditResponse {
        success: true,
        message: "No audit requested: upload a CSV or generate a sample audit".to_string(),
        report,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

/// 上传 CSV 审计, 取 `file` 字段 (没有则取第一个文件字段)
pub async fn upload_audit(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let is_file_field = field.name() == Some("file");
        let file_name = field.file_name().map(str::to_string);

        if is_file_field {
            let data = field.bytes().await?;
            upload = Some((file_name, data.to_vec()));
            break;
        }
        if upload.is_none() && file_name.is_some() {
            let data = field.bytes().await?;
            upload = Some((file_name, data.to_vec()));
        }
    }

    let Some((file_name, data)) = upload else {
        return Err(ApiError::bad_request("no CSV file in upload"));
    };
    tracing::info!(
        "[API] 收到上传文件 {}, {} 字节",
        file_name.as_deref().unwrap_or("<unnamed>"),
        data.len()
    );

    let report = run_blocking(&state, AuditTrigger::Upload(data))
        .await?
        .ok_or_else(|| ApiError::internal("upload produced no report"))?;
    Ok(respond(report, query.format))
}

/// 生成样例数据并审计
pub async fn sample_audit(
    State(state): State<AppState>,
    Query(query): Query<SampleQuery>,
) -> Result<Response, ApiError> {
    let count = query.count.unwrap_or(state.sample_size);
    let report = run_blocking(&state, AuditTrigger::GenerateSample(count))
        .await?
        .ok_or_else(|| ApiError::internal("sample audit produced no report"))?;
    Ok(respond(report, query.format))
}

/// 审计是纯计算, 放到阻塞线程池执行, 避免占用异步工作线程
async fn run_blocking(
    state: &AppState,
    trigger: AuditTrigger,
) -> Result<Option<RenderedReport>, ApiError> {
    let audit = Arc::clone(&state.audit);
    let report = tokio::task::spawn_blocking(move || audit.run(Some(trigger)))
        .await
        .map_err(|e| ApiError::internal(format!("audit task failed: {e}")))??;
    Ok(report)
}

fn respond(report: RenderedReport, format: ReportFormat) -> Response {
    match format {
        ReportFormat::Json => {
            let response = AuditResponse {
                success: true,
                message: format!(
                    "Audited {} shipments across {} types",
                    report.totals.total_shipments,
                    report.table.len()
                ),
                report: Some(report),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        ReportFormat::Text => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report.to_string(),
        )
            .into_response(),
    }
}

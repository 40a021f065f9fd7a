use shipplug_audit::{api, AppConfig, AuditService, ReportPresenter};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置
    let config = AppConfig::from_env()?;

    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_max_level(config.max_log_level()?)
        .init();

    info!("Starting server with config: {:?}", config);

    // 创建审计服务
    let presenter = ReportPresenter::new(config.audit.chart()?);
    let audit = Arc::new(AuditService::new(presenter, config.audit.max_sample_size));
    let state = api::AppState {
        audit,
        sample_size: config.audit.sample_size,
    };

    // 构建路由
    let app = api::router(state, config.audit.max_upload_bytes).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/audit          - idle (no audit requested)");
    info!("  POST /api/audit/upload   - audit an uploaded CSV (multipart field `file`)");
    info!(
        "  POST /api/audit/sample   - audit {} generated shipments (?count=N)",
        config.audit.sample_size
    );
    info!("  ?format=text             - plain-text report instead of JSON");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;
use media_studio_backend::config::StudioConfig;
use media_studio_backend::{AppState, create_app};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the studio API server
    #[arg(short, long, default_value_t = 3001)]
    port: u16,

    /// Root of the site checkout to edit (overrides SITE_ROOT)
    #[arg(short, long)]
    site_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_studio_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = StudioConfig::from_env();
    if let Some(site_root) = args.site_root {
        config.site_root = site_root;
    }

    info!("🚀 Starting Media Studio Backend...");
    info!(
        "📁 Site root: {} (content: {})",
        config.site_root.display(),
        config.content_path().display()
    );
    info!(
        "🛡️  Max upload size: {} MB",
        config.max_upload_size / 1024 / 1024
    );

    let state = AppState::new(config);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
            info!("📥 {} {}", request.method(), request.uri());
        })
        .on_response(
            |response: &axum::http::Response<_>,
             latency: std::time::Duration,
             _span: &tracing::Span| {
                info!(
                    "📤 Finished in {:?} with status {}",
                    latency,
                    response.status()
                );
            },
        );

    let app = create_app(state).layer(trace_layer);

    // Local operator tool: loopback only.
    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ Studio server listening on: http://{addr}");
    info!("📖 Swagger UI documentation: http://{addr}/swagger-ui");
    info!("⚠️  Development tool only - do not expose publicly");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Studio server exited cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, shutting down...");
        },
    }
}

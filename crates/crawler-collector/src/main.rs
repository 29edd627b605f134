//! Crawler daemon.

use std::sync::Arc;

use crawler_collector::logging::{init_logging, LogConfig};
use crawler_collector::{CollectionCycle, CollectorConfig, Scheduler};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogConfig::from_env())?;

    tracing::info!("Crawler 시작");

    let config = CollectorConfig::from_env()?;
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        interval_minutes = config.schedule.interval_minutes,
        "설정 로드 완료"
    );

    // 수집기 자체는 디렉토리를 만들지 않으므로 시작 시 한 번 준비
    std::fs::create_dir_all(&config.data_dir)?;

    let cycle = Arc::new(CollectionCycle::from_config(&config)?);
    let scheduler = Scheduler::new(config.schedule.interval());
    tokio::spawn(shutdown_signal(scheduler.shutdown_token()));

    tracing::info!(
        "=== 데몬 모드 시작 (주기: {}분) ===",
        config.schedule.interval_minutes
    );

    scheduler
        .run(|| {
            let cycle = Arc::clone(&cycle);
            async move {
                cycle.run().await;
            }
        })
        .await;

    tracing::info!("Crawler 종료");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 수신 시 종료 토큰 취소.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C 핸들러 설치 실패");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM 핸들러 설치 실패");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Ctrl+C 수신"),
        _ = terminate => tracing::warn!("SIGTERM 수신"),
    }

    shutdown.cancel();
}

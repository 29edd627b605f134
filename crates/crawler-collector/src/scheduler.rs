//! 고정 주기 스케줄러.
//!
//! 시작 직후에는 실행하지 않고 한 주기를 기다린 뒤 첫 작업을 실행합니다.
//! 작업이 끝나야 다음 tick을 기다리므로 작업끼리 겹치지 않습니다.
//! 작업이 주기를 넘기면 밀린 tick 하나만 즉시 실행하고 나머지는 버립니다
//! (`MissedTickBehavior::Skip`).

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// 주기 실행 루프
#[derive(Debug, Clone)]
pub struct Scheduler {
    period: Duration,
    shutdown: CancellationToken,
}

impl Scheduler {
    /// 새 스케줄러 생성 (종료 토큰은 내부에서 생성)
    pub fn new(period: Duration) -> Self {
        Self::with_shutdown(period, CancellationToken::new())
    }

    /// 외부 종료 토큰을 사용하는 스케줄러 생성
    pub fn with_shutdown(period: Duration, shutdown: CancellationToken) -> Self {
        Self { period, shutdown }
    }

    /// 종료 토큰 (cancel 시 루프 종료)
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 취소될 때까지 `period`마다 `job` 실행.
    ///
    /// 실행 중인 작업은 중단하지 않고, 작업 사이 또는 대기 중에만 종료합니다.
    /// 실행한 작업 횟수를 반환합니다.
    pub async fn run<F, Fut>(&self, mut job: F) -> u64
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        tracing::info!(period_secs = self.period.as_secs(), "스케줄러 시작");

        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut runs = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    tracing::info!("종료 신호 수신, 스케줄러 종료 중...");
                    break;
                }
                _ = ticker.tick() => {
                    job().await;
                    runs += 1;
                    tracing::info!(
                        runs,
                        next_in_secs = self.period.as_secs(),
                        "작업 완료, 다음 실행 대기"
                    );
                }
            }
        }

        tracing::info!(runs, "스케줄러 종료됨");
        runs
    }
}

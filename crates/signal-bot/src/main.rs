//! 골드 시그널 텔레그램 봇.
//!
//! # 사용 예시
//!
//! ```bash
//! BOT_TOKEN=123:abc CHANNEL_ID=-1001234567890 PORT=3000 signal-bot
//! ```

use signal_bot::{build_bot, liveness};
use signal_core::{init_logging, BotConfig, LogConfig};
use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let logging_ready = match init_logging(LogConfig::from_env()) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("로깅 초기화 실패: {}", e);
            false
        }
    };

    let config = match BotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let message = format!("{}. BOT_TOKEN, CHANNEL_ID 환경변수를 확인하세요.", e);
            if logging_ready {
                error!("{}", message);
            } else {
                eprintln!("{}", message);
            }
            std::process::exit(1);
        }
    };

    info!(
        port = config.port,
        price = %config.signal_price,
        default_lot = %config.default_lot,
        admins = config.admin_ids.len(),
        "Configuration loaded"
    );

    let listener = liveness::bind(config.port)
        .await
        .with_context(|| format!("liveness 포트 {} 바인딩 실패", config.port))?;

    let shutdown = CancellationToken::new();

    let web_shutdown = shutdown.clone();
    let web = tokio::spawn(async move {
        let result = liveness::serve(listener, web_shutdown.clone()).await;
        if let Err(e) = &result {
            error!("Web server failed: {}", e);
            web_shutdown.cancel();
        }
        result
    });

    tokio::spawn(shutdown_signal(shutdown.clone()));

    let bot = build_bot(&config).await.context("봇 초기화 실패")?;
    info!("Bot is up ✅");
    bot.start_polling(shutdown.clone()).await;

    shutdown.cancel();
    web.await
        .context("Web server task ended abnormally")?
        .context("Web server failed")?;

    info!("Bot stopped");
    Ok(())
}

/// 종료 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM을 받으면 종료 토큰을 취소합니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, shutting down...");
        }
    }

    shutdown_token.cancel();
}

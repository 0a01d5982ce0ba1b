//! valuebet — single-user value-betting dashboard.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! starts the dashboard server, and runs the fetch→evaluate refresh
//! loop with graceful shutdown.

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use valuebet::config::AppConfig;
use valuebet::dashboard::{self, DashboardState};
use valuebet::engine::{EngineConfig, EvEngine};
use valuebet::history::JsonFileHistory;
use valuebet::odds::bovada::BovadaClient;
use valuebet::odds::OddsProvider;
use valuebet::types::Matchup;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML
    let cfg = AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    info!(
        app_name = %cfg.app.name,
        refresh_interval_secs = cfg.app.refresh_interval_secs,
        stake = %cfg.betting.stake,
        policy = %cfg.betting.selection_policy,
        mode = %cfg.betting.probability_mode,
        "valuebet starting up"
    );

    // -- Initialise components -------------------------------------------

    let provider = BovadaClient::new(cfg.odds.base_url.clone())?;

    let engine = EvEngine::new(EngineConfig {
        stake: cfg.betting.stake,
        policy: cfg.betting.selection_policy,
        mode: cfg.betting.probability_mode,
    });

    let history = Arc::new(JsonFileHistory::new(cfg.history.path.clone()));
    let state = Arc::new(DashboardState::new(engine, history));

    if cfg.dashboard.enabled {
        dashboard::spawn_dashboard(state.clone(), cfg.dashboard.port)?;
    }

    // -- Refresh loop ------------------------------------------------------

    let mut interval = tokio::time::interval(Duration::from_secs(cfg.app.refresh_interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        sports = cfg.odds.sports.len(),
        "Entering refresh loop. Press Ctrl+C to stop."
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match run_cycle(&provider, &cfg, &state).await {
                    Ok(()) => {}
                    Err(e) => error!(error = %e, "Refresh cycle failed — continuing to next"),
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    info!("valuebet shut down cleanly.");
    Ok(())
}

/// Run a single fetch→evaluate cycle across all configured sports.
async fn run_cycle(
    provider: &dyn OddsProvider,
    cfg: &AppConfig,
    state: &Arc<DashboardState>,
) -> Result<()> {
    let fetches = cfg.odds.sports.iter().map(|sport| async move {
        (sport, provider.fetch_matchups(sport).await)
    });

    let mut matchups: Vec<Matchup> = Vec::new();
    for (sport, result) in join_all(fetches).await {
        match result {
            Ok(fetched) => matchups.extend(fetched),
            // One sport failing shouldn't blank out the others.
            Err(e) => warn!(sport = %sport.label, error = %e, "Odds fetch failed"),
        }
    }

    let matchup_count = matchups.len();
    *state.matchups.write().await = matchups;
    let snapshot = state.reevaluate().await;

    info!(
        provider = provider.name(),
        matchups = matchup_count,
        value_bets = snapshot.bets.len(),
        skipped = snapshot.skipped.len(),
        total_ev = %snapshot.summary.total_ev,
        max_win = %snapshot.summary.max_win,
        "Refresh cycle complete"
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("valuebet=info"));

    let json_logging = std::env::var("VALUEBET_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}

//! clustermetrics host binary.
//!
//! Standalone mode: the process is the only cluster manager instance, so it
//! takes leadership right after becoming ready and gives it up on ctrl-c.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use clustermetrics_core::BuildInfo;
use clustermetrics_manager::catalog::ClusterManagerMetrics;
use clustermetrics_manager::config;
use clustermetrics_manager::leadership::{LeaderMetrics, LeadershipEvent};
use clustermetrics_manager::obs::{default_registry, render_text, Registry};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let started = Instant::now();

    let path = std::env::args().nth(1).unwrap_or_else(|| "clustermetrics.yaml".into());
    let cfg = config::load_from_file(&path).expect("config load failed");

    let build = BuildInfo::from_env().with_overrides(&cfg.build);
    ClusterManagerMetrics::init_global(&cfg.metrics, build).expect("metric catalog invalid");

    let leader = LeaderMetrics::global().expect("metric catalog invalid");
    leader.base().register_base().expect("base metrics registration failed");

    let (tx, rx) = mpsc::channel(8);
    let mut transitions = {
        let leader = Arc::clone(&leader);
        tokio::spawn(async move { leader.run(rx).await })
    };

    leader.recorder().record_ready_duration(started.elapsed());
    tracing::info!(config = %path, "clustermetrics ready");

    tx.send(LeadershipEvent::Acquired).await.expect("leadership task stopped");
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.expect("failed to listen for ctrl-c"),
        res = &mut transitions => {
            // the loop only ends early on a registration collision
            res.expect("leadership task panicked").expect("leadership transition failed");
            return;
        }
    }
    tx.send(LeadershipEvent::Lost).await.expect("leadership task stopped");
    drop(tx);

    transitions
        .await
        .expect("leadership task panicked")
        .expect("leadership transition failed");

    tracing::info!(exposition = %render_text(&default_registry().gather()), "shutting down");
}

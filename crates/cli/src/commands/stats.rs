//! Dashboard statistics, once or on the dashboard's refresh interval.

use lca_tv_client::query::{MAX_CONSECUTIVE_FAILURES, STATS_REFRESH_INTERVAL};
use lca_tv_client::{QueryClient, QueryKey, WatchState};
use lca_tv_core::format::{format_currency, format_number};
use lca_tv_core::models::DashboardStats;

use super::Context;
use crate::error::CliError;
use crate::output::print_pairs;

fn count(value: u64) -> String {
    format_number(i64::try_from(value).unwrap_or(i64::MAX))
}

/// The six dashboard figures plus the overall CTR.
fn stat_lines(stats: &DashboardStats) -> Vec<(&'static str, String)> {
    vec![
        ("Total Clients", count(stats.total_clients)),
        ("Commandes Actives", count(stats.active_orders)),
        ("Revenus Mensuels", format_currency(stats.monthly_revenue)),
        ("Paiements en Attente", format_currency(stats.pending_payments)),
        ("Total Impressions", count(stats.total_impressions)),
        ("Total Clics", count(stats.total_clicks)),
        ("CTR", format!("{:.2}%", stats.click_through_rate())),
    ]
}

/// Print the stats once.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or the backend error.
pub async fn show(ctx: &Context) -> Result<(), CliError> {
    ctx.require_login().await?;
    let stats = ctx.api.dashboard().stats().await?;
    print_pairs(&stat_lines(&stats))?;
    Ok(())
}

/// Refresh the stats every 30 seconds until interrupted, the session
/// expires, or the backend fails three times in a row.
///
/// # Errors
///
/// Returns `CliError::NotLoggedIn` without a session, or when the session
/// expires while watching.
pub async fn watch(ctx: &Context) -> Result<(), CliError> {
    ctx.require_login().await?;

    let api = ctx.api.clone();
    let mut watch = QueryClient::default().watch(
        QueryKey::DashboardStats,
        STATS_REFRESH_INTERVAL,
        move || {
            let api = api.clone();
            async move { api.dashboard().stats().await }
        },
    );

    loop {
        let state = tokio::select! {
            state = watch.changed() => state,
            _ = tokio::signal::ctrl_c() => return Ok(()),
        };
        let Some(state) = state else {
            return Ok(());
        };

        match &state {
            WatchState::Loading => {}
            WatchState::Ready(stats) => {
                println!("── {} ──", chrono::Local::now().format("%H:%M:%S"));
                print_pairs(&stat_lines(stats))?;
            }
            WatchState::Failed {
                message, failures, ..
            } => {
                tracing::warn!(
                    failures,
                    max = MAX_CONSECUTIVE_FAILURES,
                    "Erreur lors du chargement des statistiques: {message}"
                );
            }
            WatchState::Stopped { message, .. } => {
                tracing::error!("Actualisation arrêtée après {MAX_CONSECUTIVE_FAILURES} échecs: {message}");
                return Ok(());
            }
            WatchState::Unauthorized => return Err(CliError::NotLoggedIn),
        }
    }
}

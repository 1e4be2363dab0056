use anyhow::{bail, Context, Result};
use opsboard::{
    config::Config,
    ingest::HttpSource,
    record::{InquiryRecord, Reportable, SheetRecord, ShipmentRecord},
    refresh::RefreshScheduler,
    stats,
};
use reqwest::Client;
use std::env;
use tokio_stream::StreamExt;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,opsboard=info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) config + admission gate ──────────────────────────────────
    let config = Config::from_env()?;
    let mut args = env::args().skip(1);
    let passcode = args
        .next()
        .context("usage: opsboard <passcode> [inquiry|shipment]")?;
    if !config.admit(&passcode) {
        bail!("passcode rejected");
    }
    let variant = args.next().unwrap_or_else(|| "inquiry".to_string());
    info!(%variant, url = %config.sheet_url, "admitted; starting refresh lifecycle");

    // ─── 3) run the selected dashboard until Ctrl-C ──────────────────
    let client = Client::new();
    let source = HttpSource::new(client, config.sheet_url.clone());
    match variant.as_str() {
        "inquiry" => run::<InquiryRecord>(source, &config).await,
        "shipment" => run::<ShipmentRecord>(source, &config).await,
        other => bail!("unknown dashboard variant: {other}"),
    }
}

async fn run<R: SheetRecord + Reportable>(source: HttpSource, config: &Config) -> Result<()> {
    let scheduler = RefreshScheduler::<R>::start(source, config.refresh_interval);
    let mut updates = scheduler.updates();
    let clock = scheduler.clock();

    loop {
        tokio::select! {
            maybe = updates.next() => {
                let Some(snapshot) = maybe else { break };
                if snapshot.loading {
                    continue;
                }
                let today = clock.borrow().date_naive();
                let (subset, window) = stats::window_stats(&snapshot.records, today);
                info!(
                    records = snapshot.records.len(),
                    window = subset.len(),
                    value = window.value_sum,
                    cost = window.cost_sum,
                    profit = window.profit_sum,
                    "refreshed"
                );
                if let Some(top) = window.top_groups.first() {
                    info!(vessel = %top.key, value = top.value_sum, "window leader");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                break;
            }
        }
    }

    scheduler.stop();
    Ok(())
}

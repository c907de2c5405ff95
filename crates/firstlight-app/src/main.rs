use anyhow::Context;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use firstlight_core::config::{Settings, load_config};
use firstlight_service::calendar::{HttpFeedFetcher, day_after, evaluate};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_overrides = from_env.is_some();
    let (filter_layer, filter_handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new("info")));

    // stdout carries the JSON outcome
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;
    tracing::debug!(config = ?config, "Configuration loaded");

    if !env_overrides {
        apply_log_level(&config, &filter_handle);
    }

    let target = match std::env::args().nth(1) {
        Some(arg) => parse_target(&arg)?,
        None => day_after(Utc::now(), local_zone(&config)),
    };

    let fetcher = HttpFeedFetcher::new(config.calendar.fetch_timeout())?;
    let outcome = evaluate(&config.calendar, &fetcher, target).await;

    println!("{}", serde_json::to_string(&outcome)?);

    Ok(())
}

fn apply_log_level<S>(config: &Settings, handle: &reload::Handle<EnvFilter, S>) {
    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }
}

/// Zone used to work out "tomorrow". The evaluator reports a bad zone itself.
fn local_zone(config: &Settings) -> Tz {
    config.calendar.timezone().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Computing tomorrow in UTC");
        Tz::UTC
    })
}

fn parse_target(arg: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(arg.trim(), "%Y%m%d")
        .with_context(|| format!("target date '{arg}' is not YYYYMMDD"))
}

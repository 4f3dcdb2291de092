use coinfolio_runtime::{build_state, init_tracing, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);
    // No document store client is linked into the standalone binary, so only
    // the local backend can start here.
    let state = build_state(&config, None).await?;

    let mut summaries = state.portfolio_service.watch_summary();
    tracing::info!("Portfolio: {:?}", *summaries.borrow_and_update());

    loop {
        tokio::select! {
            changed = summaries.changed() => {
                if changed.is_err() {
                    break;
                }
                let summary = summaries.borrow_and_update().clone();
                tracing::info!(
                    total_value = %summary.total_value,
                    total_roi = %summary.total_roi,
                    active = summary.active_count,
                    sold = summary.sold_count,
                    "Portfolio summary updated"
                );
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    state.shutdown();
    Ok(())
}

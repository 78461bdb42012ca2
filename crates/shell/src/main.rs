use std::io;

use anyhow::Context;

use stockroom_shell::{Session, ShellConfig};

fn main() -> anyhow::Result<()> {
    let config = ShellConfig::from_env().context("failed to load shell configuration")?;
    stockroom_observability::init_with(config.log_format);

    let today = config.today();
    if config.today.is_some() {
        tracing::warn!(%today, "STOCKROOM_TODAY set; expiry is measured against a fixed date");
    }
    tracing::info!(%today, "stockroom shell started");

    let mut session = Session::new(today);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session
        .run(stdin.lock(), &mut stdout, &config.prompt)
        .context("shell i/o failed")?;

    tracing::info!(entries = session.catalog().len(), "stockroom shell exiting");
    Ok(())
}

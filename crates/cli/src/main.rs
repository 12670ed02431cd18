use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let config =
        stockpile_cli::AppConfig::from_env().context("invalid stockpile configuration")?;
    stockpile_observability::init(config.log_format);

    tracing::info!("using inventory file {}", config.inventory_path.display());
    stockpile_cli::run_demo(&config)?;
    Ok(())
}

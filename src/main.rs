use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;

use notideck::{
    app::App,
    cli::Cli,
    config::Config,
    fetcher::SampleSource,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = Cli::parse();

    // Load configuration (file-based, with built-in defaults)
    let config = Config::new()?;

    // The bundled sample source stands in for a real paged-notification
    // client; anything implementing NotificationSource plugs in here.
    let source = Arc::new(SampleSource::default());

    let mut app = App::new(config, args.tick_rate, args.frame_rate, source)?;
    app.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}

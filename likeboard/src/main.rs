//! Console entry-point: loads settings, wires adapters and runs the user page.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tokio::io::{BufReader, stdin};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use likeboard::AppSettings;
use likeboard::domain::ports::UserDirectory;
use likeboard::domain::{PipelinePorts, UserPagePipeline};
use likeboard::example_data::seed_user_list;
use likeboard::inbound::cli::run_console;
use likeboard::outbound::{
    HttpUserDirectory, InMemoryUserDirectory, MemoryHistory, TracingPresenter,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("failed to load settings")?;
    init_tracing(settings.json_logs);

    let directory = build_directory(&settings)?;
    let ports = PipelinePorts {
        directory,
        history: Arc::new(MemoryHistory::new(settings.start_path())),
        presenter: Arc::new(TracingPresenter),
    };
    let mut pipeline = UserPagePipeline::new(ports);
    pipeline.start();
    pipeline.settle().await;

    let mut stdout = std::io::stdout();
    run_console(&mut pipeline, BufReader::new(stdin()), &mut stdout)
        .await
        .wrap_err("console session failed")?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn build_directory(settings: &AppSettings) -> Result<Arc<dyn UserDirectory>> {
    match settings.service_url.as_deref() {
        Some(raw) => {
            let base = Url::parse(raw).wrap_err_with(|| format!("invalid service URL {raw:?}"))?;
            info!(service = %base, "using HTTP user directory");
            let directory = HttpUserDirectory::new(base, settings.request_timeout())
                .wrap_err("failed to build HTTP client")?;
            Ok(Arc::new(directory))
        }
        None => {
            let users = seed_user_list(settings).wrap_err("failed to seed example users")?;
            info!(users = users.len(), "using in-memory user directory");
            Ok(Arc::new(InMemoryUserDirectory::new(users)))
        }
    }
}

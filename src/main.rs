//! Binary entry point for the news dashboard.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... news_dashboard --country gb --category technology -o ./dashboard.html
//! ```
//!
//! The initial load always runs. With `--interactive`, every stdin line is a
//! further form submission and the page is rewritten after each one.

use clap::Parser;
use news_dashboard::cli::{Cli, Command, PendingForm, Step};
use news_dashboard::config::DashboardConfig;
use news_dashboard::controller::{FormController, LookupSources};
use news_dashboard::http::HttpClient;
use news_dashboard::news::{NewsApi, NewsService};
use news_dashboard::outputs::page::write_page;
use news_dashboard::render::Renderer;
use news_dashboard::ui::{FormState, Page};
use news_dashboard::utils::ensure_writable_parent;
use std::error::Error;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

const PAGE_TITLE: &str = "News";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_dashboard starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output, interactive = args.interactive, "Parsed CLI arguments");

    let config = DashboardConfig::resolve(&args).await?;
    debug!(?config, "Resolved configuration");

    let api_key = match config.api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            error!(error = %e, "Cannot reach the news API without a key");
            return Err(e);
        }
    };

    // Early check: ensure the page can be written before any request goes out
    if let Err(e) = ensure_writable_parent(&config.output).await {
        error!(
            path = %config.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let http = HttpClient::new(config.request_timeout())?;
    let news = NewsService::new(http.clone(), &config.api_url, api_key, config.key_transport)?;
    info!(?news, "News service ready");

    let form = FormState {
        country: config.default_country.clone(),
        category: config.default_category.clone(),
        search: args.search.clone().unwrap_or_default(),
    };
    let mut controller = FormController::new(
        news,
        http,
        Renderer::new(&config.placeholder_image),
        LookupSources {
            countries: config.countries_source.clone(),
            categories: config.categories_source.clone(),
        },
        Page::new(PAGE_TITLE, form),
    );

    // ---- Initial load ----
    match controller.on_load().await {
        Ok(outcome) => info!(?outcome, "Initial load rendered"),
        Err(e) => warn!(error = %e, "Initial load failed; the page shows the error"),
    }
    write_page(controller.page(), &config.output).await?;

    // ---- Submissions ----
    if args.interactive {
        run_interactive(&mut controller, &config.output).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Treat every stdin line as a form interaction until EOF or `:quit`.
async fn run_interactive<N: NewsApi>(
    controller: &mut FormController<N>,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    info!("Reading submissions from stdin (:country <code>, :category <name>, :quit)");
    let mut segments = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut pending = PendingForm::default();

    while let Some(bytes) = segments.next_segment().await? {
        let command = match Command::from_bytes(&bytes) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Skipping stdin line that is not valid UTF-8");
                continue;
            }
        };
        match pending.step(command) {
            Step::Quit => break,
            Step::Pending => debug!("Selection recorded for the next submission"),
            Step::Submit(submission) => {
                match controller.on_submit(submission).await {
                    Ok(outcome) => info!(?outcome, "Submission rendered"),
                    Err(e) => warn!(error = %e, "Submission failed"),
                }
                write_page(controller.page(), output).await?;
            }
        }
    }
    Ok(())
}

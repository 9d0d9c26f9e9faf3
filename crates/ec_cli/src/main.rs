use clap::{Parser, ValueEnum};
use ec_client::{ClientConfig, HttpExposureApi, DEFAULT_API_URL};
use ec_core::{Error, ExposureApi, Result};
use ec_ui::{render_document, ExposureCheckController, Phase};
use ec_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check whether a blog post shows up in search results for a keyword", long_about = None)]
pub struct Cli {
    /// Base URL of the exposure check service
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Submit one keyword / post URL pair and print the result
    Check {
        #[arg(short, long)]
        keyword: String,
        /// Post URL, e.g. https://blog.naver.com/myblog/223000000000
        #[arg(short, long)]
        blog_url: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the rendered output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the form page
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

fn create_api(api_url: &str) -> Result<Arc<dyn ExposureApi>> {
    let api = HttpExposureApi::new(ClientConfig::parse(api_url)?)?;
    info!("🔌 Using exposure check endpoint {}", api.endpoint());
    Ok(Arc::new(api))
}

fn render(controller: &ExposureCheckController, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(render_document(&controller.view())),
        OutputFormat::Text => Ok(match ec_ui::render::outcome(controller.phase()) {
            Some(node) => node.to_plain_text(),
            None => String::new(),
        }),
        OutputFormat::Json => match controller.phase() {
            Phase::Succeeded(response) => Ok(serde_json::to_string_pretty(response)?),
            Phase::Failed(error) => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "success": false,
                "message": error.to_string(),
            }))?),
            Phase::Idle | Phase::Submitting(_) => Ok(String::new()),
        },
    }
}

async fn run_check(
    api: Arc<dyn ExposureApi>,
    keyword: &str,
    blog_url: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut controller = ExposureCheckController::new(api);
    controller.handle_submit(keyword, blog_url).await;

    let rendered = render(&controller, format)?;
    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            info!("💾 Wrote result to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    match controller.into_phase() {
        Phase::Failed(error) => {
            warn!("Check failed ({:?}): {}", error.kind(), error);
            Err(error)
        }
        _ => Ok(()),
    }
}

/// A failed check has already been rendered as its error panel, so it only
/// turns into a non-zero exit code here.
async fn run(cli: Cli) -> Result<ExitCode> {
    let api = create_api(&cli.api_url)?;

    match cli.command {
        Commands::Check {
            keyword,
            blog_url,
            format,
            output,
        } => match run_check(api, &keyword, &blog_url, format, output).await {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(Error::Validation(_) | Error::Transport { .. } | Error::Application(_)) => {
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        },
        Commands::Serve { bind } => {
            ec_web::serve(bind, AppState { api }).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

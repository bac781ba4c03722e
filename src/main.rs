use anyhow::{Context, Result};
use clap::Parser;
use gitflow::cli::Cli;
use gitflow::config::{Environment, OutputMode, load_config_file, resolve};
use gitflow::constants;
use gitflow::host::{GitHubHost, RepositoryHost};
use gitflow::report::{Logger, Rendered, render, render_config_error};
use gitflow::utils::{get_exit_code_description, install_ctrl_c_handler};
use gitflow::vcs::GitCli;
use gitflow::workflow::Orchestrator;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = run(cli).await?;
    tracing::debug!(exit_code, "{}", get_exit_code_description(exit_code));
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gitflow=debug,gitflow_github=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let environment = Environment::capture().context("Failed to read the current directory")?;
    let action_kind = cli.action_kind();
    let config_path = PathBuf::from(&cli.config);

    // Used only when the configuration itself cannot be resolved
    let fallback_mode = cli
        .output_override()
        .or_else(|| {
            environment
                .var(constants::env::OUTPUT)
                .and_then(|value| value.parse().ok())
        })
        .unwrap_or_default();

    let (action, overrides) = cli.into_request();

    let resolved = load_config_file(&config_path)
        .and_then(|source| resolve(&overrides, &environment, source.as_ref()));

    let config = match resolved {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "configuration rejected");
            let rendered = render_config_error(action_kind, &e, fallback_mode);
            emit(&rendered, fallback_mode);
            return Ok(rendered.exit_code);
        }
    };

    tracing::debug!(?config, "resolved configuration");

    let vcs = GitCli::new();
    let host = match &config.token {
        Some(token) => Some(GitHubHost::new(token).context("Failed to set up the GitHub client")?),
        None => None,
    };

    let cancellation = CancellationToken::new();
    install_ctrl_c_handler(cancellation.clone());

    let logger = match config.output_mode {
        OutputMode::Human => Logger::default(),
        OutputMode::Json => Logger::disabled(),
    };

    let outcome = Orchestrator::new(&vcs, host.as_ref().map(|h| h as &dyn RepositoryHost))
        .with_cancellation(cancellation)
        .with_logger(logger)
        .run(&action, &config)
        .await;

    let rendered = render(&outcome, config.output_mode);
    emit(&rendered, config.output_mode);
    Ok(rendered.exit_code)
}

fn emit(rendered: &Rendered, mode: OutputMode) {
    match mode {
        OutputMode::Json => println!("{}", rendered.text),
        OutputMode::Human if rendered.exit_code == 0 => println!("{}", rendered.text),
        OutputMode::Human => eprintln!("{}", rendered.text),
    }
}

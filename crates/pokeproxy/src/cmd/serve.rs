//! Serve command - Run the proxy
//!
//! Loads configuration, rules and secret, wires the pipeline and serves
//! `/stream` until Ctrl-C or SIGTERM.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use pokeproxy_auth::{Secret, SignatureVerifier};
use pokeproxy_config::{Config, RulesConfig};
use pokeproxy_forwarder::{Dispatcher, ReqwestTransport};
use pokeproxy_metrics::{DestinationMetrics, MetricsReporter};
use pokeproxy_pipeline::Pipeline;
use pokeproxy_routing::{Rule, RuleSet};
use pokeproxy_sources::{HttpSource, HttpSourceConfig};

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.toml";

/// How long in-flight requests get to finish after shutdown is signalled
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Serve command arguments
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Set from the global `--config` flag
    #[arg(skip)]
    pub config: Option<PathBuf>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config_path = args
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(default)".to_string());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        "PokeProxy starting"
    );

    let mut config = load_config(args.config.as_deref())?;
    config
        .apply_env()
        .context("invalid environment override")?;

    if let Err(e) = run_server(config).await {
        error!(error = %e, "server error");
        return Err(e);
    }

    info!("PokeProxy shutdown complete");
    Ok(())
}

/// Load the config file, falling back to defaults when none exists
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            // User explicitly provided config path - must exist
            if !path.exists() {
                return Err(anyhow::anyhow!("config file not found: {}", path.display()));
            }
            Config::from_file(path).context("failed to load configuration")
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                info!(config = %default.display(), "using config file");
                Config::from_file(default).context("failed to load configuration")
            } else {
                info!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }
}

/// Main server run loop
async fn run_server(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let rules = load_rule_set(&config);
    let verifier = load_verifier(&config);

    let transport = ReqwestTransport::new(&config.proxy.upstream)
        .context("failed to build downstream HTTP client")?;
    let dispatcher = Dispatcher::new(Arc::new(transport), config.proxy.upstream.timeout);
    let metrics = Arc::new(DestinationMetrics::new(config.metrics.max_destinations));

    let mut builder = Pipeline::builder(dispatcher, Arc::clone(&metrics))
        .max_body_size(config.proxy.max_body_size);
    if let Some(rules) = rules {
        builder = builder.rules(Arc::new(rules));
    }
    if let Some(verifier) = verifier {
        builder = builder.verifier(verifier);
    }
    let pipeline = Arc::new(builder.build());

    let source = HttpSource::new(HttpSourceConfig::from(&config.server), pipeline);
    let source_cancel = cancel.clone();
    let mut source_task = tokio::spawn(async move { source.run(source_cancel).await });

    let reporter = MetricsReporter::new(Arc::clone(&metrics), config.metrics.clone());
    let reporter_task = tokio::spawn(reporter.run(cancel.clone()));

    info!(
        address = %config.server.bind_address(),
        max_destinations = config.metrics.max_destinations,
        metrics_report = config.metrics.report,
        "PokeProxy running"
    );

    // A source that fails to bind ends the process instead of waiting for a signal
    tokio::select! {
        _ = wait_for_shutdown() => {
            info!("shutdown signal received, stopping server...");
        }
        result = &mut source_task => {
            cancel.cancel();
            reporter_task.abort();
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e).context("HTTP source failed"),
                Err(e) => Err(e).context("HTTP source task panicked"),
            };
        }
    }

    cancel.cancel();

    match tokio::time::timeout(SHUTDOWN_TIMEOUT, source_task).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warn!(error = %e, "HTTP source stopped with error"),
        Ok(Err(e)) => warn!(error = %e, "HTTP source task panicked during shutdown"),
        Err(_) => warn!("HTTP source did not finish within timeout, continuing shutdown"),
    }

    if tokio::time::timeout(SHUTDOWN_TIMEOUT, reporter_task)
        .await
        .is_err()
    {
        warn!("metrics reporter did not stop within timeout");
    }

    Ok(())
}

/// Load and compile routing rules
///
/// A broken rules file does not stop the proxy; `/stream` answers 500
/// until it is fixed and the proxy restarted.
fn load_rule_set(config: &Config) -> Option<RuleSet> {
    let path = config.proxy.rules_file.display().to_string();

    let rules = match config.load_rules() {
        Ok(rules) => rules,
        Err(e) => {
            error!(rules_file = %path, error = %e, "failed to load routing rules");
            return None;
        }
    };

    match build_rule_set(&rules) {
        Ok(rule_set) => {
            info!(rules_file = %path, rule_count = rule_set.len(), "routing rules loaded");
            Some(rule_set)
        }
        Err(e) => {
            error!(rules_file = %path, error = %e, "invalid routing rules");
            None
        }
    }
}

/// Compile the rules file into a rule set
fn build_rule_set(rules: &RulesConfig) -> Result<RuleSet> {
    let mut builder = RuleSet::builder();
    for rule in &rules.rules {
        builder.push(Rule::new(&rule.url, &rule.reason, &rule.conditions));
    }
    Ok(builder.build()?)
}

/// Decode the configured secret
fn load_verifier(config: &Config) -> Option<SignatureVerifier> {
    let Some(encoded) = config.proxy.secret.as_deref() else {
        warn!("no secret configured (set POKEPROXY_SECRET), all requests will be rejected");
        return None;
    };

    match Secret::from_base64(encoded).and_then(|secret| SignatureVerifier::new(&secret)) {
        Ok(verifier) => Some(verifier),
        Err(e) => {
            error!(error = %e, "invalid secret, all requests will be rejected");
            None
        }
    }
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

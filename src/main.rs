// Main entry point for the console bootstrap host
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use console_bootstrap::bootstrap_core::constants::{channels, routes};
use console_bootstrap::bootstrap_core::models::RecoveryChoice;
use console_bootstrap::config::Settings;
use console_bootstrap::engine::{Bootstrap, Collaborators};
use console_bootstrap::gate::transport::spawn_message_reader;
use console_bootstrap::gate::{CommandGate, ConnectRequest, EventBus};
use console_bootstrap::host::{
    init_tracing, HeadlessPage, HttpAuthClient, ScriptedPrompt, SocketController,
};
use console_bootstrap::i18n::bundles::BundleRegistry;
use console_bootstrap::i18n::detector::{DetectorChain, EnvDetector, QueryDetector};
use console_bootstrap::i18n::loader::DirectoryLoader;
use console_bootstrap::store::JsonFileStore;
use console_bootstrap::utils::query::QueryParams;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RecoveryArg {
    /// Download the raw workspace settings
    Export,
    /// Restore default settings and continue
    Restore,
}

impl From<RecoveryArg> for RecoveryChoice {
    fn from(arg: RecoveryArg) -> Self {
        match arg {
            RecoveryArg::Export => RecoveryChoice::Export,
            RecoveryArg::Restore => RecoveryChoice::RestoreDefaults,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to settings YAML file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Persisted workspace configuration (JSON)
    #[arg(long, default_value = "workspace.json")]
    store: PathBuf,

    /// Page query string, e.g. "?log_level=debug&lang=fr"
    #[arg(long, default_value = "")]
    query: String,

    /// Path the page was opened at
    #[arg(long, default_value = routes::ROOT)]
    route: String,

    /// Sign-in server base URL
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Device controller endpoint (host:port)
    #[arg(long, default_value = "127.0.0.1:8000")]
    device: String,

    /// Answers to the corrupted-settings prompt, consumed in order
    #[arg(long, value_enum)]
    recovery: Vec<RecoveryArg>,

    /// Directory that receives settings exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Translation resources, laid out as <dir>/<locale>/<namespace>.json
    #[arg(long, default_value = "locales")]
    resources: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();

    let settings = Arc::new(Settings::load(cli.settings.as_deref())?);
    let log_sink = Arc::new(init_tracing(&settings)?);

    let store = Arc::new(JsonFileStore::open(&cli.store, settings.version.clone())?);
    let query = QueryParams::parse(&cli.query);

    // The gate listens for the whole page lifetime, independent of startup
    let bus = EventBus::new();
    let gate = Arc::new(CommandGate::new(store.clone(), bus.clone(), &settings.gate));
    let (tx, rx) = mpsc::channel(channels::CAPACITY);
    let reader = spawn_message_reader(tokio::io::stdin(), tx);
    let listener = gate.listen(rx);
    let connect_log = tokio::spawn(log_connect_requests(bus.connect.subscribe()));

    let prompt = ScriptedPrompt::new(cli.recovery.iter().copied().map(RecoveryChoice::from));
    let prompt = match &cli.export_dir {
        Some(dir) => prompt.with_export_dir(dir),
        None => prompt,
    };

    let collaborators = Collaborators {
        store,
        log_sink,
        detector: Arc::new(
            DetectorChain::new()
                .with(QueryDetector::new(query.clone()))
                .with(EnvDetector),
        ),
        resources: Arc::new(DirectoryLoader::new(&cli.resources)),
        bundles: Arc::new(BundleRegistry::builtin()),
        auth: Arc::new(HttpAuthClient::new(&cli.server)),
        controller: Arc::new(SocketController::new(cli.device.clone())),
        page: Arc::new(HeadlessPage::new(cli.route.clone())),
        prompt: Arc::new(prompt),
    };

    let report = Bootstrap::new(settings.clone(), collaborators)
        .run(query)
        .await;

    for failure in report.init.failures() {
        warn!(step = %failure.name, outcome = ?failure.outcome, "Startup step failed");
    }
    info!(
        boot_id = %report.boot_id,
        locale = %report.locale,
        authenticated = report.authenticated,
        connected = report.connected,
        recovery = ?report.recovery.path,
        render = ?report.recovery.render,
        elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Startup finished"
    );

    tokio::select! {
        _ = listener => {
            debug!("Message listener stopped");
            // Last sender gone, so the log task drains and exits
            drop(bus);
            let _ = connect_log.await;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            reader.abort();
        }
    }

    Ok(())
}

async fn log_connect_requests(mut rx: broadcast::Receiver<ConnectRequest>) {
    loop {
        match rx.recv().await {
            Ok(request) => info!(payload = %request.0, "Connect requested"),
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "Connect subscriber lagged")
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("PANIC: {} at {}", message, location);
    }));
}

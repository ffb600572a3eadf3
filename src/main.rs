//! Bac Bo Signal Bot
//!
//! Timer-driven monitoring loop: fetch the latest round, update history,
//! match patterns, resolve the bet and notify the chat.

use bacbo_signal_bot::{
    catalog::PatternCatalog,
    client::ResultsClient,
    config::Config,
    engine::{BettingState, EngineEvent, SignalEngine},
    history::HistoryBuffer,
    matcher::{self, MATCH_WINDOW},
    notify::Notifier,
    resolver,
    telegram::{BotCommand, TelegramBot},
};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bacbo-signal-bot")]
#[command(about = "Bac Bo pattern-signal bot for Telegram")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitoring loop
    Run,
    /// Check that the bot can post and delete in the target chat
    CheckPermissions,
    /// Send a test message to the chat
    TestNotify,
    /// Load and validate the pattern catalog, then print it
    ValidatePatterns,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::CheckPermissions => check_permissions(config).await,
        Commands::TestNotify => test_notify(config).await,
        Commands::ValidatePatterns => validate_patterns(config),
    }
}

fn make_notifier(config: &Config) -> Notifier {
    if let Some(tg) = &config.telegram {
        Notifier::new(tg.bot_token.clone(), tg.chat_id.clone())
    } else {
        tracing::warn!("Telegram not configured, notifications disabled");
        Notifier::disabled()
    }
}

struct Bot {
    catalog: PatternCatalog,
    client: ResultsClient,
    notifier: Notifier,
    history: HistoryBuffer,
    history_path: String,
    state: BettingState,
    engine: SignalEngine,
    /// Last event id committed to history, for fetch dedup.
    cursor: Option<String>,
    cmd_rx: mpsc::Receiver<BotCommand>,
    notify_monitoring: bool,
    notify_errors: bool,
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Bac Bo signal bot");

    // Catalog errors are the only fatal startup path besides config itself.
    let catalog = PatternCatalog::load(&config.patterns.path)?;
    let client = ResultsClient::new(&config.api)?;
    let notifier = make_notifier(&config);

    let history = HistoryBuffer::load(&config.history.path, config.history.capacity);
    tracing::info!("Resuming with {} rounds of history", history.len());
    let cursor = history.latest_id().map(str::to_string);

    let (cmd_tx, cmd_rx) = mpsc::channel::<BotCommand>(100);

    if let Some(tg) = &config.telegram {
        let telegram_bot = Arc::new(TelegramBot::new(
            tg.bot_token.clone(),
            tg.chat_id.clone(),
            cmd_tx,
        ));
        tokio::spawn(async move {
            telegram_bot.start_polling().await;
        });
        tracing::info!("Telegram command listener started");
    }

    let mut bot = Bot {
        catalog,
        client,
        notifier,
        history,
        history_path: config.history.path.clone(),
        state: BettingState::default(),
        engine: SignalEngine::new(config.signal.max_round_age_secs),
        cursor,
        cmd_rx,
        notify_monitoring: config
            .telegram
            .as_ref()
            .map(|tg| tg.notify_monitoring)
            .unwrap_or(false),
        notify_errors: config
            .telegram
            .as_ref()
            .map(|tg| tg.notify_errors)
            .unwrap_or(false),
    };

    let mut interval = tokio::time::interval(Duration::from_secs(config.api.poll_interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping");
                break;
            }
            _ = interval.tick() => {
                bot.cycle().await;
            }
        }
    }

    Ok(())
}

impl Bot {
    /// One fetch-match-resolve-notify cycle. Nothing in here may kill the
    /// loop; every failure degrades to a log line and a skipped cycle.
    async fn cycle(&mut self) {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            self.handle_command(cmd).await;
        }

        let Some(event) = self.client.fetch_latest(self.cursor.as_deref()).await else {
            return;
        };

        if !self.history.append(event.clone()) {
            // Duplicate id slipped past the cursor; no cycle side effects.
            return;
        }

        if let Err(e) = self.history.save(&self.history_path) {
            tracing::error!("Failed to save history: {}", e);
            if self.notify_errors {
                let _ = self.notifier.error("History save failed", &e.to_string()).await;
            }
        }

        // The event is committed; only now does the cursor advance.
        self.cursor = Some(event.id.clone());

        let tail = self.history.tail_symbols(MATCH_WINDOW);
        let matched = matcher::find_match(&self.catalog, &tail).and_then(|pattern| {
            match resolver::resolve(pattern) {
                Ok(bet) => Some((pattern, bet)),
                Err(e) => {
                    tracing::warn!("Skipping signal: {}", e);
                    None
                }
            }
        });

        let events = self
            .engine
            .process_round(&mut self.state, &event, matched, chrono::Utc::now());

        self.dispatch(events).await;
    }

    async fn dispatch(&mut self, events: Vec<EngineEvent>) {
        for event in events {
            match event {
                EngineEvent::SignalDispatched { pattern_id, bet } => {
                    // Replace a stale pending message; failures never block
                    // the fresh signal.
                    if let Some(prev) = self.state.last_message_id.take() {
                        if let Err(e) = self.notifier.delete(prev).await {
                            tracing::warn!("Failed to delete message {}: {}", prev, e);
                        }
                    }
                    match self.notifier.signal(pattern_id, bet).await {
                        Ok(id) => {
                            tracing::info!("Signal sent: pattern {} -> {}", pattern_id, bet);
                            self.state.last_message_id = id;
                        }
                        Err(e) => tracing::error!("Failed to send signal: {}", e),
                    }
                }
                EngineEvent::SignalSuppressed { .. } => {
                    // Already logged by the engine; treated as idle.
                }
                EngineEvent::BetWon { streak } => {
                    if let Err(e) = self.notifier.win(streak).await {
                        tracing::error!("Failed to send win notice: {}", e);
                    }
                }
                EngineEvent::GaleEntered => {
                    if let Err(e) = self.notifier.gale().await {
                        tracing::error!("Failed to send gale notice: {}", e);
                    }
                }
                EngineEvent::BetLost => {
                    if let Err(e) = self.notifier.loss().await {
                        tracing::error!("Failed to send loss notice: {}", e);
                    }
                }
                EngineEvent::Monitoring => {
                    if !self.notify_monitoring {
                        continue;
                    }
                    match self.notifier.monitoring().await {
                        Ok(id) => self.state.last_message_id = id,
                        Err(e) => tracing::error!("Failed to send monitoring notice: {}", e),
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, cmd: BotCommand) {
        match cmd {
            BotCommand::Status => {
                let text = format!(
                    "📊 <b>Status</b>\n\
                    Phase: {:?}\n\
                    Streak: {}\n\
                    History: {} rounds",
                    self.state.phase(),
                    self.state.streak,
                    self.history.len()
                );
                if let Err(e) = self.notifier.send(&text).await {
                    tracing::error!("Failed to send status: {}", e);
                }
            }
            BotCommand::CheckPermissions => {
                let text = match self.notifier.check_permissions().await {
                    Ok(report) => report,
                    Err(e) => format!("Permission check failed: {}", e),
                };
                if let Err(e) = self.notifier.send(&text).await {
                    tracing::error!("Failed to send permission report: {}", e);
                }
            }
        }
    }
}

async fn check_permissions(config: Config) -> anyhow::Result<()> {
    let notifier = make_notifier(&config);
    let report = notifier.check_permissions().await?;
    println!("{}", report);
    let _ = notifier.send(&report).await;
    Ok(())
}

async fn test_notify(config: Config) -> anyhow::Result<()> {
    let tg = config
        .telegram
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Telegram not configured in config.toml"))?;

    let notifier = Notifier::new(tg.bot_token.clone(), tg.chat_id.clone());
    notifier
        .send("🧪 <b>Test Notification</b>\n\nIf you see this, Telegram integration is working!")
        .await?;

    println!("✅ Test notification sent!");
    Ok(())
}

fn validate_patterns(config: Config) -> anyhow::Result<()> {
    let catalog = PatternCatalog::load(&config.patterns.path)?;

    println!("✅ {} patterns loaded from {}\n", catalog.len(), config.patterns.path);
    for pattern in catalog.patterns() {
        let sequence: String = pattern.sequence.iter().map(|o| o.emoji()).collect();
        println!("{:>3}  {:<12} {:?}", pattern.id, sequence, pattern.action);
    }

    Ok(())
}

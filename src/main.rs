mod activity;
mod cache;
mod config;
mod delivery;
mod names;
mod runner;
mod schedule;
mod store;

use chrono::{Datelike, Local, Weekday};
use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::activity::{ActivityLog, ActivitySink, NoopActivity};
use crate::cache::YamlFileStorage;
use crate::config::Config;
use crate::delivery::{ConsoleNotifier, Notifier, SmtpNotifier};
use crate::runner::Runner;
use crate::store::client::HttpSource;
use crate::store::CachedStore;

type LiveStore = CachedStore<HttpSource, YamlFileStorage>;

#[derive(Parser, Debug)]
#[command(name = "animale")]
#[command(about = "Trade randomly generated animal nicknames by text message")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/animale/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Play today's scheduled games (the default)
  Run {
    /// Use this weekday's schedule instead of today's (e.g. "fri")
    #[arg(long, value_parser = schedule::parse_weekday)]
    weekday: Option<Weekday>,

    /// Print batches instead of sending them, and skip the activity log
    #[arg(long)]
    dry_run: bool,
  },
  /// Print a batch of nicknames from one player's words without sending it
  Preview {
    player: String,

    /// Number of nicknames (default: nicknames_per_batch from the config)
    #[arg(short = 'n', long)]
    count: Option<usize>,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = Config::load(args.config.as_deref())?;
  let _guard = init_logging(&config)?;

  let store = CachedStore::new(&config)?;

  match args.command.unwrap_or(Command::Run {
    weekday: None,
    dry_run: false,
  }) {
    Command::Run { weekday, dry_run } => {
      let day = weekday.unwrap_or_else(|| Local::now().weekday());
      if dry_run {
        play(&config, &store, &ConsoleNotifier, &NoopActivity, day).await
      } else {
        let notifier = SmtpNotifier::new(config.smtp.clone(), Config::get_smtp_password()?);
        let activity = ActivityLog::new(config.log_dir());
        play(&config, &store, &notifier, &activity, day).await
      }
    }
    Command::Preview { player, count } => preview(&config, &store, &player, count).await,
  }
}

async fn play<N: Notifier, A: ActivitySink>(
  config: &Config,
  store: &LiveStore,
  notifier: &N,
  activity: &A,
  day: Weekday,
) -> Result<()> {
  let mut runner = Runner::new(config, store, notifier, activity, StdRng::from_entropy());
  let summary = runner.run_today(day).await?;
  for delivery in &summary.deliveries {
    tracing::debug!(
      to = %delivery.recipient,
      from = %delivery.author,
      address = %delivery.address,
      nicknames = %delivery.nicknames.join("; "),
      "sent batch"
    );
  }
  tracing::info!(
    iterations = summary.iterations,
    deliveries = summary.deliveries.len(),
    "run complete"
  );
  Ok(())
}

async fn preview(
  config: &Config,
  store: &LiveStore,
  player: &str,
  count: Option<usize>,
) -> Result<()> {
  let player = config
    .player(player)
    .ok_or_else(|| eyre!("Unknown player '{}'", player))?;

  let animals = store.animals(&config.animals).await?;
  let words = store.words(&player.words).await?;
  let count = count.unwrap_or(config.nicknames_per_batch);

  let nicknames = names::batch(animals.as_slice(), &words, count, &mut StdRng::from_entropy())
    .ok_or_else(|| eyre!("No words to build nicknames from"))?;
  for nickname in nicknames {
    println!("{}", nickname);
  }
  Ok(())
}

fn init_logging(config: &Config) -> Result<WorkerGuard> {
  let log_dir = config.log_dir();
  std::fs::create_dir_all(&log_dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", log_dir.display(), e))?;

  let (file_writer, guard) =
    tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "animale.log"));

  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  let stderr_layer = tracing_subscriber::fmt::layer()
    .with_target(false)
    .compact()
    .with_writer(std::io::stderr);

  let file_layer = tracing_subscriber::fmt::layer()
    .with_target(true)
    .with_ansi(false)
    .compact()
    .with_writer(file_writer);

  tracing_subscriber::registry()
    .with(env_filter)
    .with(stderr_layer)
    .with(file_layer)
    .init();

  Ok(guard)
}

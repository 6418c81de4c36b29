//! Daily game runs: pairing players and trading nickname batches.

use chrono::{Local, NaiveDateTime, Weekday};
use tracing::info;

use crate::activity::{ActivityError, ActivitySink};
use crate::cache::CacheStorage;
use crate::config::{Config, PlayerConfig};
use crate::delivery::{DeliveryError, Notifier};
use crate::names::{self, RandomSource};
use crate::store::client::RemoteSource;
use crate::store::types::{AnimalList, WordBook};
use crate::store::{CachedStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error("need at least two players to make a pair, {0} configured")]
  InsufficientPlayers(usize),

  #[error(transparent)]
  Store(#[from] StoreError),

  #[error("no nicknames could be built from {player}'s words")]
  EmptyBatch { player: String },

  #[error("delivery to {player} failed: {source}")]
  Delivery {
    player: String,
    #[source]
    source: DeliveryError,
  },

  #[error(transparent)]
  Activity(#[from] ActivityError),
}

/// One batch handed to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
  /// Player receiving the batch
  pub recipient: String,
  /// Player whose words produced it
  pub author: String,
  pub address: String,
  pub nicknames: Vec<String>,
}

/// What a run did.
#[derive(Debug, Default)]
pub struct RunSummary {
  pub iterations: u32,
  pub deliveries: Vec<Delivery>,
}

/// Runs the game against a store, a notifier and an activity sink.
pub struct Runner<'a, R: RemoteSource, S: CacheStorage, N: Notifier, A: ActivitySink, G: RandomSource> {
  config: &'a Config,
  store: &'a CachedStore<R, S>,
  notifier: &'a N,
  activity: &'a A,
  rng: G,
}

impl<'a, R, S, N, A, G> Runner<'a, R, S, N, A, G>
where
  R: RemoteSource,
  S: CacheStorage,
  N: Notifier,
  A: ActivitySink,
  G: RandomSource,
{
  pub fn new(
    config: &'a Config,
    store: &'a CachedStore<R, S>,
    notifier: &'a N,
    activity: &'a A,
    rng: G,
  ) -> Self {
    Self {
      config,
      store,
      notifier,
      activity,
      rng,
    }
  }

  /// Run however many iterations the schedule allots to `day`.
  ///
  /// The first failing iteration aborts the run; batches already sent by
  /// earlier iterations stay sent.
  pub async fn run_today(&mut self, day: Weekday) -> Result<RunSummary, RunError> {
    let runs = self.config.schedule.runs_on(day);
    info!(?day, runs, "starting run");

    let mut summary = RunSummary::default();
    if runs == 0 {
      return Ok(summary);
    }
    if self.config.players.len() < 2 {
      return Err(RunError::InsufficientPlayers(self.config.players.len()));
    }

    for iteration in 1..=runs {
      info!(iteration, runs, "starting iteration");
      let deliveries = self.run_iteration().await?;
      summary.deliveries.extend(deliveries);
      summary.iterations += 1;
    }

    Ok(summary)
  }

  async fn run_iteration(&mut self) -> Result<Vec<Delivery>, RunError> {
    let animals = self.store.animals(&self.config.animals).await?;
    let (first, second) = self.pick_pair();
    info!(first = %first.name, second = %second.name, "paired players");

    // Both batches are built before anything goes out
    let first_words = self.store.words(&first.words).await?;
    let second_words = self.store.words(&second.words).await?;

    let count = self.config.nicknames_per_batch;
    let first_batch = build_batch(&animals, &first_words, count, &mut self.rng, &first.name)?;
    let second_batch = build_batch(&animals, &second_words, count, &mut self.rng, &second.name)?;

    let mut deliveries = Vec::with_capacity(2);
    for (author, nicknames, opponent) in [
      (first, first_batch, second),
      (second, second_batch, first),
    ] {
      self.activity.record(now(), &opponent.name, &nicknames)?;
      self
        .notifier
        .send(&opponent.address, &nicknames.join("\n"))
        .await
        .map_err(|source| RunError::Delivery {
          player: opponent.name.clone(),
          source,
        })?;

      deliveries.push(Delivery {
        recipient: opponent.name.clone(),
        author: author.name.clone(),
        address: opponent.address.clone(),
        nicknames,
      });
    }

    Ok(deliveries)
  }

  /// Two distinct players, drawn without replacement.
  fn pick_pair(&mut self) -> (&'a PlayerConfig, &'a PlayerConfig) {
    let config: &'a Config = self.config;
    let players = &config.players;
    let first = self.rng.pick(players.len());
    let mut second = self.rng.pick(players.len() - 1);
    if second >= first {
      second += 1;
    }
    (&players[first], &players[second])
  }
}

/// A non-empty batch from `author`'s words, or an error instead of a blank message.
fn build_batch(
  animals: &AnimalList,
  words: &WordBook,
  count: usize,
  rng: &mut impl RandomSource,
  author: &str,
) -> Result<Vec<String>, RunError> {
  names::batch(animals.as_slice(), words, count, rng)
    .filter(|nicknames| !nicknames.is_empty())
    .ok_or_else(|| RunError::EmptyBatch {
      player: author.to_string(),
    })
}

fn now() -> NaiveDateTime {
  Local::now().naive_local()
}

use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use eights::{
    EngineConfig, GameEngine, GameEvent, GameOutcome, HoldWildStrategy, LineController, NaiveStrategy, Player,
    RandomStrategy, RuleSet, ScoringMode,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    /// Twos make the next player draw two, nothing else is special.
    Minimal,
    /// Eights wild, twos draw two, jacks skip, aces reverse.
    Classic,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scoring {
    Positive,
    Negative,
}

impl From<Scoring> for ScoringMode {
    fn from(scoring: Scoring) -> Self {
        match scoring {
            Scoring::Positive => ScoringMode::Positive,
            Scoring::Negative => ScoringMode::Negative,
        }
    }
}

#[derive(Parser)]
#[command(name = "eights", about = "Play an eights-family card game in the terminal")]
struct Cli {
    /// Number of players
    #[arg(short, long, default_value = "3", env = "EIGHTS_PLAYERS")]
    players: usize,

    /// Physical decks shuffled together
    #[arg(short, long, default_value = "1")]
    decks: usize,

    /// Built-in rule variant (ignored with --rules)
    #[arg(long, value_enum, default_value = "classic")]
    variant: Variant,

    /// Add two jokers per deck
    #[arg(long)]
    wildcard: bool,

    /// How leftover cards are scored
    #[arg(long, value_enum, default_value = "negative")]
    scoring: Scoring,

    /// Path to a TOML rule file
    #[arg(long, env = "EIGHTS_RULES")]
    rules: Option<PathBuf>,

    /// Take seat 0 yourself; otherwise every seat is automated
    #[arg(long)]
    human: bool,

    /// Shuffle seed (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// Automated players move without thinking pauses
    #[arg(long)]
    fast: bool,
}

impl Cli {
    fn rule_set(&self) -> Result<RuleSet, eights::RuleSetError> {
        if let Some(path) = &self.rules {
            return RuleSet::load(path);
        }
        match self.variant {
            Variant::Minimal => RuleSet::minimal(self.players, self.decks, self.scoring.into(), self.wildcard),
            Variant::Classic => RuleSet::builder(self.players)
                .deck_count(self.decks)
                .scoring(self.scoring.into())
                .wildcard(self.wildcard)
                .classic_effects()
                .build(),
        }
    }
}

fn seat_players(count: usize, human: bool, seed: u64) -> Vec<Player> {
    (0..count)
        .map(|i| match i {
            0 if human => Player::human("You"),
            i if i % 3 == 1 => Player::automated(format!("Bot {i}"), NaiveStrategy),
            i if i % 3 == 2 => Player::automated(format!("Bot {i}"), HoldWildStrategy),
            i => Player::automated(format!("Bot {i}"), RandomStrategy::new(seed.wrapping_add(i as u64))),
        })
        .collect()
}

/// `RUST_LOG` directives when they parse, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let rules = cli.rule_set()?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut config = EngineConfig::new(seed);
    if cli.fast {
        config = config.without_delay();
    }

    let players = seat_players(rules.player_count(), cli.human, seed);
    let names: Vec<String> = players.iter().map(|p| p.name().to_string()).collect();
    tracing::info!(seed, players = names.len(), "starting game");

    let mut engine = GameEngine::new(rules, players, config)?
        .with_controller(LineController::new(BufReader::new(io::stdin()), io::stdout()));

    engine.subscribe(move |event: &GameEvent| match event {
        GameEvent::TurnStarted { .. } | GameEvent::HandShown { .. } => {}
        GameEvent::GameOver { scores, .. } => {
            println!("{event}");
            for (seat, points) in scores.iter() {
                println!("  {:<8} {points:>5}", names[seat.index()]);
            }
        }
        other => println!("{other}"),
    });

    match engine.run()? {
        GameOutcome::Won { turns, .. } => tracing::info!(turns, "finished"),
        GameOutcome::Cancelled { turn } => tracing::info!(turn, "cancelled"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_keeps_requested_level() {
        assert_eq!(log_filter(Some("debug".into())).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("eights=trace".into())).max_level_hint(), Some(LevelFilter::TRACE));
    }
}

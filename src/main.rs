//! Command-line front end for the universal leaderboard
//!
//! Every command loads the collection from the configured data file,
//! applies one operation and exits. Logs go to stderr so that `export`
//! output can be piped.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use universal_leaderboard::config::{AppConfig, MergePolicy};
use universal_leaderboard::games::names::NameHistory;
use universal_leaderboard::games::{memory_score, snake_score, snake_tick_interval, MemoryDifficulty};
use universal_leaderboard::leaderboard::{LeaderboardManager, NewLeaderboard, ScoreUpdate};
use universal_leaderboard::ranking::{high_score, rank_players, share_text};
use universal_leaderboard::stats::{relative_time, History, StatsReport};
use universal_leaderboard::storage::{FileStore, KeyValueStore, LeaderboardRepository};
use universal_leaderboard::utils::current_millis;
use universal_leaderboard::{GameResultRecorder, Leaderboard, ResultOutcome, ScoreMode, SortOrder};

/// Universal Leaderboard - local scoreboards and mini-game high scores
#[derive(Parser)]
#[command(
    name = "universal-leaderboard",
    version,
    about = "Keep local leaderboards and record mini-game results",
    long_about = "Universal Leaderboard stores user-defined scoreboards in a local JSON file, \
                 ranks and shares them, and records results from the bundled Snake, Memory, \
                 Tic-Tac-Toe, Connect Four and Battleship games into per-game leaderboards."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data file override
    #[arg(long, global = true, value_name = "FILE", help = "Override the JSON data file")]
    data_file: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Merge policy override
    #[arg(long, global = true, value_name = "POLICY", help = "merge_if_higher or always_append")]
    merge_policy: Option<MergePolicy>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new leaderboard
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// win_count or total_points
        #[arg(long, default_value = "win_count")]
        mode: ScoreMode,
        /// highest or lowest
        #[arg(long, default_value = "highest")]
        order: SortOrder,
    },
    /// List all leaderboards
    List,
    /// Show a leaderboard in ranked order
    Show { id: String },
    /// Change a leaderboard's name or description
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// An empty string clears the description
        #[arg(long)]
        description: Option<String>,
    },
    /// Add a player with score 0
    AddPlayer {
        id: String,
        name: String,
        #[arg(long, default_value = "")]
        avatar: String,
    },
    /// Rename a player or change its avatar
    EditPlayer {
        id: String,
        player_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Remove a player
    RemovePlayer { id: String, player_id: String },
    /// Set, add to or subtract from a player's score
    Score {
        id: String,
        player_id: String,
        /// set, add or subtract
        mode: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Add or remove wins on a win_count leaderboard
    Win {
        id: String,
        player_id: String,
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        delta: i64,
    },
    /// Reset every score on a leaderboard to zero
    Reset { id: String },
    /// Permanently delete a leaderboard
    Delete { id: String },
    /// Record a game result on the game's leaderboard
    Record {
        /// snake, memory, tictactoe, connectfour, battleship or any other id
        game: String,
        name: String,
        score: u64,
    },
    /// Print the full collection as JSON
    Export {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace the collection with a previously exported JSON file
    Import { file: PathBuf },
    /// Print the share text for a leaderboard
    Share { id: String },
    /// Aggregate statistics across all leaderboards
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Leaderboards by most recent activity
    History,
    /// Recently used player names
    Names,
    /// Compute a game score without saving it
    Formula {
        #[command(subcommand)]
        game: FormulaCommand,
    },
    /// Delete every leaderboard
    Clear {
        #[arg(long, help = "Confirm deleting all data")]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum FormulaCommand {
    /// Memory score from pairs, moves and time
    Memory {
        #[arg(long, default_value = "easy")]
        difficulty: MemoryDifficulty,
        #[arg(long)]
        moves: u32,
        #[arg(long)]
        seconds: f64,
    },
    /// Snake score and speed for a level
    Snake {
        #[arg(long, default_value_t = 1)]
        level: u8,
        #[arg(long, default_value_t = 0)]
        food: u64,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &cli.log_level {
        config.service.log_level = log_level.clone();
    }

    if cli.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_file) = &cli.data_file {
        config.storage.data_file = data_file.clone();
    }

    if let Some(policy) = cli.merge_policy {
        config.games.merge_policy = policy;
    }

    universal_leaderboard::config::validate_config(&config)?;
    Ok(config)
}

/// Store, manager and game recorder sharing one data file
struct App {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    manager: LeaderboardManager,
    recorder: GameResultRecorder,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.data_file));
        let repository =
            LeaderboardRepository::new(store.clone(), config.storage.leaderboards_key.clone());
        let manager = LeaderboardManager::new(repository.clone());
        let recorder = GameResultRecorder::new(repository, config.games.clone());

        Self {
            config,
            store,
            manager,
            recorder,
        }
    }

    fn name_history(&self) -> NameHistory {
        NameHistory::new(
            self.store.clone(),
            self.config.storage.player_names_key.clone(),
            self.config.games.recent_names_limit,
        )
    }

    fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Create {
                name,
                description,
                mode,
                order,
            } => {
                let mut request = NewLeaderboard::new(name)
                    .with_score_mode(mode)
                    .with_sort_order(order);
                if let Some(description) = description {
                    request = request.with_description(description);
                }
                let lb = self.manager.create(request)?;
                println!("✅ Created {} ({})", lb.name, lb.id);
            }
            Commands::List => {
                let leaderboards = self.manager.list();
                if leaderboards.is_empty() {
                    println!("No leaderboards yet");
                }
                for lb in &leaderboards {
                    println!(
                        "{}  {}  [{} / {}]  {} players, best {}",
                        lb.id,
                        lb.name,
                        lb.score_mode,
                        lb.sort_order,
                        lb.players.len(),
                        high_score(lb)
                    );
                }
            }
            Commands::Show { id } => {
                let lb = self.manager.get(&id)?;
                print_leaderboard(&lb);
            }
            Commands::Edit {
                id,
                name,
                description,
            } => {
                let lb = self
                    .manager
                    .update_details(&id, name.as_deref(), description.as_deref())?;
                println!("✅ Updated {}", lb.name);
            }
            Commands::AddPlayer { id, name, avatar } => {
                let (_, player) = self.manager.add_player(&id, &name, &avatar)?;
                println!("✅ Added {} {} ({})", player.avatar, player.name, player.id);
            }
            Commands::EditPlayer {
                id,
                player_id,
                name,
                avatar,
            } => {
                let lb = self.manager.get(&id)?;
                let current = lb
                    .player(&player_id)
                    .ok_or_else(|| universal_leaderboard::LeaderboardError::PlayerNotFound {
                        player_id: player_id.clone(),
                    })?;
                let name = name.unwrap_or_else(|| current.name.clone());
                let avatar = avatar.unwrap_or_else(|| current.avatar.clone());
                self.manager.edit_player(&id, &player_id, &name, &avatar)?;
                println!("✅ Updated {} {}", avatar, name);
            }
            Commands::RemovePlayer { id, player_id } => {
                self.manager.remove_player(&id, &player_id)?;
                println!("✅ Removed player {}", player_id);
            }
            Commands::Score {
                id,
                player_id,
                mode,
                value,
            } => {
                let update = ScoreUpdate::parse(&mode, &value)?;
                let player = self.manager.update_score(&id, &player_id, update)?;
                println!("✅ {} now has {}", player.name, player.score);
            }
            Commands::Win {
                id,
                player_id,
                delta,
            } => {
                let player = self.manager.increment_wins(&id, &player_id, delta)?;
                println!("✅ {} now has {} wins", player.name, player.score);
            }
            Commands::Reset { id } => {
                let lb = self.manager.reset_scores(&id)?;
                println!("✅ Reset {} scores on {}", lb.players.len(), lb.name);
            }
            Commands::Delete { id } => {
                self.manager.delete(&id)?;
                println!("✅ Deleted {}", id);
            }
            Commands::Record { game, name, score } => {
                let outcome = self.recorder.add_result(&game, &name, score)?;
                self.name_history().remember(&name)?;
                match outcome {
                    ResultOutcome::Inserted { player } => {
                        println!("✅ {} entered with {}", player.name, player.score)
                    }
                    ResultOutcome::Improved { player, previous } => {
                        println!("✅ {} improved {} → {}", player.name, previous, player.score)
                    }
                    ResultOutcome::Unchanged { existing } => println!(
                        "ℹ️  {} keeps {} (not beaten by {})",
                        existing.name, existing.score, score
                    ),
                    ResultOutcome::Evicted { score } => {
                        println!("ℹ️  {} did not make the top list", score)
                    }
                }
            }
            Commands::Export { output } => {
                let json = self.manager.repository().export_json()?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, json)
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        println!("✅ Exported to {}", path.display());
                    }
                    None => println!("{}", json),
                }
            }
            Commands::Import { file } => {
                let json = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let count = self.manager.repository().import_json(&json)?;
                println!("✅ Imported {} leaderboards", count);
            }
            Commands::Share { id } => {
                let lb = self.manager.get(&id)?;
                println!("{}", share_text(&lb, &self.config.share.base_url));
            }
            Commands::Stats { json } => {
                let report = StatsReport::build(&self.manager.list());
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    print_stats(&report);
                }
            }
            Commands::History => {
                let now = current_millis();
                let history = History::build(&self.manager.list(), now);
                println!(
                    "📅 {} updated this week, {} this month",
                    history.last_7_days, history.last_30_days
                );
                for lb in &history.recent {
                    println!("  {}  {}", lb.name, relative_time(lb.updated_at, now));
                }
            }
            Commands::Names => {
                for name in self.name_history().load() {
                    println!("{}", name);
                }
            }
            Commands::Formula { game } => print_formula(game),
            Commands::Clear { yes } => {
                if !yes {
                    anyhow::bail!("Refusing to delete all data without --yes");
                }
                let count = self.manager.clear_all()?;
                println!("✅ Deleted {} leaderboards", count);
            }
        }
        Ok(())
    }
}

fn print_leaderboard(lb: &Leaderboard) {
    println!("🏆 {}", lb.name);
    if let Some(description) = &lb.description {
        println!("   {}", description);
    }
    println!("   {} / {}", lb.score_mode, lb.sort_order);
    for ranked in rank_players(lb) {
        println!(
            "{:>3}. {} {}: {}  ({})",
            ranked.rank, ranked.player.avatar, ranked.player.name, ranked.player.score, ranked.player.id
        );
    }
}

fn print_stats(report: &StatsReport) {
    println!(
        "📊 {} leaderboards, {} players, {} total score",
        report.totals.leaderboards, report.totals.players, report.totals.score
    );
    println!(
        "   {} win count, {} total points",
        report.modes.win_count, report.modes.total_points
    );

    println!("Top players:");
    for (i, player) in report.top_players.iter().enumerate() {
        println!(
            "{:>3}. {} {}: {} across {} boards",
            i + 1,
            player.avatar,
            player.name,
            player.total_score,
            player.boards
        );
    }

    println!("Most active:");
    for board in &report.most_active {
        let leader = board
            .leader
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("-");
        println!(
            "   {}: {} points, {} players, leader {}",
            board.name, board.total_score, board.player_count, leader
        );
    }
}

fn print_formula(game: FormulaCommand) {
    match game {
        FormulaCommand::Memory {
            difficulty,
            moves,
            seconds,
        } => {
            let score = memory_score(
                difficulty.pairs(),
                moves,
                seconds,
                difficulty.level_multiplier(),
            );
            println!(
                "🧠 {} ({} pairs) in {} moves and {}s: {}",
                difficulty.label(),
                difficulty.pairs(),
                moves,
                seconds,
                score
            );
        }
        FormulaCommand::Snake { level, food } => {
            println!(
                "🐍 level {}: {} points for {} food, tick every {}ms",
                level,
                snake_score(level, food),
                food,
                snake_tick_interval(level).as_millis()
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} {} using {}",
        config.service.name,
        universal_leaderboard::VERSION,
        config.storage.data_file.display()
    );
    debug!("Merge policy: {}", config.games.merge_policy);

    let app = App::new(config);
    app.run(cli.command)
}

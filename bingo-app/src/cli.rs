use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bingo_core::{WordPool, codec};
use bingo_types::{BingoError, Card, GameDraft, VictoryType, Win};
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing::info;

use crate::config::Config;
use crate::library::BingoLibrary;
use crate::session::GameSession;

#[derive(Parser)]
#[command(author, version, about = "Create, play and share custom bingo games", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a game from a word list
    Create {
        title: String,

        /// Board size, 3 to 5
        #[arg(long, default_value_t = bingo_types::DEFAULT_SIZE)]
        size: usize,

        /// Do not put a free cell in the center
        #[arg(long)]
        no_free_center: bool,

        /// Victory types (line, column, diagonal, full); all when omitted
        #[arg(long, value_delimiter = ',')]
        victory: Vec<String>,

        /// File with one word or phrase per line
        #[arg(long)]
        words_file: Option<PathBuf>,

        /// A word or phrase, may be repeated
        #[arg(long = "word")]
        words: Vec<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        emoji: Option<String>,
    },
    /// List every game, newest first
    List,
    /// Show the current (or given) card of a game
    Show {
        game_id: String,
        #[arg(long)]
        card: Option<String>,
    },
    /// Toggle a cell on a card
    Mark {
        game_id: String,
        row: usize,
        col: usize,
        #[arg(long)]
        card: Option<String>,
    },
    /// Deal a new card and make it current
    NewCard { game_id: String },
    /// Delete a game and all of its cards
    Delete { game_id: String },
    /// Export one game to the export directory
    Export { game_id: String },
    /// Export every game to one file
    ExportAll,
    /// Export a card with its marks
    ExportCard {
        game_id: String,
        #[arg(long)]
        card: Option<String>,
    },
    /// Import a single game
    Import { path: PathBuf },
    /// Import every game in a file
    ImportAll { path: PathBuf },
    /// Import a card and its game
    ImportCard { path: PathBuf },
    /// List games in progress
    Resume,
}

pub async fn run<R: Rng + ?Sized>(
    cli: Cli,
    config: &Config,
    library: &BingoLibrary,
    rng: &mut R,
) -> anyhow::Result<()> {
    match cli.command {
        Commands::Create {
            title,
            size,
            no_free_center,
            victory,
            words_file,
            words,
            color,
            emoji,
        } => {
            let mut pool = WordPool::from_words(words);
            if let Some(path) = words_file {
                let text = read_file(&path).await?;
                pool.add_lines(&text);
            }

            let mut draft = GameDraft {
                title,
                size,
                free_center: !no_free_center,
                words: pool.into_words(),
                ..GameDraft::default()
            };
            if !victory.is_empty() {
                draft.victory_types = parse_victory_types(&victory)?;
            }
            if let Some(color) = color {
                draft.color = color;
            }
            if let Some(emoji) = emoji {
                draft.emoji = emoji;
            }

            let game = library.create_game(draft, rng).await?;
            println!("Created {} {} ({})", game.emoji, game.title, game.id);
        }
        Commands::List => {
            let games = library.games().await?;
            if games.is_empty() {
                println!("No games yet");
            }
            for game in games {
                println!(
                    "{}  {} {}  {}x{}, {} words",
                    game.id,
                    game.emoji,
                    game.title,
                    game.size,
                    game.size,
                    game.words.len()
                );
            }
        }
        Commands::Show { game_id, card } => {
            let session = GameSession::open(library, &game_id, card.as_deref(), rng).await?;
            print_session(&session);
        }
        Commands::Mark {
            game_id,
            row,
            col,
            card,
        } => {
            let mut session = GameSession::open(library, &game_id, card.as_deref(), rng).await?;
            let outcome = session.toggle(row, col).await?;
            if outcome.marked.is_none() {
                println!("Cell ({}, {}) cannot be toggled", row, col);
            }
            print_session(&session);
            for win in &outcome.new_wins {
                println!("BINGO! {}", describe_win(win));
            }
        }
        Commands::NewCard { game_id } => {
            let mut session = GameSession::open(library, &game_id, None, rng).await?;
            session.regenerate(rng).await?;
            print_session(&session);
        }
        Commands::Delete { game_id } => {
            if library.delete_game(&game_id).await? {
                println!("Deleted {}", game_id);
            } else {
                println!("No game {}", game_id);
            }
        }
        Commands::Export { game_id } => {
            let game = library.game(&game_id).await?;
            let json = library.export_game(&game_id).await?;
            write_export(config, &codec::game_file_name(&game), &json).await?;
        }
        Commands::ExportAll => {
            let json = library.export_all_games().await?;
            write_export(config, &codec::collection_file_name(), &json).await?;
        }
        Commands::ExportCard { game_id, card } => {
            let game = library.game(&game_id).await?;
            let card_id = match card {
                Some(card_id) => card_id,
                None => library
                    .repository()
                    .current_card_id(&game_id)
                    .await?
                    .ok_or_else(|| BingoError::CardNotFound {
                        game_id: game_id.clone(),
                        card_id: "current".to_string(),
                    })?,
            };
            let json = library.export_card(&game_id, &card_id).await?;
            write_export(config, &codec::card_file_name(&game, &card_id), &json).await?;
        }
        Commands::Import { path } => {
            let text = read_file(&path).await?;
            let game = library.import_game(&text, rng).await?;
            println!("Imported {} ({})", game.title, game.id);
        }
        Commands::ImportAll { path } => {
            let text = read_file(&path).await?;
            let games = library.import_games(&text, rng).await?;
            println!("Imported {} games", games.len());
            for game in games {
                println!("  {} ({})", game.title, game.id);
            }
        }
        Commands::ImportCard { path } => {
            let text = read_file(&path).await?;
            let imported = library.import_card(&text, rng).await?;
            println!(
                "Imported card {} for game {}",
                imported.card_id, imported.game_id
            );
        }
        Commands::Resume => {
            let entries = library.list_incomplete_games().await?;
            if entries.is_empty() {
                println!("Nothing in progress");
            }
            for entry in entries {
                println!(
                    "{} {}  card {}  {} marked  last played {}",
                    entry.game.emoji,
                    entry.game.title,
                    entry.card_id,
                    entry.marked_count,
                    entry.last_played
                );
            }
        }
    }

    Ok(())
}

fn parse_victory_types(values: &[String]) -> anyhow::Result<Vec<VictoryType>> {
    let mut types = Vec::new();
    for value in values {
        let Some(victory_type) = VictoryType::parse(value.trim()) else {
            bail!("unknown victory type '{}'", value);
        };
        if !types.contains(&victory_type) {
            types.push(victory_type);
        }
    }
    Ok(types)
}

async fn read_file(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn write_export(config: &Config, file_name: &str, json: &str) -> anyhow::Result<()> {
    let path = config.export_dir.join(file_name);
    tokio::fs::write(&path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), "Wrote export");
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_session(session: &GameSession) {
    let game = session.game();
    println!(
        "{} {}  card {}",
        game.emoji,
        game.title,
        session.card_id()
    );
    print!("{}", render_card(session.card()));
    for win in session.wins() {
        println!("  {}", describe_win(win));
    }
}

/// Text grid, marked cells in brackets
pub fn render_card(card: &Card) -> String {
    let width = card.cells().map(|cell| cell.text.chars().count()).max().unwrap_or(0) + 2;

    let mut out = String::new();
    for row in card.rows() {
        for cell in row {
            let label = if cell.marked {
                format!("[{}]", cell.text)
            } else {
                format!(" {} ", cell.text)
            };
            let _ = write!(out, "{:<width$} ", label, width = width);
        }
        out.push('\n');
    }
    out
}

pub fn describe_win(win: &Win) -> String {
    match win {
        Win::Line { index } => format!("line {}", index + 1),
        Win::Column { index } => format!("column {}", index + 1),
        Win::Diagonal { which } => format!("{:?} diagonal", which).to_lowercase(),
        Win::Full => "full card".to_string(),
    }
}

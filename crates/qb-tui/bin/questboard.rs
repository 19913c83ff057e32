//! questboard - a quest list with a daily dungeon
//!
//! Main entry point: one-shot subcommands plus the interactive board.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;

use qb_core::dungeon::{DungeonMap, GraphicsMode, MapParams};
use qb_core::{BoardOptions, Lcg, OptionsError, seed_for_date};
use qb_store::{
    NewQuest, Quest, QuestPatch, QuestStatus, QuestStore, StoreError, default_config_path,
    default_store_path, parse_status,
};
use qb_tui::{App, Theme, detect_glyph_set};

/// Errors surfaced to the user before exiting
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("config: {0}")]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// Quest board with a dungeon that grows as you finish things
#[derive(Parser, Debug)]
#[command(name = "questboard")]
#[command(author, version, about = "questboard - clear today's dungeon", long_about = None)]
struct Args {
    /// Options file (default: <config dir>/questboard/questboardrc)
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Quest store file (overrides the `datafile` option)
    #[arg(long = "data", global = true)]
    data: Option<PathBuf>,

    /// Map characters: classic, fancy or auto
    #[arg(short = 'g', long = "graphics", global = true)]
    graphics: Option<GraphicsMode>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print a day's dungeon map
    Map {
        /// Day to draw (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Seed override, reduced mod 2^32
        #[arg(long)]
        seed: Option<u64>,

        /// Requested room count (default: from the day's quests)
        #[arg(long, allow_negative_numbers = true)]
        rooms: Option<i64>,

        /// Requested unlocked count (default: from the day's quests)
        #[arg(long, allow_negative_numbers = true)]
        unlocked: Option<i64>,

        /// Print the map summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a quest
    Add {
        title: String,
        #[arg(long)]
        note: Option<String>,
        /// backlog, doing or done
        #[arg(long)]
        status: Option<String>,
        /// Day the quest counts toward (default: today)
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// List quests, newest first
    List {
        /// Only quests due on this day
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },

    /// Change fields of a quest
    Set {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Mark a quest done
    Done { id: u64 },

    /// Delete a quest
    Rm { id: u64 },

    /// Interactive board (default)
    Tui,
}

/// Everything resolved from flags and the options file
struct Settings {
    options: BoardOptions,
    store_path: PathBuf,
    today: NaiveDate,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(args) {
        eprintln!("questboard: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr, which the interactive board draws over, so it stays
/// quiet there unless asked.
fn init_logging(args: &Args) {
    let interactive = matches!(args.command, None | Some(Cmd::Tui));
    if interactive && !args.verbose && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let default = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut options = BoardOptions::load_or_default(&config_path)?;
    if let Some(mode) = args.graphics {
        options.graphics = mode;
    }
    let store_path = args
        .data
        .clone()
        .or_else(|| options.datafile.clone())
        .unwrap_or_else(default_store_path);
    debug!("config {} store {}", config_path.display(), store_path.display());

    let settings = Settings {
        options,
        store_path,
        today: Local::now().date_naive(),
    };

    match args.command.unwrap_or(Cmd::Tui) {
        Cmd::Map {
            date,
            seed,
            rooms,
            unlocked,
            json,
        } => print_map(&settings, date, seed, rooms, unlocked, json),
        Cmd::Add {
            title,
            note,
            status,
            due,
        } => {
            let mut store = QuestStore::open(&settings.store_path)?;
            let new = NewQuest {
                title,
                note: note.unwrap_or_default(),
                status: status.as_deref().map(parse_status).transpose()?,
                due,
            };
            let quest = store.create(new, settings.today)?.clone();
            store.save()?;
            println!("added {}", format_quest(&quest));
            Ok(())
        }
        Cmd::List { date, json } => {
            let store = QuestStore::open(&settings.store_path)?;
            let quests = match date {
                Some(date) => store.due_on(date),
                None => store.list(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&quests)?);
            } else if quests.is_empty() {
                println!("no quests");
            } else {
                for quest in quests {
                    println!("{}", format_quest(quest));
                }
            }
            Ok(())
        }
        Cmd::Set {
            id,
            title,
            note,
            status,
            due,
        } => {
            let patch = QuestPatch {
                title,
                note,
                status: status.as_deref().map(parse_status).transpose()?,
                due,
            };
            update_quest(&settings, id, patch)
        }
        Cmd::Done { id } => update_quest(&settings, id, QuestPatch::status(QuestStatus::Done)),
        Cmd::Rm { id } => {
            let mut store = QuestStore::open(&settings.store_path)?;
            let quest = store.delete(id)?;
            store.save()?;
            println!("removed {}", format_quest(&quest));
            Ok(())
        }
        Cmd::Tui => run_tui(settings),
    }
}

fn print_map(
    settings: &Settings,
    date: Option<NaiveDate>,
    seed: Option<u64>,
    rooms: Option<i64>,
    unlocked: Option<i64>,
    json: bool,
) -> Result<(), CliError> {
    let date = date.unwrap_or(settings.today);
    let seed = match seed {
        Some(wide) => Lcg::from_wide_seed(wide).seed(),
        None => seed_for_date(date),
    };

    // Only touch the store when the counts are not all given
    let params = match (rooms, unlocked) {
        (Some(rooms), Some(unlocked)) => MapParams::new(rooms, unlocked, seed),
        _ => {
            let store = QuestStore::open(&settings.store_path)?;
            let progress = store.progress_for(date);
            MapParams::new(
                rooms.unwrap_or(progress.rooms_total() as i64),
                unlocked.unwrap_or(progress.unlocked() as i64),
                seed,
            )
        }
    };
    let map = DungeonMap::build(params.with_draws_per_room(settings.options.draw_budget));

    if json {
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        let glyphs = detect_glyph_set(settings.options.graphics);
        println!("{}", map.to_text(glyphs.as_ref()));
    }
    Ok(())
}

fn update_quest(settings: &Settings, id: u64, patch: QuestPatch) -> Result<(), CliError> {
    let mut store = QuestStore::open(&settings.store_path)?;
    let quest = store.update(id, patch)?.clone();
    store.save()?;
    println!("updated {}", format_quest(&quest));
    Ok(())
}

fn format_quest(quest: &Quest) -> String {
    let mut line = format!(
        "#{} [{}] {} {}",
        quest.id,
        quest.status,
        quest.due.format("%Y-%m-%d"),
        quest.title
    );
    if !quest.note.is_empty() {
        line.push_str(" - ");
        line.push_str(&quest.note);
    }
    line
}

fn run_tui(settings: Settings) -> Result<(), CliError> {
    let store = QuestStore::open(&settings.store_path)?;
    let mut app = App::new(
        store,
        settings.today,
        Theme::for_color(settings.options.color),
        detect_glyph_set(settings.options.graphics),
        settings.options.draw_budget,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(CliError::from)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(250))? {
            let event = event::read()?;
            if let Some(command) = app.handle_event(event) {
                app.execute(command);
            }
            if app.should_quit() {
                return Ok(());
            }
        }
    }
}

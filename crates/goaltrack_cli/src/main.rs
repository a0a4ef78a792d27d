//! Goaltrack command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto the objective and preference services.
//! - Render the board as text after every change.
//!
//! Objectives are addressed by their 1-based position on the board.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use goaltrack_core::db::open_db;
use goaltrack_core::{
    init_logging, AppConfig, ConfirmPrompt, DisplayPreferences, FormView, KvObjectiveRepository,
    KvPreferenceRepository, ObjectiveForm, ObjectiveId, ObjectiveListView, ObjectiveService,
    PreferenceService, SqliteKeyValueStore, SystemClock, TextBoardView,
};
use log::warn;
use std::io::{self, BufRead, Stdout, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "goaltrack")]
#[command(about = "Track personal objectives against their deadlines")]
#[command(version)]
struct Cli {
    /// Database file (overrides GOALTRACK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all objectives
    List,

    /// Add a new objective
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Edit the objective at a board position; omitted flags keep their value.
    /// Without any flags the prefilled form is printed and nothing changes.
    Edit {
        position: usize,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete the objective at a board position
    Delete {
        position: usize,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Toggle high-contrast rendering
    Contrast,

    /// Grow or shrink the font size
    Font {
        #[arg(value_enum)]
        step: FontStep,
    },
}

#[derive(Args, Default)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// YYYY-MM-DD, or empty to clear
    #[arg(long)]
    deadline: Option<String>,

    /// Progress made so far
    #[arg(long)]
    current: Option<String>,

    /// Progress target
    #[arg(long)]
    total: Option<String>,
}

impl FieldArgs {
    fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.deadline,
            &self.current,
            &self.total,
        ]
        .iter()
        .all(|value| value.is_none())
    }

    fn apply_to(self, form: &mut ObjectiveForm) {
        let Self {
            title,
            description,
            deadline,
            current,
            total,
        } = self;
        for (value, slot) in [
            (title, &mut form.title),
            (description, &mut form.description),
            (deadline, &mut form.deadline),
            (current, &mut form.current_progress),
            (total, &mut form.total_progress),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FontStep {
    Up,
    Down,
}

/// Reads a `y/N` answer from stdin.
struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }

    if let Some(log_dir) = config.log_dir.to_str() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let store = SqliteKeyValueStore::new(&conn);

    let mut preferences = PreferenceService::load(KvPreferenceRepository::new(&store))
        .context("failed to load display preferences")?;

    let repo = KvObjectiveRepository::new(&store);

    match cli.command {
        Commands::List => {
            ObjectiveService::load(repo, board(preferences.current()))?;
        }
        Commands::Add { fields } => {
            let view = QuietUntilChanged::new(board(preferences.current()));
            let mut service = ObjectiveService::load(repo, view)?;
            let mut form = FormView::create().fields;
            fields.apply_to(&mut form);
            service.create(&form)?;
        }
        Commands::Edit { position, fields } => {
            let view = QuietUntilChanged::new(board(preferences.current()));
            let mut service = ObjectiveService::load(repo, view)?;
            let id = resolve_position(service.objectives().len(), position, |index| {
                service.id_at(index)
            })?;
            let form_view = service.edit_form(id)?;
            if fields.is_empty() {
                service
                    .view_mut()
                    .inner
                    .write_form(&form_view)
                    .context("failed to print the edit form")?;
                return Ok(());
            }
            let mut form = form_view.fields;
            fields.apply_to(&mut form);
            service.update(id, &form)?;
        }
        Commands::Delete { position, yes } => {
            let view = QuietUntilChanged::new(board(preferences.current()));
            let mut service = ObjectiveService::load(repo, view)?;
            let id = resolve_position(service.objectives().len(), position, |index| {
                service.id_at(index)
            })?;
            let deleted = if yes {
                service.delete(id, &mut |_message: &str| true)?
            } else {
                service.delete(id, &mut StdinPrompt)?
            };
            if !deleted {
                println!("Nothing deleted.");
            }
        }
        Commands::Contrast => {
            let enabled = preferences.toggle_high_contrast()?;
            println!("High contrast {}.", if enabled { "on" } else { "off" });
        }
        Commands::Font { step } => {
            let px = match step {
                FontStep::Up => preferences.increase_font_size()?,
                FontStep::Down => preferences.decrease_font_size()?,
            };
            println!("Font size {px}px.");
        }
    }

    Ok(())
}

fn board(preferences: DisplayPreferences) -> TextBoardView<Stdout, SystemClock> {
    TextBoardView::new(io::stdout(), SystemClock, preferences)
}

fn resolve_position(
    len: usize,
    position: usize,
    id_at: impl Fn(usize) -> Option<ObjectiveId>,
) -> Result<ObjectiveId> {
    if position == 0 {
        bail!("positions start at 1");
    }
    id_at(position - 1).ok_or_else(|| {
        warn!("event=cli_resolve module=cli status=error position={position} count={len}");
        anyhow!("no objective at position {position} (board has {len})")
    })
}

/// Skips the startup render so mutating commands print the board once.
struct QuietUntilChanged<V: ObjectiveListView> {
    inner: V,
    armed: bool,
}

impl<V: ObjectiveListView> QuietUntilChanged<V> {
    fn new(inner: V) -> Self {
        Self {
            inner,
            armed: false,
        }
    }
}

impl<V: ObjectiveListView> ObjectiveListView for QuietUntilChanged<V> {
    fn render(&mut self, objectives: &[goaltrack_core::Objective]) {
        if self.armed {
            self.inner.render(objectives);
        }
        self.armed = true;
    }
}

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use workout_core::*;

#[derive(Parser)]
#[command(name = "liftwave")]
#[command(about = "Wave-loading workout tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's targets and adherence (default)
    Status,

    /// Start today's workout
    Start,

    /// Log one set of the active workout
    Log {
        /// Exercise id (see `status` for the list)
        exercise: String,
        /// Weight lifted, in kg
        weight: f64,
        /// Reps performed
        reps: u32,
    },

    /// Finish the active workout and advance the cycle
    Finish,

    /// Manage prescribed baseline weights
    Weights {
        #[command(subcommand)]
        command: WeightsCommands,
    },

    /// Log cardio and review adherence
    Cardio {
        #[command(subcommand)]
        command: CardioCommands,
    },

    /// List finished workout sessions
    History {
        /// Show the full history instead of the most recent sessions
        #[arg(long)]
        all: bool,
    },

    /// Delete a finished workout session (two-phase)
    Delete {
        /// Session id from `history`
        session_id: Uuid,

        /// Confirmation token printed by the first invocation
        #[arg(long)]
        confirm: Option<Uuid>,
    },

    /// Roll up cardio WAL records to CSV
    Rollup {
        /// Clean up processed WAL files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

#[derive(Subcommand)]
enum WeightsCommands {
    /// Set the baseline for an exercise
    Set {
        /// Exercise id
        exercise: String,
        /// Baseline weight, in kg
        kg: f64,
    },
    /// List all baselines
    List,
}

#[derive(Subcommand)]
enum CardioCommands {
    /// Record a cardio session performed today
    Add {
        /// Activity name (e.g. running, cycling)
        activity: String,
        /// Duration in minutes
        minutes: u32,
        /// Mark as a 4x4 interval session
        #[arg(long)]
        interval: bool,
    },
    /// Show zone-2 minutes and interval cadence
    Status,
}

/// Everything the CLI persists under the data directory
struct DataPaths {
    state: PathBuf,
    active: PathBuf,
    pending_delete: PathBuf,
    wal_dir: PathBuf,
    workout_wal: PathBuf,
    cardio_wal: PathBuf,
    cardio_csv: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        let wal_dir = data_dir.join("wal");
        Self {
            state: data_dir.join("state.json"),
            active: data_dir.join("active_session.json"),
            pending_delete: data_dir.join("pending_delete.json"),
            workout_wal: wal_dir.join("workout_sessions.wal"),
            cardio_wal: wal_dir.join("cardio_sessions.wal"),
            cardio_csv: data_dir.join("cardio.csv"),
            wal_dir,
        }
    }
}

/// Snapshot of the workout in progress, persisted between invocations
#[derive(Serialize, Deserialize)]
struct ActiveSessionFile {
    session: WorkoutSession,
    /// Exercises whose baseline was already raised this session
    leveled: Vec<String>,
}

fn main() -> Result<()> {
    workout_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = DataPaths::new(&data_dir);
    std::fs::create_dir_all(&paths.wal_dir)?;

    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&paths, &config, today),
        Some(Commands::Start) => cmd_start(&paths, today),
        Some(Commands::Log {
            exercise,
            weight,
            reps,
        }) => cmd_log(&paths, &exercise, weight, reps),
        Some(Commands::Finish) => cmd_finish(&paths),
        Some(Commands::Weights { command }) => match command {
            WeightsCommands::Set { exercise, kg } => cmd_weights_set(&paths, &config, &exercise, kg),
            WeightsCommands::List => cmd_weights_list(&paths),
        },
        Some(Commands::Cardio { command }) => match command {
            CardioCommands::Add {
                activity,
                minutes,
                interval,
            } => cmd_cardio_add(&paths, &config, today, &activity, minutes, interval),
            CardioCommands::Status => cmd_cardio_status(&paths, &config, today),
        },
        Some(Commands::History { all }) => cmd_history(&paths, all),
        Some(Commands::Delete {
            session_id,
            confirm,
        }) => cmd_delete(&paths, session_id, confirm),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&paths, cleanup),
    }
}

fn checked_catalog() -> Result<&'static Catalog> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }
    Ok(catalog)
}

fn load_active(paths: &DataPaths) -> Result<Option<ActiveSessionFile>> {
    if !paths.active.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&paths.active)?;
    Ok(Some(serde_json::from_str(&contents)?))
}

fn save_active(paths: &DataPaths, file: &ActiveSessionFile) -> Result<()> {
    std::fs::write(&paths.active, serde_json::to_string(file)?)?;
    Ok(())
}

fn resume_active(
    catalog: &Catalog,
    state: &TrainingState,
    file: ActiveSessionFile,
) -> Result<ActiveSession> {
    let mut active = ActiveSession::reopen(catalog, state, file.session)?;
    active.restore_leveled(&file.leveled);
    Ok(active)
}

fn cmd_status(paths: &DataPaths, config: &Config, today: NaiveDate) -> Result<()> {
    let catalog = checked_catalog()?;
    let state = TrainingState::load(&paths.state)?;

    println!("\n{}", state.position);
    println!("─────────────────────────────────────────");

    for exercise in &catalog.exercises {
        let target = targets_for(&state.position, state.weight_for(&exercise.id))?;
        println!(
            "  {:<16} {} sets × {} reps × {} kg",
            exercise.id, engine::SETS_PER_EXERCISE, target.reps, target.weight
        );
    }

    let store = SessionStore::new(&paths.workout_wal);
    let sessions = store.load_all()?;
    let this_week = weekly_session_count(today, &sessions);
    println!(
        "\n  Weekly target: {}/{} workouts",
        this_week, config.strength.weekly_session_target
    );

    if paths.active.exists() {
        println!("  A workout is in progress; `liftwave finish` when done.");
    }

    print_cardio_adherence(paths, config, today)?;
    Ok(())
}

fn cmd_start(paths: &DataPaths, today: NaiveDate) -> Result<()> {
    if paths.active.exists() {
        return Err(Error::Session(
            "a workout is already in progress (finish it first)".into(),
        ));
    }

    let catalog = checked_catalog()?;
    let state = TrainingState::load(&paths.state)?;
    let active = start_session(catalog, &state, &state.position, today)?;

    println!("\nStarted workout: {}", state.position);
    for planned in active.plan() {
        if planned.set_number == 1 {
            println!(
                "  {:<16} 2 × {} reps × {} kg",
                planned.exercise_id, planned.target.reps, planned.target.weight
            );
        }
    }
    println!("\nLog sets with `liftwave log <exercise> <kg> <reps>`.");

    save_active(
        paths,
        &ActiveSessionFile {
            leveled: active.leveled_exercises(),
            session: active.session,
        },
    )
}

fn cmd_log(paths: &DataPaths, exercise: &str, weight: f64, reps: u32) -> Result<()> {
    let catalog = checked_catalog()?;
    if catalog.get(exercise).is_none() {
        return Err(Error::Other(format!("unknown exercise '{}'", exercise)));
    }

    let file = load_active(paths)?
        .ok_or_else(|| Error::Session("no workout in progress (`liftwave start`)".into()))?;

    let mut state = TrainingState::load(&paths.state)?;
    let mut active = resume_active(catalog, &state, file)?;

    let (outcome, level_up) = active.log_set(&mut state, exercise, weight, reps)?;
    println!("  {} {} kg × {} → {}", exercise, weight, reps, outcome);

    if let Some(level_up) = level_up {
        println!(
            "  🎉 Level up! {} baseline is now {} kg",
            level_up.exercise_id, level_up.new_weight
        );
    } else if active.is_level_up_eligible(exercise) {
        println!("  Level up ready for {}", exercise);
    }

    state.save(&paths.state)?;
    save_active(
        paths,
        &ActiveSessionFile {
            leveled: active.leveled_exercises(),
            session: active.session,
        },
    )
}

fn cmd_finish(paths: &DataPaths) -> Result<()> {
    let catalog = checked_catalog()?;
    let file = load_active(paths)?
        .ok_or_else(|| Error::Session("no workout in progress (`liftwave start`)".into()))?;

    let mut state = TrainingState::load(&paths.state)?;
    let active = resume_active(catalog, &state, file)?;
    let set_count = active.session.sets.len();

    let session = active.finish(&mut state, true)?;
    SessionStore::new(&paths.workout_wal).append(&session)?;
    state.save(&paths.state)?;
    std::fs::remove_file(&paths.active)?;

    println!("\n✓ Workout finished ({} sets logged).", set_count);
    println!("  Next up: {}", state.position);
    Ok(())
}

fn cmd_weights_set(paths: &DataPaths, config: &Config, exercise: &str, kg: f64) -> Result<()> {
    let catalog = checked_catalog()?;
    if catalog.get(exercise).is_none() {
        return Err(Error::Other(format!("unknown exercise '{}'", exercise)));
    }

    let mut writer = WeightWriter::new(&paths.state, config.storage.weight_debounce_ms);
    writer.set(exercise, kg);
    writer.flush()?;

    println!("✓ {} baseline set to {} kg", exercise, kg);
    Ok(())
}

fn cmd_weights_list(paths: &DataPaths) -> Result<()> {
    let catalog = checked_catalog()?;
    let state = TrainingState::load(&paths.state)?;

    println!("\nPrescribed baselines (kg)");
    for exercise in &catalog.exercises {
        println!("  {:<16} {}", exercise.id, state.weight_for(&exercise.id));
    }
    Ok(())
}

fn cmd_cardio_add(
    paths: &DataPaths,
    config: &Config,
    today: NaiveDate,
    activity: &str,
    minutes: u32,
    interval: bool,
) -> Result<()> {
    let session = CardioSession {
        id: Uuid::new_v4(),
        date: today,
        activity: activity.to_string(),
        duration_minutes: minutes,
        is_interval: interval,
    };

    let mut sink = JsonlSink::new(&paths.cardio_wal);
    sink.append(&session)?;

    println!(
        "✓ Logged {} min of {}{}",
        minutes,
        activity,
        if interval { " (4x4 interval)" } else { "" }
    );
    print_cardio_adherence(paths, config, today)
}

fn cmd_cardio_status(paths: &DataPaths, config: &Config, today: NaiveDate) -> Result<()> {
    print_cardio_adherence(paths, config, today)
}

fn print_cardio_adherence(paths: &DataPaths, config: &Config, today: NaiveDate) -> Result<()> {
    // 84 days covers the missed-interval lookback; zone 2 needs only 7
    let history = load_recent_cardio(&paths.cardio_wal, &paths.cardio_csv, today, 84)?;
    let adherence = cardio_adherence(today, &history);

    println!(
        "\n  Zone 2: {}/{} min (last 7 days)",
        adherence.zone2_minutes, config.cardio.weekly_zone2_target_minutes
    );
    println!("  Next 4x4 due: {}", adherence.next_interval_due);
    if adherence.missed_intervals > 0 {
        println!(
            "  ⚠ {} missed 4x4 in last 12 weeks",
            adherence.missed_intervals
        );
    }
    Ok(())
}

const HISTORY_DEFAULT_LIMIT: usize = 10;

fn cmd_history(paths: &DataPaths, all: bool) -> Result<()> {
    let sessions = SessionStore::new(&paths.workout_wal).load_all()?;

    if sessions.is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    let total = sessions.len();
    let shown = if all { total } else { total.min(HISTORY_DEFAULT_LIMIT) };
    for session in sessions.into_iter().take(shown) {
        println!(
            "{} {} Week {} • {} Day • Cycle {} • {} sets",
            session.id,
            session.date,
            session.week,
            session.day,
            session.cycle,
            session.sets.len()
        );
    }
    if shown < total {
        println!("({} older sessions hidden; use --all)", total - shown);
    }
    Ok(())
}

/// Persisted form of a pending delete ticket
#[derive(Serialize, Deserialize)]
struct PendingDeleteFile {
    token: Uuid,
    session_id: Uuid,
}

fn cmd_delete(paths: &DataPaths, session_id: Uuid, confirm: Option<Uuid>) -> Result<()> {
    let mut store = SessionStore::new(&paths.workout_wal);

    match confirm {
        None => {
            let ticket = store.request_delete(session_id)?;
            let pending = PendingDeleteFile {
                token: ticket.token,
                session_id: ticket.session_id,
            };
            std::fs::write(&paths.pending_delete, serde_json::to_string(&pending)?)?;

            println!("Delete requested for session {}.", session_id);
            println!(
                "Confirm with: liftwave delete {} --confirm {}",
                session_id, ticket.token
            );
            Ok(())
        }
        Some(token) => {
            if !paths.pending_delete.exists() {
                return Err(Error::Session("no delete is pending".into()));
            }
            let contents = std::fs::read_to_string(&paths.pending_delete)?;
            let pending: PendingDeleteFile = serde_json::from_str(&contents)?;

            if pending.token != token || pending.session_id != session_id {
                return Err(Error::Session(
                    "confirmation does not match the pending delete".into(),
                ));
            }

            let ticket = DeleteTicket {
                token: pending.token,
                session_id: pending.session_id,
            };
            store.restore_pending(ticket);
            store.confirm_delete(ticket)?;
            std::fs::remove_file(&paths.pending_delete)?;

            println!("✓ Deleted session {}", session_id);
            Ok(())
        }
    }
}

fn cmd_rollup(paths: &DataPaths, cleanup: bool) -> Result<()> {
    if !paths.cardio_wal.exists() {
        println!("No cardio WAL found - nothing to roll up.");
        return Ok(());
    }

    let count = csv_rollup::wal_to_csv_and_archive(&paths.cardio_wal, &paths.cardio_csv)?;

    println!("✓ Rolled up {} sessions to CSV", count);
    println!("  CSV: {}", paths.cardio_csv.display());

    if cleanup {
        let cleaned = csv_rollup::cleanup_processed_wals(&paths.wal_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed WAL files", cleaned);
        }
    }

    Ok(())
}

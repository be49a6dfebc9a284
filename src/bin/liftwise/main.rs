// ABOUTME: Liftwise CLI - log sessions and query the progression and periodization engine
// ABOUTME: Every command prints pretty JSON to stdout; logs go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftwise Contributors
//!
//! Usage:
//! ```bash
//! # Log a session of three sets (weight x reps @ RIR)
//! liftwise log --workout "Upper A" --exercise "Dumbbell Bench Press" \
//!     --set 20x12@2 --set 20x12@2 --set 20x11@1 --duration 20
//!
//! # Progression status and next load
//! liftwise status --workout "Upper A" --exercise "Dumbbell Bench Press" --rep-range 8-12 --rir-target 2-3
//!
//! # Deload lifecycle
//! liftwise deload check
//! liftwise deload start standard
//!
//! # Unlock and readiness
//! liftwise unlock "Barbell Bench Press" --from-workout "Upper A" --from-exercise "Dumbbell Bench Press"
//! liftwise readiness
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use liftwise::logging::CommandLogger;
use liftwise::models::{DeloadType, MobilityResponse, PainSeverity, TrainingPhase, WorkoutSet};
use liftwise::{AppConfig, JsonFileStore, KvRepository, TrainingEngine};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

use helpers::parse::parse_set;

#[derive(Parser)]
#[command(
    name = "liftwise",
    about = "Liftwise strength-training tracker",
    long_about = "Log strength sessions and get progression, deload, unlock, and readiness decisions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data file override (defaults to LIFTWISE_DATA_FILE or the platform data directory)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Record a finished session for one exercise
    Log {
        /// Workout name, e.g. "Upper A"
        #[arg(long)]
        workout: String,

        /// Exercise name
        #[arg(long)]
        exercise: String,

        /// One set as WEIGHTxREPS@RIR, e.g. 20x12@2; repeat per set
        #[arg(long = "set", required = true, value_parser = parse_set)]
        sets: Vec<WorkoutSet>,

        /// Session length in minutes; records start and end times
        #[arg(long)]
        duration: Option<u32>,

        /// Body location that hurt during the session
        #[arg(long)]
        pain_location: Option<String>,

        /// Severity of the reported pain
        #[arg(long, requires = "pain_location")]
        pain_severity: Option<PainSeverity>,

        /// Record an explicit pain-free report
        #[arg(long, conflicts_with = "pain_location")]
        pain_free: bool,
    },

    /// Progression status, next load, and performance checks for one exercise
    Status {
        /// Workout name
        #[arg(long)]
        workout: String,

        /// Exercise name
        #[arg(long)]
        exercise: String,

        /// Rep range, e.g. 8-12 or 30-45s
        #[arg(long)]
        rep_range: String,

        /// RIR target, e.g. 2-3; omit for time-based exercises
        #[arg(long)]
        rir_target: Option<String>,

        /// Load added when progressing
        #[arg(long, default_value = "2.5")]
        increment: f64,
    },

    /// Deload lifecycle
    Deload {
        #[command(subcommand)]
        action: DeloadCommand,
    },

    /// Training phase
    Phase {
        #[command(subcommand)]
        action: PhaseCommand,
    },

    /// Record a mobility self-check
    Mobility {
        /// Criteria key, e.g. squat_depth
        criteria_key: String,

        /// yes, no, or partial
        response: MobilityResponse,
    },

    /// Evaluate whether a harder exercise unlocks
    Unlock {
        /// Exercise to unlock
        target: String,

        /// Workout of the prerequisite exercise
        #[arg(long)]
        from_workout: String,

        /// Prerequisite exercise name
        #[arg(long)]
        from_exercise: String,

        /// Persist the unlock when every criterion is met
        #[arg(long)]
        record: bool,
    },

    /// Readiness for equipment transitions
    Readiness {
        /// Only this transition, e.g. barbell_bench
        #[arg(long)]
        id: Option<String>,
    },

    /// Deload decision and readiness in one summary
    Dashboard,
}

#[derive(Subcommand)]
enum DeloadCommand {
    /// Whether a deload should start
    Check,
    /// Start a deload (standard, light, active_recovery)
    Start {
        /// Deload variant
        deload_type: DeloadType,
    },
    /// End the active deload
    End,
    /// Dismiss the current recommendation
    Postpone,
    /// Show the deload record and days remaining
    Show,
}

#[derive(Subcommand)]
enum PhaseCommand {
    /// Show the current phase and its policy
    Show,
    /// Change the phase (building, maintenance, recovery)
    Set {
        /// New phase
        phase: TrainingPhase,
    },
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Log { .. } => "log",
            Self::Status { .. } => "status",
            Self::Deload { .. } => "deload",
            Self::Phase { .. } => "phase",
            Self::Mobility { .. } => "mobility",
            Self::Unlock { .. } => "unlock",
            Self::Readiness { .. } => "readiness",
            Self::Dashboard => "dashboard",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let AppConfig { data_file, logging } = AppConfig::from_env()?.with_data_file(cli.data_file);
    logging.with_verbosity(cli.verbose).init()?;
    debug!(data_file = %data_file.display(), "Opening store");

    let store = JsonFileStore::open(data_file)?;
    let engine = TrainingEngine::with_global_config(KvRepository::new(store));

    let command_name = cli.command.name();
    let started = Instant::now();
    let outcome = run(&engine, cli.command);
    CommandLogger::log_command(command_name, outcome.is_ok(), started.elapsed());
    outcome
}

fn run(engine: &commands::Engine, command: Command) -> Result<()> {
    match command {
        Command::Log {
            workout,
            exercise,
            sets,
            duration,
            pain_location,
            pain_severity,
            pain_free,
        } => commands::session::log(
            engine,
            &workout,
            &exercise,
            sets,
            duration,
            commands::session::PainInput {
                location: pain_location,
                severity: pain_severity,
                pain_free,
            },
        ),
        Command::Status {
            workout,
            exercise,
            rep_range,
            rir_target,
            increment,
        } => commands::session::status(
            engine,
            &workout,
            &exercise,
            &rep_range,
            rir_target.as_deref(),
            increment,
        ),
        Command::Deload { action } => match action {
            DeloadCommand::Check => commands::periodization::deload_check(engine),
            DeloadCommand::Start { deload_type } => {
                commands::periodization::deload_start(engine, deload_type)
            }
            DeloadCommand::End => commands::periodization::deload_end(engine),
            DeloadCommand::Postpone => commands::periodization::deload_postpone(engine),
            DeloadCommand::Show => commands::periodization::deload_show(engine),
        },
        Command::Phase { action } => match action {
            PhaseCommand::Show => commands::periodization::phase_show(engine),
            PhaseCommand::Set { phase } => commands::periodization::phase_set(engine, phase),
        },
        Command::Mobility {
            criteria_key,
            response,
        } => commands::progress::mobility(engine, &criteria_key, response),
        Command::Unlock {
            target,
            from_workout,
            from_exercise,
            record,
        } => commands::progress::unlock(engine, &target, &from_workout, &from_exercise, record),
        Command::Readiness { id } => commands::progress::readiness(engine, id.as_deref()),
        Command::Dashboard => commands::progress::dashboard(engine),
    }
}

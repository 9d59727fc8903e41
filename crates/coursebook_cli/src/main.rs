//! `coursebook` command line front end.
//!
//! # Responsibility
//! - Map one invocation onto exactly one repository operation.
//! - Print confirmations and JSON lines to stdout, errors to stderr.
//!
//! # Exit status
//! - `0` on success, `1` on repository or seed-file errors.
//! - `2` for usage errors (reported by clap).

use clap::{Args, Parser, Subcommand};
use coursebook_core::{
    default_log_level, init_logging, Course, JsonTrainingRepository, Participant, Record,
    Session, TrainingDocument, TrainingRepository,
};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "sap_training_data.json";

#[derive(Debug, Parser)]
#[command(name = "coursebook")]
#[command(about = "Manage training courses, participants and sessions")]
#[command(version)]
struct Cli {
    /// Path to the JSON file used for persisting state
    #[arg(long, env = "COURSEBOOK_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "COURSEBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long, env = "COURSEBOOK_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the course catalog
    #[command(subcommand)]
    Courses(CourseCommand),
    /// Manage training participants
    #[command(subcommand)]
    Participants(ParticipantCommand),
    /// Schedule and monitor training sessions
    #[command(subcommand)]
    Sessions(SessionCommand),
    /// Enroll an employee in a session
    Enroll {
        session_id: String,
        employee_id: String,
    },
    /// Print a utilization report, one JSON object per session
    Report,
    /// Replace the whole store with the content of a JSON document
    Seed { file: PathBuf },
}

#[derive(Debug, Subcommand)]
enum CourseCommand {
    /// Add a new training course
    Add(AddCourseArgs),
    /// List existing courses
    List,
}

#[derive(Debug, Args)]
struct AddCourseArgs {
    code: String,
    title: String,
    level: String,
    duration: u32,
    description: String,
}

#[derive(Debug, Subcommand)]
enum ParticipantCommand {
    /// Register a new employee
    Add {
        employee_id: String,
        name: String,
        department: String,
    },
    /// List registered employees
    List,
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    /// Schedule a training session
    Schedule(ScheduleArgs),
    /// List scheduled sessions
    List,
}

#[derive(Debug, Args)]
struct ScheduleArgs {
    session_id: String,
    course_code: String,
    /// Session start date (YYYY-MM-DD)
    start_date: String,
    instructor: String,
    location: String,
    capacity: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    start_logging(&cli);

    let stdout = io::stdout();
    match execute(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}

fn start_logging(cli: &Cli) {
    let Some(log_dir) = cli.log_dir.as_deref() else {
        return;
    };
    if let Err(err) = init_logging(resolved_log_level(cli), log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}

fn resolved_log_level(cli: &Cli) -> &str {
    cli.log_level.as_deref().unwrap_or(default_log_level())
}

fn execute(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let mut repo = JsonTrainingRepository::open(&cli.db)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match &cli.command {
        Command::Courses(CourseCommand::Add(args)) => {
            let course = repo.add_course(&Course::new(
                &args.code,
                &args.title,
                &args.level,
                args.duration,
                &args.description,
            ))?;
            writeln!(out, "Course {} created", course.code)?;
        }
        Command::Courses(CourseCommand::List) => {
            write_records(out, &repo.list_courses()?)?;
        }
        Command::Participants(ParticipantCommand::Add {
            employee_id,
            name,
            department,
        }) => {
            let participant =
                repo.add_participant(&Participant::new(employee_id, name, department))?;
            writeln!(out, "Participant {} registered", participant.employee_id)?;
        }
        Command::Participants(ParticipantCommand::List) => {
            write_records(out, &repo.list_participants()?)?;
        }
        Command::Sessions(SessionCommand::Schedule(args)) => {
            let session = repo.schedule_session(&Session::new(
                &args.session_id,
                &args.course_code,
                &args.start_date,
                &args.instructor,
                &args.location,
                args.capacity,
            ))?;
            writeln!(out, "Session {} scheduled", session.session_id)?;
        }
        Command::Sessions(SessionCommand::List) => {
            write_records(out, &repo.list_sessions()?)?;
        }
        Command::Enroll {
            session_id,
            employee_id,
        } => {
            let session = repo.enroll_participant(session_id, employee_id)?;
            write_records(out, std::slice::from_ref(&session))?;
        }
        Command::Report => {
            write_json_lines(out, &repo.generate_report()?)?;
        }
        Command::Seed { file } => {
            let bytes = std::fs::read(file)
                .map_err(|err| format!("cannot read seed file `{}`: {err}", file.display()))?;
            let seed = TrainingDocument::from_slice(&bytes)
                .map_err(|err| format!("invalid seed file `{}`: {err}", file.display()))?;
            repo.import_seed_data(seed.courses, seed.participants, seed.sessions)?;
            writeln!(out, "Seed data imported")?;
        }
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Courses(CourseCommand::Add(_)) => "courses_add",
        Command::Courses(CourseCommand::List) => "courses_list",
        Command::Participants(ParticipantCommand::Add { .. }) => "participants_add",
        Command::Participants(ParticipantCommand::List) => "participants_list",
        Command::Sessions(SessionCommand::Schedule(_)) => "sessions_schedule",
        Command::Sessions(SessionCommand::List) => "sessions_list",
        Command::Enroll { .. } => "enroll",
        Command::Report => "report",
        Command::Seed { .. } => "seed",
    }
}

fn write_records<R: Record>(out: &mut impl Write, records: &[R]) -> io::Result<()> {
    let mapped = records.iter().map(Record::to_record).collect::<Vec<_>>();
    write_json_lines(out, &mapped)
}

fn write_json_lines<T: Serialize>(out: &mut impl Write, items: &[T]) -> io::Result<()> {
    for item in items {
        serde_json::to_writer(&mut *out, item)?;
        writeln!(out)?;
    }
    Ok(())
}

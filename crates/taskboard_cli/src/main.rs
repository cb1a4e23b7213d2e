//! CLI smoke entry point.
//!
//! # Responsibility
//! - Bootstrap a board and drive one scripted create + drag session.
//! - Keep output deterministic apart from generated project ids.
//!
//! Environment:
//! - `TASKBOARD_LOG_LEVEL`: overrides the default log level.
//! - `TASKBOARD_LOG_DIR`: absolute directory; enables file logging.

use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::{BoardConfig, ProjectStatus, SubmitOutcome, TaskBoard};

fn config_from_env() -> BoardConfig {
    let mut config = BoardConfig::default();
    if let Ok(level) = std::env::var("TASKBOARD_LOG_LEVEL") {
        config.log_level = level;
    }
    if let Ok(dir) = std::env::var("TASKBOARD_LOG_DIR") {
        config.log_dir = Some(PathBuf::from(dir));
    }
    config
}

fn main() -> ExitCode {
    println!("taskboard_core ping={}", taskboard_core::ping());
    println!("taskboard_core version={}", taskboard_core::core_version());

    let board = match TaskBoard::new(config_from_env()) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("failed to start board: {err}");
            return ExitCode::FAILURE;
        }
    };

    for (title, description, people) in [
        ("Build API", "Backend service", "3"),
        ("Write docs", "User manual", "1"),
        ("Bad", "x", "9"),
    ] {
        let outcome = board.submit_project(title, description, people);
        let label = match outcome {
            SubmitOutcome::Created => "created",
            SubmitOutcome::Rejected => "rejected",
        };
        println!("submit title={title:?} -> {label}");
    }

    let first = board.list(ProjectStatus::Active).assigned().first().cloned();
    if let Some(project) = first {
        match board.drag_project(&project.id, ProjectStatus::Finished) {
            Ok(accepted) => println!("drag title={:?} accepted={accepted}", project.title),
            Err(err) => {
                eprintln!("drag failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    log::info!("event=cli_demo module=cli status=ok");
    for status in ProjectStatus::all() {
        println!("{status}: {:?}", board.list(status).rendered_titles());
    }
    print!("{}", board.outline());
    ExitCode::SUCCESS
}

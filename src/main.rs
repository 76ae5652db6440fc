use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use smarttime::{LoadReport, TaskService, load_from_path};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "smarttime")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Single-user task scheduler: dependencies, priorities and undo")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a sample data file and print the task list
    Show {
        /// Path to a semicolon-separated task file
        file: PathBuf,
        /// Ordering for the printed list
        #[arg(short = 's', long = "sort", value_enum, default_value = "default")]
        sort: SortOrder,
        /// Emit the task list as JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },
    /// Print only the next recommended task
    Next {
        /// Path to a semicolon-separated task file
        file: PathBuf,
    },
    /// Load a file and report parse problems and unlock states
    Check {
        /// Path to a semicolon-separated task file
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortOrder {
    /// Due date, then difficulty, then minutes, then title
    Default,
    /// Due date only
    Due,
    /// Difficulty only
    Difficulty,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("smarttime=warn")
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file, sort, json } => show(&file, sort, json),
        Commands::Next { file } => next(&file),
        Commands::Check { file } => check(&file),
    }
}

fn load(file: &Path) -> anyhow::Result<(TaskService, LoadReport)> {
    let mut service = TaskService::new();
    let report = load_from_path(&mut service, file)
        .with_context(|| format!("failed to load tasks from {}", file.display()))?;
    info!(tasks = report.tasks_loaded, "loaded sample data");
    Ok((service, report))
}

fn show(file: &Path, sort: SortOrder, json: bool) -> anyhow::Result<()> {
    let (mut service, _) = load(file)?;

    let tasks = match sort {
        SortOrder::Default => service.all_tasks_sorted(),
        SortOrder::Due => service.tasks_by_due_date(),
        SortOrder::Difficulty => service.tasks_by_difficulty(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    println!("{:>4}  {:<30} {:<16} {:<12} {:>4} {:>5}", "id", "title", "course", "due", "min", "diff");
    for task in &tasks {
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<30} {:<16} {:<12} {:>4} {:>5}",
            task.id, task.title, task.course, due, task.estimated_minutes, task.difficulty
        );
    }

    match service.next_recommended() {
        Some(task) => println!("\nnext up: {task}"),
        None => println!("\nnothing left to do"),
    }

    Ok(())
}

fn next(file: &Path) -> anyhow::Result<()> {
    let (mut service, _) = load(file)?;

    match service.next_recommended() {
        Some(task) => println!("{task}"),
        None => println!("nothing left to do"),
    }

    Ok(())
}

fn check(file: &Path) -> anyhow::Result<()> {
    let (service, report) = load(file)?;

    println!(
        "loaded {} tasks, {} dependencies",
        report.tasks_loaded, report.dependencies_added
    );
    for skipped in &report.skipped_lines {
        println!("line {}: {}", skipped.line, skipped.reason);
    }
    if report.skipped_references > 0 {
        println!("{} unknown prerequisite ids skipped", report.skipped_references);
    }
    if report.rejected_dependencies > 0 {
        println!("{} dependencies rejected", report.rejected_dependencies);
    }

    for task in service.all_tasks_sorted() {
        let state = if task.is_completed() {
            "done"
        } else if service.is_unlocked(task.id) {
            "unlocked"
        } else {
            "locked"
        };
        println!("{:>4}  {:<30} {}", task.id, task.title, state);
    }

    Ok(())
}

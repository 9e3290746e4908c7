use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fuelfolio::catalogue;
use fuelfolio::engine::Engine;
use fuelfolio::exchange;
use fuelfolio::models::{DeliverableStatus, FuelType, Project, RecordKey, RecordPatch, Stage};
use fuelfolio::state::{Action, FilterPatch};
use fuelfolio::store::{JsonFileStore, SqliteStore, StateStore};

#[derive(Parser)]
#[command(name = "ffl")]
#[command(about = "Deliverable tracking for alternative-fuels project portfolios")]
struct Cli {
    /// State file path (defaults to the platform data directory).
    /// A `.db` extension selects the SQLite store instead of JSON.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects with overall completion
    List,
    /// Add a project to the portfolio
    Add {
        name: String,
        #[arg(long, default_value = "Hydrogen", value_parser = parse_fuel)]
        fuel: FuelType,
        #[arg(long, default_value = "Feasibility", value_parser = parse_stage)]
        stage: Stage,
        #[arg(long, default_value = "")]
        group: String,
    },
    /// Delete a project and all of its deliverable records
    Rm { project: String },
    /// Select a project (or clear the selection)
    Select { project: Option<String> },
    /// Show a project's completion per stage
    Show { project: Option<String> },
    /// Update a deliverable record
    Set {
        project: String,
        /// Catalogue deliverable id, e.g. `chg-feas-1`
        deliverable: String,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        #[arg(long, value_parser = parse_status)]
        status: Option<DeliverableStatus>,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Toggle a deliverable between completed and not started
    Toggle {
        project: String,
        deliverable: String,
    },
    /// Aggregate counts over the (optionally filtered) portfolio
    Analytics {
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, value_parser = parse_stage)]
        stage: Option<Stage>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long)]
        in_progress: bool,
        #[arg(long)]
        completed: bool,
    },
    /// Export the portfolio
    Export {
        #[arg(value_parser = ["csv", "json"])]
        format: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Import a JSON export, replacing all current data
    Import { file: PathBuf },
    /// Erase all data and return to defaults
    Reset {
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "fuelfolio=info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_fuel(s: &str) -> Result<FuelType, String> {
    FuelType::from_str(s).ok_or_else(|| {
        format!(
            "unknown fuel type `{s}`; expected one of: {}",
            FuelType::ALL.map(|f| f.as_str()).join(", ")
        )
    })
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    Stage::from_str(s).ok_or_else(|| {
        format!(
            "unknown stage `{s}`; expected one of: {}",
            Stage::ALL.map(|f| f.as_str()).join(", ")
        )
    })
}

fn parse_status(s: &str) -> Result<DeliverableStatus, String> {
    match s.to_ascii_lowercase().as_str() {
        "not-started" | "not_started" => Ok(DeliverableStatus::NotStarted),
        "in-progress" | "in_progress" => Ok(DeliverableStatus::InProgress),
        "done" | "completed" => Ok(DeliverableStatus::Done),
        _ => Err(format!(
            "unknown status `{s}`; expected not-started, in-progress or done"
        )),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    s.parse()
        .map_err(|_| format!("invalid date `{s}`; expected YYYY-MM-DD"))
}

/// Resolve a CLI project argument against the portfolio: exact id first,
/// then exact name.
fn resolve_project(engine: &Engine, needle: &str) -> anyhow::Result<Project> {
    engine
        .state()
        .projects
        .iter()
        .find(|p| p.id == needle)
        .or_else(|| engine.state().projects.iter().find(|p| p.name == needle))
        .cloned()
        .with_context(|| format!("no project with id or name `{needle}`"))
}

fn resolve_deliverable(id: &str) -> anyhow::Result<&'static str> {
    catalogue::find(id)
        .map(|def| def.id)
        .with_context(|| format!("no catalogue deliverable with id `{id}`"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store: Arc<dyn StateStore> = match &cli.store {
        Some(path) if path.extension().is_some_and(|e| e == "db") => {
            Arc::new(SqliteStore::open(path.clone())?)
        }
        Some(path) => Arc::new(JsonFileStore::new(path.clone())),
        None => Arc::new(JsonFileStore::open_default()?),
    };
    let mut engine = Engine::boot(store)?;

    match cli.command {
        Commands::List => {
            if engine.state().projects.is_empty() {
                println!("No projects yet. Add one with `ffl add <name>`.");
            }
            let projects = engine.state().projects.clone();
            for project in projects {
                let stats = engine.completion(&project.id, None);
                let selected = if engine.state().selected_project_id.as_deref()
                    == Some(project.id.as_str())
                {
                    "* "
                } else {
                    "  "
                };
                println!(
                    "{selected}{}  {} [{} / {} / {}] {}% complete ({}/{})",
                    project.id,
                    project.name,
                    project.fuel_type,
                    project.stage,
                    project.group_label(),
                    stats.percentage,
                    stats.completed,
                    stats.total,
                );
            }
        }

        Commands::Add {
            name,
            fuel,
            stage,
            group,
        } => {
            let project = Project::new(name, fuel, stage, group);
            println!("Added {} ({})", project.name, project.id);
            engine.dispatch(Action::ProjectAdd(project));
        }

        Commands::Rm { project } => {
            let project = resolve_project(&engine, &project)?;
            engine.dispatch(Action::ProjectDelete(project.id.clone()));
            println!("Deleted {} ({})", project.name, project.id);
        }

        Commands::Select { project } => match project {
            Some(needle) => {
                let project = resolve_project(&engine, &needle)?;
                println!("Selected {} ({})", project.name, project.id);
                engine.dispatch(Action::ProjectSelect(Some(project.id)));
            }
            None => {
                engine.dispatch(Action::ProjectSelect(None));
                println!("Selection cleared");
            }
        },

        Commands::Show { project } => {
            let project = match project {
                Some(needle) => resolve_project(&engine, &needle)?,
                None => engine
                    .state()
                    .selected_project()
                    .cloned()
                    .context("no project selected; pass one or run `ffl select`")?,
            };
            let overall = engine.completion(&project.id, None);
            println!(
                "{} [{} / {}]: {}% complete ({}/{})",
                project.name,
                project.fuel_type,
                project.group_label(),
                overall.percentage,
                overall.completed,
                overall.total,
            );
            for stage in Stage::ALL {
                let stats = engine.completion(&project.id, Some(stage));
                println!(
                    "  {:<17} {:>3}% ({}/{})",
                    stage.as_str(),
                    stats.percentage,
                    stats.completed,
                    stats.total
                );
            }
        }

        Commands::Set {
            project,
            deliverable,
            owner,
            start,
            end,
            status,
            comments,
        } => {
            let project = resolve_project(&engine, &project)?;
            let deliverable = resolve_deliverable(&deliverable)?;
            let patch = RecordPatch {
                owner,
                start_date: start.map(Some),
                end_date: end.map(Some),
                status,
                comments,
            };
            engine.dispatch(Action::DeliverableUpdate {
                key: RecordKey::new(project.id, deliverable),
                patch,
            });
            println!("Updated {deliverable}");
        }

        Commands::Toggle {
            project,
            deliverable,
        } => {
            let project = resolve_project(&engine, &project)?;
            let deliverable = resolve_deliverable(&deliverable)?;
            let key = RecordKey::new(project.id, deliverable);
            engine.dispatch(Action::DeliverableToggle(key.clone()));
            let status = engine
                .state()
                .deliverables
                .get(&key)
                .map(|r| r.status)
                .unwrap_or_default();
            println!("{deliverable}: {}", status.label());
        }

        Commands::Analytics {
            owner,
            stage,
            group,
            in_progress,
            completed,
        } => {
            engine.dispatch(Action::FiltersSet(FilterPatch {
                owner,
                stage: stage.map(Some),
                group,
                in_progress_only: Some(in_progress),
                completed_only: Some(completed),
                ..FilterPatch::default()
            }));
            let analytics = engine.analytics();
            println!(
                "{} items: {} completed, {} in progress, {} not started",
                analytics.total, analytics.completed, analytics.in_progress, analytics.not_started
            );
            if !analytics.by_stage.is_empty() {
                println!("By stage:");
                for (stage, count) in &analytics.by_stage {
                    println!("  {:<17} {count}", stage.as_str());
                }
            }
            if !analytics.by_area.is_empty() {
                println!("By area:");
                for (area, count) in &analytics.by_area {
                    println!("  {:<24} {count}", area.as_str());
                }
            }
            if !analytics.by_owner.is_empty() {
                println!("By owner:");
                for (owner, count) in &analytics.by_owner {
                    println!("  {owner:<24} {count}");
                }
            }
            if !analytics.by_group.is_empty() {
                println!("By group:");
                for (group, count) in &analytics.by_group {
                    println!("  {group:<24} {count}");
                }
            }
        }

        Commands::Export { format, out } => {
            let body = match format.as_str() {
                "csv" => exchange::export_csv(engine.state()),
                _ => exchange::export_json(engine.state()),
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, body)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{body}"),
            }
        }

        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let import = exchange::import_json(&raw)?;
            if let Some(warning) = &import.warning {
                eprintln!("warning: {warning}");
            }
            let projects = import.payload.projects.len();
            let records = import.payload.deliverables.len();
            engine.dispatch(Action::LoadData(import.payload));
            println!("Imported {projects} projects and {records} deliverable records");
        }

        Commands::Reset { force } => {
            if !force {
                anyhow::bail!("refusing to erase all data without --force");
            }
            engine.dispatch(Action::ResetAll);
            println!("Portfolio reset to defaults");
        }
    }

    engine.flush()?;
    Ok(())
}

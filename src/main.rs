use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use inline_colorization::{color_green, color_red, color_reset, color_yellow};

use remitdesk::api;
use remitdesk::client::ApiClient;
use remitdesk::config;
use remitdesk::models::{FileStatus, NewSchedule, Role, RemittanceKind, ScheduleFrequency};
use remitdesk::session::{evaluate, Access, Redirect, SessionManager};
use remitdesk::store::create_store;
use remitdesk::utils::logger::init_logging;

/// Console for the PF/ESI remittance processing service.
#[derive(Parser)]
#[command(name = "remitdesk", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "./config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate against the backend and persist the session.
    Login {
        username: String,
        password: String,
    },
    /// Clear the persisted session.
    Logout,
    /// Show the currently logged-in user.
    Whoami,
    /// Show processing totals and monthly volumes.
    Dashboard,
    /// Remittance file operations.
    #[command(subcommand)]
    Files(FilesCommand),
    /// Recurring report-generation jobs (requires the hr role).
    #[command(subcommand)]
    Schedules(SchedulesCommand),
    /// Print the JSON schema for the configuration file.
    Schema,
}

#[derive(Subcommand)]
enum FilesCommand {
    /// List uploaded files and their processing status.
    List {
        /// Restrict the listing to one remittance stream.
        #[arg(long)]
        kind: Option<KindArg>,
    },
    /// Upload a contribution file for a wage period.
    Upload {
        path: PathBuf,
        #[arg(long)]
        kind: KindArg,
        /// Wage period, YYYY-MM.
        #[arg(long)]
        period: String,
    },
    /// Download a processed report/challan.
    Download {
        id: String,
        /// Destination path; defaults to "<id>.download".
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SchedulesCommand {
    List,
    Create {
        name: String,
        #[arg(long)]
        kind: KindArg,
        #[arg(long)]
        frequency: FrequencyArg,
        /// Day of the remittance month the job fires on (1-28).
        #[arg(long, default_value_t = 15)]
        day: u8,
    },
    Delete {
        id: String,
    },
    Pause {
        id: String,
    },
    Resume {
        id: String,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum KindArg {
    Pf,
    Esi,
}

impl From<KindArg> for RemittanceKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Pf => RemittanceKind::Pf,
            KindArg::Esi => RemittanceKind::Esi,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum FrequencyArg {
    Monthly,
    Quarterly,
}

impl From<FrequencyArg> for ScheduleFrequency {
    fn from(value: FrequencyArg) -> Self {
        match value {
            FrequencyArg::Monthly => ScheduleFrequency::Monthly,
            FrequencyArg::Quarterly => ScheduleFrequency::Quarterly,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Schema printing needs no config or backend.
    if matches!(cli.command, Command::Schema) {
        config::print_schema();
        return;
    }

    let config = config::load_config(&cli.config);
    init_logging(&config.logging);

    let store = create_store(&config.store);
    let client = match ApiClient::new(&config.api, store.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Error building HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    let session = SessionManager::new(client.clone(), store);
    let mut events = client.subscribe();

    let outcome = run_command(cli.command, &client, &session).await;

    // The console redirected to /login on forced invalidation; here we can
    // only tell the operator their session is gone.
    if events.try_recv().is_ok() {
        eprintln!("Session expired and could not be renewed; run `remitdesk login` again.");
    }

    if let Err(message) = outcome {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

async fn run_command(
    command: Command,
    client: &Arc<ApiClient>,
    session: &SessionManager,
) -> Result<(), String> {
    match command {
        Command::Schema => Ok(()),
        Command::Login { username, password } => {
            let user = session
                .login(&username, &password)
                .await
                .map_err(|e| e.to_string())?;
            println!("Logged in as {} ({})", user.full_name, user.role);
            Ok(())
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            session.load().await;
            ensure_access(session, None)?;
            let state = session.state();
            let user = state.user.expect("guard granted access");
            println!("{} ({}), role {}", user.full_name, user.username, user.role);
            Ok(())
        }
        Command::Dashboard => {
            session.load().await;
            ensure_access(session, None)?;
            let (summary, files) = api::dashboard::overview(client)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "Files: {} total, {color_green}{} processed{color_reset}, \
                 {color_yellow}{} pending{color_reset}, {color_red}{} failed{color_reset}",
                summary.total_files, summary.processed, summary.pending, summary.failed
            );
            if !summary.monthly.is_empty() {
                println!("\nMonthly volume:");
                for month in &summary.monthly {
                    println!(
                        "  {}  {:>3} uploaded  {:>3} processed",
                        month.month, month.uploads, month.processed
                    );
                }
            }
            if let Some(latest) = files.first() {
                println!(
                    "\nLatest upload: {} ({}) {}",
                    latest.name,
                    latest.period,
                    colored_status(latest.status)
                );
            }
            Ok(())
        }
        Command::Files(command) => {
            session.load().await;
            ensure_access(session, None)?;
            run_files_command(command, client).await
        }
        Command::Schedules(command) => {
            session.load().await;
            ensure_access(session, Some(Role::Hr))?;
            run_schedules_command(command, client).await
        }
    }
}

async fn run_files_command(command: FilesCommand, client: &Arc<ApiClient>) -> Result<(), String> {
    match command {
        FilesCommand::List { kind } => {
            let files = api::files::list(client, kind.map(Into::into))
                .await
                .map_err(|e| e.to_string())?;
            if files.is_empty() {
                println!("No files uploaded yet.");
                return Ok(());
            }
            for file in files {
                println!(
                    "{:<10} {:<4} {:<8} {:<28} {}",
                    file.id,
                    file.kind,
                    file.period,
                    file.name,
                    colored_status(file.status)
                );
                if let Some(error) = file.error {
                    println!("           {color_red}{}{color_reset}", error);
                }
            }
            Ok(())
        }
        FilesCommand::Upload { path, kind, period } => {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| format!("'{}' has no file name", path.display()))?;
            let file = api::files::upload(client, &file_name, bytes, kind.into(), &period)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "Uploaded {} as {} ({})",
                file.name,
                file.id,
                colored_status(file.status)
            );
            Ok(())
        }
        FilesCommand::Download { id, out } => {
            let bytes = api::files::download(client, &id)
                .await
                .map_err(|e| e.to_string())?;
            let out = out.unwrap_or_else(|| PathBuf::from(format!("{}.download", id)));
            tokio::fs::write(&out, &bytes)
                .await
                .map_err(|e| format!("failed to write '{}': {}", out.display(), e))?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
            Ok(())
        }
    }
}

async fn run_schedules_command(
    command: SchedulesCommand,
    client: &Arc<ApiClient>,
) -> Result<(), String> {
    match command {
        SchedulesCommand::List => {
            let schedules = api::schedules::list(client)
                .await
                .map_err(|e| e.to_string())?;
            if schedules.is_empty() {
                println!("No schedules configured.");
                return Ok(());
            }
            for schedule in schedules {
                let state = if schedule.active {
                    format!("{color_green}active{color_reset}")
                } else {
                    format!("{color_yellow}paused{color_reset}")
                };
                let next_run = schedule
                    .next_run
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10} {:<24} {:<4} {:<10} day {:<3} {}  next: {}",
                    schedule.id,
                    schedule.name,
                    schedule.kind,
                    schedule.frequency,
                    schedule.day_of_month,
                    state,
                    next_run
                );
            }
            Ok(())
        }
        SchedulesCommand::Create {
            name,
            kind,
            frequency,
            day,
        } => {
            if !(1..=28).contains(&day) {
                return Err("day must be between 1 and 28".to_string());
            }
            let schedule = api::schedules::create(
                client,
                &NewSchedule {
                    name,
                    kind: kind.into(),
                    frequency: frequency.into(),
                    day_of_month: day,
                },
            )
            .await
            .map_err(|e| e.to_string())?;
            println!("Created schedule {}", schedule.id);
            Ok(())
        }
        SchedulesCommand::Delete { id } => {
            api::schedules::delete(client, &id)
                .await
                .map_err(|e| e.to_string())?;
            println!("Deleted schedule {}", id);
            Ok(())
        }
        SchedulesCommand::Pause { id } => {
            api::schedules::set_active(client, &id, false)
                .await
                .map_err(|e| e.to_string())?;
            println!("Paused schedule {}", id);
            Ok(())
        }
        SchedulesCommand::Resume { id } => {
            api::schedules::set_active(client, &id, true)
                .await
                .map_err(|e| e.to_string())?;
            println!("Resumed schedule {}", id);
            Ok(())
        }
    }
}

/// Map a guard decision to an operator-facing error.
fn ensure_access(session: &SessionManager, required: Option<Role>) -> Result<(), String> {
    match evaluate(&session.state(), required) {
        Access::Granted => Ok(()),
        Access::Pending => Err("session state is still resolving".to_string()),
        Access::Denied(Redirect::Login) => {
            Err("not logged in; run `remitdesk login <username> <password>` first".to_string())
        }
        Access::Denied(Redirect::Home) => Err("this command requires the hr role".to_string()),
    }
}

fn colored_status(status: FileStatus) -> String {
    match status {
        FileStatus::Processed => format!("{color_green}{}{color_reset}", status),
        FileStatus::Failed => format!("{color_red}{}{color_reset}", status),
        FileStatus::Pending | FileStatus::Processing => {
            format!("{color_yellow}{}{color_reset}", status)
        }
    }
}

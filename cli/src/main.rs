//! `labdesk`: command-line client for the LabDesk API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the same `labkit` pipeline as the browser client, with a `reqwest`
//! backend, a JSON session file in place of `localStorage`, and stderr in
//! place of toasts. Results print to stdout as pretty JSON.

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

mod events;
mod http;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use labkit::api::auth::LoginRequest;
use labkit::api::borrow::{self, BorrowQuery, ConfirmBorrow, ReturnBorrow};
use labkit::api::equipment::{self, EquipmentQuery};
use labkit::api::laboratory::{self, LaboratoryEquipmentQuery, LaboratoryQuery};
use labkit::api::repair::{self, RepairQuery, RepairStatsQuery, RepairStatus, UpdateRepairStatus};
use labkit::api::reservation::{self, CancelReservation, CompleteReservation, ReservationQuery};
use labkit::api::scrap::{self, ScrapQuery, ScrapStatsQuery};
use labkit::api::user::{self, UpdatePassword, UserQuery};
use labkit::api::{ApprovalRequest, BatchDeleteRequest, ai, statistics};
use labkit::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use labkit::routes::{self, RouteEntry};
use labkit::{ApiClient, ApiError, ClientConfig, SessionStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::events::StderrSink;
use crate::http::ReqwestBackend;
use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("login failed: {0}")]
    Login(String),
    #[error("not signed in; run `labdesk login` first")]
    NotSignedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl CliError {
    /// API failures were already printed by the event sink.
    fn already_reported(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}

#[derive(Parser, Debug)]
#[command(name = "labdesk", about = "LabDesk laboratory equipment management CLI")]
struct Cli {
    #[arg(long, env = "LABDESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "LABDESK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, env = "LABDESK_SESSION_FILE", help = "Session file [default: ~/.labdesk/session.json]")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "LABDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out; the local session is cleared even when the server is unreachable.
    Logout,
    /// Show the signed-in user.
    Whoami {
        #[arg(long, help = "Print the stored profile without contacting the server")]
        local: bool,
    },
    /// Print the client route table.
    Routes,
    Equipment(EquipmentCommand),
    Lab(LabCommand),
    Borrow(BorrowCommand),
    Reservation(ReservationCommand),
    Repair(RepairCommand),
    Scrap(ScrapCommand),
    Stats(StatsCommand),
    Users(UsersCommand),
    /// Ask the assistant a single question.
    Chat { message: String },
}

#[derive(Args, Debug, Clone, Default)]
struct ListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    size: Option<u32>,
    #[arg(long, help = "Extra filters as a JSON object with camelCase keys")]
    filter: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct ApprovalArgs {
    #[arg(long, requires = "remark")]
    reject: bool,
    #[arg(long)]
    remark: Option<String>,
}

#[derive(Args, Debug)]
struct EquipmentCommand {
    #[command(subcommand)]
    command: EquipmentSubcommand,
}

#[derive(Subcommand, Debug)]
enum EquipmentSubcommand {
    List(ListArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    DeleteBatch {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    SetStatus {
        id: i64,
        status_id: i64,
    },
    Statuses,
}

#[derive(Args, Debug)]
struct LabCommand {
    #[command(subcommand)]
    command: LabSubcommand,
}

#[derive(Subcommand, Debug)]
enum LabSubcommand {
    List(ListArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    DeleteBatch {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    SetStatus {
        id: i64,
        status: i32,
    },
    Equipment {
        id: i64,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        status_code: Option<String>,
    },
}

#[derive(Args, Debug)]
struct BorrowCommand {
    #[command(subcommand)]
    command: BorrowSubcommand,
}

#[derive(Subcommand, Debug)]
enum BorrowSubcommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        data: String,
    },
    Approve {
        id: i64,
        #[command(flatten)]
        decision: ApprovalArgs,
    },
    Confirm {
        id: i64,
        #[arg(long)]
        borrow_date: Option<String>,
    },
    Return {
        id: i64,
        #[arg(long)]
        actual_return_date: Option<String>,
        #[arg(long)]
        remark: Option<String>,
    },
    MarkOverdue,
    Available {
        equipment_id: i64,
    },
}

#[derive(Args, Debug)]
struct ReservationCommand {
    #[command(subcommand)]
    command: ReservationSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReservationSubcommand {
    List(ListArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Cancel {
        id: i64,
        #[arg(long)]
        remark: Option<String>,
    },
    Approve {
        id: i64,
        #[command(flatten)]
        decision: ApprovalArgs,
    },
    Complete {
        id: i64,
        #[arg(long)]
        actual_start_time: Option<String>,
        #[arg(long)]
        actual_end_time: Option<String>,
        #[arg(long)]
        usage_remark: Option<String>,
    },
    CheckConflict {
        #[arg(long)]
        data: String,
    },
    AvailableTime {
        laboratory_id: i64,
        #[arg(help = "Date as YYYY-MM-DD")]
        date: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RepairStatusArg {
    Pending,
    Repairing,
    Fixed,
    Unrepairable,
}

impl From<RepairStatusArg> for RepairStatus {
    fn from(arg: RepairStatusArg) -> Self {
        match arg {
            RepairStatusArg::Pending => Self::Pending,
            RepairStatusArg::Repairing => Self::Repairing,
            RepairStatusArg::Fixed => Self::Fixed,
            RepairStatusArg::Unrepairable => Self::Unrepairable,
        }
    }
}

#[derive(Args, Debug)]
struct RepairCommand {
    #[command(subcommand)]
    command: RepairSubcommand,
}

#[derive(Subcommand, Debug)]
enum RepairSubcommand {
    List(ListArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    SetStatus {
        id: i64,
        #[arg(value_enum)]
        status: RepairStatusArg,
        #[arg(long)]
        result: Option<String>,
        #[arg(long)]
        repair_date: Option<String>,
    },
    Stats {
        #[arg(long)]
        equipment_id: Option<i64>,
        #[arg(long, help = "Start date as YYYY-MM-DD")]
        start_date: Option<String>,
        #[arg(long, help = "End date as YYYY-MM-DD")]
        end_date: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ScrapCommand {
    #[command(subcommand)]
    command: ScrapSubcommand,
}

#[derive(Subcommand, Debug)]
enum ScrapSubcommand {
    List(ListArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Approve {
        id: i64,
        #[command(flatten)]
        decision: ApprovalArgs,
    },
    Stats {
        #[arg(long, help = "Start date as YYYY-MM-DD")]
        start_date: Option<String>,
        #[arg(long, help = "End date as YYYY-MM-DD")]
        end_date: Option<String>,
    },
}

#[derive(Args, Debug)]
struct StatsCommand {
    #[command(subcommand)]
    command: StatsSubcommand,
}

#[derive(Subcommand, Debug)]
enum StatsSubcommand {
    Usage,
    Borrows,
    Reminders,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List(ListArgs),
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    DeleteBatch {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    Password {
        id: i64,
        #[arg(long, env = "LABDESK_OLD_PASSWORD", hide_env_values = true)]
        old_password: Option<String>,
        #[arg(long, env = "LABDESK_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    Roles,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.already_reported() {
                eprintln!("error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn session_path(cli: &Cli) -> PathBuf {
    cli.session_file
        .clone()
        .unwrap_or_else(|| store::default_session_path(std::env::var_os("HOME").map(PathBuf::from)))
}

fn client_config(cli: &Cli) -> ClientConfig {
    ClientConfig::new(&cli.base_url).with_timeout(Duration::from_secs(cli.timeout_secs.max(1)))
}

fn build_client(cli: &Cli) -> Result<ApiClient, CliError> {
    let path = session_path(cli);
    tracing::debug!(path = %path.display(), "loading session");
    let session = Arc::new(SessionStore::load(Arc::new(FileStore::new(path))));
    let backend = Arc::new(ReqwestBackend::new()?);
    Ok(ApiClient::new(client_config(cli), backend, session).with_events(Arc::new(StderrSink)))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if matches!(cli.command, Command::Routes) {
        for line in route_lines() {
            println!("{line}");
        }
        return Ok(());
    }

    let api = build_client(&cli)?;
    match cli.command {
        Command::Login { username, password } => run_login(&api, &username, &password).await,
        Command::Logout => {
            api.logout().await;
            println!("signed out");
            Ok(())
        }
        Command::Whoami { local } => run_whoami(&api, local).await,
        Command::Routes => Ok(()),
        Command::Equipment(cmd) => run_equipment(&api, cmd).await,
        Command::Lab(cmd) => run_lab(&api, cmd).await,
        Command::Borrow(cmd) => run_borrow(&api, cmd).await,
        Command::Reservation(cmd) => run_reservation(&api, cmd).await,
        Command::Repair(cmd) => run_repair(&api, cmd).await,
        Command::Scrap(cmd) => run_scrap(&api, cmd).await,
        Command::Stats(cmd) => run_stats(&api, cmd).await,
        Command::Users(cmd) => run_users(&api, cmd).await,
        Command::Chat { message } => print_json(&ai::chat(&api, &message).await?),
    }
}

async fn run_login(api: &ApiClient, username: &str, password: &str) -> Result<(), CliError> {
    api.login(&LoginRequest::new(username, password))
        .await
        .map_err(CliError::Login)?;
    match api.session().user() {
        Some(profile) => print_json(&profile),
        None => Err(CliError::NotSignedIn),
    }
}

async fn run_whoami(api: &ApiClient, local: bool) -> Result<(), CliError> {
    if !api.session().is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    if local {
        return match api.session().user() {
            Some(profile) => print_json(&profile),
            None => Err(CliError::NotSignedIn),
        };
    }
    let profile = api.refresh_profile().await?;
    print_json(&profile)
}

async fn run_equipment(api: &ApiClient, cmd: EquipmentCommand) -> Result<(), CliError> {
    match cmd.command {
        EquipmentSubcommand::List(args) => {
            print_json(&equipment::list(api, &build_query::<EquipmentQuery>(&args)?).await?)
        }
        EquipmentSubcommand::Get { id } => print_json(&equipment::get(api, id).await?),
        EquipmentSubcommand::Create { data } => {
            print_json(&equipment::create(api, &parse_data(&data)?).await?)
        }
        EquipmentSubcommand::Update { id, data } => {
            print_json(&equipment::update(api, id, &parse_data(&data)?).await?)
        }
        EquipmentSubcommand::Delete { id } => {
            equipment::delete(api, id).await?;
            done(&format!("deleted equipment {id}"))
        }
        EquipmentSubcommand::DeleteBatch { ids } => {
            let count = ids.len();
            equipment::delete_batch(api, &BatchDeleteRequest::new(ids)).await?;
            done(&format!("deleted {count} equipment records"))
        }
        EquipmentSubcommand::SetStatus { id, status_id } => {
            print_json(&equipment::update_status(api, id, status_id).await?)
        }
        EquipmentSubcommand::Statuses => print_json(&equipment::statuses(api).await?),
    }
}

async fn run_lab(api: &ApiClient, cmd: LabCommand) -> Result<(), CliError> {
    match cmd.command {
        LabSubcommand::List(args) => {
            print_json(&laboratory::list(api, &build_query::<LaboratoryQuery>(&args)?).await?)
        }
        LabSubcommand::Get { id } => print_json(&laboratory::get(api, id).await?),
        LabSubcommand::Create { data } => print_json(&laboratory::create(api, &parse_data(&data)?).await?),
        LabSubcommand::Update { id, data } => {
            print_json(&laboratory::update(api, id, &parse_data(&data)?).await?)
        }
        LabSubcommand::Delete { id } => {
            laboratory::delete(api, id).await?;
            done(&format!("deleted laboratory {id}"))
        }
        LabSubcommand::DeleteBatch { ids } => {
            let count = ids.len();
            laboratory::delete_batch(api, &BatchDeleteRequest::new(ids)).await?;
            done(&format!("deleted {count} laboratories"))
        }
        LabSubcommand::SetStatus { id, status } => print_json(&laboratory::update_status(api, id, status).await?),
        LabSubcommand::Equipment { id, page, size, status_code } => {
            let query = LaboratoryEquipmentQuery { page, size, status_code };
            print_json(&laboratory::equipment(api, id, &query).await?)
        }
    }
}

async fn run_borrow(api: &ApiClient, cmd: BorrowCommand) -> Result<(), CliError> {
    match cmd.command {
        BorrowSubcommand::List(args) => print_json(&borrow::list(api, &build_query::<BorrowQuery>(&args)?).await?),
        BorrowSubcommand::Create { data } => print_json(&borrow::create(api, &parse_data(&data)?).await?),
        BorrowSubcommand::Approve { id, decision } => {
            print_json(&borrow::approve(api, id, &approval_request(&decision)).await?)
        }
        BorrowSubcommand::Confirm { id, borrow_date } => {
            print_json(&borrow::confirm(api, id, &ConfirmBorrow { borrow_date }).await?)
        }
        BorrowSubcommand::Return { id, actual_return_date, remark } => {
            let request = ReturnBorrow { actual_return_date, remark };
            print_json(&borrow::return_equipment(api, id, &request).await?)
        }
        BorrowSubcommand::MarkOverdue => print_json(&borrow::mark_overdue(api).await?),
        BorrowSubcommand::Available { equipment_id } => {
            print_json(&borrow::available_quantity(api, equipment_id).await?)
        }
    }
}

async fn run_reservation(api: &ApiClient, cmd: ReservationCommand) -> Result<(), CliError> {
    match cmd.command {
        ReservationSubcommand::List(args) => {
            print_json(&reservation::list(api, &build_query::<ReservationQuery>(&args)?).await?)
        }
        ReservationSubcommand::Get { id } => print_json(&reservation::get(api, id).await?),
        ReservationSubcommand::Create { data } => {
            print_json(&reservation::create(api, &parse_data(&data)?).await?)
        }
        ReservationSubcommand::Cancel { id, remark } => {
            print_json(&reservation::cancel(api, id, &CancelReservation { remark }).await?)
        }
        ReservationSubcommand::Approve { id, decision } => {
            print_json(&reservation::approve(api, id, &approval_request(&decision)).await?)
        }
        ReservationSubcommand::Complete { id, actual_start_time, actual_end_time, usage_remark } => {
            let request = CompleteReservation { actual_start_time, actual_end_time, usage_remark };
            print_json(&reservation::complete(api, id, &request).await?)
        }
        ReservationSubcommand::CheckConflict { data } => {
            print_json(&reservation::check_conflict(api, &parse_data(&data)?).await?)
        }
        ReservationSubcommand::AvailableTime { laboratory_id, date } => {
            print_json(&reservation::available_time(api, laboratory_id, &date).await?)
        }
    }
}

async fn run_repair(api: &ApiClient, cmd: RepairCommand) -> Result<(), CliError> {
    match cmd.command {
        RepairSubcommand::List(args) => print_json(&repair::list(api, &build_query::<RepairQuery>(&args)?).await?),
        RepairSubcommand::Get { id } => print_json(&repair::get(api, id).await?),
        RepairSubcommand::Create { data } => print_json(&repair::create(api, &parse_data(&data)?).await?),
        RepairSubcommand::SetStatus { id, status, result, repair_date } => {
            let mut request = UpdateRepairStatus::new(status.into());
            request.repair_result = result;
            request.repair_date = repair_date;
            print_json(&repair::update_status(api, id, &request).await?)
        }
        RepairSubcommand::Stats { equipment_id, start_date, end_date } => {
            let query = RepairStatsQuery { equipment_id, start_date, end_date };
            print_json(&repair::stats(api, &query).await?)
        }
    }
}

async fn run_scrap(api: &ApiClient, cmd: ScrapCommand) -> Result<(), CliError> {
    match cmd.command {
        ScrapSubcommand::List(args) => print_json(&scrap::list(api, &build_query::<ScrapQuery>(&args)?).await?),
        ScrapSubcommand::Get { id } => print_json(&scrap::get(api, id).await?),
        ScrapSubcommand::Create { data } => print_json(&scrap::create(api, &parse_data(&data)?).await?),
        ScrapSubcommand::Approve { id, decision } => {
            print_json(&scrap::approve(api, id, &approval_request(&decision)).await?)
        }
        ScrapSubcommand::Stats { start_date, end_date } => {
            print_json(&scrap::stats(api, &ScrapStatsQuery { start_date, end_date }).await?)
        }
    }
}

async fn run_stats(api: &ApiClient, cmd: StatsCommand) -> Result<(), CliError> {
    match cmd.command {
        StatsSubcommand::Usage => print_json(&statistics::equipment_usage(api).await?),
        StatsSubcommand::Borrows => print_json(&statistics::borrow_stats(api).await?),
        StatsSubcommand::Reminders => print_json(&statistics::reminders(api).await?),
    }
}

async fn run_users(api: &ApiClient, cmd: UsersCommand) -> Result<(), CliError> {
    match cmd.command {
        UsersSubcommand::List(args) => print_json(&user::list(api, &build_query::<UserQuery>(&args)?).await?),
        UsersSubcommand::Get { id } => print_json(&user::get(api, id).await?),
        UsersSubcommand::Create { data } => print_json(&user::create(api, &parse_data(&data)?).await?),
        UsersSubcommand::Update { id, data } => print_json(&user::update(api, id, &parse_data(&data)?).await?),
        UsersSubcommand::Delete { id } => {
            user::delete(api, id).await?;
            done(&format!("deleted user {id}"))
        }
        UsersSubcommand::DeleteBatch { ids } => {
            let count = ids.len();
            user::delete_batch(api, &BatchDeleteRequest::new(ids)).await?;
            done(&format!("deleted {count} users"))
        }
        UsersSubcommand::Password { id, old_password, new_password } => {
            user::update_password(api, id, &UpdatePassword { old_password, new_password }).await?;
            done(&format!("password updated for user {id}"))
        }
        UsersSubcommand::Roles => print_json(&user::roles(api).await?),
    }
}

fn approval_request(args: &ApprovalArgs) -> ApprovalRequest {
    match (args.reject, args.remark.as_deref()) {
        (true, remark) => ApprovalRequest::reject(remark.unwrap_or_default()),
        (false, Some(remark)) => ApprovalRequest::approve().with_remark(remark),
        (false, None) => ApprovalRequest::approve(),
    }
}

/// Merge `--filter` with `--page`/`--size` into a typed list query.
fn build_query<Q: DeserializeOwned>(args: &ListArgs) -> Result<Q, CliError> {
    let mut filters = match args.filter.as_deref() {
        Some(raw) => parse_object(raw)?,
        None => Map::new(),
    };
    if let Some(page) = args.page {
        filters.insert("page".to_owned(), Value::from(page));
    }
    if let Some(size) = args.size {
        filters.insert("size".to_owned(), Value::from(size));
    }
    Ok(serde_json::from_value(Value::Object(filters))?)
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, CliError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::NotAnObject(other.to_string())),
    }
}

fn parse_data<T: DeserializeOwned>(raw: &str) -> Result<T, CliError> {
    Ok(serde_json::from_value(Value::Object(parse_object(raw)?))?)
}

fn route_lines() -> Vec<String> {
    let mut lines = Vec::new();
    collect_routes(routes::ROUTES, &mut lines);
    lines
}

fn collect_routes(entries: &'static [RouteEntry], lines: &mut Vec<String>) {
    for entry in entries {
        let access = if routes::requires_auth(entry.path) { "auth" } else { "public" };
        lines.push(format!("{:<24} {:<7} {}", entry.path, access, entry.title));
        collect_routes(entry.children, lines);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn done(message: &str) -> Result<(), CliError> {
    println!("{message}");
    Ok(())
}

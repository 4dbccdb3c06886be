use clap::CommandFactory;
use labkit::api::ApprovalDecision;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("labdesk").chain(args.iter().copied())).expect("valid arguments")
}

#[test]
fn command_tree_is_well_formed() {
    Cli::command().debug_assert();
}

#[test]
fn global_flags_configure_the_client() {
    let cli = parse(&["--base-url", "http://lab.test/api/v1/", "--timeout-secs", "3", "routes"]);
    let config = client_config(&cli);
    assert_eq!(config.base_url, "http://lab.test/api/v1");
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn zero_timeout_is_raised_to_one_second() {
    let cli = parse(&["--timeout-secs", "0", "routes"]);
    assert_eq!(client_config(&cli).timeout, Duration::from_secs(1));
}

#[test]
fn session_file_flag_overrides_default_location() {
    let cli = parse(&["--session-file", "/tmp/labdesk.json", "logout"]);
    assert_eq!(session_path(&cli), PathBuf::from("/tmp/labdesk.json"));
}

#[test]
fn login_takes_username_and_password() {
    let cli = parse(&["login", "--username", "alice", "--password", "pw"]);
    let Command::Login { username, password } = cli.command else {
        panic!("expected login");
    };
    assert_eq!(username, "alice");
    assert_eq!(password, "pw");
}

#[test]
fn reject_requires_a_remark() {
    let missing = Cli::try_parse_from(["labdesk", "borrow", "approve", "7", "--reject"]);
    assert!(missing.is_err());

    let cli = parse(&["borrow", "approve", "7", "--reject", "--remark", "broken"]);
    let Command::Borrow(BorrowCommand { command: BorrowSubcommand::Approve { id, decision } }) = cli.command else {
        panic!("expected borrow approve");
    };
    assert_eq!(id, 7);
    let request = approval_request(&decision);
    assert_eq!(request.status, ApprovalDecision::Reject);
    assert_eq!(request.remark.as_deref(), Some("broken"));
}

#[test]
fn approval_defaults_to_approve_without_remark() {
    let request = approval_request(&ApprovalArgs::default());
    assert_eq!(request, ApprovalRequest::approve());

    let with_note = approval_request(&ApprovalArgs { reject: false, remark: Some("ok".to_owned()) });
    assert_eq!(with_note.status, ApprovalDecision::Approve);
    assert_eq!(with_note.remark.as_deref(), Some("ok"));
}

#[test]
fn repair_status_parses_as_value_enum() {
    let cli = parse(&["repair", "set-status", "3", "fixed", "--result", "replaced fuse"]);
    let Command::Repair(RepairCommand { command: RepairSubcommand::SetStatus { id, status, result, .. } }) = cli.command
    else {
        panic!("expected repair set-status");
    };
    assert_eq!(id, 3);
    assert_eq!(RepairStatus::from(status), RepairStatus::Fixed);
    assert_eq!(result.as_deref(), Some("replaced fuse"));

    assert!(Cli::try_parse_from(["labdesk", "repair", "set-status", "3", "done"]).is_err());
}

#[test]
fn delete_batch_requires_ids() {
    assert!(Cli::try_parse_from(["labdesk", "equipment", "delete-batch"]).is_err());
    let cli = parse(&["equipment", "delete-batch", "1", "2", "3"]);
    let Command::Equipment(EquipmentCommand { command: EquipmentSubcommand::DeleteBatch { ids } }) = cli.command else {
        panic!("expected delete-batch");
    };
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn build_query_merges_filter_with_paging() {
    let args = ListArgs {
        page: Some(2),
        size: Some(20),
        filter: Some(r#"{"name":"scope","laboratoryId":4,"page":9}"#.to_owned()),
    };
    let query: EquipmentQuery = build_query(&args).expect("query");
    assert_eq!(query.page, Some(2));
    assert_eq!(query.size, Some(20));
    assert_eq!(query.name.as_deref(), Some("scope"));
    assert_eq!(query.laboratory_id, Some(4));
}

#[test]
fn build_query_without_flags_is_empty() {
    let query: BorrowQuery = build_query(&ListArgs::default()).expect("query");
    assert_eq!(query, BorrowQuery::default());
}

#[test]
fn build_query_rejects_non_object_filters() {
    let args = ListArgs { filter: Some("[1,2]".to_owned()), ..ListArgs::default() };
    assert!(matches!(build_query::<BorrowQuery>(&args), Err(CliError::NotAnObject(_))));

    let args = ListArgs { filter: Some("{".to_owned()), ..ListArgs::default() };
    assert!(matches!(build_query::<BorrowQuery>(&args), Err(CliError::InvalidJson(_))));
}

#[test]
fn parse_data_builds_typed_bodies() {
    let request: labkit::api::repair::CreateRepair =
        parse_data(r#"{"equipmentId":5,"reportDate":"2024-03-01","faultDescription":"no power"}"#).expect("body");
    assert_eq!(request.equipment_id, 5);
    assert_eq!(request.fault_description, "no power");

    assert!(matches!(
        parse_data::<labkit::api::repair::CreateRepair>(r#"{"equipmentId":5}"#),
        Err(CliError::InvalidJson(_))
    ));
}

#[test]
fn route_lines_mark_public_and_protected_routes() {
    let lines = route_lines();
    let login = lines.iter().find(|l| l.starts_with("/login ")).expect("login route");
    assert!(login.contains("public"));
    let equipment = lines.iter().find(|l| l.starts_with("/equipment ")).expect("equipment route");
    assert!(equipment.contains("auth"));
    assert!(lines.iter().any(|l| l.starts_with("/scrap/approval ")));
}

#[test]
fn only_api_errors_count_as_already_reported() {
    assert!(CliError::Api(ApiError::network()).already_reported());
    assert!(!CliError::NotSignedIn.already_reported());
    assert!(!CliError::Login("login failed".to_owned()).already_reported());
}

#[test]
fn repair_stats_takes_equipment_and_date_range() {
    let cli = parse(&["repair", "stats", "--equipment-id", "12", "--start-date", "2024-01-01", "--end-date", "2024-06-30"]);
    let Command::Repair(RepairCommand { command: RepairSubcommand::Stats { equipment_id, start_date, end_date } }) =
        cli.command
    else {
        panic!("expected repair stats");
    };
    assert_eq!(equipment_id, Some(12));
    assert_eq!(start_date.as_deref(), Some("2024-01-01"));
    assert_eq!(end_date.as_deref(), Some("2024-06-30"));

    assert!(Cli::try_parse_from(["labdesk", "repair", "stats", "--status", "1"]).is_err());
}

//! End-to-end shell sessions against a scripted backend

mod support;

use std::sync::Arc;

use support::{run_script, ScriptedApi};

#[tokio::test]
async fn commands_require_login() {
    let output = run_script(Arc::new(ScriptedApi::standard()), "list\nwhoami\nquit\n").await;
    assert_eq!(
        output.matches("Login session is invalid. Please log out and log in again.").count(),
        2
    );
}

#[tokio::test]
async fn login_by_name_and_list_own_rows() {
    let script = "login Andi Wijaya\nrahasia\nwhoami\nlist\nquit\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    assert!(output.contains("Welcome, Andi Wijaya"));
    assert!(output.contains("Group: SMB"));
    assert!(output.contains("salesdesk [SMB]> "));
    assert!(output.contains("Found 2 solutions for you."));
    assert!(output.contains("U-1"));
    assert!(output.contains("2,500,000"));
    assert!(!output.contains("U-3"));
}

#[tokio::test]
async fn login_from_numbered_list() {
    let script = "login\n2\nrahasia\nlist\nquit\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    assert!(output.contains(" 1. Andi Wijaya"));
    assert!(output.contains(" 2. Sari Dewi"));
    assert!(output.contains("Welcome, Sari Dewi"));
    assert!(output.contains("Found 3 solutions for you."));
}

#[tokio::test]
async fn wrong_password_keeps_shell_running() {
    let script = "login Andi Wijaya\nsalah\nlogin Andi Wijaya\n\nquit\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    assert!(output.contains("Invalid password"));
    assert!(output.contains("Please select your name and enter your password."));
    assert!(!output.contains("Welcome"));
}

#[tokio::test]
async fn totals_and_search() {
    let script = "login Andi Wijaya\nrahasia\ntotals\n\
                  search company PT Nusantara Data\nsearch brand Cisco\nquit\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    assert!(output.contains("4,000,000"));
    assert!(output.contains("Grand total: 4,000,000"));
    assert!(output.contains("Found 2 matching solution(s)."));
    assert!(output.contains("No solution found with the given criteria in your scope."));
}

#[tokio::test]
async fn stage_update_only_for_editable_opportunities() {
    let api = Arc::new(ScriptedApi::standard());
    let script = "login Andi Wijaya\nrahasia\nstage OPP-1 won\nstage OPP-2 lost\nquit\n";
    let output = run_script(Arc::clone(&api), script).await;

    assert!(output.contains("Update successful."));
    assert!(output.contains("Opportunity OPP-2 is not available to you."));
    assert_eq!(api.posted(), vec!["stage:OPP-1:Closed Won:initial".to_string()]);
}

#[tokio::test]
async fn bulk_price_update_reports_counts() {
    let api = Arc::new(ScriptedApi::standard().rejecting_price_for("U-1"));
    let script = "login Andi Wijaya\nrahasia\nprice OPP-1 U-2=3,000,000\nquit\n";
    let output = run_script(Arc::clone(&api), script).await;

    assert!(output.contains("Updating price for solution 1/2..."));
    assert!(output.contains("Updating price for solution 2/2..."));
    assert!(output.contains("1 of 2 solution prices updated."));
    assert!(output.contains("1 of 2 solution prices failed to update."));
    assert!(output.contains("U-1: Row is locked"));
    assert_eq!(
        api.posted(),
        vec!["price:U-1:1500000".to_string(), "price:U-2:3000000".to_string()]
    );
}

#[tokio::test]
async fn lump_sum_uses_backend_message() {
    let api = Arc::new(ScriptedApi::standard());
    let script = "login Andi Wijaya\nrahasia\nlumpsum OPP-1 5000000\nquit\n";
    let output = run_script(Arc::clone(&api), script).await;

    assert!(output.contains("Price updated."));
    assert_eq!(api.posted(), vec!["lumpsum:OPP-1:5000000:Andi Wijaya".to_string()]);
}

#[tokio::test]
async fn activity_is_shown_newest_first_in_local_time() {
    let script = "login Andi Wijaya\nrahasia\nactivity\nquit\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    let newer = output.find("2024-03-02 09:00:00").unwrap();
    let older = output.find("2024-03-01 09:00:00").unwrap();
    assert!(newer < older);
}

#[tokio::test]
async fn password_change_ends_session() {
    let api = Arc::new(ScriptedApi::standard());
    let script = "login Andi Wijaya\nrahasia\npasswd\nrahasia\nbaru\nwhoami\nquit\n";
    let output = run_script(Arc::clone(&api), script).await;

    assert!(output.contains("Password changed. Please log in again."));
    assert!(output.contains("Login session is invalid."));
    assert_eq!(api.posted(), vec!["passwd:Andi Wijaya".to_string()]);
}

#[tokio::test]
async fn usage_errors_are_reported_inline() {
    let script = "frobnicate\nsearch region west\nlogin \"Andi\nrefresh\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    assert!(output.contains("frobnicate"));
    assert!(output.contains("unterminated \" quote"));
    assert!(output.contains("Cached data cleared."));
}

#[tokio::test]
async fn lookup_lists_reference_rows() {
    let script = "login Andi Wijaya\nrahasia\nlookup pillars\nlookup brands\nquit\n";
    let output = run_script(Arc::new(ScriptedApi::standard()), script).await;

    assert!(output.contains("Infrastructure"));
    assert!(output.contains("No data available."));
}

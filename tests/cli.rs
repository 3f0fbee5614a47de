use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "pocket";

fn pocket(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("POCKET_LEDGER_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn add(data_dir: &TempDir, kind: &str, description: &str, amount: &str, date: &str) -> String {
    let output = pocket(data_dir)
        .args(["add", kind, description, amount, "--date", date])
        .output()
        .expect("command runs");
    assert!(output.status.success(), "add failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf-8 output")
}

fn short_id(add_output: &str) -> String {
    add_output
        .lines()
        .find_map(|line| line.strip_prefix("Short ID:"))
        .map(|id| id.trim().to_string())
        .expect("short id in output")
}

#[test]
fn fresh_ledger_has_zero_balance() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("Current balance: $0.00"))
        .stdout(contains("Transactions:    0"));
}

#[test]
fn add_and_report_month() {
    let dir = TempDir::new().unwrap();

    let salary = add(&dir, "income", "Salary", "1000", "2024-03-01");
    assert!(salary.contains("[+] Income added"));
    let rent = add(&dir, "expense", "Rent", "400", "2024-03-05");
    assert!(rent.contains("[+] Expense added"));
    assert!(rent.contains("Balance:     $600.00"));

    pocket(&dir)
        .args(["report", "month", "--month", "3", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("March 2024"))
        .stdout(contains("$1000.00"))
        .stdout(contains("$400.00"))
        .stdout(contains("$600.00"));

    pocket(&dir)
        .args(["report", "month", "--month", "2", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("February 2024"))
        .stdout(contains("No transactions in February 2024."));
}

#[test]
fn state_survives_between_runs() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .args(["balance", "set", "-50.25"])
        .assert()
        .success()
        .stdout(contains("Initial balance set to -$50.25"));

    add(&dir, "income", "Gift", "100", "2024-06-10");

    pocket(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("Current balance: $49.75"))
        .stdout(contains("Initial balance: -$50.25"));

    assert!(dir.path().join("data").join("initial_balance").exists());
    assert!(dir.path().join("data").join("transactions").exists());
}

#[test]
fn remove_by_short_id() {
    let dir = TempDir::new().unwrap();

    add(&dir, "income", "Salary", "1000", "2024-03-01");
    let rent = add(&dir, "expense", "Rent", "400", "2024-03-05");
    let id = short_id(&rent);

    pocket(&dir)
        .args(["remove", &id])
        .assert()
        .success()
        .stdout(contains("Transaction removed"))
        .stdout(contains("Balance: $1000.00"));

    pocket(&dir)
        .args(["remove", &id])
        .assert()
        .success()
        .stdout(contains("nothing removed"));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .args(["add", "expense", "Coffee", "-3"])
        .assert()
        .failure()
        .stderr(contains("Amount must be greater than zero"));

    pocket(&dir)
        .args(["add", "expense", "Coffee", "three"])
        .assert()
        .failure()
        .stderr(contains("Invalid money format"));

    pocket(&dir)
        .args(["add", "expense", "   ", "3"])
        .assert()
        .failure()
        .stderr(contains("Invalid input"));

    for _ in 0..2 {
        pocket(&dir)
            .args(["add", "income", "Big", "92233720368547758"])
            .assert()
            .failure()
            .stderr(contains("Amount is too large"));
    }

    pocket(&dir)
        .args(["balance", "set", "-92233720368547758"])
        .assert()
        .failure()
        .stderr(contains("Amount is too large"));

    pocket(&dir)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("Transactions:    0"));
}

#[test]
fn clear_requires_confirmation_and_keeps_initial_balance() {
    let dir = TempDir::new().unwrap();

    pocket(&dir).args(["balance", "set", "250"]).assert().success();
    add(&dir, "income", "Salary", "1000", "2024-03-01");

    pocket(&dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(contains("--yes"));

    pocket(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("All transactions removed"))
        .stdout(contains("Balance: $250.00"));
}

#[test]
fn list_filters_and_totals() {
    let dir = TempDir::new().unwrap();

    add(&dir, "income", "Salary", "1000", "2024-03-01");
    add(&dir, "expense", "Supermarket", "80.50", "2024-03-08");
    add(&dir, "expense", "Rent", "400", "2023-11-05");

    pocket(&dir)
        .args(["list", "--kind", "expense", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("Supermarket"))
        .stdout(contains("Rent").not())
        .stdout(contains("1 transaction(s)"));

    pocket(&dir)
        .args(["list", "--search", "SUPER"])
        .assert()
        .success()
        .stdout(contains("-$80.50"));

    pocket(&dir)
        .args(["list", "--month", "13"])
        .assert()
        .failure()
        .stderr(contains("Month must be between 1 and 12"));
}

#[test]
fn annual_report_and_years() {
    let dir = TempDir::new().unwrap();

    add(&dir, "income", "Salary", "1000", "2024-03-01");
    add(&dir, "expense", "Rent", "400", "2021-03-05");

    pocket(&dir)
        .args(["report", "year", "--year", "2024"])
        .assert()
        .success()
        .stdout(contains("Year 2024"))
        .stdout(contains("January"))
        .stdout(contains("December"))
        .stdout(contains("Total"));

    pocket(&dir)
        .arg("years")
        .assert()
        .success()
        .stdout(contains("2024"))
        .stdout(contains("2021"))
        .stdout(contains("(current)"));
}

#[test]
fn export_csv_and_json() {
    let dir = TempDir::new().unwrap();
    add(&dir, "expense", "Rent, March", "400", "2024-03-05");

    pocket(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(contains("id,timestamp,kind,description,amount,signed_amount"))
        .stdout(contains("\"Rent, March\",400.00,-400.00"));

    let out = dir.path().join("ledger.json");
    pocket(&dir)
        .args(["export", "json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Exported 1 transaction(s)"));

    let json = std::fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"schema_version\""));
    assert!(json.contains("Rent, March"));

    pocket(&dir)
        .args(["export", "yaml"])
        .assert()
        .failure()
        .stderr(contains("Unknown export format"));
}

#[test]
fn malformed_store_is_reported() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("transactions"), "{ not json").unwrap();

    pocket(&dir)
        .arg("balance")
        .assert()
        .failure()
        .stderr(contains("Persistence error").and(contains("malformed")));
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    pocket(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Data directory"))
        .stdout(contains("Currency symbol: $"));
}

// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::path::Path;

use expense_tracker::{
    logging,
    view::{expense_rows, format_money, validation_message, SummaryFields},
    CategoryFilter, Config, ExpenseInput, ExpenseRepository, KeyValueStore, Tracker, VERSION,
};

const USAGE: &str = "\
Usage: expense-tracker [COMMAND]

Commands:
  ui                                          Interactive terminal UI (default)
  add <description> <amount> <category> <date>
  delete <id>
  list [category|all]
  summary [category|all]
  categories
  export <file.csv> [category|all]
  --version";

// Process exit statuses
const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("ui");

    match command {
        "help" | "--help" | "-h" => {
            println!("{}", USAGE);
            return Ok(());
        }
        "version" | "--version" | "-V" => {
            println!("expense-tracker {}", VERSION);
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    if command == "ui" {
        logging::init_file(&config.log_level, &config.log_path())?;
    } else {
        logging::init_stderr(&config.log_level)?;
    }

    let storage = config.open_storage()?;
    let mut tracker = Tracker::open(ExpenseRepository::with_key(storage, config.storage_key.clone()));

    if command == "ui" {
        return run_ui_mode(tracker);
    }

    let status = run_command(&mut tracker, command, &args[1..])?;
    if status != EXIT_OK {
        std::process::exit(status);
    }
    Ok(())
}

/// Run one non-interactive command and return the process exit status
fn run_command<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    command: &str,
    args: &[String],
) -> Result<i32> {
    match command {
        "add" => Ok(run_add(tracker, args)),
        "delete" => Ok(run_delete(tracker, args)),
        "list" => {
            tracker.set_filter(filter_arg(args.first()));
            print_list(tracker);
            Ok(EXIT_OK)
        }
        "summary" => {
            tracker.set_filter(filter_arg(args.first()));
            print_summary(tracker);
            Ok(EXIT_OK)
        }
        "categories" => {
            for category in tracker.store().list_categories() {
                println!("{}", category);
            }
            Ok(EXIT_OK)
        }
        "export" => run_export(tracker, args),
        other => {
            eprintln!("❌ Unknown command: {}", other);
            eprintln!("{}", USAGE);
            Ok(EXIT_USAGE)
        }
    }
}

fn filter_arg(arg: Option<&String>) -> CategoryFilter {
    arg.map(|value| CategoryFilter::parse(value))
        .unwrap_or_default()
}

fn save_status<S: KeyValueStore>(tracker: &Tracker<S>) -> i32 {
    match tracker.last_save_error() {
        Some(error) => {
            eprintln!("❌ Could not save expenses: {}", error);
            EXIT_FAILURE
        }
        None => EXIT_OK,
    }
}

fn run_add<S: KeyValueStore>(tracker: &mut Tracker<S>, args: &[String]) -> i32 {
    if args.len() != 4 {
        eprintln!("❌ add expects exactly 4 arguments");
        eprintln!("{}", USAGE);
        return EXIT_USAGE;
    }

    let input = ExpenseInput::new(&args[0], &args[1], &args[2], &args[3]);
    match tracker.add_expense(&input) {
        Ok(expense) => {
            println!(
                "✓ Added {} ({}) {} on {}  [id {}]",
                expense.description,
                expense.category,
                format_money(expense.amount),
                expense.date,
                expense.id
            );
            save_status(tracker)
        }
        Err(e) => {
            eprintln!("❌ {}", validation_message(&e));
            EXIT_FAILURE
        }
    }
}

fn run_delete<S: KeyValueStore>(tracker: &mut Tracker<S>, args: &[String]) -> i32 {
    let id = match args.first().map(|raw| raw.parse::<i64>()) {
        Some(Ok(id)) => id,
        Some(Err(_)) => {
            eprintln!("❌ Invalid expense id {:?}", args[0]);
            return EXIT_USAGE;
        }
        None => {
            eprintln!("❌ delete expects an expense id");
            eprintln!("{}", USAGE);
            return EXIT_USAGE;
        }
    };

    let removed = tracker.delete_expense(id);
    if removed {
        println!("✓ Deleted expense {}", id);
    } else {
        println!("No expense with id {}", id);
    }
    save_status(tracker)
}

fn run_export<S: KeyValueStore>(tracker: &mut Tracker<S>, args: &[String]) -> Result<i32> {
    let path = match args.first() {
        Some(path) => path,
        None => {
            eprintln!("❌ export expects a file path");
            eprintln!("{}", USAGE);
            return Ok(EXIT_USAGE);
        }
    };
    tracker.set_filter(filter_arg(args.get(1)));

    let view = tracker.view();
    let count = expense_tracker::export_csv(Path::new(path), &view.expenses)
        .with_context(|| format!("Export to {} failed", path))?;
    println!("✓ Exported {} expenses to {}", count, path);
    Ok(EXIT_OK)
}

fn print_list<S: KeyValueStore>(tracker: &Tracker<S>) {
    let view = tracker.view();
    if view.expenses.is_empty() {
        println!("No expenses.");
        return;
    }

    for row in expense_rows(&view.expenses) {
        println!("{:>15}  {}", row.id, row.line());
    }
}

fn print_summary<S: KeyValueStore>(tracker: &Tracker<S>) {
    let view = tracker.view();
    let fields = SummaryFields::from(&view.summary);

    println!("📊 Summary ({})", view.filter);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Total:   {}", fields.total);
    println!("  Count:   {}", fields.count);
    println!("  Average: {}", fields.average);

    if !view.by_category.is_empty() {
        println!("\nSpending by Category");
        for (category, total) in &view.by_category {
            println!("  {:<20} {:>11}", category, format_money(*total));
        }
    }

    if !view.by_date.is_empty() {
        println!("\nSpending Over Time");
        for (date, total) in &view.by_date {
            println!("  {:<20} {:>11}", date, format_money(*total));
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode<S: KeyValueStore>(tracker: Tracker<S>) -> Result<()> {
    let mut app = ui::App::new(tracker);
    ui::run_ui(&mut app)?;

    println!("✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode<S: KeyValueStore>(_tracker: Tracker<S>) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a command, e.g.: expense-tracker summary");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use expense_tracker::MemoryStore;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::open(ExpenseRepository::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_command() {
        let mut tracker = tracker();
        let status = run_command(&mut tracker, "add", &args(&["Coffee", "3.5", "Food", "2024-01-01"]))
            .unwrap();

        assert_eq!(status, EXIT_OK);
        assert_eq!(tracker.store().len(), 1);
        assert_eq!(tracker.repository().store().write_count(), 1);
    }

    #[test]
    fn test_add_with_bad_amount_fails() {
        let mut tracker = tracker();
        let status = run_command(&mut tracker, "add", &args(&["Coffee", "abc", "Food", "2024-01-01"]))
            .unwrap();

        assert_eq!(status, EXIT_FAILURE);
        assert!(tracker.store().is_empty());
        assert_eq!(tracker.repository().store().write_count(), 0);
    }

    #[test]
    fn test_add_with_missing_argument_is_usage_error() {
        let mut tracker = tracker();
        let status = run_command(&mut tracker, "add", &args(&["Coffee", "3.5", "Food"])).unwrap();

        assert_eq!(status, EXIT_USAGE);
        assert!(tracker.store().is_empty());
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        let mut tracker = tracker();
        assert_eq!(run_command(&mut tracker, "frobnicate", &[]).unwrap(), EXIT_USAGE);
    }

    #[test]
    fn test_delete_command() {
        let mut tracker = tracker();
        let coffee = tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();

        assert_eq!(run_command(&mut tracker, "delete", &args(&["abc"])).unwrap(), EXIT_USAGE);
        assert_eq!(run_command(&mut tracker, "delete", &[]).unwrap(), EXIT_USAGE);
        assert_eq!(tracker.store().len(), 1);

        let id = coffee.id.to_string();
        let status = run_command(&mut tracker, "delete", &args(&[id.as_str()])).unwrap();
        assert_eq!(status, EXIT_OK);
        assert!(tracker.store().is_empty());
    }

    #[test]
    fn test_export_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food.csv");
        let mut tracker = tracker();
        tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();
        tracker
            .add_expense(&ExpenseInput::new("Bus", "2.0", "Transport", "2024-01-01"))
            .unwrap();

        let status = run_command(
            &mut tracker,
            "export",
            &args(&[path.to_str().unwrap(), "Food"]),
        )
        .unwrap();

        assert_eq!(status, EXIT_OK);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(run_command(&mut tracker, "export", &[]).unwrap(), EXIT_USAGE);
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{handle_expense_command, handle_income_command};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::display::format_summary;
use tally::reports::LedgerSummary;
use tally::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Track income and expenses from the terminal",
    long_about = "Tally keeps a ledger of expenses and income in local JSON files. \
                  Records can be added one at a time or imported from CSV and \
                  Excel spreadsheets, where a file is accepted only if every \
                  row is valid."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense commands
    #[command(subcommand)]
    Expense(tally::cli::ExpenseCommands),

    /// Income commands
    #[command(subcommand)]
    Income(tally::cli::IncomeCommands),

    /// Income versus expense summary
    Summary,

    /// Show current configuration and paths
    Config {
        /// Write the settings file (with defaults for anything unset)
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str()),
    )
    .init();

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Summary) => {
            let summary = LedgerSummary::generate(&storage, settings.recent_count)?;
            print!("{}", format_summary(&summary, &settings.currency_symbol));
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Wrote settings to {}", paths.settings_file().display());
                println!();
            }
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Expenses:       {}", paths.expenses_file().display());
            println!("Incomes:        {}", paths.incomes_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Recent records:  {}", settings.recent_count);
            println!("  Log filter:      {}", settings.log_filter);
        }
        None => {
            println!("Tally - income and expense tracking");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}

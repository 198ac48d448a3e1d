use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use spendcast::cli::{
    handle_add, handle_budget_command, handle_clear, handle_dashboard, handle_export,
    handle_forecast, handle_import, handle_list, handle_suggest, handle_trends, BudgetCommands,
    ExportFormat,
};
use spendcast::config::{paths::SpendPaths, settings::Settings};
use spendcast::logging::init_logging;
use spendcast::services::EXTRACTION_INSTRUCTIONS;
use spendcast::storage::open_ledger;

#[derive(Parser)]
#[command(
    name = "spendcast",
    author = "Kaylee Beyene",
    version,
    about = "Personal spending analytics and forecasting",
    long_about = "SpendCast records your expenses, summarizes where the money goes, \
                  and projects the next 30 days of spending from your recent trend."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category (Food, Transportation, Utilities, Entertainment, Healthcare, Other)
        #[arg(short, long)]
        category: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Delete every recorded expense
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show totals, category breakdown, budget usage, and forecast
    Dashboard {
        /// Report as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Predict the next 30 days of spending
    Forecast {
        /// Only use expenses up to this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show month-by-month spending
    Trends {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Budget limit commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Import expenses from a saved receipt extraction response
    Import {
        /// Response file, or "-" for stdin
        #[arg(required_unless_present = "prompt")]
        file: Option<PathBuf>,
        /// Print the extraction instructions to send with a receipt image
        #[arg(long)]
        prompt: bool,
        /// Validate and show the expenses without saving them
        #[arg(long)]
        dry_run: bool,
    },

    /// Get saving tips for the top spending categories
    Suggest {
        /// Command that reads a prompt on stdin and prints a tip
        #[arg(long, env = "SPENDCAST_SUGGEST_COMMAND")]
        command: Option<String>,
    },

    /// Export expenses to a file
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SpendPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_logging(settings.log_format);

    let ledger = open_ledger(&paths)?;

    match cli.command {
        Some(Commands::Add {
            amount,
            category,
            description,
            date,
        }) => {
            handle_add(
                &ledger,
                &settings,
                &amount,
                category.as_deref(),
                description,
                date.as_deref(),
            )?;
        }
        Some(Commands::List { category, limit }) => {
            handle_list(&ledger, &settings, category.as_deref(), limit)?;
        }
        Some(Commands::Clear { yes }) => handle_clear(&ledger, yes)?,
        Some(Commands::Dashboard { as_of, json }) => {
            handle_dashboard(&ledger, &settings, as_of.as_deref(), json)?;
        }
        Some(Commands::Forecast { as_of, json }) => {
            handle_forecast(&ledger, &settings, as_of.as_deref(), json)?;
        }
        Some(Commands::Trends { json }) => handle_trends(&ledger, &settings, json)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&ledger, &settings, cmd)?,
        Some(Commands::Import {
            file,
            prompt,
            dry_run,
        }) => match file {
            Some(file) if !prompt => handle_import(&ledger, &settings, &file, dry_run)?,
            _ => println!("{}", EXTRACTION_INSTRUCTIONS),
        },
        Some(Commands::Suggest { command }) => {
            handle_suggest(&ledger, &settings, command.as_deref())?;
        }
        Some(Commands::Export { output, format }) => handle_export(&ledger, &output, format)?,
        Some(Commands::Config) => {
            println!("SpendCast Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Log format:         {:?}", settings.log_format);
            println!(
                "  Suggestion command: {}",
                settings.suggestion_command.as_deref().unwrap_or("(none)")
            );
            println!("  Budget limit:       {}", ledger.budget_limit()?);
        }
        None => {
            println!("SpendCast - personal spending analytics");
            println!();
            println!("Run 'spendcast --help' for usage information.");
            println!("Run 'spendcast add 12.50 -c Food' to record your first expense.");
        }
    }

    Ok(())
}

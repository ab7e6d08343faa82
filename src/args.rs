use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::report::ReportFormat;

/// A command-line client for a remote double-entry accounting service.
#[derive(Parser, Debug)]
#[clap(name = "money", version)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print information about the application
    About,

    /// View or modify the local configuration
    Config {
        #[clap(subcommand)]
        command: Option<ConfigCommand>,
    },

    /// Manage the API auth token
    Auth {
        #[clap(subcommand)]
        command: AuthCommand,
    },

    /// Print the balance of a single account
    AccountBalance {
        /// The account path, e.g. Assets/Bank/Checking or Expenses:Groceries
        #[clap(short, long)]
        account: String,

        /// The entity name; defaults to the last used entity
        entity: Option<String>,
    },

    /// List accounts grouped by type
    AccountList {
        /// The entity name; defaults to the last used entity
        entity: Option<String>,

        /// The deepest account level to include
        #[clap(short, long)]
        max_depth: Option<u32>,
    },

    /// Render an income statement report
    ReportIncome {
        /// The entity name; defaults to the last used entity
        entity: Option<String>,

        /// The start date for the reporting period
        #[clap(short, long, default_value = "start-of-this-year")]
        from: String,

        /// The end date for the reporting period
        #[clap(short, long, default_value = "end-of-previous-month")]
        to: String,

        /// The maximum depth of nested accounts to render
        #[clap(short, long, default_value_t = 0)]
        max_depth: u32,

        /// The output format
        #[clap(short = 'o', long, value_enum, default_value_t = ReportFormat::Padded)]
        format: ReportFormat,
    },

    /// Render a balance sheet report
    ReportBalances {
        /// The entity name; defaults to the last used entity
        entity: Option<String>,

        /// The as-of date for the balance sheet
        #[clap(short = 'd', long, default_value = "end-of-previous-month")]
        as_of: String,

        /// The maximum depth of nested accounts to render
        #[clap(short, long, default_value_t = 0)]
        max_depth: u32,

        /// The output format
        #[clap(short = 'o', long, value_enum, default_value_t = ReportFormat::Padded)]
        format: ReportFormat,
    },

    /// Render budget monitors
    ReportMonitors {
        /// The entity name; defaults to the last used entity
        entity: Option<String>,
    },

    /// Record a simple receipt transaction
    TransReceipt {
        /// The entity name; defaults to the last used entity
        entity: Option<String>,

        /// The transaction date
        #[clap(short = 'd', long, default_value = "today")]
        transaction_date: String,

        /// The payment (credit) account path
        #[clap(short, long)]
        payment_account: String,

        /// The expense (debit) account path
        #[clap(short, long)]
        expense_account: String,

        /// The payment amount
        #[clap(short, long)]
        amount: Decimal,

        /// The transaction description
        #[clap(short = 'l', long)]
        description: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        #[clap(short, long)]
        name: String,

        #[clap(short, long)]
        value: String,
    },

    /// Remove a configuration value
    Unset {
        #[clap(short, long)]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Save an auth token for the configured API host
    Save {
        /// The token; prompted for when not given
        token: Option<String>,
    },

    /// Show the stored auth token
    Show,
}

pub fn parse() -> Args {
    Args::parse()
}

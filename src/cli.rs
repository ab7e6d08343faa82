use anyhow::{Context as _, Result};
use console::{pad_str, style, Alignment, StyledObject};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::api::{self, ApiClient, BudgetProgress};
use crate::args::{Args, AuthCommand, Command, ConfigCommand};
use crate::dates;
use crate::format::format_currency;
use crate::hierarchy::group_by_type;
use crate::report::{filter_rows, render, ReportFormat, ReportRow};
use crate::store::{ConfigStore, CredentialStore};
use crate::terminal;

const MONITOR_CAPTION_WIDTH: usize = 20;
const GAUGE_WIDTH: usize = 20;

pub async fn main(args: Args) -> Result<()> {
    let mut cli = Cli::new().context("Failed to load the local stores")?;
    match args.command {
        Command::About => cli.main_about(),
        Command::Config { command } => cli.main_config(command),
        Command::Auth { command } => cli.main_auth(command),
        Command::AccountBalance { account, entity } => {
            cli.main_account_balance(&account, entity.as_deref()).await
        }
        Command::AccountList { entity, max_depth } => {
            cli.main_account_list(entity.as_deref(), max_depth).await
        }
        Command::ReportIncome {
            entity,
            from,
            to,
            max_depth,
            format,
        } => {
            cli.main_report_income(entity.as_deref(), &from, &to, max_depth, format)
                .await
        }
        Command::ReportBalances {
            entity,
            as_of,
            max_depth,
            format,
        } => {
            cli.main_report_balances(entity.as_deref(), &as_of, max_depth, format)
                .await
        }
        Command::ReportMonitors { entity } => cli.main_report_monitors(entity.as_deref()).await,
        Command::TransReceipt {
            entity,
            transaction_date,
            payment_account,
            expense_account,
            amount,
            description,
        } => {
            cli.main_trans_receipt(
                entity.as_deref(),
                &transaction_date,
                &payment_account,
                &expense_account,
                amount,
                description,
            )
            .await
        }
    }
}

pub struct Cli {
    config: ConfigStore,
    credentials: CredentialStore,
}

impl Cli {
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self {
            config: ConfigStore::load_default()?,
            credentials: CredentialStore::load_default()?,
        })
    }

    fn api(&self) -> crate::error::Result<ApiClient> {
        ApiClient::from_stores(&self.config, &self.credentials)
    }

    fn api_host(&self) -> crate::error::Result<String> {
        api::host_of(self.config.require_str(api::API_BASE_URI_KEY)?)
    }

    fn main_about(&self) -> Result<()> {
        println!(
            "{}",
            style(concat!("money ", env!("CARGO_PKG_VERSION")))
                .green()
                .bold()
        );
        println!("A command-line client for a remote double-entry accounting service.");
        Ok(())
    }

    fn main_config(&mut self, command: Option<ConfigCommand>) -> Result<()> {
        match command {
            None => {
                for (key, value) in self.config.all() {
                    println!("{key} = {value}");
                }
            }
            Some(ConfigCommand::Set { name, value }) => {
                self.config.set(name.clone(), value.clone());
                self.config
                    .save()
                    .context("Failed to save the configuration")?;
                println!("Set configuration \"{name}\" to \"{value}\"");
            }
            Some(ConfigCommand::Unset { name }) => {
                self.config.unset(&name);
                self.config
                    .save()
                    .context("Failed to save the configuration")?;
                println!("Unset configuration \"{name}\"");
            }
        }
        Ok(())
    }

    fn main_auth(&mut self, command: AuthCommand) -> Result<()> {
        match command {
            AuthCommand::Save { token } => {
                let host = self.api_host()?;
                let token = match token {
                    Some(token) => token,
                    None => terminal::prompt("Auth token")?,
                };
                self.credentials.set_token(host, token);
                self.credentials
                    .save()
                    .context("Failed to save the auth token")?;
                println!("Auth token saved successfully.");
            }
            AuthCommand::Show => {
                let host = self.api_host()?;
                let token = self.credentials.require_token(&host)?;
                println!("Authentication token: {}", style(token).green());
            }
        }
        Ok(())
    }

    async fn main_account_balance(&mut self, path: &str, entity: Option<&str>) -> Result<()> {
        let api = self.api()?;
        let account = terminal::with_spinner("Fetching account balance...", async {
            let entity_id = api::resolve_entity_id(&api, &mut self.config, entity).await?;
            let lookup = api::EntityAccounts {
                client: &api,
                entity_id,
            };
            api::resolve_account_by_path(&lookup, path).await
        })
        .await
        .context("Unable to fetch the account balance")?;
        let balance = account.balance.unwrap_or_default();
        println!("{} balance: {}", account.name, format_currency(balance));
        Ok(())
    }

    async fn main_account_list(
        &mut self,
        entity: Option<&str>,
        max_depth: Option<u32>,
    ) -> Result<()> {
        let api = self.api()?;
        let accounts = terminal::with_spinner("Fetching accounts...", async {
            let entity_id = api::resolve_entity_id(&api, &mut self.config, entity).await?;
            api::fetch_accounts(&api, entity_id, None).await
        })
        .await
        .context("Unable to fetch the account list")?;
        for group in group_by_type(&accounts, max_depth) {
            println!("{}", style_header(&group.account_type.to_string()));
            for name in &group.accounts {
                println!("  • {name}");
            }
        }
        Ok(())
    }

    async fn main_report_income(
        &mut self,
        entity: Option<&str>,
        from: &str,
        to: &str,
        max_depth: u32,
        format: ReportFormat,
    ) -> Result<()> {
        let api = self.api()?;
        let rows = terminal::with_spinner("Fetching income statement...", async {
            let entity_id = api::resolve_entity_id(&api, &mut self.config, entity).await?;
            api::fetch_income_statement(&api, entity_id, from, to).await
        })
        .await
        .context("Unable to fetch the income statement")?;
        print_report(rows, max_depth, format);
        Ok(())
    }

    async fn main_report_balances(
        &mut self,
        entity: Option<&str>,
        as_of: &str,
        max_depth: u32,
        format: ReportFormat,
    ) -> Result<()> {
        let api = self.api()?;
        let rows = terminal::with_spinner("Fetching balance sheet...", async {
            let entity_id = api::resolve_entity_id(&api, &mut self.config, entity).await?;
            api::fetch_balance_sheet(&api, entity_id, as_of).await
        })
        .await
        .context("Unable to fetch the balance sheet")?;
        print_report(rows, max_depth, format);
        Ok(())
    }

    async fn main_report_monitors(&mut self, entity: Option<&str>) -> Result<()> {
        let api = self.api()?;
        let monitors = terminal::with_spinner("Fetching budget monitors...", async {
            let entity_id = api::resolve_entity_id(&api, &mut self.config, entity).await?;
            api::fetch_budget_monitors(&api, entity_id).await
        })
        .await
        .context("Unable to fetch the budget monitors")?;
        for monitor in &monitors {
            println!(
                "{} {} {}",
                pad_str(&monitor.caption, MONITOR_CAPTION_WIDTH, Alignment::Left, None),
                monitor_gauge(&monitor.period),
                monitor_gauge(&monitor.budget),
            );
        }
        Ok(())
    }

    async fn main_trans_receipt(
        &mut self,
        entity: Option<&str>,
        transaction_date: &str,
        payment_account: &str,
        expense_account: &str,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<()> {
        let api = self.api()?;
        let created = terminal::with_spinner("Posting transaction...", async {
            let entity_id = api::resolve_entity_id(&api, &mut self.config, entity).await?;
            let lookup = api::EntityAccounts {
                client: &api,
                entity_id,
            };
            let credit_account_id = api::resolve_account_id(&lookup, payment_account).await?;
            let debit_account_id = api::resolve_account_id(&lookup, expense_account).await?;
            let transaction = api::NewTransaction {
                transaction_date: dates::resolve(transaction_date),
                credit_account_id,
                debit_account_id,
                quantity: amount,
                description,
            };
            api::post_transaction(&api, entity_id, &transaction).await
        })
        .await
        .context("Unable to record the transaction")?;
        println!("Created the transaction: {created}");
        Ok(())
    }
}

fn print_report(rows: Vec<ReportRow>, max_depth: u32, format: ReportFormat) {
    let rows = filter_rows(rows, max_depth);
    for line in render(&rows, format) {
        println!("{line}");
    }
}

/// One gauge cell block plus the styled difference between the prorated
/// budget and the actual spend.
fn monitor_gauge(progress: &BudgetProgress) -> String {
    let difference = progress.prorated_budget - progress.actual;
    let formatted = format_currency(difference);
    let styled = if difference < Decimal::ZERO {
        style(formatted).black().on_red()
    } else {
        style(formatted).green()
    };
    format!(
        "[{}] {}",
        gauge_bar(progress.actual, progress.total_budget),
        styled
    )
}

fn gauge_bar(value: Decimal, total: Decimal) -> String {
    let filled = if total > Decimal::ZERO {
        let ratio = (value / total).clamp(Decimal::ZERO, Decimal::ONE);
        (ratio * Decimal::from(GAUGE_WIDTH as u32))
            .round()
            .to_usize()
            .unwrap_or(0)
            .min(GAUGE_WIDTH)
    } else {
        0
    };
    format!("{}{}", "|".repeat(filled), "-".repeat(GAUGE_WIDTH - filled))
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

use rust_decimal::Decimal;
use serde::Deserialize;

use super::client::ApiClient;
use super::entities::EntityId;
use crate::dates;
use crate::error::Result;
use crate::report::ReportRow;

pub async fn fetch_income_statement(
    client: &ApiClient,
    entity_id: EntityId,
    from: &str,
    to: &str,
) -> Result<Vec<ReportRow>> {
    let start = dates::resolve(from);
    let end = dates::resolve(to);
    log::info!("Requesting income statement...");
    let rows = client
        .get(
            &format!("/entities/{entity_id}/reports/income-statement/{start}/{end}"),
            &[],
        )
        .await?;
    log::info!("Requesting income statement...done");
    Ok(rows)
}

pub async fn fetch_balance_sheet(
    client: &ApiClient,
    entity_id: EntityId,
    as_of: &str,
) -> Result<Vec<ReportRow>> {
    let as_of = dates::resolve(as_of);
    log::info!("Requesting balance sheet...");
    let rows = client
        .get(
            &format!("/entities/{entity_id}/reports/balance-sheet/{as_of}"),
            &[],
        )
        .await?;
    log::info!("Requesting balance sheet...done");
    Ok(rows)
}

/// Budget consumption of one reporting window.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetProgress {
    pub actual: Decimal,
    #[serde(rename = "prorated-budget")]
    pub prorated_budget: Decimal,
    #[serde(rename = "total-budget")]
    pub total_budget: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetMonitor {
    pub caption: String,
    /// Progress within the current period.
    pub period: BudgetProgress,
    /// Progress against the whole budget.
    pub budget: BudgetProgress,
}

pub async fn fetch_budget_monitors(
    client: &ApiClient,
    entity_id: EntityId,
) -> Result<Vec<BudgetMonitor>> {
    log::info!("Requesting budget monitors...");
    let monitors = client
        .get(&format!("/entities/{entity_id}/reports/budget-monitors"), &[])
        .await?;
    log::info!("Requesting budget monitors...done");
    Ok(monitors)
}

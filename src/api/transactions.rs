use rust_decimal::Decimal;
use serde::Serialize;

use super::client::ApiClient;
use super::entities::EntityId;
use crate::error::Result;
use crate::hierarchy::AccountId;

/// Wire shape of a simple two-legged receipt transaction.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "transaction-date")]
    pub transaction_date: String,
    #[serde(rename = "credit-account-id")]
    pub credit_account_id: AccountId,
    #[serde(rename = "debit-account-id")]
    pub debit_account_id: AccountId,
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub async fn post_transaction(
    client: &ApiClient,
    entity_id: EntityId,
    transaction: &NewTransaction,
) -> Result<serde_json::Value> {
    log::info!("Posting transaction...");
    let created = client
        .post(&format!("/entities/{entity_id}/transactions"), transaction)
        .await?;
    log::info!("Posting transaction...done");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_wire_payload_uses_the_server_field_names() {
        let transaction = NewTransaction {
            transaction_date: "2024-03-15".to_string(),
            credit_account_id: AccountId(101),
            debit_account_id: AccountId(201),
            quantity: Decimal::from_str_exact("12.50").unwrap(),
            description: Some("Groceries run".to_string()),
        };
        let payload = serde_json::to_value(&transaction).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "transaction-date": "2024-03-15",
                "credit-account-id": 101,
                "debit-account-id": 201,
                "quantity": "12.50",
                "description": "Groceries run",
            })
        );
    }

    #[test]
    fn a_missing_description_is_omitted_from_the_payload() {
        let transaction = NewTransaction {
            transaction_date: "2024-03-15".to_string(),
            credit_account_id: AccountId(101),
            debit_account_id: AccountId(201),
            quantity: Decimal::ONE,
            description: None,
        };
        let payload = serde_json::to_value(&transaction).unwrap();
        assert!(payload.get("description").is_none());
    }
}

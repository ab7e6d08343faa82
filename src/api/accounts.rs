use super::client::ApiClient;
use super::entities::EntityId;
use crate::error::{Error, Result};
use crate::hierarchy::{Account, AccountId};

/// Fetch the accounts of an entity, optionally filtered by exact name.
pub async fn fetch_accounts(
    client: &ApiClient,
    entity_id: EntityId,
    name: Option<&str>,
) -> Result<Vec<Account>> {
    log::info!("Requesting accounts...");
    let path = format!("/entities/{entity_id}/accounts");
    let accounts = match name {
        Some(name) => client.get(&path, &[("name", name)]).await?,
        None => client.get(&path, &[]).await?,
    };
    log::info!("Requesting accounts...done");
    Ok(accounts)
}

/// One name-equality lookup against the remote account index. The path
/// resolution loop sits behind this trait so it can be driven without a
/// live server.
#[allow(async_fn_in_trait)]
pub trait AccountLookup {
    async fn accounts_named(&self, name: &str) -> Result<Vec<Account>>;
}

/// Remote lookup scoped to one entity.
pub struct EntityAccounts<'a> {
    pub client: &'a ApiClient,
    pub entity_id: EntityId,
}

impl AccountLookup for EntityAccounts<'_> {
    async fn accounts_named(&self, name: &str) -> Result<Vec<Account>> {
        fetch_accounts(self.client, self.entity_id, Some(name)).await
    }
}

/// Resolve a slash- or colon-delimited account path to a single account.
///
/// Each segment is looked up by name in order, one remote round-trip per
/// segment, and the next lookup only starts once the previous one has
/// answered. The first match wins and the last segment's match is
/// returned; a segment with no match fails naming that segment. Matches
/// are resolved by name only, not verified to be children of the previous
/// segment's account.
pub async fn resolve_account_by_path(
    lookup: &impl AccountLookup,
    path: &str,
) -> Result<Account> {
    let mut resolved = None;
    for segment in path.split(['/', ':']) {
        let accounts = lookup.accounts_named(segment).await?;
        match accounts.into_iter().next() {
            Some(account) => resolved = Some(account),
            None => return Err(Error::account_not_found(segment)),
        }
    }
    resolved.ok_or_else(|| Error::account_not_found(path))
}

pub async fn resolve_account_id(lookup: &impl AccountLookup, path: &str) -> Result<AccountId> {
    Ok(resolve_account_by_path(lookup, path).await?.id)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn account(id: i64, name: &str) -> Account {
        Account {
            id: AccountId(id),
            name: name.to_string(),
            account_type: "asset".to_string(),
            parent: None,
            balance: None,
        }
    }

    /// Feeds one scripted response per lookup and records the names asked
    /// for, in order.
    struct ScriptedLookup {
        responses: RefCell<Vec<Vec<Account>>>,
        requested: RefCell<Vec<String>>,
    }

    impl ScriptedLookup {
        fn new(responses: Vec<Vec<Account>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.borrow().clone()
        }
    }

    impl AccountLookup for ScriptedLookup {
        async fn accounts_named(&self, name: &str) -> Result<Vec<Account>> {
            self.requested.borrow_mut().push(name.to_string());
            Ok(self.responses.borrow_mut().remove(0))
        }
    }

    #[tokio::test]
    async fn resolves_a_single_segment_path() {
        let lookup = ScriptedLookup::new(vec![vec![account(101, "Checking")]]);
        let resolved = resolve_account_by_path(&lookup, "Checking").await.unwrap();
        assert_eq!(resolved.id, AccountId(101));
        assert_eq!(lookup.requested(), vec!["Checking"]);
    }

    #[tokio::test]
    async fn a_colon_path_issues_one_lookup_per_segment() {
        let lookup = ScriptedLookup::new(vec![
            vec![account(200, "Expenses")],
            vec![account(201, "Groceries")],
        ]);
        let resolved = resolve_account_by_path(&lookup, "Expenses:Groceries")
            .await
            .unwrap();
        assert_eq!(resolved.id, AccountId(201));
        assert_eq!(lookup.requested(), vec!["Expenses", "Groceries"]);
    }

    #[tokio::test]
    async fn a_slash_path_resolves_three_segments() {
        let lookup = ScriptedLookup::new(vec![
            vec![account(300, "Assets")],
            vec![account(301, "Bank")],
            vec![account(302, "Checking")],
        ]);
        let resolved = resolve_account_by_path(&lookup, "Assets/Bank/Checking")
            .await
            .unwrap();
        assert_eq!(resolved.id, AccountId(302));
        assert_eq!(lookup.requested(), vec!["Assets", "Bank", "Checking"]);
    }

    #[tokio::test]
    async fn delimiters_can_be_mixed_within_one_path() {
        let lookup = ScriptedLookup::new(vec![
            vec![account(300, "Assets")],
            vec![account(301, "Bank")],
            vec![account(302, "Checking")],
        ]);
        let resolved = resolve_account_by_path(&lookup, "Assets/Bank:Checking")
            .await
            .unwrap();
        assert_eq!(resolved.id, AccountId(302));
    }

    #[tokio::test]
    async fn the_first_match_wins_when_a_lookup_returns_several() {
        let lookup = ScriptedLookup::new(vec![vec![
            account(401, "Checking"),
            account(402, "Checking"),
        ]]);
        let resolved = resolve_account_by_path(&lookup, "Checking").await.unwrap();
        assert_eq!(resolved.id, AccountId(401));
    }

    #[tokio::test]
    async fn segments_resolve_by_name_without_parent_verification() {
        // The second segment's match is unrelated to the first; resolution
        // still succeeds with it.
        let lookup = ScriptedLookup::new(vec![
            vec![account(200, "Expenses")],
            vec![account(510, "Checking")],
        ]);
        let resolved = resolve_account_by_path(&lookup, "Expenses:Checking")
            .await
            .unwrap();
        assert_eq!(resolved.id, AccountId(510));
    }

    #[tokio::test]
    async fn an_unmatched_segment_fails_naming_it() {
        let lookup = ScriptedLookup::new(vec![vec![account(200, "Expenses")], vec![]]);
        let error = resolve_account_by_path(&lookup, "Expenses:Nonexistent")
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "No account found with name \"Nonexistent\""
        );
    }

    #[tokio::test]
    async fn an_empty_path_fails_naming_the_empty_string() {
        let lookup = ScriptedLookup::new(vec![vec![]]);
        let error = resolve_account_by_path(&lookup, "").await.unwrap_err();
        assert_eq!(error.to_string(), "No account found with name \"\"");
        assert_eq!(lookup.requested(), vec![""]);
    }

    #[tokio::test]
    async fn resolve_account_id_returns_the_id() {
        let lookup = ScriptedLookup::new(vec![vec![account(555, "Savings")]]);
        assert_eq!(
            resolve_account_id(&lookup, "Savings").await.unwrap(),
            AccountId(555)
        );
    }
}

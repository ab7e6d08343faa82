use std::collections::{HashMap, HashSet};
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-side account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub i64);

/// One account record as fetched from the remote account index.
///
/// `parent` is a weak back reference: it carries the parent's id only and
/// is resolved through an id table, never followed as an owning pointer.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    pub id: AccountId,
}

/// The five accounting types, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

impl AccountType {
    pub const DISPLAY_ORDER: [AccountType; 5] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Equity,
        AccountType::Income,
        AccountType::Expense,
    ];

    /// Case-insensitive parse; unrecognized types yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Income => "Income",
            Self::Expense => "Expense",
        };
        write!(f, "{label}")
    }
}

/// Id-keyed lookup over one fetched account set.
pub struct AccountIndex<'a> {
    by_id: HashMap<AccountId, &'a Account>,
}

impl<'a> AccountIndex<'a> {
    pub fn new(accounts: &'a [Account]) -> Self {
        Self {
            by_id: accounts.iter().map(|account| (account.id, account)).collect(),
        }
    }

    /// The `/`-joined ancestor-to-leaf name chain for `account`.
    ///
    /// A parent id missing from the index terminates the walk (the account
    /// is treated as a root), as does a previously visited id, so corrupted
    /// parent data cannot loop the walk.
    pub fn qualified_name(&self, account: &Account) -> String {
        let mut names = vec![account.name.as_str()];
        let mut visited = HashSet::from([account.id]);
        let mut current = account;
        while let Some(parent) = &current.parent {
            let Some(&next) = self.by_id.get(&parent.id) else {
                break;
            };
            if !visited.insert(next.id) {
                break;
            }
            names.push(next.name.as_str());
            current = next;
        }
        names.reverse();
        names.join("/")
    }
}

/// One non-empty bucket of qualified account names sharing a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGroup {
    pub account_type: AccountType,
    pub accounts: Vec<String>,
}

/// Group accounts by type in fixed display order, each bucket sorted by
/// qualified name. Accounts nested deeper than `max_depth` levels and
/// accounts with an unrecognized type are dropped; empty buckets are
/// omitted.
pub fn group_by_type(accounts: &[Account], max_depth: Option<u32>) -> Vec<AccountGroup> {
    let index = AccountIndex::new(accounts);
    let mut buckets: [Vec<String>; 5] = std::array::from_fn(|_| Vec::new());
    for account in accounts {
        let Some(account_type) = AccountType::parse(&account.account_type) else {
            continue;
        };
        let qualified = index.qualified_name(account);
        let depth = qualified.matches('/').count() as u32 + 1;
        if max_depth.is_some_and(|max| depth > max) {
            continue;
        }
        buckets[account_type as usize].push(qualified);
    }
    AccountType::DISPLAY_ORDER
        .into_iter()
        .zip(buckets)
        .filter(|(_, names)| !names.is_empty())
        .map(|(account_type, mut accounts)| {
            accounts.sort();
            AccountGroup {
                account_type,
                accounts,
            }
        })
        .collect()
}

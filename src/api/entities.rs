use std::fmt;

use serde::Deserialize;

use super::client::ApiClient;
use crate::error::{Error, Result};
use crate::store::ConfigStore;

/// Configuration key holding the id of the entity used most recently.
pub const CURRENT_ENTITY_ID_KEY: &str = "currentEntityId";

/// Server-side entity (book of accounts) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
}

pub async fn fetch_entities(client: &ApiClient) -> Result<Vec<Entity>> {
    log::info!("Requesting entities...");
    let entities = client.get("/entities", &[]).await?;
    log::info!("Requesting entities...done");
    Ok(entities)
}

/// Resolve the entity scope for a command.
///
/// With no name, the previously selected entity id from the config store is
/// used. With a name, the entity list is fetched, matched by exact name,
/// and the id persisted as the new current entity.
pub async fn resolve_entity_id(
    client: &ApiClient,
    config: &mut ConfigStore,
    name: Option<&str>,
) -> Result<EntityId> {
    let Some(name) = name else {
        return Ok(EntityId(config.require_i64(CURRENT_ENTITY_ID_KEY)?));
    };
    let entities = fetch_entities(client).await?;
    let entity = find_entity(&entities, name)?;
    config.set(CURRENT_ENTITY_ID_KEY, entity.id.0);
    config.save()?;
    Ok(entity.id)
}

fn find_entity<'a>(entities: &'a [Entity], name: &str) -> Result<&'a Entity> {
    entities
        .iter()
        .find(|entity| entity.name == name)
        .ok_or_else(|| Error::entity_not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> Vec<Entity> {
        vec![
            Entity {
                id: EntityId(99),
                name: "Test Entity".to_string(),
            },
            Entity {
                id: EntityId(88),
                name: "Other Entity".to_string(),
            },
        ]
    }

    #[test]
    fn finds_an_entity_by_exact_name() {
        let entities = entities();
        assert_eq!(find_entity(&entities, "Test Entity").unwrap().id, EntityId(99));
    }

    #[test]
    fn an_unknown_entity_name_fails() {
        let entities = entities();
        let error = find_entity(&entities, "Nonexistent Entity").unwrap_err();
        assert_eq!(
            error.to_string(),
            "No entity found with name \"Nonexistent Entity\""
        );
    }

    #[tokio::test]
    async fn without_a_name_the_persisted_entity_id_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigStore::load_from(dir.path().join("config.json")).unwrap();
        config.set(CURRENT_ENTITY_ID_KEY, 12345);
        // The client is never contacted on this path.
        let client = ApiClient::new("http://unused.example.com".to_string(), String::new());

        let id = resolve_entity_id(&client, &mut config, None).await.unwrap();
        assert_eq!(id, EntityId(12345));
    }

    #[tokio::test]
    async fn without_a_name_and_no_persisted_id_the_lookup_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigStore::load_from(dir.path().join("config.json")).unwrap();
        let client = ApiClient::new("http://unused.example.com".to_string(), String::new());

        let error = resolve_entity_id(&client, &mut config, None).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "No configuration value for currentEntityId"
        );
    }
}

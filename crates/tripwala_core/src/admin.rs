//! crates/tripwala_core/src/admin.rs
//!
//! Catalog maintenance as explicit commands. The caller builds an `AdminCommand`
//! and executes it against a store; nothing about the pending action lives in
//! shared state.

use crate::domain::{DestinationDraft, DestinationId};
use crate::ports::{CatalogStore, PortError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field is blank: {0}")]
    BlankField(&'static str),
    #[error("Cost must not be negative (got {0})")]
    NegativeCost(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Port(#[from] PortError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    Add(DestinationDraft),
    Update {
        id: DestinationId,
        draft: DestinationDraft,
    },
    Delete {
        id: DestinationId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOutcome {
    Added(DestinationId),
    Updated(DestinationId),
    Deleted(DestinationId),
}

impl DestinationDraft {
    /// Checks the required fields and normalizes whitespace.
    ///
    /// Name, region and highlights must be non-blank and the cost non-negative.
    /// A blank image URL is stored as empty.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        let region = self.region.trim();
        let highlights = self.highlights.trim();

        if name.is_empty() {
            return Err(ValidationError::BlankField("name"));
        }
        if region.is_empty() {
            return Err(ValidationError::BlankField("region"));
        }
        if highlights.is_empty() {
            return Err(ValidationError::BlankField("highlights"));
        }
        if self.cost < 0 {
            return Err(ValidationError::NegativeCost(self.cost));
        }

        Ok(Self {
            name: name.to_string(),
            region: region.to_string(),
            highlights: highlights.to_string(),
            cost: self.cost,
            image_url: self.image_url.trim().to_string(),
        })
    }
}

impl AdminCommand {
    /// Validates (for writes) and applies the command. Invalid drafts never reach
    /// the store.
    pub async fn execute(self, store: &dyn CatalogStore) -> Result<AdminOutcome, AdminError> {
        match self {
            AdminCommand::Add(draft) => {
                let draft = draft.validate()?;
                let id = store.add_destination(&draft).await?;
                Ok(AdminOutcome::Added(id))
            }
            AdminCommand::Update { id, draft } => {
                let draft = draft.validate()?;
                store.update_destination(id, &draft).await?;
                Ok(AdminOutcome::Updated(id))
            }
            AdminCommand::Delete { id } => {
                store.remove_destination(id).await?;
                Ok(AdminOutcome::Deleted(id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    fn draft(name: &str, cost: i64) -> DestinationDraft {
        DestinationDraft::new(name, "Maharashtra", "Forts, Beaches", cost, "")
    }

    #[tokio::test]
    async fn add_update_delete_round() {
        let store = InMemoryStore::new();

        let added = AdminCommand::Add(draft("  Tarkarli ", 650))
            .execute(&store)
            .await
            .unwrap();
        let AdminOutcome::Added(id) = added else {
            panic!("expected Added, got {added:?}");
        };
        assert_eq!(store.list_destinations().await.unwrap()[0].name, "Tarkarli");

        let updated = AdminCommand::Update {
            id,
            draft: draft("Tarkarli Beach", 700),
        }
        .execute(&store)
        .await
        .unwrap();
        assert_eq!(updated, AdminOutcome::Updated(id));
        let listed = store.list_destinations().await.unwrap();
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].name, "Tarkarli Beach");
        assert_eq!(listed[0].cost, 700);

        let deleted = AdminCommand::Delete { id }.execute(&store).await.unwrap();
        assert_eq!(deleted, AdminOutcome::Deleted(id));
        assert!(store.list_destinations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_drafts_never_reach_the_store() {
        let store = InMemoryStore::new();

        let blank_name = AdminCommand::Add(draft("   ", 100)).execute(&store).await;
        assert!(matches!(
            blank_name,
            Err(AdminError::Validation(ValidationError::BlankField("name")))
        ));

        let negative = AdminCommand::Add(draft("Pune", -1)).execute(&store).await;
        assert!(matches!(
            negative,
            Err(AdminError::Validation(ValidationError::NegativeCost(-1)))
        ));

        let mut no_highlights = draft("Pune", 450);
        no_highlights.highlights = "\n".to_string();
        assert_eq!(
            no_highlights.validate(),
            Err(ValidationError::BlankField("highlights"))
        );

        assert_eq!(store.count_destinations().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let result = AdminCommand::Update {
            id: 42,
            draft: draft("Pune", 450),
        }
        .execute(&store)
        .await;
        assert!(matches!(result, Err(AdminError::Port(PortError::NotFound(_)))));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_idempotent() {
        let store = InMemoryStore::new();
        let outcome = AdminCommand::Delete { id: 7 }.execute(&store).await.unwrap();
        assert_eq!(outcome, AdminOutcome::Deleted(7));
    }

    #[test]
    fn validation_trims_and_keeps_blank_image_empty() {
        let mut raw = draft(" Nashik ", 480);
        raw.image_url = "   ".to_string();
        let clean = raw.validate().unwrap();
        assert_eq!(clean.name, "Nashik");
        assert_eq!(clean.image_url, "");
    }
}

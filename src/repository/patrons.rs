//! Patrons repository over the JSON store

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Patron,
    store::SharedStore,
};

use super::PatronRepository;

#[derive(Clone)]
pub struct JsonPatronRepository {
    store: SharedStore,
}

impl JsonPatronRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PatronRepository for JsonPatronRepository {
    async fn search_patrons(&self, name: &str) -> AppResult<Vec<Patron>> {
        let needle = name.to_lowercase();
        let store = self.store.read().await;

        let matches: Vec<Patron> = store
            .patrons()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        tracing::debug!("Patron search {:?} matched {} patrons", name, matches.len());
        Ok(matches)
    }

    async fn get_patron(&self, id: i32) -> AppResult<Option<Patron>> {
        let store = self.store.read().await;
        Ok(store.patron(id).map(|p| store.hydrate_patron(p)))
    }

    async fn update_patron(&self, patron: &Patron) -> AppResult<()> {
        let mut store = self.store.write().await;

        let Some(previous) = store.patron(patron.id).cloned() else {
            tracing::warn!("Attempted to update unknown patron {}", patron.id);
            return Err(AppError::not_found("Patron", patron.id));
        };

        store.replace_patron(patron);
        if let Err(e) = store.save_patrons().await {
            tracing::error!("Failed to save patron {}, change discarded: {}", patron.id, e);
            store.replace_patron(&previous);
            return Err(e);
        }
        tracing::info!(
            "Updated patron {} (membership ends {})",
            patron.id,
            patron.membership_end
        );
        Ok(())
    }
}

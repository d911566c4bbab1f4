//! In-memory item catalog.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use saga_core::{ItemCatalog, ItemDefinition, ItemId};

use crate::error::{Result, RuntimeError};

/// Admin-managed item catalog. Entries are upserted or disabled, never
/// removed.
#[derive(Default)]
pub struct InMemoryCatalog {
    items: RwLock<HashMap<ItemId, ItemDefinition>>,
}

impl InMemoryCatalog {
    /// Load definitions from a RON catalog file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let items = saga_content::ItemLoader::load(path)
            .map_err(|e| RuntimeError::Content(e.to_string()))?;
        let catalog = Self::default();
        for item in items {
            catalog.upsert(item);
        }
        Ok(catalog)
    }

    pub fn upsert(&self, item: ItemDefinition) {
        self.items
            .write()
            .expect("catalog lock poisoned")
            .insert(item.id, item);
    }

    pub fn set_available(&self, id: ItemId, available: bool) {
        if let Some(item) = self
            .items
            .write()
            .expect("catalog lock poisoned")
            .get_mut(&id)
        {
            item.available = available;
        }
    }
}

impl ItemCatalog for InMemoryCatalog {
    fn item(&self, id: ItemId) -> Option<ItemDefinition> {
        self.items
            .read()
            .expect("catalog lock poisoned")
            .get(&id)
            .cloned()
    }
}

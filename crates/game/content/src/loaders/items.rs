//! Item catalog loader.

use std::path::Path;

use saga_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogSpec {
    pub items: Vec<ItemDefinition>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        let catalog: ItemCatalogSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        let mut seen = std::collections::BTreeSet::new();
        for item in &catalog.items {
            if !seen.insert(item.id) {
                anyhow::bail!("Duplicate item id {} in {}", item.id, path.display());
            }
        }
        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::ItemId;
    use std::io::Write as _;

    const CATALOG: &str = r#"(
        items: [
            (
                id: 1,
                level_required: 2,
                slot: Helmet,
                stats: (bonus: (might: 1, speed: 0, intellect: 0), reducer: (might: 0, speed: 0, intellect: 0)),
                attributes: (
                    bonus: (atk: 0, def: 3, range: 0, mag_atk: 0, mag_def: 1, rate: 0),
                    reducer: (atk: 0, def: 0, range: 0, mag_atk: 0, mag_def: 0, rate: 0),
                ),
                available: true,
            ),
        ],
    )"#;

    #[test]
    fn loads_item_definitions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{CATALOG}").unwrap();
        let items = ItemLoader::load(file.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId(1));
        assert_eq!(items[0].attributes.bonus.def, 3);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let entry = r#"(
            id: 1,
            level_required: 0,
            slot: Cape,
            stats: (bonus: (might: 0, speed: 0, intellect: 0), reducer: (might: 0, speed: 0, intellect: 0)),
            attributes: (
                bonus: (atk: 0, def: 0, range: 0, mag_atk: 0, mag_def: 0, rate: 0),
                reducer: (atk: 0, def: 0, range: 0, mag_atk: 0, mag_def: 0, rate: 0),
            ),
            available: true,
        )"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(items: [{entry}, {entry}])").unwrap();
        assert!(ItemLoader::load(file.path()).is_err());
    }
}

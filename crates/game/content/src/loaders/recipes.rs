//! Recipe catalog loader.

use std::path::Path;

use saga_core::RecipeSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Recipe catalog structure for RON files. Entries are unvalidated specs;
/// validation happens when the engine admits them into a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCatalogSpec {
    pub recipes: Vec<RecipeSpec>,
}

/// Loader for recipe catalogs from RON files. One file per production
/// variant.
pub struct RecipeLoader;

impl RecipeLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RecipeSpec>> {
        let content = read_file(path)?;
        let catalog: RecipeCatalogSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse recipe catalog RON: {}", e))?;
        Ok(catalog.recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::ResourceId;
    use std::io::Write as _;

    #[test]
    fn loads_recipe_specs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                recipes: [
                    (
                        level_required: 1,
                        stats_cost: (might: 2, speed: 0, intellect: 1),
                        cooldown_secs: 300,
                        materials: [100, 101],
                        material_amounts: [4, 1],
                        rewards: [200],
                        reward_amounts: [1],
                        experience: 120,
                    ),
                ],
            )"#
        )
        .unwrap();
        let recipes = RecipeLoader::load(file.path()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].materials, vec![ResourceId(100), ResourceId(101)]);
        assert_eq!(recipes[0].cooldown_secs, 300);
    }
}

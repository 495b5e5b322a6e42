//! Category → texture lookup. Categories without an entry render untextured.

use std::collections::HashMap;

use bevy::prelude::*;

#[derive(Resource, Clone, Debug, Default)]
pub struct CategoryTextures {
    paths: HashMap<String, String>,
    handles: HashMap<String, Handle<Image>>,
}

impl CategoryTextures {
    /// Registers an asset path, loaded once an `AssetServer` is available.
    pub fn with_path(mut self, category: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(category.into(), path.into());
        self
    }

    pub fn insert_handle(&mut self, category: impl Into<String>, handle: Handle<Image>) {
        self.handles.insert(category.into(), handle);
    }

    pub fn texture_for(&self, category: &str) -> Option<Handle<Image>> {
        self.handles.get(category).cloned()
    }

    pub fn pending_paths(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths
            .iter()
            .filter(|(category, _)| !self.handles.contains_key(*category))
            .map(|(category, path)| (category.as_str(), path.as_str()))
    }
}

/// Starts loading every registered texture path.
pub(crate) fn load_category_textures(
    assets: Option<Res<AssetServer>>,
    mut textures: ResMut<CategoryTextures>,
) {
    let Some(assets) = assets else {
        return;
    };
    let pending: Vec<(String, String)> = textures
        .pending_paths()
        .map(|(c, p)| (c.to_string(), p.to_string()))
        .collect();
    for (category, path) in pending {
        debug!("loading texture {path} for {category}");
        let handle = assets.load(path);
        textures.insert_handle(category, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_categories_have_no_texture() {
        let mut textures = CategoryTextures::default().with_path("CLI", "textures/cli.png");
        assert!(textures.texture_for("CLI").is_none());
        assert_eq!(textures.pending_paths().count(), 1);

        textures.insert_handle("CLI", Handle::default());
        assert!(textures.texture_for("CLI").is_some());
        assert!(textures.texture_for("Web").is_none());
        assert_eq!(textures.pending_paths().count(), 0);
    }
}

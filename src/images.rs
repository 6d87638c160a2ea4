//! Image association by filename prefix.
//!
//! A ticket owns at most one image, stored under `<asset_dir>/images` as
//! `<ticket id><original extension>`. Association is resolved at read time
//! by scanning the directory for the first name that starts with the id —
//! O(n) per lookup, acceptable at this scale.

use std::path::{Path, PathBuf};

/// Public URL prefix under which the static file layer serves the directory.
const PUBLIC_PREFIX: &str = "/assets/images";

#[derive(Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(asset_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: asset_dir.as_ref().join("images"),
        }
    }

    /// Public path of the image associated with the ticket, if any.
    /// First prefix match wins; a missing directory means no image.
    pub async fn resolve(&self, id: &str) -> Option<String> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.ok()?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(id) {
                return Some(format!("{}/{}", PUBLIC_PREFIX, name));
            }
        }
        None
    }

    /// Write the uploaded bytes as `<id><ext>`, creating the directory if
    /// absent. Returns the stored file name.
    pub async fn save(
        &self,
        id: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> anyhow::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = match Path::new(original_name).extension() {
            Some(ext) => format!("{}.{}", id, ext.to_string_lossy()),
            None => id.to_string(),
        };
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;
        Ok(file_name)
    }

    /// Best-effort removal of the ticket's image. Failures are logged,
    /// never propagated: the record delete must go through regardless.
    pub async fn remove(&self, id: &str) {
        let Some(public_path) = self.resolve(id).await else {
            return;
        };
        let Some(file_name) = public_path.rsplit('/').next() else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(self.dir.join(file_name)).await {
            tracing::warn!(id = %id, "failed to remove ticket image: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (ImageStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("chamados-img-{}", uuid::Uuid::new_v4()));
        (ImageStore::new(&root), root)
    }

    #[tokio::test]
    async fn resolve_on_missing_directory_is_none() {
        let (store, _root) = temp_store();
        assert!(store.resolve("65f000000000000000000001").await.is_none());
    }

    #[tokio::test]
    async fn save_then_resolve_by_prefix() {
        let (store, root) = temp_store();
        let id = "65f000000000000000000002";
        let stored = store.save(id, "foto.png", b"fake-png").await.unwrap();
        assert_eq!(stored, format!("{}.png", id));

        let resolved = store.resolve(id).await.unwrap();
        assert_eq!(resolved, format!("/assets/images/{}.png", id));

        tokio::fs::remove_dir_all(root).await.ok();
    }

    #[tokio::test]
    async fn save_without_extension_uses_bare_id() {
        let (store, root) = temp_store();
        let id = "65f000000000000000000003";
        let stored = store.save(id, "upload", b"data").await.unwrap();
        assert_eq!(stored, id);
        tokio::fs::remove_dir_all(root).await.ok();
    }

    #[tokio::test]
    async fn remove_deletes_the_associated_file() {
        let (store, root) = temp_store();
        let id = "65f000000000000000000004";
        store.save(id, "foto.jpg", b"jpg").await.unwrap();
        store.remove(id).await;
        assert!(store.resolve(id).await.is_none());
        tokio::fs::remove_dir_all(root).await.ok();
    }

    #[tokio::test]
    async fn resolve_misses_other_ids() {
        let (store, root) = temp_store();
        store
            .save("65f000000000000000000005", "a.png", b"a")
            .await
            .unwrap();
        assert!(store.resolve("65f000000000000000000006").await.is_none());
        tokio::fs::remove_dir_all(root).await.ok();
    }
}

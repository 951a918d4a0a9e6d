use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::{debug, instrument};

use color_namer_application::{
    error::{AppError, AppResult},
    ports::outgoing::image_store::{ImageStorePort, StoredImage},
};

pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Uploads kept as plain files in a single directory.
pub struct FsImageStoreAdapter {
    dir: PathBuf,
}

impl FsImageStoreAdapter {
    pub async fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn path_for(&self, file_name: &str) -> AppResult<PathBuf> {
        let is_plain_name = Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == file_name);
        if !is_plain_name {
            return Err(AppError::ValidationError {
                message: format!("'{file_name}' is not a plain file name"),
            });
        }
        Ok(self.dir.join(file_name))
    }
}

#[async_trait::async_trait]
impl ImageStorePort for FsImageStoreAdapter {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn save(&self, file_name: &str, data: &[u8]) -> AppResult<StoredImage> {
        let path = self.path_for(file_name)?;
        fs::write(&path, data).await?;
        debug!("Wrote upload to {}", path.display());

        Ok(StoredImage {
            file_name: file_name.to_string(),
            url: format!("{UPLOADS_URL_PREFIX}/{file_name}"),
        })
    }

    async fn latest(&self) -> AppResult<Option<String>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut latest: Option<(SystemTime, String)> = None;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let written = metadata.modified()?;
            if latest
                .as_ref()
                .is_none_or(|(best, best_name)| (written, &name) > (*best, best_name))
            {
                latest = Some((written, name));
            }
        }

        Ok(latest.map(|(_, name)| name))
    }

    async fn read(&self, file_name: &str) -> AppResult<Option<Vec<u8>>> {
        let path = self.path_for(file_name)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::IoError(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn set_written_at(path: &Path, secs_after_epoch: u64) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs_after_epoch))
            .unwrap();
    }

    #[tokio::test]
    async fn empty_directory_has_no_latest() {
        let dir = tempdir().unwrap();
        let store = FsImageStoreAdapter::new(dir.path().join("uploads")).await.unwrap();
        assert_eq!(store.latest().await.unwrap(), None);
    }

    #[tokio::test]
    async fn latest_follows_write_time() {
        let dir = tempdir().unwrap();
        let store = FsImageStoreAdapter::new(dir.path()).await.unwrap();

        store.save("old.png", b"old").await.unwrap();
        store.save("new.png", b"new").await.unwrap();
        set_written_at(&dir.path().join("old.png"), 1_000);
        set_written_at(&dir.path().join("new.png"), 2_000);
        assert_eq!(store.latest().await.unwrap().as_deref(), Some("new.png"));

        set_written_at(&dir.path().join("old.png"), 3_000);
        assert_eq!(store.latest().await.unwrap().as_deref(), Some("old.png"));
    }

    #[tokio::test]
    async fn save_overwrites_and_builds_url() {
        let dir = tempdir().unwrap();
        let store = FsImageStoreAdapter::new(dir.path()).await.unwrap();

        let stored = store.save("cat.png", b"first").await.unwrap();
        store.save("cat.png", b"second").await.unwrap();

        assert_eq!(stored.url, "/uploads/cat.png");
        assert_eq!(
            store.read("cat.png").await.unwrap().as_deref(),
            Some(b"second".as_slice())
        );
    }

    #[tokio::test]
    async fn unknown_and_nested_names() {
        let dir = tempdir().unwrap();
        let store = FsImageStoreAdapter::new(dir.path()).await.unwrap();

        assert_eq!(store.read("missing.png").await.unwrap(), None);
        assert!(matches!(
            store.read("../escape.png").await,
            Err(AppError::ValidationError { .. })
        ));
    }
}

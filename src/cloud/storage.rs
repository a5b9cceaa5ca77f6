use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::Deserialize;
use std::sync::Arc;

use super::Project;
use crate::entity::{Entity, Fetch};
use crate::error::{RestError, Result};

/// Fields returned by both the listing and the single-container endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummary {
    pub id: String,
    pub region: String,
    pub name: String,
    pub stored_bytes: u64,
    pub stored_objects: u64,
}

/// Fields only returned by the single-container endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDetails {
    pub static_url: String,
    pub public: bool,
}

#[derive(Deserialize)]
struct FullStorage {
    #[serde(flatten)]
    head: StorageSummary,
    #[serde(flatten)]
    detail: StorageDetails,
}

/// An object storage container
pub type Storage = Entity<StorageSummary, StorageDetails>;

struct StorageSource {
    project: Project,
}

impl StorageSource {
    async fn get(&self, id: &str) -> Result<(StorageSummary, StorageDetails)> {
        let storage: FullStorage = self
            .project
            .ctx()
            .get_object(&self.project.item_path("storage", id))
            .await?;
        Ok((storage.head, storage.detail))
    }
}

#[async_trait]
impl Fetch<StorageSummary, StorageDetails> for StorageSource {
    async fn fetch(&self, head: &StorageSummary) -> Result<(StorageSummary, StorageDetails)> {
        self.get(&head.id).await
    }
}

impl Entity<StorageSummary, StorageDetails> {
    /// List the storage containers of a project as partial objects
    pub fn list(project: &Project) -> impl Stream<Item = Result<Storage>> {
        let project = project.clone();

        stream::once(async move {
            let path = project.path("storage");
            let containers: Vec<StorageSummary> = project.ctx().get_array(&path).await?;
            let source: Arc<dyn Fetch<StorageSummary, StorageDetails>> =
                Arc::new(StorageSource { project });
            Ok::<_, RestError>(stream::iter(containers.into_iter().map(move |head| {
                Ok::<_, RestError>(Entity::partial(head, Arc::clone(&source)))
            })))
        })
        .try_flatten()
    }

    /// Load a complete storage container by its id
    pub async fn by_id(project: &Project, id: &str) -> Result<Storage> {
        let source = StorageSource {
            project: project.clone(),
        };
        let (head, detail) = source.get(id).await?;
        Ok(Entity::complete_with(head, detail, Arc::new(source)))
    }

    pub fn id(&self) -> &str {
        &self.head().id
    }

    pub fn region(&self) -> &str {
        &self.head().region
    }

    /// Container name, as of the last fetch
    pub fn name(&self) -> &str {
        &self.head().name
    }

    pub fn stored_bytes(&self) -> u64 {
        self.head().stored_bytes
    }

    pub fn stored_objects(&self) -> u64 {
        self.head().stored_objects
    }

    pub fn static_url(&self) -> Result<&str> {
        Ok(&self.detail()?.static_url)
    }

    pub fn is_public(&self) -> Result<bool> {
        Ok(self.detail()?.public)
    }
}

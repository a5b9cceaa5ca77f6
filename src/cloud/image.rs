use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::Deserialize;
use std::sync::Arc;
use url::form_urlencoded;

use super::Project;
use crate::entity::{Entity, Fetch};
use crate::error::{RestError, Result};

/// Identifying fields of an image, always available
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub region: String,
}

/// Fields only present once an image is complete
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    pub visibility: String,
    /// Milliseconds since the epoch
    #[serde(deserialize_with = "crate::time::deserialize_millis")]
    pub creation_date: i64,
    pub status: String,
    pub name: String,
    #[serde(rename = "type")]
    pub image_type: String,
    pub min_disk: u32,
}

#[derive(Deserialize)]
struct FullImage {
    #[serde(flatten)]
    head: ImageRef,
    #[serde(flatten)]
    detail: ImageDetails,
}

/// An OS image available in a project
pub type Image = Entity<ImageRef, ImageDetails>;

/// Optional filters for [`Image::list`]
#[derive(Debug, Clone, Default)]
pub struct ImageFilter {
    /// Only images of this region
    pub region: Option<String>,
    /// Only images compatible with this flavor type
    pub flavor_type: Option<String>,
    /// Only images of this OS type (`linux`, `windows`, ...)
    pub os_type: Option<String>,
}

impl ImageFilter {
    fn query(&self) -> Option<String> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in [
            ("region", &self.region),
            ("flavorType", &self.flavor_type),
            ("osType", &self.os_type),
        ] {
            if let Some(value) = value {
                query.append_pair(key, value);
                any = true;
            }
        }
        any.then(|| query.finish())
    }
}

struct ImageSource {
    project: Project,
}

impl ImageSource {
    async fn get(&self, id: &str) -> Result<(ImageRef, ImageDetails)> {
        let image: FullImage = self
            .project
            .ctx()
            .get_object(&self.project.item_path("image", id))
            .await?;
        Ok((image.head, image.detail))
    }
}

#[async_trait]
impl Fetch<ImageRef, ImageDetails> for ImageSource {
    async fn fetch(&self, head: &ImageRef) -> Result<(ImageRef, ImageDetails)> {
        self.get(&head.id).await
    }
}

impl Entity<ImageRef, ImageDetails> {
    /// List the images of a project.
    ///
    /// Issues one request and yields one partial image per listed entry.
    pub fn list(project: &Project, filter: &ImageFilter) -> impl Stream<Item = Result<Image>> {
        let mut path = project.path("image");
        if let Some(query) = filter.query() {
            path.push('?');
            path.push_str(&query);
        }
        let project = project.clone();

        stream::once(async move {
            let refs: Vec<ImageRef> = project.ctx().get_array(&path).await?;
            let source: Arc<dyn Fetch<ImageRef, ImageDetails>> = Arc::new(ImageSource { project });
            Ok::<_, RestError>(stream::iter(refs.into_iter().map(move |head| {
                Ok::<_, RestError>(Entity::partial(head, Arc::clone(&source)))
            })))
        })
        .try_flatten()
    }

    /// Load a complete image by its id
    pub async fn by_id(project: &Project, id: &str) -> Result<Image> {
        let source = ImageSource {
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

    pub fn visibility(&self) -> Result<&str> {
        Ok(&self.detail()?.visibility)
    }

    /// Creation date in milliseconds since the epoch
    pub fn creation_date(&self) -> Result<i64> {
        Ok(self.detail()?.creation_date)
    }

    pub fn status(&self) -> Result<&str> {
        Ok(&self.detail()?.status)
    }

    pub fn name(&self) -> Result<&str> {
        Ok(&self.detail()?.name)
    }

    pub fn image_type(&self) -> Result<&str> {
        Ok(&self.detail()?.image_type)
    }

    /// Minimum disk size required by this image, in GB
    pub fn min_disk(&self) -> Result<u32> {
        Ok(self.detail()?.min_disk)
    }
}

//! Public Cloud resources.
//!
//! Every resource lives in a [`Project`] and follows the [`Entity`](crate::Entity)
//! lifecycle: `list` yields partial objects, `by_id` yields complete ones.

pub mod image;
pub mod storage;

pub use image::{Image, ImageDetails, ImageFilter, ImageRef};
pub use storage::{Storage, StorageDetails, StorageSummary};

use url::form_urlencoded;

use crate::rest::RestContext;

/// Percent-encode a value used as a single path segment
fn segment(value: &str) -> String {
    // byte_serialize writes spaces as '+' and encodes a literal '+' as %2B
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// A Public Cloud project, the scope every cloud resource is fetched from.
#[derive(Debug, Clone)]
pub struct Project {
    id: String,
    ctx: RestContext,
}

impl Project {
    pub fn new(ctx: RestContext, id: impl Into<String>) -> Self {
        Project { id: id.into(), ctx }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ctx(&self) -> &RestContext {
        &self.ctx
    }

    /// Path of a resource collection in this project, e.g. `/cloud/project/{id}/image`
    pub(crate) fn path(&self, collection: &str) -> String {
        format!("/cloud/project/{}/{}", segment(&self.id), collection)
    }

    /// Path of one item of a collection, e.g. `/cloud/project/{id}/image/{imageId}`
    pub(crate) fn item_path(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.path(collection), segment(id))
    }
}

//! # ovhapi - asynchronous OVH API client
//!
//! A Rust client for the OVH REST API. Requests are signed with the
//! application/consumer credential scheme, sent asynchronously, and their
//! responses are exposed as typed objects that can be partially loaded from
//! listings and completed on demand.
//!
//! ## Features
//!
//! - Request signing (`X-Ovh-*` headers, SHA-1 over a timestamped canonical string)
//! - Pluggable transport, with a `reqwest` implementation by default
//! - One error type for every non-2xx or undecodable response
//! - Partial/complete object lifecycle shared by every cloud resource
//! - Stateless conversion between API dates and epoch milliseconds
//!
//! ## Basic Usage
//!
//! ```no_run
//! use ovhapi::{Credential, RestContext, Shape};
//! use reqwest::Method;
//!
//! # async fn example() -> ovhapi::Result<()> {
//! let credential = Credential::build("app_key", "app_secret", "consumer_key").await?;
//! let ctx = RestContext::new(credential)?;
//!
//! // Raw call: sign, send, validate
//! let me = ctx.request("/me", Method::GET, None, Shape::Object).await?;
//! println!("nichandle: {:?}", me.get_string("nichandle"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Partial objects
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use ovhapi::cloud::{Image, ImageFilter, Project};
//! # async fn example(ctx: ovhapi::RestContext) -> ovhapi::Result<()> {
//! let project = Project::new(ctx, "my-project-id");
//!
//! let mut images: Vec<Image> = Image::list(&project, &ImageFilter::default())
//!     .try_collect()
//!     .await?;
//!
//! for image in &mut images {
//!     // Listed images are partial: detail getters fail until completed
//!     assert!(image.status().is_err());
//!     image.complete().await?;
//!     println!("{} is {}", image.id(), image.status()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod cloud;
pub mod credential;
pub mod entity;
pub mod error;
pub mod response;
pub mod rest;
pub mod time;
pub mod transport;

// Re-export main types for convenience
pub use client::Config;
pub use credential::{Credential, SignatureHeaders};
pub use entity::{Entity, Fetch};
pub use error::{RestError, Result};
pub use response::{Payload, Shape};
pub use rest::RestContext;
pub use time::{date_to_time, time_to_date};
pub use transport::{RawResponse, ReqwestTransport, SignedRequest, Transport};

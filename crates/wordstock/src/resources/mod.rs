//! # Resources
//!
//! URL-keyed remote files, their local resolution, and archive extraction.

pub mod archive;
pub mod resource_loader;
pub mod url_resource;

#[doc(inline)]
pub use archive::extract_archive;
#[cfg(feature = "download")]
#[doc(inline)]
pub use resource_loader::download_from_url;
#[doc(inline)]
pub use resource_loader::{ResourceLoader, load_resource_in_root};
#[doc(inline)]
pub use url_resource::{ConstUrlResource, KeyedResource, UrlResource};

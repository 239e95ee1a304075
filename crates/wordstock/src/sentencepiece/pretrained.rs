//! # Pretrained Models

use std::path::PathBuf;

use crate::{
    errors::{WSResult, WordstockError},
    resources::{ConstUrlResource, KeyedResource, ResourceLoader},
};

/// Cache sub-directory for pretrained models.
const CACHE_KEY: &str = "sentencepiece";

/// Pretrained model names and their download resources.
pub const PRETRAINED_SP_MODEL: &[(&str, ConstUrlResource)] = &[
    (
        "text_unigram_15000",
        ConstUrlResource {
            urls: &["https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_unigram_15000.model"],
            hash: None,
        },
    ),
    (
        "text_unigram_25000",
        ConstUrlResource {
            urls: &["https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_unigram_25000.model"],
            hash: None,
        },
    ),
    (
        "text_unigram_50000",
        ConstUrlResource {
            urls: &["https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_unigram_50000.model"],
            hash: None,
        },
    ),
    (
        "text_bpe_15000",
        ConstUrlResource {
            urls: &["https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_bpe_15000.model"],
            hash: None,
        },
    ),
    (
        "text_bpe_25000",
        ConstUrlResource {
            urls: &["https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_bpe_25000.model"],
            hash: None,
        },
    ),
    (
        "text_bpe_50000",
        ConstUrlResource {
            urls: &["https://pytorch.s3.amazonaws.com/models/text/pretrained_spm/text_bpe_50000.model"],
            hash: None,
        },
    ),
];

/// The download resource of a pretrained model.
pub fn pretrained_sp_model(name: &str) -> Option<ConstUrlResource> {
    PRETRAINED_SP_MODEL
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, model)| *model)
}

/// Resolve a pretrained model to a local file, fetching it through `loader`.
///
/// ## Arguments
/// * `name` - a name from [`PRETRAINED_SP_MODEL`].
/// * `loader` - the resource loader; usually a disk cache.
///
/// ## Errors
/// `ResourceNotFound` for an unknown name; otherwise any loader error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(loader)))]
pub fn load_pretrained_sp_model<L>(
    name: &str,
    loader: &mut L,
) -> WSResult<PathBuf>
where
    L: ResourceLoader + ?Sized,
{
    let model = pretrained_sp_model(name).ok_or_else(|| {
        WordstockError::ResourceNotFound(format!("unknown pretrained sentencepiece model {name:?}"))
    })?;
    let resource = KeyedResource::new(&[CACHE_KEY], model);
    loader.load_resource_path(&resource)
}

//! # Pretrained Vectors
//!
//! GloVe and FastText tables, fetched into a root directory and loaded
//! with [`load_vectors_from_file_path`].

use std::path::{Path, PathBuf};

use crate::{
    errors::{WSResult, WordstockError},
    resources::{
        ConstUrlResource,
        KeyedResource,
        UrlResource,
        extract_archive,
        load_resource_in_root,
    },
    vectors::{
        vectors_io::{VectorsLoadOptions, load_vectors_from_file_path},
        word_vectors::Vectors,
    },
};

/// The default download root.
pub const DEFAULT_ROOT: &str = ".data";

/// GloVe archives, keyed by dataset name.
pub const GLOVE_URLS: &[(&str, ConstUrlResource)] = &[
    (
        "42B",
        ConstUrlResource {
            urls: &["https://nlp.stanford.edu/data/glove.42B.300d.zip"],
            hash: None,
        },
    ),
    (
        "840B",
        ConstUrlResource {
            urls: &["https://nlp.stanford.edu/data/glove.840B.300d.zip"],
            hash: None,
        },
    ),
    (
        "twitter.27B",
        ConstUrlResource {
            urls: &["https://nlp.stanford.edu/data/glove.twitter.27B.zip"],
            hash: None,
        },
    ),
    (
        "6B",
        ConstUrlResource {
            urls: &["https://nlp.stanford.edu/data/glove.6B.zip"],
            hash: None,
        },
    ),
];

/// Every GloVe file which can be loaded.
pub const GLOVE_FILES: &[&str] = &[
    "glove.42B.300d.txt",
    "glove.840B.300d.txt",
    "glove.twitter.27B.25d.txt",
    "glove.twitter.27B.50d.txt",
    "glove.twitter.27B.100d.txt",
    "glove.twitter.27B.200d.txt",
    "glove.6B.50d.txt",
    "glove.6B.100d.txt",
    "glove.6B.200d.txt",
    "glove.6B.300d.txt",
];

/// The FastText wiki vectors URL pattern; `{language}` is substituted.
pub const FASTTEXT_URL_PATTERN: &str =
    "https://dl.fbaipublicfiles.com/fasttext/vectors-wiki/wiki.{language}.vec";

/// The GloVe set which ships with one duplicated token.
const GLOVE_DUPLICATE_TOLERANT: &str = "840B";

/// Options for loading GloVe vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct GloVeOptions {
    /// Dataset name: `42B`, `840B`, `twitter.27B` or `6B`.
    pub name: String,

    /// Vector dimension.
    pub dim: usize,

    /// Directory holding (or receiving) the archive.
    pub root: PathBuf,

    /// Check the archive's sha256 digest.
    ///
    /// The digest is `hash`, else the one listed in [`GLOVE_URLS`]. The
    /// listed archives carry no digest, so without `hash` nothing is
    /// checked and a warning is logged.
    pub validate_file: bool,

    /// Expected sha256 hex digest of the archive.
    pub hash: Option<String>,

    /// The fallback vector; defaults to `zeros(dim)`.
    pub unk_tensor: Option<Vec<f32>>,

    /// Number of chunks to parse in parallel.
    pub num_cpus: usize,
}

impl Default for GloVeOptions {
    fn default() -> Self {
        Self {
            name: "840B".to_string(),
            dim: 300,
            root: PathBuf::from(DEFAULT_ROOT),
            validate_file: true,
            hash: None,
            unk_tensor: None,
            num_cpus: 32,
        }
    }
}

impl GloVeOptions {
    /// Set the dataset name.
    pub fn with_name<S: Into<String>>(
        self,
        name: S,
    ) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Set the dimension.
    pub fn with_dim(
        self,
        dim: usize,
    ) -> Self {
        Self { dim, ..self }
    }

    /// Set the root directory; `None` restores the default.
    pub fn with_root<P: AsRef<Path>>(
        self,
        root: Option<P>,
    ) -> Self {
        Self {
            root: root
                .map(|p| p.as_ref().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            ..self
        }
    }

    /// Enable or disable checksum validation.
    pub fn with_validate_file(
        self,
        validate_file: bool,
    ) -> Self {
        Self {
            validate_file,
            ..self
        }
    }

    /// Set the expected archive digest.
    pub fn with_hash<S: Into<String>>(
        self,
        hash: Option<S>,
    ) -> Self {
        Self {
            hash: hash.map(Into::into),
            ..self
        }
    }

    /// Set the fallback vector.
    pub fn with_unk_tensor(
        self,
        unk_tensor: Option<Vec<f32>>,
    ) -> Self {
        Self { unk_tensor, ..self }
    }

    /// Set the number of parallel chunks.
    pub fn with_num_cpus(
        self,
        num_cpus: usize,
    ) -> Self {
        Self { num_cpus, ..self }
    }

    /// The file name selected by `name` and `dim`.
    ///
    /// ## Errors
    /// `InvalidValue` if the pair does not name a GloVe file.
    pub fn file_name(&self) -> WSResult<String> {
        let file_name = format!("glove.{}.{}d.txt", self.name, self.dim);
        if !GLOVE_FILES.contains(&file_name.as_str()) {
            return Err(WordstockError::InvalidValue(format!(
                "unknown GloVe name/dim: {:?}/{}; valid files are {GLOVE_FILES:?}",
                self.name, self.dim
            )));
        }
        Ok(file_name)
    }

    /// The archive resource for `name`.
    pub fn archive(&self) -> WSResult<ConstUrlResource> {
        GLOVE_URLS
            .iter()
            .find(|(name, _)| *name == self.name)
            .map(|(_, archive)| *archive)
            .ok_or_else(|| {
                WordstockError::InvalidValue(format!("unknown GloVe name: {:?}", self.name))
            })
    }

    /// Fetch, extract, and load the vectors.
    ///
    /// ## Errors
    /// * `InvalidValue` for an unknown name/dim (before any I/O), or for
    ///   duplicate tokens.
    /// * `Download`/`ChecksumMismatch` if the archive cannot be fetched.
    /// * `ResourceNotFound` if the archive lacks the expected member.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(name = %self.name, dim = self.dim)))]
    pub fn load(self) -> WSResult<Vectors> {
        let file_name = self.file_name()?;
        let mut resource = UrlResource::from(self.archive()?);
        if self.hash.is_some() {
            resource.hash = self.hash.clone();
        }

        let archive = fetch(&self.root, resource, self.validate_file)?;
        let members = extract_archive(&archive, Some(&self.root))?;
        let path = members
            .into_iter()
            .find(|p| {
                p.file_name()
                    .is_some_and(|f| f.to_string_lossy().contains(&file_name))
            })
            .ok_or_else(|| {
                WordstockError::ResourceNotFound(format!(
                    "{file_name} not found in {}",
                    archive.display()
                ))
            })?;

        let tolerated = if self.name == GLOVE_DUPLICATE_TOLERANT {
            1
        } else {
            0
        };
        load_checked(&path, self.num_cpus, self.unk_tensor, tolerated)
    }
}

/// Options for loading FastText wiki vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FastTextOptions {
    /// Wiki language code.
    pub language: String,

    /// Directory holding (or receiving) the `.vec` file.
    pub root: PathBuf,

    /// Check the file's sha256 digest against `hash`.
    ///
    /// Without `hash` nothing is checked and a warning is logged.
    pub validate_file: bool,

    /// Expected sha256 hex digest of the file.
    pub hash: Option<String>,

    /// The fallback vector; defaults to `zeros(dim)`.
    pub unk_tensor: Option<Vec<f32>>,

    /// Number of chunks to parse in parallel.
    pub num_cpus: usize,
}

impl Default for FastTextOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            root: PathBuf::from(DEFAULT_ROOT),
            validate_file: true,
            hash: None,
            unk_tensor: None,
            num_cpus: 32,
        }
    }
}

impl FastTextOptions {
    /// Set the language.
    pub fn with_language<S: Into<String>>(
        self,
        language: S,
    ) -> Self {
        Self {
            language: language.into(),
            ..self
        }
    }

    /// Set the root directory; `None` restores the default.
    pub fn with_root<P: AsRef<Path>>(
        self,
        root: Option<P>,
    ) -> Self {
        Self {
            root: root
                .map(|p| p.as_ref().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            ..self
        }
    }

    /// Enable or disable checksum validation.
    pub fn with_validate_file(
        self,
        validate_file: bool,
    ) -> Self {
        Self {
            validate_file,
            ..self
        }
    }

    /// Set the expected file digest.
    pub fn with_hash<S: Into<String>>(
        self,
        hash: Option<S>,
    ) -> Self {
        Self {
            hash: hash.map(Into::into),
            ..self
        }
    }

    /// Set the fallback vector.
    pub fn with_unk_tensor(
        self,
        unk_tensor: Option<Vec<f32>>,
    ) -> Self {
        Self { unk_tensor, ..self }
    }

    /// Set the number of parallel chunks.
    pub fn with_num_cpus(
        self,
        num_cpus: usize,
    ) -> Self {
        Self { num_cpus, ..self }
    }

    /// The download URL for `language`.
    pub fn url(&self) -> String {
        FASTTEXT_URL_PATTERN.replace("{language}", &self.language)
    }

    /// Fetch and load the vectors.
    ///
    /// ## Errors
    /// * `InvalidValue` for duplicate tokens.
    /// * `Download`/`ChecksumMismatch` if the file cannot be fetched.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(language = %self.language)))]
    pub fn load(self) -> WSResult<Vectors> {
        let resource = UrlResource::from_url(self.url(), self.hash.clone());
        let path = fetch(&self.root, resource, self.validate_file)?;
        load_checked(&path, self.num_cpus, self.unk_tensor, 0)
    }
}

fn fetch(
    root: &Path,
    resource: UrlResource,
    validate_file: bool,
) -> WSResult<PathBuf> {
    let resource = KeyedResource::new(&[], resource);
    if !validate_file {
        return load_resource_in_root(root, &resource.without_hash());
    }
    if resource.resource.hash.is_none() {
        log::warn!(
            "no checksum known for {:?}; loading it unvalidated",
            resource.resource.urls
        );
    }
    load_resource_in_root(root, &resource)
}

/// Load a space-delimited table, allowing at most `tolerated` duplicates.
fn load_checked(
    path: &Path,
    num_cpus: usize,
    unk_tensor: Option<Vec<f32>>,
    tolerated: usize,
) -> WSResult<Vectors> {
    let report = load_vectors_from_file_path(
        path,
        VectorsLoadOptions::default()
            .with_delimiter(' ')
            .with_num_cpus(num_cpus)
            .with_unk_tensor(unk_tensor),
    )?;
    if report.duplicate_tokens.len() > tolerated {
        return Err(WordstockError::InvalidValue(format!(
            "{} has duplicate tokens: {:?}",
            path.display(),
            report.duplicate_tokens
        )));
    }
    Ok(report.vectors)
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Write};

    use tempdir::TempDir;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn write_glove_zip(
        root: &Path,
        archive: &str,
        member: &str,
        content: &str,
    ) {
        let file = fs::File::create(root.join(archive)).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file(member, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_glove_names() {
        assert_eq!(
            GloVeOptions::default().file_name().unwrap(),
            "glove.840B.300d.txt"
        );
        assert_eq!(
            GloVeOptions::default()
                .with_name("twitter.27B")
                .with_dim(25)
                .archive()
                .unwrap()
                .urls,
            &["https://nlp.stanford.edu/data/glove.twitter.27B.zip"]
        );

        let dir = TempDir::new("glove").unwrap();
        for (name, dim) in [("UNK", 50), ("6B", 500), ("42B", 50)] {
            let options = GloVeOptions::default()
                .with_name(name)
                .with_dim(dim)
                .with_root(Some(dir.path()))
                .with_validate_file(false);
            assert!(matches!(
                options.load(),
                Err(WordstockError::InvalidValue(_))
            ));
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_glove_duplicates() {
        let dir = TempDir::new("glove").unwrap();
        write_glove_zip(
            dir.path(),
            "glove.840B.300d.zip",
            "glove.840B.300d.txt",
            "a 1 2\nb 3 4\na 5 6\n",
        );
        let vectors = GloVeOptions::default()
            .with_root(Some(dir.path()))
            .with_validate_file(false)
            .load()
            .unwrap();
        assert_eq!(vectors.get("a"), &[1.0, 2.0]);

        write_glove_zip(
            dir.path(),
            "glove.6B.zip",
            "glove.6B.50d.txt",
            "a 1 2\nb 3 4\na 5 6\n",
        );
        assert!(matches!(
            GloVeOptions::default()
                .with_name("6B")
                .with_dim(50)
                .with_root(Some(dir.path()))
                .with_validate_file(false)
                .load(),
            Err(WordstockError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_glove_missing_member() {
        let dir = TempDir::new("glove").unwrap();
        write_glove_zip(dir.path(), "glove.6B.zip", "glove.6B.50d.txt", "a 1\n");
        assert!(matches!(
            GloVeOptions::default()
                .with_name("6B")
                .with_dim(100)
                .with_root(Some(dir.path()))
                .with_validate_file(false)
                .load(),
            Err(WordstockError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn test_fasttext() {
        let options = FastTextOptions::default().with_language("de");
        assert_eq!(
            options.url(),
            "https://dl.fbaipublicfiles.com/fasttext/vectors-wiki/wiki.de.vec"
        );

        let dir = TempDir::new("fasttext").unwrap();
        fs::write(dir.path().join("wiki.de.vec"), "2 2\nder 1 2\ndie 3 4\n").unwrap();
        let vectors = options
            .with_root(Some(dir.path()))
            .with_validate_file(false)
            .load()
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors.get("die"), &[3.0, 4.0]);

        fs::write(dir.path().join("wiki.fr.vec"), "le 1\nle 2\n").unwrap();
        assert!(matches!(
            FastTextOptions::default()
                .with_language("fr")
                .with_root(Some(dir.path()))
                .load(),
            Err(WordstockError::InvalidValue(_))
        ));
    }

    #[cfg(feature = "download")]
    #[test]
    fn test_validate_file_checks_hash() {
        let dir = TempDir::new("fasttext").unwrap();
        fs::write(dir.path().join("wiki.de.vec"), "der 1 2\ndie 3 4\n").unwrap();
        let options = FastTextOptions::default()
            .with_language("de")
            .with_root(Some(dir.path()))
            .with_hash(Some("00"));

        assert!(matches!(
            options.clone().load(),
            Err(WordstockError::ChecksumMismatch { .. })
        ));
        assert_eq!(
            options
                .with_validate_file(false)
                .load()
                .unwrap()
                .len(),
            2
        );
    }
}

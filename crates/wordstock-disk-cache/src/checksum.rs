//! # File Checksums

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

/// Compute the lowercase hex sha256 digest of a file.
pub fn file_sha256<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();

    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// A file whose sha256 digest differs from the expected one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("checksum mismatch for {}: expected {expected}, found {found}", path.display())]
pub struct ChecksumMismatch {
    /// The file which was checked; it is left in place.
    pub path: PathBuf,

    /// The expected digest.
    pub expected: String,

    /// The observed digest.
    pub found: String,
}

/// Verify that a file has the expected sha256 digest.
///
/// The comparison ignores ASCII case in `expected`.
///
/// ## Errors
/// * The file cannot be read.
/// * [`ChecksumMismatch`] if the digest does not match.
pub fn verify_sha256<P: AsRef<Path>>(
    path: P,
    expected: &str,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let found = file_sha256(path)?;
    if !found.eq_ignore_ascii_case(expected) {
        return Err(ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            found,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_file_sha256() {
        let dir = tempdir::TempDir::new("checksum").unwrap();

        let empty = dir.path().join("empty.txt");
        fs::write(&empty, b"").unwrap();
        assert_eq!(file_sha256(&empty).unwrap(), EMPTY_SHA256);

        let abc = dir.path().join("abc.txt");
        fs::write(&abc, b"abc").unwrap();
        assert_eq!(file_sha256(&abc).unwrap(), ABC_SHA256);
    }

    #[test]
    fn test_verify_sha256() {
        let dir = tempdir::TempDir::new("checksum").unwrap();
        let abc = dir.path().join("abc.txt");
        fs::write(&abc, b"abc").unwrap();

        verify_sha256(&abc, ABC_SHA256).unwrap();
        verify_sha256(&abc, &ABC_SHA256.to_uppercase()).unwrap();

        let err = verify_sha256(&abc, EMPTY_SHA256).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
        assert_eq!(
            err.downcast_ref::<ChecksumMismatch>(),
            Some(&ChecksumMismatch {
                path: abc.clone(),
                expected: EMPTY_SHA256.to_string(),
                found: ABC_SHA256.to_string(),
            })
        );
    }
}

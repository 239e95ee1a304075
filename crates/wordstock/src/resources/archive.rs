//! # Archive Extraction

use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::errors::WSResult;

/// Is `path` a zip archive, judged by its extension?
pub fn is_zip_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Extract an archive.
///
/// Existing files are not overwritten; they are still reported.
///
/// ## Arguments
/// * `path` - the archive.
/// * `to` - the target directory; defaults to the archive's directory.
///
/// ## Returns
/// The extracted file paths, in archive order. A path which is not an
/// archive is returned as `[path]`.
///
/// ## Errors
/// * `Io` on read or write failures.
/// * `Archive` if the archive is malformed.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn extract_archive(
    path: &Path,
    to: Option<&Path>,
) -> WSResult<Vec<PathBuf>> {
    if !is_zip_archive(path) {
        return Ok(vec![path.to_path_buf()]);
    }
    let to = match to {
        Some(to) => to.to_path_buf(),
        None => path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    let mut archive = zip::ZipArchive::new(BufReader::new(File::open(path)?))?;
    let mut files = Vec::with_capacity(archive.len());

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        let Some(name) = entry.enclosed_name() else {
            log::warn!("skipping unsafe archive member {:?}", entry.name());
            continue;
        };
        let target = to.join(name);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if target.exists() {
            log::debug!("{} already exists; not overwriting", target.display());
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            log::debug!("extracting {}", target.display());
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;
        }
        files.push(target);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempdir::TempDir;
    use zip::write::SimpleFileOptions;

    use super::*;
    use crate::errors::WordstockError;

    fn write_zip(
        path: &Path,
        members: &[(&str, &str)],
    ) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, content) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_zip() {
        let dir = TempDir::new("archive").unwrap();
        let archive = dir.path().join("bundle.zip");
        write_zip(&archive, &[("a.txt", "alpha"), ("sub/b.txt", "beta")]);

        let files = extract_archive(&archive, None).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.txt"), dir.path().join("sub").join("b.txt")]
        );
        assert_eq!(fs::read_to_string(&files[1]).unwrap(), "beta");

        // Existing files are left alone.
        fs::write(&files[0], "changed").unwrap();
        let again = extract_archive(&archive, None).unwrap();
        assert_eq!(again, files);
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), "changed");

        let out = dir.path().join("out");
        let files = extract_archive(&archive, Some(&out)).unwrap();
        assert_eq!(files[0], out.join("a.txt"));
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), "alpha");
    }

    #[test]
    fn test_non_archive_and_corrupt() {
        let dir = TempDir::new("archive").unwrap();
        let plain = dir.path().join("wiki.en.vec");
        fs::write(&plain, "1 1\na 1\n").unwrap();
        assert_eq!(extract_archive(&plain, None).unwrap(), vec![plain.clone()]);

        let corrupt = dir.path().join("broken.zip");
        fs::write(&corrupt, "not a zip").unwrap();
        assert!(matches!(
            extract_archive(&corrupt, None),
            Err(WordstockError::Archive(_))
        ));
    }
}

//! Filesystem helpers for locating guide databases.
//!
//! Paths are UTF-8 (`camino`) and every access goes through `cap-std`
//! directory handles opened with ambient authority.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::io;

/// Create every missing directory above `path`.
///
/// Directories are created beneath the deepest ancestor that already exists,
/// so `..` components and symlinks in the existing prefix are resolved by the
/// operating system. A parent that already exists needs no work.
///
/// # Errors
/// Returns the I/O error raised while opening the existing ancestor or
/// creating the missing directories, including when an ancestor is a file.
///
/// # Examples
/// ```
/// # fn main() -> std::io::Result<()> {
/// let scratch = tempfile::tempdir()?;
/// let root = camino::Utf8Path::from_path(scratch.path())
///     .ok_or_else(|| std::io::Error::other("non-UTF-8 temp dir"))?;
/// let db = root.join("guides/city_guide.db");
/// guide_fs::ensure_parent_dir(&db)?;
/// assert!(root.join("guides").is_dir());
/// # Ok(())
/// # }
/// ```
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
        return Ok(());
    };
    let (anchor, missing) = deepest_existing_ancestor(parent)?;
    if missing.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&missing)
}

/// Whether `path` names an existing regular file.
///
/// # Errors
/// Fails when the parent directory cannot be opened, which includes the
/// parent not existing yet.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("database path should include a file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    match dir.metadata(name) {
        Ok(meta) => Ok(meta.is_file()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error),
    }
}

/// Open the deepest ancestor of `directory` that exists and return it with
/// the remaining components, which do not exist yet.
fn deepest_existing_ancestor(directory: &Utf8Path) -> io::Result<(Dir, Utf8PathBuf)> {
    for ancestor in directory.ancestors() {
        let candidate = if ancestor.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            ancestor
        };
        match Dir::open_ambient_dir(candidate, ambient_authority()) {
            Ok(dir) => {
                let missing = directory
                    .strip_prefix(ancestor)
                    .map_err(|_| {
                        io::Error::other(format!("failed to strip {ancestor} from {directory}"))
                    })?
                    .to_path_buf();
                return Ok((dir, missing));
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(error),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no ancestor of {directory} exists"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    #[rstest]
    fn creates_nested_parents_for_absolute_paths(scratch: TempDir) {
        let root = utf8(&scratch);
        let db = root.join("a/b/c/city_guide.db");
        ensure_parent_dir(&db).expect("create parents");
        assert!(root.join("a/b/c").is_dir());
        assert!(!db.exists());
    }

    #[rstest]
    #[case("city_guide.db")]
    #[case("/city_guide.db")]
    fn bare_names_need_no_directories(#[case] path: &str) {
        ensure_parent_dir(Utf8Path::new(path)).expect("nothing to create");
    }

    #[rstest]
    fn reports_regular_files(scratch: TempDir) {
        let root = utf8(&scratch);
        let db = root.join("guides.db");
        assert!(!file_is_file(&db).expect("check missing file"));
        std::fs::write(&db, b"").expect("create file");
        assert!(file_is_file(&db).expect("check file"));
    }

    #[rstest]
    fn missing_parent_is_an_error(scratch: TempDir) {
        let db = utf8(&scratch).join("absent/guides.db");
        assert!(file_is_file(&db).is_err());
    }

    #[rstest]
    fn existing_parent_needs_no_work(scratch: TempDir) {
        let root = utf8(&scratch);
        ensure_parent_dir(&root.join("city_guide.db")).expect("parent exists");
        ensure_parent_dir(&root.join("guides/city_guide.db")).expect("create once");
        ensure_parent_dir(&root.join("guides/city_guide.db")).expect("create again");
        assert!(root.join("guides").is_dir());
    }

    #[rstest]
    fn parent_that_is_a_file_is_an_error(scratch: TempDir) {
        let root = utf8(&scratch);
        std::fs::write(root.join("occupied"), b"").expect("create file");
        assert!(ensure_parent_dir(&root.join("occupied/city_guide.db")).is_err());
    }

    #[rstest]
    fn dot_dot_components_resolve_through_the_filesystem(scratch: TempDir) {
        let root = utf8(&scratch);
        std::fs::create_dir(root.join("work")).expect("create work dir");
        let db = root.join("work/../sibling/city_guide.db");
        ensure_parent_dir(&db).expect("create sibling");
        assert!(root.join("sibling").is_dir());
    }

    #[cfg(unix)]
    #[rstest]
    fn symlinked_parents_are_followed(scratch: TempDir) {
        let root = utf8(&scratch);
        let real = root.join("real");
        std::fs::create_dir(&real).expect("create real dir");
        let link = root.join("link");
        std::os::unix::fs::symlink(&real, &link).expect("create symlink");

        ensure_parent_dir(&link.join("city_guide.db")).expect("existing symlinked parent");
        ensure_parent_dir(&link.join("nested/deeper/city_guide.db"))
            .expect("create beneath symlink");
        assert!(real.join("nested/deeper").is_dir());
    }
}

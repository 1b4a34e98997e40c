//! Resolution of literal import targets to files on disk.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolve `target` against `search_dirs`, trying every extension.
///
/// Direct names (`dir/target.ext`) are probed across all directories and
/// extensions first; only then the partial form (`dir/_target.ext`). Within
/// each pass directory order wins over extension order. A trailing
/// recognized extension on `target` is ignored (case-insensitively).
///
/// Returns `None` when nothing matches; callers treat such targets as
/// external references (CSS imports, library modules).
pub fn resolve(target: &str, search_dirs: &[PathBuf], extensions: &[String]) -> Option<PathBuf> {
    let base = strip_extension(target, extensions);

    candidates(search_dirs, extensions, base)
        .find(|path| is_file(path))
        .or_else(|| {
            candidates(search_dirs, extensions, base)
                .filter_map(|path| partial(&path))
                .find(|path| is_file(path))
        })
}

/// Direct candidates in probe order: directories outer, extensions inner.
fn candidates<'a>(
    search_dirs: &'a [PathBuf],
    extensions: &'a [String],
    base: &'a str,
) -> impl Iterator<Item = PathBuf> + 'a {
    search_dirs.iter().flat_map(move |dir| {
        extensions
            .iter()
            .map(move |ext| candidate(dir, base, ext))
    })
}

/// Drop a trailing `.ext` when `ext` is one of `extensions`.
fn strip_extension<'a>(target: &'a str, extensions: &[String]) -> &'a str {
    for ext in extensions {
        let Some(start) = target.len().checked_sub(ext.len() + 1) else {
            continue;
        };
        let Some(suffix) = target.get(start..) else {
            continue;
        };
        if suffix.starts_with('.') && suffix[1..].eq_ignore_ascii_case(ext) {
            return &target[..start];
        }
    }
    target
}

/// `dir/base.ext`, lexically normalized. `base` is appended as text, so an
/// absolute-looking target still lands inside `dir`.
fn candidate(dir: &Path, base: &str, ext: &str) -> PathBuf {
    let mut joined = OsString::from(dir.as_os_str());
    joined.push("/");
    joined.push(base);
    joined.push(".");
    joined.push(ext);
    normalize(Path::new(&joined))
}

/// The `_name` sibling of `path`.
fn partial(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut underscored = OsString::from("_");
    underscored.push(name);
    Some(path.with_file_name(underscored))
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

/// Collapse `.` and `..` components without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

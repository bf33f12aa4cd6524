//! Path helpers: lexical normalization, link targets and display quoting

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Make `path` absolute against the current directory and normalize it
/// lexically.
///
/// `.` components are dropped and `..` pops the previous component. Symbolic
/// links are not resolved, so the result names the same entry the caller
/// spelled out even when it is a link.
pub fn absolute(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let joined = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
    Ok(normalize(&joined))
}

/// Lexically normalize an already absolute path.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root or a drive prefix.
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether `path` lies inside (or is) `root`, comparing components lexically.
pub fn is_within(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Express `target` relative to the directory `base`.
///
/// Both paths must be absolute and normalized. When they share no common
/// prefix (different drive prefixes on Windows) `target` is returned as is.
pub fn relative_to(target: &Path, base: &Path) -> PathBuf {
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = target_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return target.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// The target to write into a symbolic link at `link` pointing at `target`.
///
/// When `link_root` is set and both the link's directory and the target lie
/// under it, the target is made relative to the link's directory so the pair
/// can be relocated together. Otherwise the absolute target is used.
pub fn link_target(link: &Path, target: &Path, link_root: Option<&Path>) -> PathBuf {
    let Some(root) = link_root else {
        return target.to_path_buf();
    };
    match link.parent() {
        Some(dir) if is_within(dir, root) && is_within(target, root) => relative_to(target, dir),
        _ => target.to_path_buf(),
    }
}

/// Whether the symbolic link at `link` resolves to the same entry as `target`.
///
/// Resolution failures (dangling links, permission errors, loops) answer
/// `false`: a link that cannot be resolved cannot be trusted.
pub fn resolves_to(link: &Path, target: &Path) -> bool {
    let Ok(resolved_link) = dunce::canonicalize(link) else {
        tracing::warn!(link = %link.display(), "Symbolic link cannot be resolved");
        return false;
    };
    let Ok(resolved_target) = dunce::canonicalize(target) else {
        tracing::warn!(target = %target.display(), "Link source cannot be resolved");
        return false;
    };
    resolved_link == resolved_target
}

/// The current user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::HomeNotFound)
}

/// Quote a path for display so it can be pasted back into a POSIX shell.
///
/// Paths made only of safe characters are returned unchanged; anything else
/// is single-quoted with embedded quotes escaped.
pub fn quoted(path: &Path) -> String {
    let text = path.to_string_lossy();
    if text.is_empty() {
        return "''".to_string();
    }
    let safe = text
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        text.into_owned()
    } else {
        format!("'{}'", text.replace('\'', r#"'"'"'"#))
    }
}

use std::path::{Component, Path, PathBuf};

/// Renders a path for messages: canonical when it exists, otherwise made
/// absolute against the working directory and lexically cleaned up.
pub trait PathDisplayExt {
    fn display_best_effort(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> PathDisplayExt for P {
    fn display_best_effort(&self) -> String {
        let path = self.as_ref();
        if let Ok(canonical) = path.canonicalize() {
            return canonical.display().to_string();
        }

        let absolute = match std::env::current_dir() {
            Ok(current_dir) if path.is_relative() => current_dir.join(path),
            _ => path.to_path_buf(),
        };
        normalize(&absolute).display().to_string()
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` never climbs above the root
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[cfg(unix)]
    #[rstest]
    #[case("/a/./b/../c", "/a/c")]
    #[case("/a/b/../../..", "/")]
    #[case("/../x", "/x")]
    fn normalize_resolves_dots(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(Path::new(input)), PathBuf::from(expected));
    }

    #[cfg(unix)]
    #[test]
    fn missing_path_is_made_absolute() {
        let shown = "definitely/missing/../script.yaml".display_best_effort();

        assert!(Path::new(&shown).is_absolute());
        assert!(shown.ends_with("definitely/script.yaml"));
    }

    #[test]
    fn existing_path_is_canonical() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let canonical = dir.path().canonicalize().expect("Failed to canonicalize");

        assert_eq!(
            dir.path().join(".").display_best_effort(),
            canonical.display().to_string()
        );
    }
}

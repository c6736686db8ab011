use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

/// Characters dropped from filenames
const REMOVED_CHARS: &[char] = &[
    '?', '%', '*', '"', '<', '>', '&', '(', ')', '#', '[', ']', '=',
];

/// Characters replaced with `-`
const SEPARATOR_CHARS: &[char] = &['/', '\\', '|', ':', ';', ',', '+'];

/// Filename split around its last dot
///
/// `base + separator + extension` always gives back the parsed name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFilename {
    pub base: String,
    /// Either `"."` or empty, when name has no dot at all
    pub separator: &'static str,
    pub extension: String,
}

impl SanitizedFilename {
    /// Name with `-{index}` suffix on the base part, index 0 gives the name itself
    pub fn numbered(&self, index: usize) -> String {
        match index {
            0 => self.to_string(),
            i => format!("{}-{}{}{}", self.base, i, self.separator, self.extension),
        }
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, self.separator, self.extension)
    }
}

/// Removes invalid characters from filename.
///
/// Removal goes strictly before separator replacement, so removed characters
/// never turn into `-`.
pub fn clean(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !REMOVED_CHARS.contains(c))
        .map(|c| if SEPARATOR_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

pub fn parse(filename: &str) -> SanitizedFilename {
    match filename.rsplit_once('.') {
        Some((base, extension)) => SanitizedFilename {
            base: base.to_string(),
            separator: ".",
            extension: extension.to_string(),
        },
        None => SanitizedFilename {
            base: filename.to_string(),
            separator: "",
            extension: String::new(),
        },
    }
}

fn is_taken(directory: &Path, filename: &str) -> bool {
    // symlink_metadata, so dangling links also count as taken
    fs::symlink_metadata(directory.join(filename)).is_ok()
}

/// Changes filename to a value not existing yet in `directory`.
///
/// Probes `name.ext`, `name-1.ext`, `name-2.ext` and so on without any upper bound.
/// There is no locking: a concurrent writer may claim the returned name before
/// the caller uses it.
pub fn unique_filename(filename: &str, directory: &Path) -> String {
    let parts = parse(filename);
    let mut index = 0;
    loop {
        let candidate = parts.numbered(index);
        if !is_taken(directory, &candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Same as [`unique_filename`], but gives up after `max_attempts` probes
pub fn unique_filename_within(
    filename: &str,
    directory: &Path,
    max_attempts: NonZeroUsize,
) -> Option<String> {
    let parts = parse(filename);
    (0..max_attempts.get())
        .map(|index| parts.numbered(index))
        .find(|candidate| !is_taken(directory, candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    const SAMPLES: &[&str] = &[
        "",
        "report.pdf",
        "a/b\\c|d:e;f,g+h",
        "what?%*\"<>&()#[]=.txt",
        "(=/=)",
        "[1+1].csv",
        "  spaced name .tar.gz ",
        "ÁrvíztűrőTükörfúrógép;2024.xlsx",
    ];

    #[test]
    fn clean_removes_and_replaces() {
        assert_eq!(clean("a/b\\c|d:e;f,g+h"), "a-b-c-d-e-f-g-h");
        assert_eq!(clean("what?%*\"<>&()#[]=.txt"), "what.txt");
        assert_eq!(clean("(=/=)"), "-");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn clean_is_idempotent() {
        for sample in SAMPLES {
            let once = clean(sample);
            assert_eq!(clean(&once), once, "sample {:?}", sample);
        }
    }

    #[test]
    fn clean_leaves_no_forbidden_chars() {
        for sample in SAMPLES {
            let cleaned = clean(sample);
            assert!(!cleaned.contains(REMOVED_CHARS), "sample {:?}", sample);
            assert!(!cleaned.contains(SEPARATOR_CHARS), "sample {:?}", sample);
        }
    }

    #[test]
    fn parse_splits_on_last_dot() {
        assert_eq!(
            parse("a.b.txt"),
            SanitizedFilename {
                base: "a.b".to_string(),
                separator: ".",
                extension: "txt".to_string(),
            }
        );
        assert_eq!(
            parse("noext"),
            SanitizedFilename {
                base: "noext".to_string(),
                separator: "",
                extension: String::new(),
            }
        );
        assert_eq!(parse(".htaccess").base, "");
        assert_eq!(parse("trailing.").extension, "");
        for sample in SAMPLES {
            assert_eq!(parse(sample).to_string(), *sample);
        }
    }

    #[test]
    fn unique_filename_probes_increasing_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_filename("f.txt", dir.path()), "f.txt");

        File::create(dir.path().join("f.txt")).unwrap();
        assert_eq!(unique_filename("f.txt", dir.path()), "f-1.txt");

        File::create(dir.path().join("f-1.txt")).unwrap();
        File::create(dir.path().join("f-2.txt")).unwrap();
        assert_eq!(unique_filename("f.txt", dir.path()), "f-3.txt");

        File::create(dir.path().join("noext")).unwrap();
        assert_eq!(unique_filename("noext", dir.path()), "noext-1");
    }

    #[test]
    fn unique_filename_within_gives_up() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("f.txt")).unwrap();
        File::create(dir.path().join("f-1.txt")).unwrap();

        let two = NonZeroUsize::new(2).unwrap();
        assert_eq!(unique_filename_within("f.txt", dir.path(), two), None);
        let three = NonZeroUsize::new(3).unwrap();
        assert_eq!(
            unique_filename_within("f.txt", dir.path(), three),
            Some("f-2.txt".to_string())
        );
    }
}

//! Canonical dialogue file locations.
//!
//! Every dialogue path is derived from `(root, language, month, day, file base)`;
//! nothing stored elsewhere is treated as authoritative.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::language::Language;
use crate::utils::date::month_abbrev;

pub const DIALOGUE_EXTENSION: &str = "json";
pub const META_SUFFIX: &str = ".meta";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Month {0} is out of range")]
    InvalidMonth(u32),
    #[error("Dialogue file name is empty")]
    EmptyFileBase,
}

/// Reduce user input to a bare file stem: directories and any extension are dropped.
pub fn normalize_file_base(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// `<root>/<LANG>/<MonthAbbrev>/<day>/<file_base>.json`
pub fn resolve(
    root: &Path,
    lang: Language,
    month: u32,
    day: u32,
    file_base: &str,
) -> Result<PathBuf, PathError> {
    let abbrev = month_abbrev(month).ok_or(PathError::InvalidMonth(month))?;
    let file_base = normalize_file_base(file_base).ok_or(PathError::EmptyFileBase)?;

    Ok(root
        .join(lang.dir_name())
        .join(abbrev)
        .join(day.to_string())
        .join(format!("{}.{}", file_base, DIALOGUE_EXTENSION)))
}

/// `<MonthAbbrev>/<day>/<file_base>` as stored in the CSV dialogue column.
pub fn dialogue_fragment(month: u32, day: u32, file_base: &str) -> Result<String, PathError> {
    let abbrev = month_abbrev(month).ok_or(PathError::InvalidMonth(month))?;
    Ok(format!("{}/{}/{}", abbrev, day, file_base))
}

/// Force a `.json` extension, replacing any other one.
pub fn with_json_extension(path: &Path) -> PathBuf {
    path.with_extension(DIALOGUE_EXTENSION)
}

/// Sibling metadata file: `<file>.json.meta`.
pub fn meta_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(META_SUFFIX);
    PathBuf::from(name)
}

/// Both language variants of one logical dialogue file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialoguePaths {
    pub kr: PathBuf,
    pub en: PathBuf,
}

impl DialoguePaths {
    pub fn resolve(root: &Path, month: u32, day: u32, file_base: &str) -> Result<Self, PathError> {
        Ok(Self {
            kr: resolve(root, Language::Kr, month, day, file_base)?,
            en: resolve(root, Language::En, month, day, file_base)?,
        })
    }

    pub fn get(&self, lang: Language) -> &Path {
        match lang {
            Language::Kr => &self.kr,
            Language::En => &self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("intro", Some("intro"); "bare name")]
    #[test_case("intro.json", Some("intro"); "json extension")]
    #[test_case("intro.txt", Some("intro"); "other extension")]
    #[test_case("Mar/5/intro", Some("intro"); "csv fragment")]
    #[test_case("  ", None; "blank")]
    fn test_normalize_file_base(input: &str, expected: Option<&str>) {
        assert_eq!(normalize_file_base(input).as_deref(), expected);
    }

    #[test]
    fn test_resolve_layout() {
        let path = resolve(Path::new("/w"), Language::En, 3, 12, "intro").unwrap();
        assert_eq!(path, PathBuf::from("/w/EN/Mar/12/intro.json"));
    }

    #[test]
    fn test_resolve_rejects_invalid_input() {
        assert_eq!(
            resolve(Path::new("/w"), Language::Kr, 13, 1, "x"),
            Err(PathError::InvalidMonth(13))
        );
        assert_eq!(
            resolve(Path::new("/w"), Language::Kr, 1, 1, ""),
            Err(PathError::EmptyFileBase)
        );
    }

    #[test]
    fn test_pair_shares_file_base() {
        let paths = DialoguePaths::resolve(Path::new("/w"), 11, 2, "festival.json").unwrap();
        assert_eq!(paths.kr, PathBuf::from("/w/KR/Nov/2/festival.json"));
        assert_eq!(paths.en, PathBuf::from("/w/EN/Nov/2/festival.json"));
        assert_eq!(paths.kr.file_name(), paths.en.file_name());
    }

    #[test]
    fn test_fragment_and_meta() {
        assert_eq!(dialogue_fragment(1, 9, "opening").unwrap(), "Jan/9/opening");
        assert_eq!(
            meta_path(Path::new("/w/KR/Jan/9/opening.json")),
            PathBuf::from("/w/KR/Jan/9/opening.json.meta")
        );
        assert_eq!(
            with_json_extension(Path::new("/w/KR/Jan/9/opening")),
            PathBuf::from("/w/KR/Jan/9/opening.json")
        );
    }
}

// Language model
// The two dialogue trees kept side by side under the workspace root

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Kr,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Kr, Language::En];

    /// Top-level directory name for this language's tree.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Kr => "KR",
            Self::En => "EN",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.dir_name().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

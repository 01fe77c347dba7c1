//! Classification of raw setting values

/// Why a present value counts as blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankKind {
    /// Zero-length string
    Empty,
    /// Only whitespace characters
    WhiteSpaceOnly,
}

/// Result of classifying a raw value fetched from a settings source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Non-blank value, kept exactly as fetched
    Present(String),
    /// Value present but blank
    Blank(BlankKind),
    /// Key not found
    Absent,
}

impl ValidationOutcome {
    /// Classify a raw value. Whitespace follows Unicode `White_Space`.
    pub fn classify(raw: Option<String>) -> Self {
        match raw {
            None => Self::Absent,
            Some(value) if value.is_empty() => Self::Blank(BlankKind::Empty),
            Some(value) if value.chars().all(char::is_whitespace) => {
                Self::Blank(BlankKind::WhiteSpaceOnly)
            }
            Some(value) => Self::Present(value),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// The present value, if any
    pub fn into_present(self) -> Option<String> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

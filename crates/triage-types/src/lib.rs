//! Validated value types shared by the triage crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input text spans more than one line
    #[error("Text must fit on a single line")]
    MultiLine,
}

/// A single-line string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction. Inner
/// whitespace is kept exactly as given, so `"Mary  Ann  Smith"` stays as it is.
///
/// Line breaks are rejected because patient names are written one per line into snapshot
/// files; an embedded newline would split a record in two on reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty, or `TextError::MultiLine` if it
    /// still contains a line break.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(TextError::MultiLine);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` rather than `write!` so width/alignment flags reach the text.
        f.pad(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_outer_whitespace_and_keeps_inner_spacing() {
        let text = NonEmptyText::new("  Mary  Ann Smith \t").unwrap();
        assert_eq!(text.as_str(), "Mary  Ann Smith");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(NonEmptyText::new("").unwrap_err(), TextError::Empty);
        assert_eq!(NonEmptyText::new("   ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn rejects_embedded_line_breaks() {
        assert_eq!(
            NonEmptyText::new("Jane\nDoe").unwrap_err(),
            TextError::MultiLine
        );
    }

    #[test]
    fn display_honours_width() {
        let text = NonEmptyText::new("Bo").unwrap();
        assert_eq!(format!("[{text:<5}]"), "[Bo   ]");
    }

    #[test]
    fn deserialize_validates() {
        let ok: NonEmptyText = serde_json::from_str("\" Ada \"").unwrap();
        assert_eq!(ok.as_str(), "Ada");
        assert!(serde_json::from_str::<NonEmptyText>("\"  \"").is_err());
    }
}

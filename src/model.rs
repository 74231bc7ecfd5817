use crate::foundation::{
    core::is_hex_color,
    error::{BlockPartyError, BlockPartyResult},
};

/// One colored square at the party.
///
/// Field names on the wire are camelCase. PascalCase aliases are accepted so state files
/// written by older tooling still load.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Square {
    /// Currently displayed `#RRGGBB` color.
    #[serde(alias = "Color")]
    pub color: String,
    /// Color restored when a temporary animation mode ends.
    #[serde(
        default,
        alias = "OriginalColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_color: Option<String>,
}

impl Square {
    /// A freshly added square remembers its first color as the original.
    pub fn new(color: impl Into<String>) -> Self {
        let color = color.into();
        Self {
            original_color: Some(color.clone()),
            color,
        }
    }

    /// Check both colors are `#RRGGBB`.
    pub fn validate(&self) -> BlockPartyResult<()> {
        if !is_hex_color(&self.color) {
            return Err(BlockPartyError::validation(format!(
                "square color \"{}\" must be #RRGGBB",
                self.color
            )));
        }
        if let Some(orig) = &self.original_color
            && !is_hex_color(orig)
        {
            return Err(BlockPartyError::validation(format!(
                "square originalColor \"{orig}\" must be #RRGGBB"
            )));
        }
        Ok(())
    }
}

/// Ordered square collection. `squares[i]` is placed at spiral position `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SquareState {
    /// Squares in insertion order.
    #[serde(default, alias = "Squares")]
    pub squares: Vec<Square>,
}

impl SquareState {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Return `true` when there are no squares.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Validate every square, reporting the first offending index.
    pub fn validate(&self) -> BlockPartyResult<()> {
        for (idx, sq) in self.squares.iter().enumerate() {
            sq.validate().map_err(|e| match e {
                BlockPartyError::Validation(msg) => {
                    BlockPartyError::validation(format!("squares[{idx}]: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

impl From<Vec<Square>> for SquareState {
    fn from(squares: Vec<Square>) -> Self {
        Self { squares }
    }
}

#[cfg(test)]
#[path = "../tests/unit/model/model.rs"]
mod tests;

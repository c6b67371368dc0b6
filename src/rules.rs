use serde::{Deserialize, Serialize};

/// Rule toggles. Each special move can be switched off on its own, which
/// reproduces the simpler game the board started as.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Rules {
    /// Allow en passant captures after a two-square pawn push.
    pub en_passant: bool,
    /// Let rooks on their corners offer castling moves.
    pub castling: bool,
    /// Drop generated moves that would capture a king. Stands in for check
    /// detection, which this crate does not do.
    pub filter_king_captures: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules {
    pub fn new() -> Self {
        Rules {
            en_passant: true,
            castling: true,
            filter_king_captures: true,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Rules> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let rules = Rules::from_json(r#"{"castling": false}"#).unwrap();
        assert!(!rules.castling);
        assert!(rules.en_passant);
        assert!(rules.filter_king_captures);

        assert_eq!(Rules::from_json("{}").unwrap(), Rules::default());
        assert!(Rules::from_json("[1]").is_err());
    }
}

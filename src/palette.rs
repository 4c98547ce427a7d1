//! Saved color palettes
//!
//! A palette is an ordered list of `#rrggbb` strings. Before saving, colors are
//! sorted case-insensitively so the same set of colors always saves the same way.
//! The visualizer receives palettes as a JSON array of hex strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ColorError, Rgb};
use crate::sim::BodyRegistry;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("palette has no colors")]
    Empty,
    #[error("color {index}: {source}")]
    BadColor {
        index: usize,
        #[source]
        source: ColorError,
    },
    #[error("malformed palette JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Storage id, absent until saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub colors: Vec<String>,
}

impl Palette {
    /// Validate and lower-case every color
    pub fn new<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        let colors = colors
            .iter()
            .enumerate()
            .map(|(index, hex)| {
                Rgb::from_hex(hex.as_ref())
                    .map(|rgb| rgb.to_hex())
                    .map_err(|source| PaletteError::BadColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { id: None, colors })
    }

    /// Current body colors in registry order
    pub fn from_registry(registry: &BodyRegistry) -> Self {
        Self {
            id: None,
            colors: registry.iter().map(|b| b.color_hex.clone()).collect(),
        }
    }

    /// Sorted copy, as stored
    pub fn normalized(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.sort_by_key(|c| c.to_lowercase());
        Self {
            id: self.id.clone(),
            colors,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn rgb(&self) -> Vec<Rgb> {
        self.colors
            .iter()
            .filter_map(|hex| Rgb::from_hex(hex).ok())
            .collect()
    }

    /// Parse a JSON array of hex strings, e.g. `["#ff0000","#00ff00"]`
    pub fn from_json_list(json: &str) -> Result<Self, PaletteError> {
        let colors: Vec<String> = serde_json::from_str(json)?;
        Self::new(&colors)
    }

    pub fn to_json_list(&self) -> String {
        // A Vec<String> always serializes
        serde_json::to_string(&self.colors).unwrap_or_else(|_| "[]".to_string())
    }
}

//! Mapping from recommendation labels to presentation assets.
//!
//! The first whitespace-separated token of the label, lowercased, selects
//! the asset. Unknown codes have no asset; that is not an error.

use serde::{Deserialize, Serialize};

/// Applications the presentation layer has artwork for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppAsset {
    Kbz,
    Aya,
    Cb,
    Uab,
    Wave,
}

impl AppAsset {
    pub const ALL: [AppAsset; 5] = [
        AppAsset::Kbz,
        AppAsset::Aya,
        AppAsset::Cb,
        AppAsset::Uab,
        AppAsset::Wave,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "kbz" => Some(AppAsset::Kbz),
            "aya" => Some(AppAsset::Aya),
            "cb" => Some(AppAsset::Cb),
            "uab" => Some(AppAsset::Uab),
            "wave" => Some(AppAsset::Wave),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AppAsset::Kbz => "kbz",
            AppAsset::Aya => "aya",
            AppAsset::Cb => "cb",
            AppAsset::Uab => "uab",
            AppAsset::Wave => "wave",
        }
    }

    /// Image file name relative to the asset directory.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.key())
    }
}

/// A successful prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub label: String,
}

impl Recommendation {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// First token of the label, lowercased.
    pub fn asset_key(&self) -> String {
        self.label
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn asset(&self) -> Option<AppAsset> {
        AppAsset::from_key(&self.asset_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_key_is_first_token_lowercased() {
        let rec = Recommendation::new("Wave Money");
        assert_eq!(rec.asset_key(), "wave");
        assert_eq!(rec.asset(), Some(AppAsset::Wave));
    }

    #[test]
    fn known_codes_round_trip() {
        for asset in AppAsset::ALL {
            assert_eq!(AppAsset::from_key(asset.key()), Some(asset));
        }
        assert_eq!(Recommendation::new("KBZ Pay").asset(), Some(AppAsset::Kbz));
        assert_eq!(Recommendation::new("  AYA   Pay").asset(), Some(AppAsset::Aya));
    }

    #[test]
    fn unknown_code_has_no_asset() {
        assert_eq!(Recommendation::new("OnePay").asset(), None);
        assert_eq!(Recommendation::new("").asset_key(), "");
        assert_eq!(Recommendation::new("").asset(), None);
    }

    #[test]
    fn file_name_uses_key() {
        assert_eq!(AppAsset::Uab.file_name(), "uab.png");
    }
}

//! Tile card data handed to the presentation layer.
//!
//! Every optional display value is an `Option<String>`. A value only counts as
//! present when it is `Some` and non-empty; accessors return `None` otherwise so
//! callers never have to repeat the check. Whitespace-only values are present.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Display data for one tile card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileData {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<LinkData>>,
}

impl TileData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_links(mut self, links: Vec<LinkData>) -> Self {
        self.links = Some(links);
        self
    }

    pub fn url(&self) -> Option<&str> {
        present(self.url.as_deref())
    }

    pub fn image_url(&self) -> Option<&str> {
        present(self.image_url.as_deref())
    }

    pub fn desc(&self) -> Option<&str> {
        present(self.desc.as_deref())
    }

    /// The raw link list; `Some` even when every entry is incomplete.
    pub fn links(&self) -> Option<&[LinkData]> {
        self.links.as_deref()
    }

    /// Reject tiles whose title is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("tile title must not be blank"));
        }
        Ok(())
    }
}

/// One `{text, url}` entry of a tile's link list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl LinkData {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            url: Some(url.into()),
        }
    }

    /// Returns `(text, url)` when both are present.
    pub fn entry(&self) -> Option<(&str, &str)> {
        Some((present(self.text.as_deref())?, present(self.url.as_deref())?))
    }
}

/// Table form of a tile document: `{ "tiles": [...] }` or TOML `[[tiles]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TileList {
    pub tiles: Vec<TileData>,
}

/// Validate every tile, naming the first offending index.
pub fn validate_tiles(tiles: &[TileData]) -> Result<(), DomainError> {
    for (index, tile) in tiles.iter().enumerate() {
        tile.validate()
            .map_err(|err| DomainError::validation(format!("tile #{index}: {err}")))?;
    }
    Ok(())
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|candidate| !candidate.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_optional_values_are_absent() {
        let tile = TileData::new("Widget")
            .with_image_url("")
            .with_desc("A nice widget");

        assert_eq!(tile.url(), None);
        assert_eq!(tile.image_url(), None);
        assert_eq!(tile.desc(), Some("A nice widget"));
    }

    #[test]
    fn whitespace_values_are_present() {
        let tile = TileData::new("Widget").with_url(" ").with_desc("  ");

        assert_eq!(tile.url(), Some(" "));
        assert_eq!(tile.desc(), Some("  "));
        assert_eq!(LinkData::new(" ", "/a").entry(), Some((" ", "/a")));
    }

    #[test]
    fn link_entry_requires_text_and_url() {
        assert_eq!(LinkData::new("Docs", "/docs").entry(), Some(("Docs", "/docs")));
        assert_eq!(LinkData::new("", "/x").entry(), None);
        assert_eq!(
            LinkData {
                text: Some("Orphan".into()),
                url: None,
            }
            .entry(),
            None
        );
    }

    #[test]
    fn blank_title_fails_validation() {
        let err = TileData::new("   ").validate().expect_err("blank title");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn validate_tiles_reports_index() {
        let tiles = vec![TileData::new("ok"), TileData::new("")];
        let err = validate_tiles(&tiles).expect_err("second tile invalid");
        assert!(err.to_string().contains("tile #1"));
    }

    #[test]
    fn tile_list_requires_titles() {
        let err = serde_json::from_str::<TileList>(r#"{"tiles": [{"url": "/nowhere"}]}"#)
            .expect_err("missing title");
        assert!(err.to_string().contains("missing field `title`"));
    }
}

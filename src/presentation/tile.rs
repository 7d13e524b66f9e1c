//! Tile card views.
//!
//! `render_tile_item` produces one `<article class="TileItem">` fragment and
//! delegates the link list to `render_links_list`. Interpolated values go
//! through askama's HTML escaper; the nested list fragment is inserted as
//! already-escaped markup.

use askama::Template;

use crate::domain::tiles::{LinkData, TileData};

use super::views::{TemplateRenderError, render_template};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkItemView<'a> {
    pub text: &'a str,
    pub url: &'a str,
}

#[derive(Template)]
#[template(path = "partials/tile_item_links.html")]
pub struct TileItemLinksList<'a> {
    pub links: Vec<LinkItemView<'a>>,
}

impl<'a> TileItemLinksList<'a> {
    /// Keeps only links that carry both text and url, in input order.
    pub fn new(links: &'a [LinkData]) -> Self {
        let links = links
            .iter()
            .filter_map(LinkData::entry)
            .map(|(text, url)| LinkItemView { text, url })
            .collect();
        Self { links }
    }
}

#[derive(Template)]
#[template(path = "tile_item.html")]
pub struct TileItemTemplate<'a> {
    pub title: &'a str,
    pub url: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub desc: Option<&'a str>,
    pub links: Option<String>,
}

/// Render the `<ul class="TileItem__list">` fragment.
///
/// Returns `None` when `links` is absent or empty. A non-empty list whose
/// entries are all incomplete still yields the wrapper with an empty body.
pub fn render_links_list(
    links: Option<&[LinkData]>,
) -> Result<Option<String>, TemplateRenderError> {
    let Some(links) = links.filter(|links| !links.is_empty()) else {
        return Ok(None);
    };

    render_template(
        TileItemLinksList::new(links),
        "presentation::tile::render_links_list",
    )
    .map(Some)
}

/// Render one tile card as an HTML fragment.
pub fn render_tile_item(tile: &TileData) -> Result<String, TemplateRenderError> {
    let links = render_links_list(tile.links())?;

    render_template(
        TileItemTemplate {
            title: tile.title.as_str(),
            url: tile.url(),
            image_url: tile.image_url(),
            desc: tile.desc(),
            links,
        },
        "presentation::tile::render_tile_item",
    )
}

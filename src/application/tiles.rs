//! Tile rendering service.
//!
//! Wraps the pure presentation functions with validation, structured logging
//! and render counters. Output is identical to calling
//! `presentation::tile::render_tile_item` directly.

use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{debug, info, instrument, warn};

use crate::domain::tiles::{TileData, validate_tiles};
use crate::infra::telemetry::{
    METRIC_DOCUMENT_RENDER_MS, METRIC_LINKS_DROPPED, METRIC_LINKS_RENDERED, METRIC_TILES_RENDERED,
};
use crate::presentation::tile::render_tile_item;

use super::error::AppError;

/// Link bookkeeping gathered while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub tiles: usize,
    pub links_rendered: usize,
    pub links_dropped: usize,
}

impl RenderStats {
    fn for_tile(tile: &TileData) -> Self {
        let links = tile.links().unwrap_or_default();
        let links_rendered = links.iter().filter(|link| link.entry().is_some()).count();
        Self {
            tiles: 1,
            links_rendered,
            links_dropped: links.len() - links_rendered,
        }
    }

    fn absorb(&mut self, other: RenderStats) {
        self.tiles += other.tiles;
        self.links_rendered += other.links_rendered;
        self.links_dropped += other.links_dropped;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTile {
    pub html: String,
    pub stats: RenderStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedDocument {
    pub fragments: Vec<String>,
    pub stats: RenderStats,
}

impl RenderedDocument {
    /// All fragments in input order, one per line.
    pub fn html(&self) -> String {
        self.fragments.join("\n")
    }
}

/// Stateless tile renderer; cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileRenderer;

impl TileRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a single tile. Data never fails to render; errors come only from
    /// the template engine.
    pub fn render_tile(&self, tile: &TileData) -> Result<RenderedTile, AppError> {
        let html = render_tile_item(tile)?;
        let stats = RenderStats::for_tile(tile);

        counter!(METRIC_TILES_RENDERED).increment(1);
        counter!(METRIC_LINKS_RENDERED).increment(stats.links_rendered as u64);
        counter!(METRIC_LINKS_DROPPED).increment(stats.links_dropped as u64);

        if stats.links_rendered == 0 && stats.links_dropped > 0 {
            warn!(
                title = %tile.title,
                dropped = stats.links_dropped,
                "every tile link lacks text or url; rendering an empty list"
            );
        }

        debug!(
            title = %tile.title,
            links_rendered = stats.links_rendered,
            links_dropped = stats.links_dropped,
            bytes = html.len(),
            "tile rendered"
        );

        Ok(RenderedTile { html, stats })
    }

    /// Validate then render every tile of a document, preserving order.
    #[instrument(level = "debug", skip_all, fields(tiles = tiles.len()))]
    pub fn render_document(&self, tiles: &[TileData]) -> Result<RenderedDocument, AppError> {
        let started_at = Instant::now();
        validate_tiles(tiles)?;

        let mut document = RenderedDocument {
            fragments: Vec::with_capacity(tiles.len()),
            stats: RenderStats::default(),
        };
        for tile in tiles {
            let RenderedTile { html, stats } = self.render_tile(tile)?;
            document.fragments.push(html);
            document.stats.absorb(stats);
        }

        let elapsed = started_at.elapsed();
        histogram!(METRIC_DOCUMENT_RENDER_MS).record(elapsed.as_secs_f64() * 1000.0);
        info!(
            tiles = document.stats.tiles,
            links_rendered = document.stats.links_rendered,
            links_dropped = document.stats.links_dropped,
            elapsed_ms = elapsed.as_millis() as u64,
            "tile document rendered"
        );

        Ok(document)
    }
}

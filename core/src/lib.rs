#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Meme Zoo map.
//!
//! This crate defines the data surface that connects the HTTP data-fetch
//! adapter to the rendering core. The backend periodically delivers an
//! immutable [`ZooStateResponse`] snapshot; adapters push the contained
//! [`WorldDescriptor`] and [`Animal`] list into the scene wholesale. The
//! crate also owns the grid-to-pixel geometry shared by every renderer.

use serde::{Deserialize, Serialize};

/// Side length of a single square tile expressed in pixels.
///
/// Changing this value re-scales the whole map; no component carries a
/// per-entity override.
pub const TILE_LENGTH: f32 = 32.0;

/// Converts a grid coordinate or extent into pixels.
///
/// Used symmetrically for positions and widths/heights: a zone that starts
/// at tile 2 and spans 4 tiles starts at `tiles_to_pixels(2, t)` and spans
/// `tiles_to_pixels(4, t)` pixels.
#[must_use]
pub fn tiles_to_pixels(coord: u32, tile_length: f32) -> f32 {
    coord as f32 * tile_length
}

/// Axis-aligned rectangle expressed in whole tile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    /// Leftmost tile column covered by the rectangle.
    pub x: u32,
    /// Topmost tile row covered by the rectangle.
    pub y: u32,
    /// Number of tile columns spanned. Expected to be at least one.
    pub width: u32,
    /// Number of tile rows spanned. Expected to be at least one.
    pub height: u32,
}

impl TileRect {
    /// Creates a new tile rectangle from its origin and extent.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts the rectangle into pixel space.
    #[must_use]
    pub fn to_pixels(&self, tile_length: f32) -> PixelRect {
        PixelRect {
            x: tiles_to_pixels(self.x, tile_length),
            y: tiles_to_pixels(self.y, tile_length),
            width: tiles_to_pixels(self.width, tile_length),
            height: tiles_to_pixels(self.height, tile_length),
        }
    }
}

/// Axis-aligned rectangle expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    /// Horizontal position of the left edge.
    pub x: f32,
    /// Vertical position of the top edge.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl PixelRect {
    /// Creates a new pixel rectangle from its origin and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Midpoint of the rectangle.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns a rectangle shrunk by the provided amount on every edge.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - amount * 2.0,
            height: self.height - amount * 2.0,
        }
    }

    /// Reports whether the rectangle contains the provided point.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Immutable snapshot describing the zoo map's dimensions and capacity.
///
/// Delivered by the backend; the rendering core never validates or mutates
/// it. All counts are expected to be non-negative with
/// `current_count <= max_animals`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldDescriptor {
    /// Number of tile columns in the map.
    pub width: u32,
    /// Number of tile rows in the map.
    pub height: u32,
    /// Uniform zone size hint used by the backend's placement logic.
    pub zone_size: u32,
    /// Maximum number of animals the backend will place.
    pub max_animals: u32,
    /// Number of animals currently placed.
    pub current_count: u32,
    /// Whether the backend considers the map at capacity.
    pub is_full: bool,
}

impl WorldDescriptor {
    /// Total width of the map in pixels.
    #[must_use]
    pub fn pixel_width(&self, tile_length: f32) -> f32 {
        tiles_to_pixels(self.width, tile_length)
    }

    /// Total height of the map in pixels.
    #[must_use]
    pub fn pixel_height(&self, tile_length: f32) -> f32 {
        tiles_to_pixels(self.height, tile_length)
    }
}

/// External links advertised for an animal. Each link is independently
/// optional; absent links are simply omitted from any derived output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalLinks {
    /// Trading-chart URL.
    pub dex: Option<String>,
    /// Project website URL.
    pub website: Option<String>,
    /// Social profile URL.
    pub twitter: Option<String>,
}

/// A token meme-coin rendered as a zoo inhabitant.
///
/// The home rectangle is trusted as delivered: coordinates outside the
/// world bounds or overlapping another animal's zone are rendered exactly
/// where the geometry places them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub ticker: String,
    /// Origin chain tag.
    pub chain: String,
    /// Categorical biome tag driving zone color and icon.
    pub biome: String,
    /// Leftmost tile column of the home zone.
    pub home_x: u32,
    /// Topmost tile row of the home zone.
    pub home_y: u32,
    /// Home zone width in tiles.
    pub home_width: u32,
    /// Home zone height in tiles.
    pub home_height: u32,
    /// Market capitalisation in dollars.
    pub market_cap: f64,
    /// Trailing 24-hour trading volume in dollars.
    pub volume_24h: f64,
    /// Liquidity in dollars.
    pub liquidity: f64,
    /// Number of holders.
    pub holders: u64,
    /// Optional logo reference.
    pub logo_url: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub spawn_time: u64,
    /// External links, each independently optional.
    pub links: AnimalLinks,
}

impl Animal {
    /// Home territory expressed in tile units.
    #[must_use]
    pub const fn home(&self) -> TileRect {
        TileRect::new(self.home_x, self.home_y, self.home_width, self.home_height)
    }
}

/// Wire body of `GET {base}/zoo-state`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZooStateResponse {
    /// Map dimensions and capacity bookkeeping.
    pub world: WorldDescriptor,
    /// Ordered animal list; ordering is also the draw order.
    pub animals: Vec<Animal>,
    /// Server-side timestamp of the snapshot in epoch milliseconds.
    pub timestamp: u64,
}

/// Wire body of `GET {base}/phrase[?category=TAG]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseResponse {
    /// Random phrase produced by the backend.
    pub phrase: String,
}

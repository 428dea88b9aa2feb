#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for the Meme Zoo map.
//!
//! This crate models the scene independently of any rendering engine:
//! biome-driven zone presentation, the per-animal sprite registry, the
//! camera controller, and the scene lifecycle that ties them together.
//! Backends gather a [`FrameInput`] snapshot each frame, hand it to an
//! update closure alongside the mutable [`ZooScene`], and then draw
//! whatever the scene describes.

mod camera;
mod scene;
mod sprites;

pub use camera::{CameraState, KEYBOARD_PAN_STEP, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_RATE};
pub use scene::{AnimalClickHandler, ZooScene};
pub use sprites::{
    format_market_cap, SpriteEntry, SpriteRegistry, GLYPH_FONT_SIZE, GLYPH_OFFSET_Y, HOVER_SCALE,
    MARKET_CAP_FONT_SIZE, MARKET_CAP_OFFSET_Y, SPRITE_HIT_INSET, TICKER_FONT_SIZE, TICKER_OFFSET_Y,
};

use anyhow::Result as AnyResult;
use glam::Vec2;
use meme_zoo_core::{Animal, PixelRect, WorldDescriptor};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            red: self.red,
            green: self.green,
            blue: self.blue,
            alpha,
        }
    }
}

/// Background color of the map, matching the page behind it.
pub const WORLD_BACKGROUND: Color = Color::from_rgb_u8(0x1a, 0x1a, 0x2e);

/// Cosmetic grid line color drawn at every tile boundary.
pub const GRID_LINE_COLOR: Color = Color::from_rgb_u8(0x33, 0x33, 0x33).with_alpha(0.3);

/// Fallback zone color for biomes missing from the lookup table.
pub const UNKNOWN_BIOME_COLOR: Color = Color::from_rgb_u8(0x33, 0x33, 0x33);

/// Fallback icon for biomes missing from the lookup table.
pub const UNKNOWN_BIOME_GLYPH: &str = "❓";

/// Presentation attributes resolved from an animal's biome tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeStyle {
    /// Zone fill and border color.
    pub color: Color,
    /// Icon glyph displayed at the zone midpoint.
    pub glyph: &'static str,
}

/// Resolves the presentation style for a biome tag.
///
/// Unknown biomes resolve to the fallback color and glyph; a malformed tag
/// is never an error.
#[must_use]
pub fn biome_style(biome: &str) -> BiomeStyle {
    let (color, glyph) = match biome {
        "plains" => (Color::from_rgb_u8(0x90, 0xEE, 0x90), "🐕"),
        "forest" => (Color::from_rgb_u8(0x22, 0x8B, 0x22), "🐱"),
        "swamp" => (Color::from_rgb_u8(0x55, 0x6B, 0x2F), "🐸"),
        "ocean" => (Color::from_rgb_u8(0x41, 0x69, 0xE1), "🐋"),
        "arctic" => (Color::from_rgb_u8(0xE0, 0xFF, 0xFF), "🐧"),
        "desert" => (Color::from_rgb_u8(0xF4, 0xA4, 0x60), "🦂"),
        "volcano" => (Color::from_rgb_u8(0x8B, 0x00, 0x00), "🐉"),
        "jungle" => (Color::from_rgb_u8(0x00, 0x64, 0x00), "🦁"),
        "mountain" => (Color::from_rgb_u8(0x80, 0x80, 0x80), "🐐"),
        _ => (UNKNOWN_BIOME_COLOR, UNKNOWN_BIOME_GLYPH),
    };

    BiomeStyle { color, glyph }
}

/// Describes the tile grid backing the zoo map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZooGridPresentation {
    /// Number of tile columns contained in the grid.
    pub columns: u32,
    /// Number of tile rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in pixels.
    pub tile_length: f32,
    /// Solid fill drawn behind the grid.
    pub background: Color,
    /// Color used when stroking grid lines.
    pub line_color: Color,
}

impl ZooGridPresentation {
    /// Creates a grid descriptor for the provided world snapshot.
    #[must_use]
    pub fn from_world(world: &WorldDescriptor, tile_length: f32) -> Self {
        Self {
            columns: world.width,
            rows: world.height,
            tile_length,
            background: WORLD_BACKGROUND,
            line_color: GRID_LINE_COLOR,
        }
    }

    /// Total width of the grid in pixels.
    #[must_use]
    pub const fn pixel_width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid in pixels.
    #[must_use]
    pub const fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Full pixel extent of the grid.
    #[must_use]
    pub fn pixel_extent(&self) -> Vec2 {
        Vec2::new(self.pixel_width(), self.pixel_height())
    }
}

/// Inset applied to each edge of a zone so adjacent territories stay
/// visually separated.
pub const ZONE_EDGE_INSET: f32 = 2.0;

/// Stroke width of the zone border.
pub const ZONE_BORDER_THICKNESS: f32 = 2.0;

/// Alpha applied to the zone fill; the border stays opaque.
pub const ZONE_FILL_ALPHA: f32 = 0.6;

/// Colored territory rectangle derived from one animal's home zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZonePresentation {
    /// Translucent fill color resolved from the biome table.
    pub fill: Color,
    /// Opaque border color resolved from the biome table.
    pub border: Color,
    /// Inset rectangle in pixels.
    pub rect: PixelRect,
}

impl ZonePresentation {
    /// Builds the zone presentation for one animal.
    ///
    /// Zones are emitted in animal-list order and overlap is not detected:
    /// later zones draw over earlier ones.
    #[must_use]
    pub fn for_animal(animal: &Animal, tile_length: f32) -> Self {
        let style = biome_style(&animal.biome);

        Self {
            fill: style.color.with_alpha(ZONE_FILL_ALPHA),
            border: style.color,
            rect: animal.home().to_pixels(tile_length).inset(ZONE_EDGE_INSET),
        }
    }
}

/// Held pan directions observed during a single frame.
///
/// Arrow keys and WASD are equivalent aliases; adapters collapse both into
/// these four flags before the scene update runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanInput {
    /// Pan towards negative x.
    pub left: bool,
    /// Pan towards positive x.
    pub right: bool,
    /// Pan towards negative y.
    pub up: bool,
    /// Pan towards positive y.
    pub down: bool,
}

impl PanInput {
    /// Reports whether any direction is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Input state is polled at tick time rather than queued; a key or button
/// that toggles entirely within one frame's delivery window is missed,
/// which the fixed short tick interval makes acceptable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Size of the drawable viewport in screen pixels.
    pub viewport: Vec2,
    /// Cursor position expressed in world pixels, if a cursor is present.
    pub cursor_world: Option<Vec2>,
    /// Whether the primary pointer button is currently held.
    pub pointer_held: bool,
    /// Whether the primary pointer button was pressed this frame.
    pub pointer_pressed: bool,
    /// Pointer movement since the previous frame in screen pixels.
    pub pointer_delta: Vec2,
    /// Vertical wheel movement accumulated this frame.
    pub wheel_delta_y: f32,
    /// Held pan directions.
    pub pan: PanInput,
}

/// Presentation descriptor consumed by rendering backends.
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene that should be displayed and advanced.
    pub scene: ZooScene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: ZooScene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting the zoo map.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input gathered by the adapter, and may mutate the scene before it is
    /// rendered. Data pushes and the per-frame tick both happen inside this
    /// closure so the backend only ever draws settled state.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut ZooScene) + 'static;
}

//! Sprite registry owning the per-animal visual containers.
//!
//! One entry exists per animal in the latest pushed snapshot, keyed by the
//! animal's identity and stored in list order (which is also the draw
//! order). Every data push tears the whole registry down and recreates it,
//! including entries for identities present in both snapshots.

use std::collections::HashMap;
use std::time::Duration;

use glam::Vec2;
use meme_zoo_core::{Animal, PixelRect};

use crate::biome_style;

/// Scale applied to a container while the pointer hovers its hit region.
pub const HOVER_SCALE: f32 = 1.1;

/// Total inset of the interactive hit region relative to the home
/// rectangle, per axis.
pub const SPRITE_HIT_INSET: f32 = 8.0;

/// Font size of the biome icon glyph.
pub const GLYPH_FONT_SIZE: f32 = 32.0;

/// Font size of the ticker label.
pub const TICKER_FONT_SIZE: f32 = 12.0;

/// Font size of the market-cap label.
pub const MARKET_CAP_FONT_SIZE: f32 = 10.0;

/// Vertical offset of the glyph from the container origin.
pub const GLYPH_OFFSET_Y: f32 = -10.0;

/// Vertical offset of the ticker label from the container origin.
pub const TICKER_OFFSET_Y: f32 = 25.0;

/// Vertical offset of the market-cap label from the container origin.
pub const MARKET_CAP_OFFSET_Y: f32 = 42.0;

const BOB_TIME_DIVISOR_MS: f32 = 500.0;
const BOB_AMPLITUDE: f32 = 2.0;

/// Formats a market capitalisation for the sprite label.
///
/// Values at or above one billion render with two decimals and a `B`
/// suffix, above one million with one decimal and `M`, above one thousand
/// as a whole number of `K`; smaller values print as the raw number.
#[must_use]
pub fn format_market_cap(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", (value / 1e7).round() / 100.0)
    } else if value >= 1e6 {
        format!("${:.1}M", (value / 1e5).round() / 10.0)
    } else if value >= 1e3 {
        format!("${}K", (value / 1e3).round())
    } else {
        format!("${value}")
    }
}

/// Visual container bound to one animal: icon glyph, ticker label, and
/// market-cap label anchored to the zone midpoint.
#[derive(Clone, Debug)]
pub struct SpriteEntry {
    animal: Animal,
    position: Vec2,
    base_y: f32,
    scale: f32,
    glyph: &'static str,
    market_cap_label: String,
    hit_extent: Vec2,
}

impl SpriteEntry {
    fn for_animal(animal: Animal, tile_length: f32) -> Self {
        let home = animal.home().to_pixels(tile_length);
        let (center_x, center_y) = home.center();
        let glyph = biome_style(&animal.biome).glyph;
        let market_cap_label = format_market_cap(animal.market_cap);

        Self {
            animal,
            position: Vec2::new(center_x, center_y),
            base_y: center_y,
            scale: 1.0,
            glyph,
            market_cap_label,
            hit_extent: Vec2::new(
                home.width - SPRITE_HIT_INSET,
                home.height - SPRITE_HIT_INSET,
            ),
        }
    }

    /// Animal backing this container, used to answer click queries.
    #[must_use]
    pub fn animal(&self) -> &Animal {
        &self.animal
    }

    /// Current container position in world pixels, including the bob
    /// offset.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current container scale; 1.0 at rest, [`HOVER_SCALE`] while hovered.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Icon glyph resolved from the biome table.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        self.glyph
    }

    /// Preformatted market-cap label.
    #[must_use]
    pub fn market_cap_label(&self) -> &str {
        &self.market_cap_label
    }

    /// Interactive hit region, centered on the container.
    #[must_use]
    pub fn hit_rect(&self) -> PixelRect {
        PixelRect::new(
            self.position.x - self.hit_extent.x * 0.5,
            self.position.y - self.hit_extent.y * 0.5,
            self.hit_extent.x,
            self.hit_extent.y,
        )
    }
}

/// Arena of sprite containers keyed by animal identity.
#[derive(Debug, Default)]
pub struct SpriteRegistry {
    entries: Vec<SpriteEntry>,
    index: HashMap<String, usize>,
}

impl SpriteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroys every existing entry and recreates one per animal in list
    /// order.
    ///
    /// Identities present in consecutive snapshots are recreated rather
    /// than patched; this resets hover scale and bob phase together with
    /// the rest of the scene.
    pub fn rebuild(&mut self, animals: &[Animal], tile_length: f32) {
        self.entries.clear();
        self.index.clear();

        for animal in animals {
            let entry = SpriteEntry::for_animal(animal.clone(), tile_length);
            let _ = self.index.insert(animal.id.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    /// Number of live containers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the registry holds no containers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a container by animal identity.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SpriteEntry> {
        self.index.get(id).map(|slot| &self.entries[*slot])
    }

    /// Reports whether a container exists for the identity.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates containers in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &SpriteEntry> {
        self.entries.iter()
    }

    /// Recomputes every container's vertical bob offset for the elapsed
    /// scene time.
    ///
    /// The phase is keyed off the container's x position, so two animals at
    /// the same x bob in phase and the animation is deterministic given
    /// elapsed time.
    pub fn animate(&mut self, elapsed: Duration) {
        let elapsed_ms = elapsed.as_secs_f32() * 1000.0;

        for entry in &mut self.entries {
            let offset = (elapsed_ms / BOB_TIME_DIVISOR_MS + entry.position.x).sin() * BOB_AMPLITUDE;
            entry.position.y = entry.base_y + offset;
        }
    }

    /// Finds the topmost container whose hit region contains the point.
    ///
    /// Containers later in the list draw on top, so the search runs in
    /// reverse draw order.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.hit_rect().contains(point.x, point.y))
            .map(|entry| entry.animal.id.as_str())
    }

    /// Overrides the scale of the identified container. Unknown identities
    /// are ignored.
    pub fn set_scale(&mut self, id: &str, scale: f32) {
        if let Some(slot) = self.index.get(id) {
            self.entries[*slot].scale = scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meme_zoo_core::{AnimalLinks, TILE_LENGTH};

    fn animal(id: &str, home: (u32, u32, u32, u32), market_cap: f64) -> Animal {
        Animal {
            id: id.to_owned(),
            name: format!("Animal {id}"),
            ticker: id.to_uppercase(),
            chain: "solana".to_owned(),
            biome: "ocean".to_owned(),
            home_x: home.0,
            home_y: home.1,
            home_width: home.2,
            home_height: home.3,
            market_cap,
            volume_24h: 0.0,
            liquidity: 0.0,
            holders: 0,
            logo_url: None,
            spawn_time: 0,
            links: AnimalLinks::default(),
        }
    }

    #[test]
    fn format_market_cap_covers_every_magnitude() {
        assert_eq!(format_market_cap(999.0), "$999");
        assert_eq!(format_market_cap(1_500.0), "$2K");
        assert_eq!(format_market_cap(2_500_000.0), "$2.5M");
        assert_eq!(format_market_cap(3_400_000_000.0), "$3.40B");
        assert_eq!(format_market_cap(0.0), "$0");
    }

    #[test]
    fn rebuild_replaces_the_previous_snapshot_wholesale() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(
            &[animal("a", (0, 0, 2, 2), 0.0), animal("b", (2, 0, 2, 2), 0.0)],
            TILE_LENGTH,
        );
        registry.set_scale("a", HOVER_SCALE);

        registry.rebuild(
            &[animal("b", (2, 0, 2, 2), 0.0), animal("c", (4, 0, 2, 2), 0.0)],
            TILE_LENGTH,
        );

        assert_eq!(registry.len(), 2);
        assert!(!registry.contains("a"));
        assert!(registry.contains("b"));
        assert!(registry.contains("c"));
    }

    #[test]
    fn rebuild_recreates_entries_even_for_retained_identities() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(&[animal("a", (0, 0, 2, 2), 0.0)], TILE_LENGTH);
        registry.set_scale("a", HOVER_SCALE);

        registry.rebuild(&[animal("a", (0, 0, 2, 2), 0.0)], TILE_LENGTH);

        let entry = registry.get("a").expect("entry should exist");
        assert_eq!(entry.scale(), 1.0);
    }

    #[test]
    fn container_centers_on_the_home_rectangle_midpoint() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(&[animal("a", (2, 2, 4, 3), 0.0)], TILE_LENGTH);

        let entry = registry.get("a").expect("entry should exist");
        assert_eq!(entry.position(), Vec2::new(128.0, 112.0));
    }

    #[test]
    fn hit_region_shrinks_the_home_rectangle_by_the_fixed_inset() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(&[animal("a", (2, 2, 4, 3), 0.0)], TILE_LENGTH);

        let rect = registry.get("a").expect("entry should exist").hit_rect();
        assert_eq!(rect, PixelRect::new(68.0, 68.0, 120.0, 88.0));
    }

    #[test]
    fn animate_bobs_entries_at_the_same_x_in_phase() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(
            &[animal("a", (2, 0, 2, 2), 0.0), animal("b", (2, 6, 2, 2), 0.0)],
            TILE_LENGTH,
        );

        registry.animate(Duration::from_millis(750));

        let a = registry.get("a").expect("entry should exist");
        let b = registry.get("b").expect("entry should exist");
        let offset_a = a.position().y - 32.0;
        let offset_b = b.position().y - 224.0;
        assert!((offset_a - offset_b).abs() < 1e-4);
        assert!(offset_a.abs() <= BOB_AMPLITUDE);
    }

    #[test]
    fn animate_is_deterministic_for_a_given_elapsed_time() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(&[animal("a", (2, 2, 4, 3), 0.0)], TILE_LENGTH);

        registry.animate(Duration::from_millis(1250));
        let first = registry.get("a").expect("entry should exist").position();

        registry.animate(Duration::from_millis(400));
        registry.animate(Duration::from_millis(1250));
        let second = registry.get("a").expect("entry should exist").position();

        assert_eq!(first, second);
    }

    #[test]
    fn hit_test_prefers_the_topmost_overlapping_container() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(
            &[animal("under", (0, 0, 4, 4), 0.0), animal("over", (0, 0, 4, 4), 0.0)],
            TILE_LENGTH,
        );

        let hit = registry.hit_test(Vec2::new(64.0, 64.0));
        assert_eq!(hit, Some("over"));
    }

    #[test]
    fn hit_test_misses_points_outside_every_region() {
        let mut registry = SpriteRegistry::new();
        registry.rebuild(&[animal("a", (0, 0, 2, 2), 0.0)], TILE_LENGTH);

        assert!(registry.hit_test(Vec2::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn unknown_biome_resolves_to_the_fallback_glyph() {
        let mut registry = SpriteRegistry::new();
        let mut stranger = animal("a", (0, 0, 2, 2), 0.0);
        stranger.biome = "asteroid".to_owned();
        registry.rebuild(&[stranger], TILE_LENGTH);

        let entry = registry.get("a").expect("entry should exist");
        assert_eq!(entry.glyph(), crate::UNKNOWN_BIOME_GLYPH);
    }
}

//! Scene lifecycle orchestrating zones, sprites, and the camera.
//!
//! [`ZooScene`] is the two-method contract exposed to the shell that owns
//! the map: push new data with [`ZooScene::set_zoo_data`], and learn about
//! entity clicks through the registered handler. Everything else happens
//! inside the per-frame [`ZooScene::advance`] tick.

use std::fmt;
use std::time::Duration;

use meme_zoo_core::{Animal, WorldDescriptor, TILE_LENGTH};

use crate::{
    CameraState, FrameInput, SpriteRegistry, ZonePresentation, ZooGridPresentation, HOVER_SCALE,
};

/// Callback invoked with the clicked animal.
///
/// Invoked synchronously from within the tick; long-running work here
/// stalls the rendering thread.
pub type AnimalClickHandler = Box<dyn FnMut(&Animal)>;

/// Interactive zoo map scene: grid, zones, sprites, and camera, rebuilt
/// wholesale from each pushed data snapshot.
pub struct ZooScene {
    tile_length: f32,
    world: Option<WorldDescriptor>,
    grid: Option<ZooGridPresentation>,
    zones: Vec<ZonePresentation>,
    sprites: SpriteRegistry,
    camera: CameraState,
    elapsed: Duration,
    hovered: Option<String>,
    on_animal_click: Option<AnimalClickHandler>,
}

impl Default for ZooScene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ZooScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZooScene")
            .field("world", &self.world)
            .field("zones", &self.zones.len())
            .field("sprites", &self.sprites.len())
            .field("camera", &self.camera)
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

impl ZooScene {
    /// Creates an empty scene with the camera at its defaults. The scene
    /// stays empty until the first data push.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tile_length: TILE_LENGTH,
            world: None,
            grid: None,
            zones: Vec::new(),
            sprites: SpriteRegistry::new(),
            camera: CameraState::new(),
            elapsed: Duration::ZERO,
            hovered: None,
            on_animal_click: None,
        }
    }

    /// Registers the handler invoked when an animal's hit region is
    /// clicked. Without a handler clicks are ignored.
    pub fn set_animal_click_handler(&mut self, handler: AnimalClickHandler) {
        self.on_animal_click = Some(handler);
    }

    /// Replaces the stored snapshot and rebuilds the whole scene from it.
    ///
    /// Zones and sprites are torn down and recreated unconditionally, the
    /// camera resets to the world midpoint at 1.0 zoom, and any hover
    /// state is dropped. Safe to call repeatedly with identical or
    /// differing data; an empty animal list yields a world with no
    /// sprites.
    pub fn set_zoo_data(&mut self, world: WorldDescriptor, animals: Vec<Animal>) {
        let grid = ZooGridPresentation::from_world(&world, self.tile_length);

        self.zones = animals
            .iter()
            .map(|animal| ZonePresentation::for_animal(animal, self.tile_length))
            .collect();
        self.sprites.rebuild(&animals, self.tile_length);
        self.hovered = None;
        self.camera.reset(grid.pixel_extent());
        self.grid = Some(grid);
        self.world = Some(world);
    }

    /// Advances the scene by one tick.
    ///
    /// Applies drag/keyboard pan and wheel zoom, clamps the camera to the
    /// world bounds, updates the idle bob, resolves hover, and dispatches
    /// clicks. Must run on every display refresh regardless of whether new
    /// data arrived.
    pub fn advance(&mut self, dt: Duration, input: &FrameInput) {
        self.elapsed += dt;

        if input.pointer_held {
            self.camera.drag_by(input.pointer_delta);
        }
        self.camera.pan_step(input.pan);
        if input.wheel_delta_y != 0.0 {
            self.camera.apply_wheel(input.wheel_delta_y);
        }
        self.camera.clamp_to_bounds(input.viewport);

        self.sprites.animate(self.elapsed);
        self.update_hover(input);

        if input.pointer_pressed {
            self.dispatch_click();
        }
    }

    fn update_hover(&mut self, input: &FrameInput) {
        let hovered = input
            .cursor_world
            .and_then(|cursor| self.sprites.hit_test(cursor))
            .map(str::to_owned);

        if hovered == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered.take() {
            self.sprites.set_scale(&previous, 1.0);
        }
        if let Some(current) = &hovered {
            self.sprites.set_scale(current, HOVER_SCALE);
        }
        self.hovered = hovered;
    }

    fn dispatch_click(&mut self) {
        let Some(id) = self.hovered.as_deref() else {
            return;
        };
        let Some(animal) = self.sprites.get(id).map(|entry| entry.animal().clone()) else {
            return;
        };

        if let Some(handler) = self.on_animal_click.as_mut() {
            handler(&animal);
        }
    }

    /// Latest pushed world snapshot, if any.
    #[must_use]
    pub fn world(&self) -> Option<&WorldDescriptor> {
        self.world.as_ref()
    }

    /// Grid presentation for the latest snapshot, if any.
    #[must_use]
    pub fn grid(&self) -> Option<&ZooGridPresentation> {
        self.grid.as_ref()
    }

    /// Zone presentations in draw order.
    #[must_use]
    pub fn zones(&self) -> &[ZonePresentation] {
        &self.zones
    }

    /// Live sprite containers.
    #[must_use]
    pub fn sprites(&self) -> &SpriteRegistry {
        &self.sprites
    }

    /// Camera state owned by the scene.
    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Identity of the animal currently hovered, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }
}

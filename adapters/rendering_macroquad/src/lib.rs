#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the Meme Zoo map.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without
//! its default `audio` feature.
//!
//! The adapter owns the window loop: it polls keyboard, pointer, and wheel
//! state into a [`FrameInput`] snapshot, hands it to the update closure,
//! and then draws whatever the scene describes through the camera
//! transform. All world-space geometry comes from the scene; this crate
//! only maps it onto the screen.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position,
    mouse_wheel, KeyCode, MouseButton,
};
use meme_zoo_core::PixelRect;
use meme_zoo_rendering::{
    Color, FrameInput, PanInput, Presentation, RenderingBackend, SpriteEntry, ZonePresentation,
    ZooGridPresentation, ZooScene, GLYPH_FONT_SIZE, GLYPH_OFFSET_Y, MARKET_CAP_FONT_SIZE,
    MARKET_CAP_OFFSET_Y, TICKER_FONT_SIZE, TICKER_OFFSET_Y, ZONE_BORDER_THICKNESS,
};
use std::time::Duration;

/// Browser-style wheel delta produced by one macroquad wheel notch.
///
/// Macroquad reports roughly one unit per notch with scroll-up positive;
/// the scene expects the web convention where scroll-down is positive and
/// a notch is on the order of a hundred units.
const WHEEL_NOTCH_DELTA: f32 = 100.0;

const TICKER_BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 0.53);
const TICKER_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const MARKET_CAP_COLOR: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);
const TICKER_PADDING_X: f32 = 4.0;
const TICKER_PADDING_Y: f32 = 2.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap
    /// interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints a frames-per-second line once
    /// per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut ZooScene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let mut previous_cursor = cursor_position();

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                let viewport = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let lens = CameraLens::for_scene(&scene, viewport);
                let observations = poll_input(previous_cursor);
                previous_cursor = observations.cursor_screen;
                let frame_input = frame_input_from_observations(&observations, &lens, viewport);

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(to_macroquad_color(clear_color));

                // Re-read the lens: the update may have panned, zoomed, or
                // reset the camera.
                let lens = CameraLens::for_scene(&scene, viewport);
                if let Some(grid) = scene.grid() {
                    draw_world_background(grid, &lens);
                    draw_grid_lines(grid, &lens);
                }
                for zone in scene.zones() {
                    draw_zone(zone, &lens);
                }
                for entry in scene.sprites().iter() {
                    draw_sprite(entry, &lens);
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Maps world pixels onto the screen for the scene's current camera pose.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CameraLens {
    center: Vec2,
    zoom: f32,
    screen_center: Vec2,
}

impl CameraLens {
    fn for_scene(scene: &ZooScene, viewport: Vec2) -> Self {
        Self {
            center: scene.camera().center(),
            zoom: scene.camera().zoom(),
            screen_center: viewport * 0.5,
        }
    }

    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.zoom + self.screen_center
    }

    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.screen_center) / self.zoom + self.center
    }
}

/// Raw device state observed for a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct InputObservations {
    cursor_screen: Vec2,
    previous_cursor_screen: Vec2,
    pointer_held: bool,
    pointer_pressed: bool,
    wheel_y: f32,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

fn cursor_position() -> Vec2 {
    let (cursor_x, cursor_y) = mouse_position();
    Vec2::new(cursor_x, cursor_y)
}

fn poll_input(previous_cursor_screen: Vec2) -> InputObservations {
    let (_, wheel_y) = mouse_wheel();

    InputObservations {
        cursor_screen: cursor_position(),
        previous_cursor_screen,
        pointer_held: is_mouse_button_down(MouseButton::Left),
        pointer_pressed: is_mouse_button_pressed(MouseButton::Left),
        wheel_y,
        left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
        right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
    }
}

fn frame_input_from_observations(
    observations: &InputObservations,
    lens: &CameraLens,
    viewport: Vec2,
) -> FrameInput {
    FrameInput {
        viewport,
        cursor_world: Some(lens.screen_to_world(observations.cursor_screen)),
        pointer_held: observations.pointer_held,
        pointer_pressed: observations.pointer_pressed,
        pointer_delta: observations.cursor_screen - observations.previous_cursor_screen,
        wheel_delta_y: -observations.wheel_y * WHEEL_NOTCH_DELTA,
        pan: PanInput {
            left: observations.left,
            right: observations.right,
            up: observations.up,
            down: observations.down,
        },
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            None
        } else {
            Some(self.frames as f32 / seconds)
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        per_second
    }
}

fn draw_world_background(grid: &ZooGridPresentation, lens: &CameraLens) {
    let top_left = lens.world_to_screen(Vec2::ZERO);
    let extent = grid.pixel_extent() * lens.zoom;

    macroquad::shapes::draw_rectangle(
        top_left.x,
        top_left.y,
        extent.x,
        extent.y,
        to_macroquad_color(grid.background),
    );
}

fn draw_grid_lines(grid: &ZooGridPresentation, lens: &CameraLens) {
    let color = to_macroquad_color(grid.line_color);
    let thickness = lens.zoom.max(f32::EPSILON);
    let top_left = lens.world_to_screen(Vec2::ZERO);
    let bottom_right = lens.world_to_screen(grid.pixel_extent());

    for column in 0..=grid.columns {
        let x = lens
            .world_to_screen(Vec2::new(column as f32 * grid.tile_length, 0.0))
            .x;
        macroquad::shapes::draw_line(x, top_left.y, x, bottom_right.y, thickness, color);
    }
    for row in 0..=grid.rows {
        let y = lens
            .world_to_screen(Vec2::new(0.0, row as f32 * grid.tile_length))
            .y;
        macroquad::shapes::draw_line(top_left.x, y, bottom_right.x, y, thickness, color);
    }
}

fn draw_zone(zone: &ZonePresentation, lens: &CameraLens) {
    let (x, y, width, height) = screen_rect(zone.rect, lens);

    macroquad::shapes::draw_rectangle(x, y, width, height, to_macroquad_color(zone.fill));
    macroquad::shapes::draw_rectangle_lines(
        x,
        y,
        width,
        height,
        ZONE_BORDER_THICKNESS * lens.zoom,
        to_macroquad_color(zone.border),
    );
}

fn draw_sprite(entry: &SpriteEntry, lens: &CameraLens) {
    let center = lens.world_to_screen(entry.position());
    let scale = lens.zoom * entry.scale();

    draw_centered_text(
        entry.glyph(),
        center + Vec2::new(0.0, GLYPH_OFFSET_Y * scale),
        GLYPH_FONT_SIZE * scale,
        to_macroquad_color(TICKER_COLOR),
    );

    let ticker_center = center + Vec2::new(0.0, TICKER_OFFSET_Y * scale);
    draw_label_background(
        &entry.animal().ticker,
        ticker_center,
        TICKER_FONT_SIZE * scale,
        scale,
    );
    draw_centered_text(
        &entry.animal().ticker,
        ticker_center,
        TICKER_FONT_SIZE * scale,
        to_macroquad_color(TICKER_COLOR),
    );

    draw_centered_text(
        entry.market_cap_label(),
        center + Vec2::new(0.0, MARKET_CAP_OFFSET_Y * scale),
        MARKET_CAP_FONT_SIZE * scale,
        to_macroquad_color(MARKET_CAP_COLOR),
    );
}

fn draw_label_background(text: &str, center: Vec2, font_size: f32, scale: f32) {
    let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
    let width = dimensions.width + TICKER_PADDING_X * 2.0 * scale;
    let height = dimensions.height + TICKER_PADDING_Y * 2.0 * scale;

    macroquad::shapes::draw_rectangle(
        center.x - width * 0.5,
        center.y - height * 0.5,
        width,
        height,
        to_macroquad_color(TICKER_BACKGROUND),
    );
}

fn draw_centered_text(text: &str, center: Vec2, font_size: f32, color: macroquad::color::Color) {
    let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
    let baseline_y = center.y - dimensions.height * 0.5 + dimensions.offset_y;

    macroquad::text::draw_text(
        text,
        center.x - dimensions.width * 0.5,
        baseline_y,
        font_size,
        color,
    );
}

fn screen_rect(rect: PixelRect, lens: &CameraLens) -> (f32, f32, f32, f32) {
    let top_left = lens.world_to_screen(Vec2::new(rect.x, rect.y));

    (
        top_left.x,
        top_left.y,
        rect.width * lens.zoom,
        rect.height * lens.zoom,
    )
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

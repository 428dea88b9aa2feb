#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Meme Zoo map.
//!
//! Wires the polling client, the scene, and the macroquad backend
//! together. The animal-click handler prints a one-line summary to
//! stdout, standing in for the detail-card shell that owns the scene in
//! the full product.

mod settings;

use anyhow::Result;
use clap::Parser;
use meme_zoo_client::{PollUpdate, ZooClient, ZooPoller};
use meme_zoo_core::Animal;
use meme_zoo_rendering::{
    format_market_cap, Presentation, RenderingBackend, ZooScene, WORLD_BACKGROUND,
};
use meme_zoo_rendering_macroquad::MacroquadBackend;
use settings::{FileSettings, Overrides, Settings};
use std::path::PathBuf;

/// Live map of token animals, refreshed from a zoo backend.
#[derive(Debug, Parser)]
#[command(name = "meme-zoo", version)]
struct Args {
    /// Base URL of the zoo backend.
    #[arg(long)]
    base_url: Option<String>,
    /// Seconds between data refreshes.
    #[arg(long)]
    refresh_interval_secs: Option<u64>,
    /// Render as fast as possible instead of syncing to the display.
    #[arg(long)]
    no_vsync: bool,
    /// Print a frames-per-second line once per second.
    #[arg(long)]
    show_fps: bool,
    /// Optional TOML settings file; explicit flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            refresh_interval_secs: self.refresh_interval_secs,
            no_vsync: self.no_vsync,
            show_fps: self.show_fps,
        }
    }
}

/// Entry point for the Meme Zoo command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let file = match &args.config {
        Some(path) => FileSettings::load(path)?,
        None => FileSettings::default(),
    };
    let settings = Settings::resolve(args.overrides(), file);

    let client = ZooClient::new(settings.base_url.clone())?;
    let poller = ZooPoller::spawn(client, settings.refresh_interval);

    let mut scene = ZooScene::new();
    scene.set_animal_click_handler(Box::new(|animal| {
        println!("{}", describe_animal(animal));
    }));

    let backend = MacroquadBackend::new()
        .with_vsync(settings.vsync)
        .with_show_fps(settings.show_fps);
    let presentation = Presentation::new("Meme Zoo", WORLD_BACKGROUND, scene);

    backend.run(presentation, move |dt, input, scene| {
        for update in poller.drain() {
            match update {
                PollUpdate::Snapshot(state) => scene.set_zoo_data(state.world, state.animals),
                PollUpdate::Failed(message) => {
                    eprintln!("zoo state refresh failed: {message}");
                }
            }
        }

        scene.advance(dt, &input);
    })
}

fn describe_animal(animal: &Animal) -> String {
    let mut summary = format!(
        "{} [{}] biome {} on {}, mcap {}, holders {}",
        animal.name,
        animal.ticker,
        animal.biome,
        animal.chain,
        format_market_cap(animal.market_cap),
        animal.holders,
    );

    for (label, link) in [
        ("dex", &animal.links.dex),
        ("web", &animal.links.website),
        ("x", &animal.links.twitter),
    ] {
        if let Some(url) = link {
            summary.push_str(&format!(" {label}={url}"));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use meme_zoo_core::AnimalLinks;

    fn animal() -> Animal {
        Animal {
            id: "animal-1".to_owned(),
            name: "Whale Coin".to_owned(),
            ticker: "WHALE".to_owned(),
            chain: "solana".to_owned(),
            biome: "ocean".to_owned(),
            home_x: 2,
            home_y: 2,
            home_width: 4,
            home_height: 3,
            market_cap: 3_400_000_000.0,
            volume_24h: 0.0,
            liquidity: 0.0,
            holders: 812,
            logo_url: None,
            spawn_time: 0,
            links: AnimalLinks::default(),
        }
    }

    #[test]
    fn describe_animal_summarises_the_core_fields() {
        let summary = describe_animal(&animal());

        assert_eq!(
            summary,
            "Whale Coin [WHALE] biome ocean on solana, mcap $3.40B, holders 812"
        );
    }

    #[test]
    fn describe_animal_appends_only_the_links_that_exist() {
        let mut subject = animal();
        subject.links.dex = Some("https://dex.example/whale".to_owned());
        subject.links.twitter = Some("https://x.example/whale".to_owned());

        let summary = describe_animal(&subject);

        assert!(summary.ends_with(
            "dex=https://dex.example/whale x=https://x.example/whale"
        ));
        assert!(!summary.contains("web="));
    }
}

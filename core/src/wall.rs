use std::collections::HashSet;

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::preload::BlobCache;

pub const POOL_CAP: usize = 50;
pub const ROTATION_MAX_DEG: f64 = 6.0;
pub const Z_INDEX_MAX: u32 = 12;
pub const FADE_MS: u32 = 450;

const LARGE_BELOW: f64 = 0.08;
const WIDE_BELOW: f64 = 0.20;
const TALL_BELOW: f64 = 0.32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub reduced_motion: bool,
    pub save_data: bool,
    pub low_memory: bool,
    pub small_screen: bool,
}

impl Capabilities {
    pub fn constrained(&self) -> bool {
        self.save_data || self.low_memory
    }

    pub fn tier(&self) -> WallTier {
        match (self.small_screen, self.constrained()) {
            (false, false) => WallTier::Full,
            (true, false) => WallTier::SmallScreen,
            (false, true) => WallTier::Constrained,
            (true, true) => WallTier::Minimal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallTier {
    Full,
    SmallScreen,
    Constrained,
    Minimal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSettings {
    pub tier: WallTier,
    pub item_count: usize,
    pub change_ratio: f64,
    pub interval_ms: u32,
    pub preload_concurrency: usize,
}

impl WallSettings {
    pub fn for_capabilities(caps: &Capabilities) -> Self {
        let tier = caps.tier();
        let (item_count, change_ratio, interval_ms, preload_concurrency) = match tier {
            WallTier::Full => (28, 0.25, 4_000, 4),
            WallTier::SmallScreen => (16, 0.18, 6_000, 3),
            WallTier::Constrained => (14, 0.12, 7_000, 2),
            WallTier::Minimal => (10, 0.08, 9_000, 1),
        };
        let change_ratio = if caps.reduced_motion { 0.0 } else { change_ratio };
        Self {
            tier,
            item_count,
            change_ratio,
            interval_ms,
            preload_concurrency,
        }
    }

    pub fn cycles(&self) -> bool {
        self.change_ratio > 0.0 && self.item_count > 0
    }

    pub fn changes_per_tick(&self, shown: usize) -> usize {
        if !self.cycles() || shown == 0 {
            return 0;
        }
        ((shown as f64 * self.change_ratio).ceil() as usize).clamp(1, shown)
    }
}

pub fn select_pool<R: Rng + ?Sized>(
    mut sources: Vec<String>,
    cap: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    sources.retain(|src| !src.trim().is_empty() && seen.insert(src.clone()));
    sources.shuffle(rng);
    sources.truncate(cap);
    sources
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Footprint {
    Plain,
    Wide,
    Tall,
    Large,
}

impl Footprint {
    pub fn from_roll(roll: f64) -> Self {
        if roll < LARGE_BELOW {
            Footprint::Large
        } else if roll < WIDE_BELOW {
            Footprint::Wide
        } else if roll < TALL_BELOW {
            Footprint::Tall
        } else {
            Footprint::Plain
        }
    }

    pub fn span(self) -> (u32, u32) {
        match self {
            Footprint::Plain => (1, 1),
            Footprint::Wide => (2, 1),
            Footprint::Tall => (1, 2),
            Footprint::Large => (2, 2),
        }
    }

    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Footprint::Plain => None,
            Footprint::Wide => Some("wide"),
            Footprint::Tall => Some("tall"),
            Footprint::Large => Some("large"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemLayout {
    pub rotation_deg: f64,
    pub z_index: u32,
    pub footprint: Footprint,
}

impl ItemLayout {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            rotation_deg: rng.random_range(-ROTATION_MAX_DEG..=ROTATION_MAX_DEG),
            z_index: rng.random_range(1..=Z_INDEX_MAX),
            footprint: Footprint::from_roll(rng.random::<f64>()),
        }
    }

    pub fn class_name(&self) -> String {
        match self.footprint.class_name() {
            Some(extra) => format!("photo-wall__item {extra}"),
            None => "photo-wall__item".to_string(),
        }
    }

    pub fn style(&self) -> String {
        let (cols, rows) = self.footprint.span();
        format!(
            "--rot: {:.2}deg; z-index: {}; grid-column: span {cols}; grid-row: span {rows}",
            self.rotation_deg, self.z_index
        )
    }
}

pub fn plan_layouts<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<ItemLayout> {
    (0..count).map(|_| ItemLayout::random(rng)).collect()
}

#[derive(Clone, Debug, Default)]
pub struct ImageRotation {
    pool: Vec<String>,
    cursor: usize,
}

impl ImageRotation {
    pub fn new(pool: Vec<String>) -> Self {
        Self { pool, cursor: 0 }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn next_source(&mut self) -> Option<String> {
        if self.pool.is_empty() {
            return None;
        }
        let src = self.pool[self.cursor % self.pool.len()].clone();
        self.cursor = (self.cursor + 1) % self.pool.len();
        Some(src)
    }

    // Same walk as `next_source`, swapped for the preloaded object URL when cached.
    pub fn next_display(&mut self, cache: &BlobCache) -> Option<String> {
        let src = self.next_source()?;
        Some(cache.get(&src).map(str::to_string).unwrap_or(src))
    }
}

pub fn pick_changes<R: Rng + ?Sized>(rng: &mut R, shown: usize, changes: usize) -> Vec<usize> {
    let amount = changes.min(shown);
    if amount == 0 {
        return Vec::new();
    }
    index::sample(rng, shown, amount).into_vec()
}

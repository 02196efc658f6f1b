use std::collections::HashSet;

use artwall_core::lights::LIGHT_HUES;
use artwall_core::wall::{
    pick_changes, plan_layouts, select_pool, POOL_CAP, ROTATION_MAX_DEG, Z_INDEX_MAX,
};
use artwall_core::{
    BlobCache, Capabilities, CycleGate, Footprint, GateAction, ImageRotation, LightParams,
    PreloadQueue, WallSettings, WallTier,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn sources(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("thumbs/{idx}.jpg")).collect()
}

#[test]
fn tiers_degrade_with_capabilities() {
    let full = WallSettings::for_capabilities(&Capabilities::default());
    assert_eq!(full.tier, WallTier::Full);
    assert_eq!(full.item_count, 28);
    assert_eq!(full.interval_ms, 4_000);

    let small = WallSettings::for_capabilities(&Capabilities {
        small_screen: true,
        ..Capabilities::default()
    });
    let constrained = WallSettings::for_capabilities(&Capabilities {
        save_data: true,
        ..Capabilities::default()
    });
    let minimal = WallSettings::for_capabilities(&Capabilities {
        small_screen: true,
        low_memory: true,
        ..Capabilities::default()
    });
    assert_eq!(minimal.tier, WallTier::Minimal);

    let ladder = [full, small, constrained, minimal];
    for pair in ladder.windows(2) {
        assert!(pair[1].item_count < pair[0].item_count);
        assert!(pair[1].change_ratio < pair[0].change_ratio);
        assert!(pair[1].interval_ms > pair[0].interval_ms);
        assert!(pair[1].preload_concurrency <= pair[0].preload_concurrency);
    }
}

#[test]
fn reduced_motion_disables_cycling() {
    let settings = WallSettings::for_capabilities(&Capabilities {
        reduced_motion: true,
        ..Capabilities::default()
    });
    assert_eq!(settings.change_ratio, 0.0);
    assert!(!settings.cycles());
    assert_eq!(settings.changes_per_tick(settings.item_count), 0);
    assert!(settings.item_count > 0);

    let mut gate = CycleGate::new(settings.cycles(), true);
    assert_eq!(gate.reconcile(), GateAction::Keep);
    assert_eq!(gate.set_section_visible(true), GateAction::Keep);
    assert!(!gate.is_running());
}

#[test]
fn changes_per_tick_rounds_up() {
    let full = WallSettings::for_capabilities(&Capabilities::default());
    assert_eq!(full.changes_per_tick(28), 7);
    assert_eq!(full.changes_per_tick(1), 1);
    assert_eq!(full.changes_per_tick(0), 0);
}

#[test]
fn pool_is_shuffled_and_capped() {
    let mut rng = SmallRng::seed_from_u64(7);
    let pool = select_pool(sources(80), POOL_CAP, &mut rng);
    assert_eq!(pool.len(), POOL_CAP);
    let unique: HashSet<&String> = pool.iter().collect();
    assert_eq!(unique.len(), POOL_CAP);

    let mut rng = SmallRng::seed_from_u64(7);
    let mut short = sources(5);
    short.push("   ".to_string());
    short.push("thumbs/0.jpg".to_string());
    let pool = select_pool(short, POOL_CAP, &mut rng);
    assert_eq!(pool.len(), 5);
}

#[test]
fn layouts_stay_in_bounds() {
    let mut rng = SmallRng::seed_from_u64(11);
    let layouts = plan_layouts(200, &mut rng);
    assert_eq!(layouts.len(), 200);
    for layout in &layouts {
        assert!(layout.rotation_deg.abs() <= ROTATION_MAX_DEG);
        assert!((1..=Z_INDEX_MAX).contains(&layout.z_index));
        assert!(layout.class_name().starts_with("photo-wall__item"));
    }
    let plain = layouts
        .iter()
        .filter(|layout| layout.footprint == Footprint::Plain)
        .count();
    assert!(plain > layouts.len() / 2);
}

#[test]
fn footprint_thresholds() {
    assert_eq!(Footprint::from_roll(0.0), Footprint::Large);
    assert_eq!(Footprint::from_roll(0.1), Footprint::Wide);
    assert_eq!(Footprint::from_roll(0.25), Footprint::Tall);
    assert_eq!(Footprint::from_roll(0.5), Footprint::Plain);
    assert_eq!(Footprint::Large.span(), (2, 2));
    assert_eq!(Footprint::Plain.class_name(), None);
}

#[test]
fn rotation_exhausts_pool_before_repeating() {
    let mut rotation = ImageRotation::new(sources(3));
    let first: Vec<String> = (0..3).filter_map(|_| rotation.next_source()).collect();
    let unique: HashSet<&String> = first.iter().collect();
    assert_eq!(unique.len(), 3);
    let second: Vec<String> = (0..3).filter_map(|_| rotation.next_source()).collect();
    assert_eq!(first, second);
    assert!(ImageRotation::new(Vec::new()).next_display(&BlobCache::new()).is_none());
}

#[test]
fn one_ready_image_does_not_take_over_the_rotation() {
    let mut rotation = ImageRotation::new(sources(4));
    let built: Vec<String> = (0..2).filter_map(|_| rotation.next_source()).collect();
    assert_eq!(built, vec!["thumbs/0.jpg", "thumbs/1.jpg"]);

    let mut cache = BlobCache::new();
    cache.insert("thumbs/0.jpg".to_string(), "blob:0".to_string());
    let tick: Vec<String> = (0..3).filter_map(|_| rotation.next_display(&cache)).collect();
    assert_eq!(tick, vec!["thumbs/2.jpg", "thumbs/3.jpg", "blob:0"]);
    let unique: HashSet<&String> = tick.iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn fully_preloaded_pool_continues_with_unseen_images() {
    let mut rotation = ImageRotation::new(sources(4));
    rotation.next_source();
    rotation.next_source();

    let mut cache = BlobCache::new();
    for idx in 0..4 {
        cache.insert(format!("thumbs/{idx}.jpg"), format!("blob:{idx}"));
    }
    let draws: Vec<String> = (0..4).filter_map(|_| rotation.next_display(&cache)).collect();
    assert_eq!(draws, vec!["blob:2", "blob:3", "blob:0", "blob:1"]);
}

#[test]
fn picked_changes_are_distinct_and_in_range() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..50 {
        let picks = pick_changes(&mut rng, 28, 7);
        assert_eq!(picks.len(), 7);
        let unique: HashSet<usize> = picks.iter().copied().collect();
        assert_eq!(unique.len(), 7);
        assert!(picks.iter().all(|idx| *idx < 28));
    }
    assert_eq!(pick_changes(&mut rng, 2, 9).len(), 2);
    assert!(pick_changes(&mut rng, 0, 3).is_empty());
}

#[test]
fn gate_stops_when_hidden_and_resumes_once() {
    let mut gate = CycleGate::new(true, true);
    assert_eq!(gate.reconcile(), GateAction::Start);
    assert_eq!(gate.reconcile(), GateAction::Keep);

    assert_eq!(gate.set_section_visible(false), GateAction::Stop);
    assert_eq!(gate.set_section_visible(false), GateAction::Keep);
    assert_eq!(gate.set_section_visible(true), GateAction::Start);
    assert_eq!(gate.set_section_visible(true), GateAction::Keep);

    assert_eq!(gate.set_document_visible(false), GateAction::Stop);
    assert_eq!(gate.set_section_visible(true), GateAction::Keep);
    assert_eq!(gate.set_document_visible(true), GateAction::Start);
    assert!(gate.is_running());

    assert_eq!(gate.shutdown(), GateAction::Stop);
    assert_eq!(gate.set_document_visible(true), GateAction::Keep);
}

#[test]
fn repeated_toggles_never_double_start() {
    let mut gate = CycleGate::new(true, false);
    let mut running = 0i32;
    let toggles = [true, true, false, true, false, false, true, true];
    for (step, visible) in toggles.iter().enumerate() {
        let action = if step % 2 == 0 {
            gate.set_document_visible(*visible)
        } else {
            gate.set_section_visible(*visible)
        };
        match action {
            GateAction::Start => running += 1,
            GateAction::Stop => running -= 1,
            GateAction::Keep => {}
        }
        assert!((0..=1).contains(&running));
        assert_eq!(running == 1, gate.is_running());
    }
}

#[test]
fn preload_queue_caps_workers() {
    let mut queue = PreloadQueue::new(&sources(3));
    assert_eq!(queue.worker_count(4), 3);
    assert_eq!(queue.worker_count(0), 1);
    assert_eq!(queue.next_source().as_deref(), Some("thumbs/0.jpg"));
    assert_eq!(queue.worker_count(4), 2);
    assert_eq!(PreloadQueue::new(&[]).worker_count(4), 0);
}

#[test]
fn blob_cache_hands_back_urls_to_revoke() {
    let mut cache = BlobCache::new();
    assert!(cache.insert("a.jpg".to_string(), "blob:1".to_string()).is_none());
    assert_eq!(
        cache.insert("a.jpg".to_string(), "blob:2".to_string()).as_deref(),
        Some("blob:1")
    );
    cache.insert("b.jpg".to_string(), "blob:3".to_string());
    assert_eq!(cache.get("a.jpg"), Some("blob:2"));
    assert!(cache.contains("b.jpg"));

    let mut revoked = cache.drain();
    revoked.sort();
    assert_eq!(revoked, vec!["blob:2", "blob:3"]);
    assert!(cache.get("a.jpg").is_none());
    assert!(cache.drain().is_empty());
}

#[test]
fn light_params_stay_in_range() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..100 {
        let light = LightParams::random(&mut rng, true);
        assert!((6.0..94.0).contains(&light.x_pct));
        assert!((8.0..92.0).contains(&light.y_pct));
        assert!((100..=180).contains(&light.size_px));
        assert!(LIGHT_HUES.contains(&light.hue));
        assert!((5.5..9.5).contains(&light.speed_s));
        assert!(light.delay_s <= 0.0 && light.delay_s > -6.0);
    }
    let light = LightParams::random(&mut rng, false);
    let vars = light.css_vars();
    assert_eq!(vars[5], ("--delay", "0s".to_string()));
    assert!(vars[0].1.ends_with('%'));
    assert!(vars[2].1.ends_with("px"));
    assert!(vars[4].1.ends_with('s'));
}

// Integration tests (native) for the `be-my-valentine` crate.
// These exercise the placement and memory logic through the public API so
// they run under `cargo test` on the host.

use std::collections::HashMap;

use be_my_valentine::config::{MemoryConfig, PlacerConfig};
use be_my_valentine::{
    EvasivePlacer, GameEvent, GamePhase, MemoryGame, Rect, Size, TAUNTS, TileFace,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BUTTON: Size = Size::new(110.0, 44.0);

// Containment holds for any viewport at least as large as the control and
// any target, including targets that cover the whole screen.
#[test]
fn placement_always_inside_viewport() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut placer = EvasivePlacer::default();
    for _ in 0..2_000 {
        let w = rng.gen_range(BUTTON.width..2_000.0);
        let h = rng.gen_range(BUTTON.height..1_400.0);
        let viewport = Size::new(w, h);
        let left = rng.gen_range(-200.0..w);
        let top = rng.gen_range(-200.0..h);
        let target = Rect::new(
            left,
            top,
            left + rng.gen_range(0.0..w * 1.5),
            top + rng.gen_range(0.0..h * 1.5),
        );
        let p = placer.place(viewport, BUTTON, target, &mut rng);
        assert!(p.position.x >= 0.0 && p.position.x <= w - BUTTON.width, "{p:?} in {viewport:?}");
        assert!(p.position.y >= 0.0 && p.position.y <= h - BUTTON.height, "{p:?} in {viewport:?}");
        assert!(p.attempts >= 1 && p.attempts <= 500);
    }
}

// With a target under half the screen, the search nearly always succeeds.
#[test]
fn placement_usually_avoids_target() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut placer = EvasivePlacer::default();
    let viewport = Size::new(390.0, 844.0);
    let target = Rect::new(60.0, 300.0, 330.0, 560.0);
    assert!(target.width() * target.height() < viewport.area() / 2.0);
    let calls = 1_000;
    let overlapping = (0..calls)
        .filter(|_| placer.place(viewport, BUTTON, target, &mut rng).overlaps_target)
        .count();
    assert!(overlapping * 100 < calls, "{overlapping} of {calls} placements overlapped");
}

#[test]
fn taunts_cycle_in_order() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut placer = EvasivePlacer::new(PlacerConfig::default());
    let viewport = Size::new(800.0, 600.0);
    for n in 0..(TAUNTS.len() * 3 + 2) {
        assert_eq!(placer.next_taunt(), TAUNTS[n % TAUNTS.len()]);
        let p = placer.place(viewport, BUTTON, Rect::default(), &mut rng);
        assert_eq!(p.taunt, TAUNTS[n % TAUNTS.len()]);
    }
    assert_eq!(placer.calls(), (TAUNTS.len() * 3 + 2) as u64);
}

#[test]
fn every_deal_has_six_pairs() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = MemoryGame::default();
        game.setup(&mut rng);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for tile in game.tiles() {
            *counts.entry(tile.symbol).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c == 2));
    }
}

#[test]
fn shuffle_varies_between_deals() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = MemoryGame::default();
    game.setup(&mut rng);
    let first: Vec<&str> = game.tiles().iter().map(|t| t.symbol).collect();
    let differs = (0..10).any(|_| {
        game.setup(&mut rng);
        game.tiles().iter().map(|t| t.symbol).collect::<Vec<_>>() != first
    });
    assert!(differs);
}

// Random click storms never break the flip rules.
#[test]
fn random_play_respects_invariants() {
    let mut rng = StdRng::seed_from_u64(31337);
    let mut game = MemoryGame::new(MemoryConfig::default());
    game.setup(&mut rng);
    let mut now = 0.0;
    let mut wins = 0;
    let mut matched_before: Vec<bool> = vec![false; 12];
    for _ in 0..5_000 {
        now += rng.gen_range(0.0..300.0);
        let mut events = game.advance(now);
        events.extend(game.activate(rng.gen_range(0..12), now));
        wins += events.iter().filter(|e| matches!(e, GameEvent::Won { .. })).count();

        assert!(game.selection().len() <= 2);
        assert!(game.matched_pairs() <= 6);
        for (i, tile) in game.tiles().iter().enumerate() {
            if matched_before[i] {
                assert_eq!(tile.face, TileFace::Matched, "tile {i} left matched state");
            }
            matched_before[i] = tile.is_matched();
        }
        if wins > 0 {
            assert_eq!(game.matched_pairs(), 6, "win reported before the last pair");
        }
        if game.matched_pairs() < 6 {
            assert_eq!(game.phase(), GamePhase::Playing);
        }
    }
    // Drain anything still pending.
    let tail = game.advance(now + 10_000.0);
    wins += tail.iter().filter(|e| matches!(e, GameEvent::Won { .. })).count();
    assert_eq!(game.matched_pairs(), 6);
    assert_eq!(wins, 1);
}

#[test]
fn mismatched_pair_resets() {
    let mut game = MemoryGame::default();
    game.setup_with(&["x", "y", "x", "y"]).unwrap();
    game.activate(0, 0.0);
    game.activate(1, 0.0);
    game.advance(600.0);
    assert!(game.tiles().iter().all(|t| t.face == TileFace::Hidden && t.display_symbol().is_empty()));
    assert!(game.selection().is_empty());
}

#[test]
fn scripted_scenario() {
    let deal = ["A", "B", "C", "D", "E", "F", "A", "B", "C", "D", "E", "F"];
    let mut game = MemoryGame::default();
    game.setup_with(&deal).unwrap();

    game.activate(0, 0.0);
    game.activate(6, 0.0);
    assert!(game.advance(599.0).is_empty());
    game.advance(600.0);
    assert_eq!(game.tile(0).unwrap().face, TileFace::Matched);
    assert_eq!(game.tile(6).unwrap().face, TileFace::Matched);
    assert_eq!(game.matched_pairs(), 1);

    game.activate(1, 1_000.0);
    game.activate(2, 1_000.0);
    game.advance(1_600.0);
    assert_eq!(game.tile(1).unwrap().face, TileFace::Hidden);
    assert_eq!(game.tile(2).unwrap().face, TileFace::Hidden);
    assert_eq!(game.matched_pairs(), 1);
}

#[cfg(feature = "serde_json")]
#[test]
fn snapshot_serializes_to_json() {
    let mut game = MemoryGame::default();
    game.setup_with(&["x", "x"]).unwrap();
    game.activate(0, 0.0);
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["tiles"][0]["face"], "flipped");
    assert_eq!(json["tiles"][1]["symbol"], "x");
}

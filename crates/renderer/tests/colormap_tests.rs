//! Tests for palette evaluation.

use renderer::colormap::{evaluate, Colormap, Palette, Rgb};

fn max_channel_step(a: Rgb, b: Rgb) -> u8 {
    a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
}

// ============================================================================
// jet
// ============================================================================

#[test]
fn test_jet_by_name_endpoints() {
    assert_eq!(evaluate("jet", 0.0).unwrap(), Rgb::new(0, 0, 128));
    assert_eq!(evaluate("jet", 1.0).unwrap(), Rgb::new(128, 0, 0));
}

#[test]
fn test_jet_anchor_colours_are_distinct() {
    let jet = Colormap::default();
    let samples: Vec<Rgb> = (0..=8).map(|i| jet.evaluate(i as f64 / 8.0)).collect();

    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            assert_ne!(a, b, "jet produced a repeated colour across anchors");
        }
    }
}

#[test]
fn test_jet_is_continuous() {
    let jet = Colormap::default();
    let mut previous = jet.evaluate(0.0);
    for i in 1..=1024 {
        let current = jet.evaluate(i as f64 / 1024.0);
        assert!(
            max_channel_step(previous, current) <= 6,
            "jet jumps between steps {} and {}: {:?} -> {:?}",
            i - 1,
            i,
            previous,
            current
        );
        previous = current;
    }
}

#[test]
fn test_jet_clamps_rounding_overshoot() {
    let jet = Colormap::default();
    assert_eq!(jet.evaluate(-1e-12), jet.evaluate(0.0));
    assert_eq!(jet.evaluate(1.0 + 1e-12), jet.evaluate(1.0));
}

// ============================================================================
// All palettes
// ============================================================================

#[test]
fn test_every_palette_is_continuous_and_deterministic() {
    for palette in Palette::ALL {
        for reversed in [false, true] {
            let cmap = Colormap::new(palette, reversed);
            let mut previous = cmap.evaluate(0.0);
            for i in 1..=512 {
                let t = i as f64 / 512.0;
                let current = cmap.evaluate(t);
                assert_eq!(current, cmap.evaluate(t));
                assert!(
                    max_channel_step(previous, current) <= 6,
                    "{} jumps at step {}",
                    cmap.name(),
                    i
                );
                previous = current;
            }
        }
    }
}

#[test]
fn test_hot_runs_black_to_white() {
    let hot = Colormap::from_name("hot").unwrap();
    let start = hot.evaluate(0.0);
    assert_eq!((start.g, start.b), (0, 0));
    assert!(start.r < 20);
    assert_eq!(hot.evaluate(1.0), Rgb::new(255, 255, 255));
}

#[test]
fn test_cool_endpoints() {
    assert_eq!(evaluate("cool", 0.0).unwrap(), Rgb::new(0, 255, 255));
    assert_eq!(evaluate("cool", 1.0).unwrap(), Rgb::new(255, 0, 255));
}

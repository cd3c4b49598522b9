use mandalaviz::config::LayoutConfig;
use mandalaviz::layout::{RectD, Vec2d, golden_angle, layout_mandalas, scene_bounds};
use mandalaviz::model::{Mandala, Verse};

fn verse(mandala: u32, index: usize) -> Verse {
    Verse {
        mandala,
        sukta: 1,
        verse: index as u32 + 1,
        devanagari: None,
        transliteration: None,
        translation: None,
        deity: None,
        mood: None,
        tags: vec![],
        original_index: index,
        local_x: 0.0,
        local_y: 0.0,
    }
}

fn mandala(number: u32, verse_count: usize) -> Mandala {
    Mandala {
        number,
        verses: (0..verse_count).map(|j| verse(number, j)).collect(),
        center_x: 0.0,
        center_y: 0.0,
    }
}

fn mandalas(counts: &[usize]) -> Vec<Mandala> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &c)| mandala(i as u32 + 1, c))
        .collect()
}

#[test]
fn test_group_centers_equally_spaced_on_main_circle() {
    let cfg = LayoutConfig::default();
    for n in 1..=12usize {
        let mut ms = mandalas(&vec![3; n]);
        layout_mandalas(&mut ms, &cfg);
        for (i, m) in ms.iter().enumerate() {
            let dist = (m.center_x.powi(2) + m.center_y.powi(2)).sqrt();
            assert!(
                (dist - cfg.main_radius).abs() < 1e-9,
                "n={} i={}: center not on main circle (dist {})",
                n,
                i,
                dist
            );
            let expected_angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let angle = m.center_y.atan2(m.center_x).rem_euclid(std::f64::consts::TAU);
            let diff = (angle - expected_angle.rem_euclid(std::f64::consts::TAU)).abs();
            let diff = diff.min(std::f64::consts::TAU - diff);
            assert!(diff < 1e-9, "n={} i={}: angle off by {}", n, i, diff);
        }
    }
}

#[test]
fn test_first_verse_at_center_last_near_rim() {
    let cfg = LayoutConfig::default();
    for n in [1usize, 2, 5, 100, 1017] {
        let mut ms = mandalas(&[n]);
        layout_mandalas(&mut ms, &cfg);
        let verses = &ms[0].verses;
        assert_eq!(verses[0].local_x, 0.0);
        assert_eq!(verses[0].local_y, 0.0);
        let last = &verses[n - 1];
        let r = (last.local_x.powi(2) + last.local_y.powi(2)).sqrt();
        let expected =
            ((n - 1) as f64 / n as f64).sqrt() * cfg.mandala_radius * cfg.spiral_fill;
        assert!(
            (r - expected).abs() < 1e-9,
            "n={}: last radius {} expected {}",
            n,
            r,
            expected
        );
        // Never outside the visual margin
        assert!(r <= cfg.mandala_radius * cfg.spiral_fill + 1e-9);
    }
}

#[test]
fn test_no_two_verses_share_a_position() {
    let cfg = LayoutConfig::default();
    let mut ms = mandalas(&[200]);
    layout_mandalas(&mut ms, &cfg);
    let verses = &ms[0].verses;
    for a in 0..verses.len() {
        for b in (a + 1)..verses.len() {
            let dx = verses[a].local_x - verses[b].local_x;
            let dy = verses[a].local_y - verses[b].local_y;
            assert!(
                (dx * dx + dy * dy).sqrt() > 1e-6,
                "verses {} and {} collide",
                a,
                b
            );
        }
    }
}

#[test]
fn test_two_group_scenario() {
    // 2 mandalas with 1 and 5 verses, per the canonical scenario.
    let cfg = LayoutConfig::default();
    let mut ms = mandalas(&[1, 5]);
    layout_mandalas(&mut ms, &cfg);

    // Group 0 at angle 0: exactly (R_main, 0).
    assert_eq!(ms[0].center_x, cfg.main_radius);
    assert_eq!(ms[0].center_y, 0.0);
    // Group 1 at angle π: (−R_main, ~0).
    assert!((ms[1].center_x + cfg.main_radius).abs() < 1e-9);
    assert!(ms[1].center_y.abs() < 1e-9);

    // Single verse sits exactly at its mandala's center.
    assert_eq!(ms[0].verses[0].local_x, 0.0);
    assert_eq!(ms[0].verses[0].local_y, 0.0);

    // Radii grow monotonically with the verse index.
    let radii: Vec<f64> = ms[1]
        .verses
        .iter()
        .map(|v| (v.local_x.powi(2) + v.local_y.powi(2)).sqrt())
        .collect();
    for w in radii.windows(2) {
        assert!(w[1] >= w[0] - 1e-12, "radii not monotonic: {:?}", radii);
    }
}

#[test]
fn test_degenerate_input_is_guarded() {
    let cfg = LayoutConfig::default();
    // No mandalas at all
    layout_mandalas(&mut [], &cfg);
    // A mandala without verses still gets a center
    let mut ms = vec![mandala(1, 0), mandala(2, 4)];
    layout_mandalas(&mut ms, &cfg);
    assert_eq!(ms[0].center_x, cfg.main_radius);
    assert!(ms[0].verses.is_empty());
    assert_eq!(ms[1].verses.len(), 4);
}

#[test]
fn test_layout_is_deterministic() {
    let cfg = LayoutConfig::default();
    let mut a = mandalas(&[1, 7, 33]);
    let mut b = mandalas(&[1, 7, 33]);
    layout_mandalas(&mut a, &cfg);
    layout_mandalas(&mut b, &cfg);
    for (ma, mb) in a.iter().zip(&b) {
        assert_eq!(ma.center_x, mb.center_x);
        assert_eq!(ma.center_y, mb.center_y);
        for (va, vb) in ma.verses.iter().zip(&mb.verses) {
            assert_eq!(va.local_x, vb.local_x);
            assert_eq!(va.local_y, vb.local_y);
        }
    }
}

#[test]
fn test_golden_angle_value() {
    // π(3 − √5) ≈ 2.399963 rad
    assert!((golden_angle() - 2.399963229728653).abs() < 1e-12);
}

#[test]
fn test_scene_bounds_cover_central_disk_and_mandalas() {
    let cfg = LayoutConfig::default();
    let mut ms = mandalas(&[2, 2, 2, 2]);
    layout_mandalas(&mut ms, &cfg);
    let bounds = scene_bounds(&ms, &cfg);

    // Central disk never clipped
    let central = RectD::from_center_radius(Vec2d::new(0.0, 0.0), cfg.central_radius);
    assert!(bounds.min.x <= central.min.x && bounds.max.x >= central.max.x);
    assert!(bounds.min.y <= central.min.y && bounds.max.y >= central.max.y);

    // Every mandala disk inside
    for m in &ms {
        assert!(bounds.min.x <= m.center_x - cfg.mandala_radius);
        assert!(bounds.max.x >= m.center_x + cfg.mandala_radius);
        assert!(bounds.min.y <= m.center_y - cfg.mandala_radius);
        assert!(bounds.max.y >= m.center_y + cfg.mandala_radius);
    }

    // For the default constants the main circle dominates the box
    let expected = cfg.main_radius + cfg.mandala_radius;
    assert!((bounds.max.x - expected).abs() < 1e-9);
}

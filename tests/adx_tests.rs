use token_pulse::indicator::adx::Adx;

#[test]
/// ADX stays inside [0, 100] whenever it is defined.
fn bounded_when_defined() {
    let mut adx = Adx::new(14);
    for i in 0..400u32 {
        let mid = 100.0 + (i as f64 * 0.17).sin() * 12.0;
        if let Some(v) = adx.push(mid * 1.015, mid * 0.985, mid + (i as f64 * 0.29).cos()) {
            assert!((0.0..=100.0).contains(&v), "out of range at i={}: {}", i, v);
        }
    }
    assert!(adx.value().is_some());
}

#[test]
/// Sideways chop where both directions fire reads strictly below a steady
/// one-way trend.
fn trend_reads_higher_than_chop() {
    let mut trend = Adx::new(14);
    let mut chop = Adx::new(14);
    // Repeating high/low cycle that produces +DM on some bars and -DM on
    // others, so neither direction dominates.
    let cycle: [(f64, f64); 3] = [(105.0, 100.0), (108.0, 102.0), (104.0, 98.0)];
    for i in 0..99u32 {
        let p = 100.0 + 2.0 * i as f64;
        trend.push(p * 1.01, p * 0.99, p);

        let (h, l) = cycle[(i % 3) as usize];
        chop.push(h, l, (h + l) / 2.0);
    }
    let trend_v = trend.value().unwrap();
    let chop_v = chop.value().unwrap();
    assert!((trend_v - 100.0).abs() < 1e-9);
    assert!(
        chop_v < trend_v,
        "chop {} should read below trend {}",
        chop_v,
        trend_v
    );
}

#[test]
/// When DI+ and DI- are both zero the directional index is undefined, so the
/// trailing ADX window never fills with usable readings.
fn zero_directional_movement_reads_null() {
    let mut adx = Adx::new(14);
    let mut last = None;
    // Identical highs and lows every bar: true range stays positive but the
    // high and low deltas are zero, so +DM and -DM never fire.
    for _ in 0..60 {
        last = adx.push(101.0, 99.0, 100.0);
    }
    assert_eq!(last, None);
}

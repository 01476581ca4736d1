//! Point-set fixtures shared by unit, integration, and benchmark suites.
//!
//! Fixtures are plain coordinate triples so this crate stays independent of
//! `junction-core`; callers wrap them in a `PointStore`.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Two tight pairs far apart. The two shortest edges tie at distance 3.
pub const TWIN_PAIRS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 3.0],
    [10.0, 10.0, 10.0],
    [10.0, 10.0, 13.0],
];

/// The 20-point worked example from the junction-box puzzle, one point per
/// line.
pub const PUZZLE_SAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

/// Generates `count` points with continuous coordinates in `[-extent, extent)`.
///
/// # Examples
/// ```
/// use junction_test_support::fixtures::seeded_cloud;
///
/// let cloud = seeded_cloud(7, 16, 100.0);
/// assert_eq!(cloud.len(), 16);
/// assert_eq!(cloud, seeded_cloud(7, 16, 100.0));
/// ```
#[must_use]
pub fn seeded_cloud(seed: u64, count: usize, extent: f64) -> Vec<[f64; 3]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            ]
        })
        .collect()
}

/// Generates `count` points on an integer lattice of side `side`.
///
/// Small lattices produce many equal distances, which stresses tie-breaking.
#[must_use]
pub fn lattice_cloud(seed: u64, count: usize, side: u32) -> Vec<[f64; 3]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let side = side.max(1);
    (0..count)
        .map(|_| {
            [
                f64::from(rng.gen_range(0..side)),
                f64::from(rng.gen_range(0..side)),
                f64::from(rng.gen_range(0..side)),
            ]
        })
        .collect()
}

//! Longitude arithmetic shared by every engine.
//!
//! All functions are pure. Longitudes may be passed un-normalised; results are
//! always expressed in the canonical ranges documented on each function.

pub const SIGN_SPAN: f64 = 30.0;

pub const SIGN_NAMES: [&str; 12] = [
    "aries",
    "taurus",
    "gemini",
    "cancer",
    "leo",
    "virgo",
    "libra",
    "scorpio",
    "sagittarius",
    "capricorn",
    "aquarius",
    "pisces",
];

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
///
/// Positive values mean `to` lies ahead of `from` in zodiacal order.
pub fn signed_separation(from: f64, to: f64) -> f64 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Sign index (0 = Aries .. 11 = Pisces) containing the longitude.
pub fn sign_of(longitude: f64) -> u8 {
    ((normalize_degrees(longitude) / SIGN_SPAN).floor() as u8).min(11)
}

/// Degrees elapsed within the occupied sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    lon - f64::from(sign_of(lon)) * SIGN_SPAN
}

/// Lowercase sign name for an index; indices wrap modulo 12.
pub fn sign_name(sign: u8) -> &'static str {
    SIGN_NAMES[usize::from(sign % 12)]
}

/// House number (1..=12) whose cusp range contains the longitude.
///
/// The house is the one whose cusp is the nearest cusp at or behind the
/// longitude in zodiacal order, which handles the wrap at 0° Aries and
/// unequal house sizes alike. Duplicate cusps resolve to the lower house.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_degrees(longitude);
    let mut best_house = 0usize;
    let mut best_offset = f64::INFINITY;
    for (index, cusp) in cusps.iter().enumerate() {
        let offset = normalize_degrees(lon - cusp);
        if offset < best_offset {
            best_offset = offset;
            best_house = index;
        }
    }
    (best_house + 1) as u8
}

/// Circular distance between two houses, counted in houses (0..=6).
pub fn house_distance(a: u8, b: u8) -> u8 {
    let diff = (i16::from(a) - i16::from(b)).unsigned_abs() % 12;
    diff.min(12 - diff) as u8
}

/// Equal-house cusps starting at the ascendant.
pub fn equal_house_cusps(ascendant: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (index, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_degrees(ascendant + index as f64 * SIGN_SPAN);
    }
    cusps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_degrees() {
        assert_abs_diff_eq!(normalize_degrees(370.0), 10.0);
        assert_abs_diff_eq!(normalize_degrees(-10.0), 350.0);
        assert_abs_diff_eq!(normalize_degrees(720.0), 0.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn test_angular_separation_wraps() {
        assert_abs_diff_eq!(angular_separation(92.0, 2.0), 90.0);
        assert_abs_diff_eq!(angular_separation(359.0, 1.0), 2.0);
        assert_abs_diff_eq!(angular_separation(0.0, 180.0), 180.0);
        assert_abs_diff_eq!(angular_separation(-90.0, 450.0), 180.0);
    }

    #[test]
    fn test_signed_separation() {
        assert_abs_diff_eq!(signed_separation(350.0, 10.0), 20.0);
        assert_abs_diff_eq!(signed_separation(10.0, 350.0), -20.0);
        assert_abs_diff_eq!(signed_separation(0.0, 180.0), 180.0);
    }

    #[test]
    fn test_sign_of() {
        assert_eq!(sign_of(0.0), 0);
        assert_eq!(sign_of(29.999), 0);
        assert_eq!(sign_of(30.0), 1);
        assert_eq!(sign_of(359.9), 11);
        assert_eq!(sign_of(-0.5), 11);
        assert_eq!(sign_name(sign_of(125.0)), "leo");
    }

    #[test]
    fn test_house_of_wraps_past_aries() {
        let cusps = equal_house_cusps(345.0);
        assert_eq!(house_of(350.0, &cusps), 1);
        assert_eq!(house_of(10.0, &cusps), 1);
        assert_eq!(house_of(15.0, &cusps), 2);
        assert_eq!(house_of(344.9, &cusps), 12);
    }

    #[test]
    fn test_house_of_unequal_cusps() {
        let cusps = [
            0.0, 40.0, 70.0, 90.0, 120.0, 160.0, 180.0, 220.0, 250.0, 270.0, 300.0, 340.0,
        ];
        assert_eq!(house_of(39.0, &cusps), 1);
        assert_eq!(house_of(85.0, &cusps), 3);
        assert_eq!(house_of(345.0, &cusps), 12);
    }

    #[test]
    fn test_house_distance() {
        assert_eq!(house_distance(10, 10), 0);
        assert_eq!(house_distance(10, 4), 6);
        assert_eq!(house_distance(1, 12), 1);
        assert_eq!(house_distance(2, 9), 5);
    }
}

//! Which house a longitude falls in.

use crate::ephemeris::types::normalize_degrees;

/// House number (1-12) containing `longitude`.
///
/// House `n` runs from its own cusp (inclusive) to the next cusp
/// (exclusive); a house whose cusps straddle 0° wraps through the seam.
/// Malformed cusp sets that leave a gap fall back to house 1.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_degrees(longitude);

    for i in 0..12 {
        let lo = normalize_degrees(cusps[i]);
        let hi = normalize_degrees(cusps[(i + 1) % 12]);

        let inside = if lo <= hi {
            lo <= lon && lon < hi
        } else {
            lon >= lo || lon < hi
        };
        if inside {
            return (i + 1) as u8;
        }
    }

    log::warn!("longitude {lon} matched no house in {cusps:?}; assigning house 1");
    1
}

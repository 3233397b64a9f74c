//! Temperature color bands shared by the title gradient and report columns

pub type Rgb = (u8, u8, u8);

/// Gradient endpoints when no temperature is known
pub const NO_DATA_BAND: (Rgb, Rgb) = ((180, 180, 180), (220, 220, 220));

/// Gradient endpoints for a temperature. The first endpoint doubles as the
/// flat accent color for report columns, so both views stay in the same band.
pub fn temperature_band(celsius: f32) -> (Rgb, Rgb) {
    match celsius {
        t if t < 0.0 => ((150, 200, 255), (200, 230, 255)),
        t if t < 15.0 => ((100, 180, 255), (150, 220, 200)),
        t if t < 25.0 => ((100, 200, 150), (255, 220, 100)),
        t if t < 35.0 => ((255, 180, 80), (255, 120, 80)),
        _ => ((255, 100, 80), (255, 60, 60)),
    }
}

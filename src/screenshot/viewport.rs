use tracing::trace;

/// A standard screen resolution paired with the aspect ratio it represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenResolution {
    pub width: u32,
    pub height: u32,
    pub ratio: f64,
}

impl ScreenResolution {
    const fn new(width: u32, height: u32, ratio: f64) -> Self {
        Self { width, height, ratio }
    }
}

/// Browser viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl From<ScreenResolution> for Viewport {
    fn from(resolution: ScreenResolution) -> Self {
        Self {
            width: resolution.width,
            height: resolution.height,
        }
    }
}

// Order matters: ties resolve to the earliest entry.
pub const STANDARD_RESOLUTIONS: [ScreenResolution; 9] = [
    ScreenResolution::new(1920, 1080, 16.0 / 9.0),
    ScreenResolution::new(1280, 720, 16.0 / 9.0),
    ScreenResolution::new(1600, 900, 16.0 / 9.0),
    ScreenResolution::new(1024, 768, 4.0 / 3.0),
    ScreenResolution::new(800, 600, 4.0 / 3.0),
    ScreenResolution::new(1440, 960, 3.0 / 2.0),
    ScreenResolution::new(2160, 1440, 3.0 / 2.0),
    ScreenResolution::new(2560, 1080, 21.0 / 9.0),
    ScreenResolution::new(3440, 1440, 21.0 / 9.0),
];

/// Picks the standard resolution whose aspect ratio is closest to the target
///
/// # Arguments
/// * `target_width` - Requested width, must be non-zero
/// * `target_height` - Requested height, must be non-zero
///
/// # Returns
/// * `ScreenResolution` - The first catalog entry with the minimal ratio distance
pub fn closest_resolution(target_width: u32, target_height: u32) -> ScreenResolution {
    let target_ratio = f64::from(target_width) / f64::from(target_height);

    let mut closest = STANDARD_RESOLUTIONS[0];
    let mut min_difference = (target_ratio - closest.ratio).abs();

    for screen in STANDARD_RESOLUTIONS.iter().skip(1) {
        let difference = (target_ratio - screen.ratio).abs();
        if difference < min_difference {
            min_difference = difference;
            closest = *screen;
        }
    }

    trace!(
        "Closest resolution for {}x{} (ratio {:.4}) is {}x{}",
        target_width, target_height, target_ratio, closest.width, closest.height
    );
    closest
}

/// Viewport for a full-page capture: requested width, measured body height rounded up
pub fn full_page_viewport(width: u32, measured_body_height: f64) -> Viewport {
    let height = measured_body_height.ceil();
    let height = if height.is_finite() && height >= 1.0 {
        height as u32
    } else {
        1
    };
    Viewport { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_catalog_entries_map_to_themselves() {
        for (index, entry) in STANDARD_RESOLUTIONS.iter().enumerate() {
            let chosen = closest_resolution(entry.width, entry.height);
            // Entries sharing a ratio with an earlier one resolve to that earlier one
            let first_with_ratio = STANDARD_RESOLUTIONS
                .iter()
                .position(|r| (r.ratio - entry.ratio).abs() < f64::EPSILON)
                .unwrap();
            if first_with_ratio == index {
                assert_eq!(chosen, *entry);
            } else {
                assert_eq!(chosen, STANDARD_RESOLUTIONS[first_with_ratio]);
            }
        }
    }

    #[test]
    fn test_exact_width_height_of_family_heads() {
        assert_eq!(Viewport::from(closest_resolution(1920, 1080)), Viewport { width: 1920, height: 1080 });
        assert_eq!(Viewport::from(closest_resolution(1024, 768)), Viewport { width: 1024, height: 768 });
        assert_eq!(Viewport::from(closest_resolution(1440, 960)), Viewport { width: 1440, height: 960 });
        assert_eq!(Viewport::from(closest_resolution(2560, 1080)), Viewport { width: 2560, height: 1080 });
    }

    #[test]
    fn test_4k_resolves_to_first_16_9_entry() {
        let chosen = closest_resolution(3840, 2160);
        assert_eq!((chosen.width, chosen.height), (1920, 1080));
    }

    #[test]
    fn test_square_resolves_to_first_4_3_entry() {
        let chosen = closest_resolution(1000, 1000);
        assert_eq!((chosen.width, chosen.height), (1024, 768));
    }

    #[test]
    fn test_ultrawide_and_portrait_targets() {
        let ultrawide = closest_resolution(5120, 1440);
        assert_eq!((ultrawide.width, ultrawide.height), (2560, 1080));

        // Portrait ratios sit closest to the narrowest family
        let portrait = closest_resolution(1080, 1920);
        assert_eq!((portrait.width, portrait.height), (1024, 768));
    }

    #[test]
    fn test_full_page_viewport_rounds_up() {
        assert_eq!(full_page_viewport(1280, 2400.2), Viewport { width: 1280, height: 2401 });
        assert_eq!(full_page_viewport(1920, 900.0), Viewport { width: 1920, height: 900 });
        assert_eq!(full_page_viewport(800, 0.0), Viewport { width: 800, height: 1 });
        assert_eq!(full_page_viewport(800, f64::NAN), Viewport { width: 800, height: 1 });
    }
}

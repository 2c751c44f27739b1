use crate::types::RgbaColor;

/// Scale a 0..=1 channel to 0..=255, rounding half up
fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `#rrggbb` for opaque colors, `rgba(r, g, b, a)` otherwise
pub fn to_css_color(color: &RgbaColor) -> String {
    let (r, g, b) = (channel(color.r), channel(color.g), channel(color.b));
    let alpha = color.a.clamp(0.0, 1.0);

    if alpha >= 1.0 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("rgba({}, {}, {}, {})", r, g, b, format_number(alpha))
    }
}

/// Render a float the way it reads in CSS: no trailing zeros, at most four
/// decimals (Figma floats carry f32 noise such as `0.800000011920929`).
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(r: f64, g: f64, b: f64, a: f64) -> RgbaColor {
        RgbaColor { r, g, b, a }
    }

    #[test]
    fn test_opaque_red_is_hex() {
        assert_eq!(to_css_color(&rgba(1.0, 0.0, 0.0, 1.0)), "#ff0000");
    }

    #[test]
    fn test_translucent_red_is_rgba() {
        assert_eq!(to_css_color(&rgba(1.0, 0.0, 0.0, 0.5)), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_channel_rounding() {
        // 0.2 * 255 = 51.0, 0.5 * 255 = 127.5 rounds up to 128
        assert_eq!(to_css_color(&rgba(0.2, 0.5, 0.6039, 1.0)), "#33809a");
    }

    #[test]
    fn test_alpha_noise_trimmed() {
        assert_eq!(
            to_css_color(&rgba(0.0, 0.0, 0.0, 0.800000011920929)),
            "rgba(0, 0, 0, 0.8)"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(24.000000381), "24");
    }
}

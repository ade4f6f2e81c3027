//! Stroke selection for the echo, outline and overlay passes
//!
//! Segment `n` (1-based) joins pivot `n - 1` to pivot `n`.

/// 8-bit RGB color as understood by the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Watch display palette
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const PURPLE: Color = Color::rgb(0xaa, 0x00, 0xaa);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const CHROME_YELLOW: Color = Color::rgb(0xff, 0xaa, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const VIVID_CERULEAN: Color = Color::rgb(0x00, 0xaa, 0xff);
}

/// Per-segment colors: year-month, month-hour, hour-minute, minute-second, second tip
const SEGMENT_COLORS: [Color; 5] = [
    palette::PURPLE,
    palette::RED,
    palette::CHROME_YELLOW,
    palette::GREEN,
    palette::VIVID_CERULEAN,
];

/// Color used for every segment on monochrome displays
const MONOCHROME_LINE: Color = palette::WHITE;
/// Color of the contrast outline under the base chain
const OUTLINE_COLOR: Color = palette::BLACK;

const ECHO_WIDTH: u8 = 1;
const OUTLINE_WIDTH: u8 = 7;
const OVERLAY_WIDTH: u8 = 3;
/// Last segment drawn thin on monochrome displays
const START_BOLD_SEGMENT: usize = 2;

/// Which drawing pass a stroke belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Thin lines for every echo chain
    Echo,
    /// Wide dark line under each base segment
    Outline,
    /// Colored line over each base segment
    Overlay,
}

/// Color and width for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Color,
    pub width: u8,
}

fn segment_color(segment: usize, color_capable: bool) -> Color {
    assert!(
        (1..=SEGMENT_COLORS.len()).contains(&segment),
        "segment {} out of range",
        segment
    );
    if !color_capable {
        return MONOCHROME_LINE;
    }
    SEGMENT_COLORS[segment - 1]
}

/// Stroke for `segment` (1..=5) in the given pass
pub fn stroke(pass: Pass, segment: usize, color_capable: bool) -> Stroke {
    match pass {
        Pass::Echo => Stroke {
            color: segment_color(segment, color_capable),
            width: ECHO_WIDTH,
        },
        Pass::Outline => Stroke {
            color: OUTLINE_COLOR,
            width: OUTLINE_WIDTH,
        },
        Pass::Overlay => {
            // Without color, the two long background strokes stay thin
            let width = if !color_capable && segment <= START_BOLD_SEGMENT {
                ECHO_WIDTH
            } else {
                OVERLAY_WIDTH
            };
            Stroke {
                color: segment_color(segment, color_capable),
                width,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_strokes() {
        assert_eq!(
            stroke(Pass::Echo, 1, true),
            Stroke { color: palette::PURPLE, width: 1 }
        );
        assert_eq!(stroke(Pass::Echo, 5, true).color, palette::VIVID_CERULEAN);
        for segment in 1..=5 {
            assert_eq!(
                stroke(Pass::Echo, segment, false),
                Stroke { color: palette::WHITE, width: 1 }
            );
        }
    }

    #[test]
    fn test_outline_is_fixed() {
        for segment in 1..=5 {
            for color_capable in [true, false] {
                assert_eq!(
                    stroke(Pass::Outline, segment, color_capable),
                    Stroke { color: palette::BLACK, width: 7 }
                );
            }
        }
    }

    #[test]
    fn test_overlay_widths() {
        let color_widths: Vec<u8> = (1..=5).map(|s| stroke(Pass::Overlay, s, true).width).collect();
        assert_eq!(color_widths, vec![3, 3, 3, 3, 3]);
        let mono_widths: Vec<u8> = (1..=5).map(|s| stroke(Pass::Overlay, s, false).width).collect();
        assert_eq!(mono_widths, vec![1, 1, 3, 3, 3]);
        assert_eq!(stroke(Pass::Overlay, 3, true).color, palette::CHROME_YELLOW);
    }

    #[test]
    #[should_panic(expected = "segment 0 out of range")]
    fn test_monochrome_rejects_segment_zero() {
        stroke(Pass::Echo, 0, false);
    }

    #[test]
    #[should_panic(expected = "segment 6 out of range")]
    fn test_monochrome_rejects_segment_past_tip() {
        stroke(Pass::Overlay, 6, false);
    }
}

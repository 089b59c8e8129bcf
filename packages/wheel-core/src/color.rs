//! Color samples and the colors printed on the control panel.

use core::fmt;

use rgb::Rgb;

/// A color sample with one floating point intensity per channel.
///
/// Samples straight from a sensor are usually not normalized. Use [`Color::normalized`] to
/// obtain channel proportions before comparing against reference colors.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel intensity.
    pub red: f64,
    /// Green channel intensity.
    pub green: f64,
    /// Blue channel intensity.
    pub blue: f64,
}

impl Color {
    /// Pure black, the color of nothing at all.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new color from its three channel intensities.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Returns the sum of all three channels.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.red + self.green + self.blue
    }

    /// Returns `true` if every channel is a finite number.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.red.is_finite() && self.green.is_finite() && self.blue.is_finite()
    }

    /// Scales the color so that its channels sum to one.
    ///
    /// Returns `None` for black samples and samples with non-finite or negative channels,
    /// which carry no hue information.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        if !self.is_finite() || self.red < 0.0 || self.green < 0.0 || self.blue < 0.0 {
            return None;
        }

        let magnitude = self.magnitude();
        if magnitude <= 0.0 {
            return None;
        }

        Some(Self::new(
            self.red / magnitude,
            self.green / magnitude,
            self.blue / magnitude,
        ))
    }

    /// Euclidean distance between two colors in RGB space.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dr = self.red - other.red;
        let dg = self.green - other.green;
        let db = self.blue - other.blue;

        libm::sqrt(dr * dr + dg * dg + db * db)
    }
}

impl From<Rgb<u8>> for Color {
    fn from(value: Rgb<u8>) -> Self {
        Self::new(
            f64::from(value.r) / 255.0,
            f64::from(value.g) / 255.0,
            f64::from(value.b) / 255.0,
        )
    }
}

impl From<Rgb<f64>> for Color {
    fn from(value: Rgb<f64>) -> Self {
        Self::new(value.r, value.g, value.b)
    }
}

impl From<Color> for Rgb<f64> {
    fn from(value: Color) -> Self {
        Self::new(value.red, value.green, value.blue)
    }
}

/// One of the four colors printed on the control panel.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum WheelColor {
    /// Blue wedge.
    Blue,
    /// Green wedge.
    Green,
    /// Red wedge.
    Red,
    /// Yellow wedge.
    Yellow,
}

impl WheelColor {
    /// Every panel color, in the order the wedges pass a fixed sensor.
    pub const ALL: [Self; 4] = [Self::Red, Self::Green, Self::Blue, Self::Yellow];

    /// Returns the calibrated reference color for this wedge, as read by the optical sensor
    /// under its own LED.
    #[must_use]
    pub const fn reference(self) -> Color {
        match self {
            Self::Blue => Color::new(0.143, 0.427, 0.429),
            Self::Green => Color::new(0.197, 0.561, 0.240),
            Self::Red => Color::new(0.487, 0.360, 0.152),
            Self::Yellow => Color::new(0.361, 0.524, 0.113),
        }
    }

    /// Human readable name of the color.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Red => "Red",
            Self::Yellow => "Yellow",
        }
    }

    /// The single-character code the field management system uses for this color.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Blue => 'B',
            Self::Green => 'G',
            Self::Red => 'R',
            Self::Yellow => 'Y',
        }
    }

    /// Looks up a color by its field management system code. Lowercase codes are accepted.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'B' => Some(Self::Blue),
            'G' => Some(Self::Green),
            'R' => Some(Self::Red),
            'Y' => Some(Self::Yellow),
            _ => None,
        }
    }

    /// Position of this color within [`WheelColor::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Yellow => 3,
        }
    }

    /// Returns the color found `wedges` positions further along the wheel.
    #[must_use]
    pub const fn offset(self, wedges: usize) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + wedges % len) % len]
    }
}

impl fmt::Display for WheelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normalizes_to_unit_sum() {
        let color = Color::new(20.0, 60.0, 20.0).normalized().unwrap();

        assert_relative_eq!(color.red, 0.2);
        assert_relative_eq!(color.green, 0.6);
        assert_relative_eq!(color.blue, 0.2);
        assert_relative_eq!(color.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn black_and_garbage_do_not_normalize() {
        assert_eq!(Color::BLACK.normalized(), None);
        assert_eq!(Color::new(f64::NAN, 0.5, 0.5).normalized(), None);
        assert_eq!(Color::new(f64::INFINITY, 0.5, 0.5).normalized(), None);
        assert_eq!(Color::new(-1.0, 0.5, 0.5).normalized(), None);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Color::new(0.0, 0.0, 0.0);
        let b = Color::new(0.3, 0.4, 0.0);

        assert_relative_eq!(a.distance(&b), 0.5, epsilon = 1e-12);
        assert_relative_eq!(b.distance(&a), 0.5, epsilon = 1e-12);
        assert_relative_eq!(b.distance(&b), 0.0);
    }

    #[test]
    fn converts_from_rgb8() {
        let color = Color::from(Rgb::new(255u8, 0, 51));

        assert_relative_eq!(color.red, 1.0);
        assert_relative_eq!(color.green, 0.0);
        assert_relative_eq!(color.blue, 0.2);
    }

    #[test]
    fn codes_round_trip() {
        for color in WheelColor::ALL {
            assert_eq!(WheelColor::from_code(color.code()), Some(color));
        }

        assert_eq!(WheelColor::from_code('y'), Some(WheelColor::Yellow));
        assert_eq!(WheelColor::from_code('X'), None);
    }

    #[test]
    fn offsets_walk_the_wheel() {
        assert_eq!(WheelColor::Red.offset(0), WheelColor::Red);
        assert_eq!(WheelColor::Red.offset(1), WheelColor::Green);
        assert_eq!(WheelColor::Red.offset(2), WheelColor::Blue);
        assert_eq!(WheelColor::Green.offset(2), WheelColor::Yellow);
        assert_eq!(WheelColor::Yellow.offset(1), WheelColor::Red);
        assert_eq!(WheelColor::Blue.offset(6), WheelColor::Red);
    }

    #[test]
    fn huge_offsets_wrap() {
        // usize::MAX is 3 more than a multiple of four wedges.
        assert_eq!(WheelColor::Yellow.offset(usize::MAX), WheelColor::Blue);
        assert_eq!(WheelColor::Red.offset(usize::MAX), WheelColor::Yellow);
    }

    #[test]
    fn reference_colors_are_normalized() {
        for color in WheelColor::ALL {
            let reference = color.reference();
            assert_relative_eq!(reference.magnitude(), 1.0, epsilon = 0.01);
        }
    }
}

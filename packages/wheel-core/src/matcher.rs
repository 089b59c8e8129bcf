//! Nearest-color classification.
//!
//! A [`ColorMatcher`] holds a small set of labeled reference colors. Incoming samples are
//! normalized so that their channels sum to one, then compared against every reference by
//! Euclidean distance. The closest reference wins, and its confidence is `1 - distance`.
//!
//! [`ColorMatcher::match_color`] additionally rejects matches whose confidence falls below a
//! threshold, so a sample taken between two wedges (or off the panel entirely) reads as
//! unknown rather than as whatever color happens to be closest.

use alloc::vec::Vec;

use snafu::{Snafu, ensure};

use crate::color::{Color, WheelColor};

/// A successful classification of a color sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch {
    /// The panel color that was matched.
    pub color: WheelColor,
    /// The reference color the sample was compared against.
    pub reference: Color,
    /// How close the sample was to the reference, where `1.0` is an exact match.
    pub confidence: f64,
}

/// Classifies color samples against a palette of reference colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatcher {
    targets: Vec<(WheelColor, Color)>,
    confidence_threshold: f64,
}

impl ColorMatcher {
    /// The minimum confidence a match needs by default to be accepted by
    /// [`ColorMatcher::match_color`].
    pub const DEFAULT_CONFIDENCE: f64 = 0.95;

    /// Creates a matcher with no reference colors.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            targets: Vec::new(),
            confidence_threshold: Self::DEFAULT_CONFIDENCE,
        }
    }

    /// Creates a matcher loaded with the calibrated reference of every panel color.
    #[must_use]
    pub fn with_default_palette() -> Self {
        let mut matcher = Self::new();
        for color in WheelColor::ALL {
            matcher.add_target(color, color.reference());
        }
        matcher
    }

    /// Adds a labeled reference color.
    ///
    /// References are compared in insertion order, so when two references are equally close
    /// to a sample the one added first wins.
    pub fn add_target(&mut self, label: WheelColor, reference: Color) {
        self.targets.push((label, reference));
    }

    /// Removes every reference color.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Returns the labeled reference colors in insertion order.
    #[must_use]
    pub fn targets(&self) -> &[(WheelColor, Color)] {
        &self.targets
    }

    /// Returns the minimum confidence accepted by [`ColorMatcher::match_color`].
    #[must_use]
    pub const fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Sets the minimum confidence accepted by [`ColorMatcher::match_color`].
    ///
    /// # Errors
    ///
    /// - A [`MatcherError::InvalidConfidence`] error is returned if `threshold` is not within
    ///   `0.0..=1.0`.
    pub fn set_confidence_threshold(&mut self, threshold: f64) -> Result<(), MatcherError> {
        ensure!(
            (0.0..=1.0).contains(&threshold),
            InvalidConfidenceSnafu { threshold }
        );

        self.confidence_threshold = threshold;
        Ok(())
    }

    /// Returns the closest reference to `sample`, however far away it is.
    ///
    /// Returns `None` if the matcher has no references, or if the sample cannot be normalized
    /// (see [`Color::normalized`]).
    #[must_use]
    pub fn match_closest(&self, sample: Color) -> Option<ColorMatch> {
        let normalized = sample.normalized()?;

        let mut closest: Option<(WheelColor, Color, f64)> = None;
        for &(label, reference) in &self.targets {
            let distance = normalized.distance(&reference);
            if closest.is_none_or(|(_, _, best)| distance < best) {
                closest = Some((label, reference, distance));
            }
        }

        closest.map(|(color, reference, distance)| ColorMatch {
            color,
            reference,
            confidence: 1.0 - distance,
        })
    }

    /// Returns the closest reference to `sample` if it is at least as confident as the
    /// configured threshold.
    ///
    /// A `None` result means the sample is unknown.
    #[must_use]
    pub fn match_color(&self, sample: Color) -> Option<ColorMatch> {
        self.match_closest(sample)
            .filter(|result| result.confidence >= self.confidence_threshold)
    }
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self::with_default_palette()
    }
}

/// Errors that can occur when configuring a [`ColorMatcher`].
#[derive(Debug, Snafu)]
pub enum MatcherError {
    /// The confidence threshold was outside of `0.0..=1.0`.
    #[snafu(display("confidence threshold {threshold} is outside of 0.0..=1.0"))]
    InvalidConfidence {
        /// The rejected threshold.
        threshold: f64,
    },
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn references_match_themselves() {
        let matcher = ColorMatcher::with_default_palette();

        for color in WheelColor::ALL {
            let result = matcher.match_color(color.reference()).unwrap();
            assert_eq!(result.color, color);
            assert!(result.confidence > 0.99);
        }
    }

    #[test]
    fn unnormalized_samples_are_scaled_first() {
        let matcher = ColorMatcher::with_default_palette();

        // Raw sensor counts for a green wedge under the sensor LED.
        let result = matcher.match_color(Color::new(197.0, 561.0, 240.0)).unwrap();
        assert_eq!(result.color, WheelColor::Green);
    }

    #[test]
    fn distant_samples_are_unknown() {
        let matcher = ColorMatcher::with_default_palette();

        // Pure blue is closest to the blue reference, but not close enough.
        let sample = Color::new(0.0, 0.0, 1.0);
        assert_eq!(matcher.match_closest(sample).unwrap().color, WheelColor::Blue);
        assert_eq!(matcher.match_color(sample), None);
    }

    #[test]
    fn confidence_is_one_minus_distance() {
        let mut matcher = ColorMatcher::new();
        matcher.add_target(WheelColor::Red, Color::new(1.0, 0.0, 0.0));

        let result = matcher.match_closest(Color::new(0.6, 0.4, 0.0)).unwrap();
        let expected = 1.0 - libm::sqrt(0.4 * 0.4 + 0.4 * 0.4);
        assert_relative_eq!(result.confidence, expected, epsilon = 1e-12);
    }

    #[test]
    fn black_and_empty_never_match() {
        let matcher = ColorMatcher::with_default_palette();
        assert_eq!(matcher.match_closest(Color::BLACK), None);

        let empty = ColorMatcher::new();
        assert_eq!(empty.match_closest(WheelColor::Red.reference()), None);
    }

    #[test]
    fn ties_go_to_the_first_target() {
        let mut matcher = ColorMatcher::new();
        matcher.add_target(WheelColor::Yellow, Color::new(0.5, 0.5, 0.0));
        matcher.add_target(WheelColor::Green, Color::new(0.5, 0.5, 0.0));

        let result = matcher.match_closest(Color::new(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(result.color, WheelColor::Yellow);
    }

    #[test]
    fn threshold_controls_acceptance() {
        let mut matcher = ColorMatcher::with_default_palette();
        let sample = Color::new(0.0, 0.0, 1.0);

        matcher.set_confidence_threshold(0.0).unwrap();
        assert_eq!(matcher.match_color(sample).unwrap().color, WheelColor::Blue);

        assert!(matcher.set_confidence_threshold(1.5).is_err());
        assert!(matcher.set_confidence_threshold(f64::NAN).is_err());
        assert_relative_eq!(matcher.confidence_threshold(), 0.0);
    }
}

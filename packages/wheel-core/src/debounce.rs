use crate::color::WheelColor;

/// Filters a stream of classified samples down to colors that have been seen several times
/// in a row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct StableColor {
    required: u32,
    candidate: Option<WheelColor>,
    run: u32,
    stable: Option<WheelColor>,
}

impl StableColor {
    pub(crate) const fn new(required: u32) -> Self {
        Self {
            required: if required == 0 { 1 } else { required },
            candidate: None,
            run: 0,
            stable: None,
        }
    }

    /// Feeds one sample, returning the newly stable color if this sample caused the stable
    /// color to change.
    pub(crate) fn update(&mut self, sample: Option<WheelColor>) -> Option<WheelColor> {
        let Some(color) = sample else {
            self.candidate = None;
            self.run = 0;
            return None;
        };

        if self.candidate == Some(color) {
            self.run = self.run.saturating_add(1);
        } else {
            self.candidate = Some(color);
            self.run = 1;
        }

        if self.run >= self.required && self.stable != Some(color) {
            self.stable = Some(color);
            return Some(color);
        }

        None
    }

    pub(crate) const fn stable(&self) -> Option<WheelColor> {
        self.stable
    }

    pub(crate) const fn reset(&mut self) {
        *self = Self::new(self.required);
    }
}

//! Telemetry on a small text screen.
//!
//! Screen writes are slow and rate limited on most robot displays. [`ScreenCache`] remembers
//! what each line currently shows so only changed lines are rewritten, and [`RefreshDivider`]
//! spaces refreshes out over several loop periods.

use alloc::{format, string::String};

use crate::{
    hardware::{Dashboard, HardwareError, TextScreen},
    telemetry::Telemetry,
};

/// The lines last written to a [`TextScreen`].
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ScreenCache {
    shown: [String; 2],
}

impl ScreenCache {
    /// Creates a cache that assumes nothing is on the screen yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shown: [String::new(), String::new()],
        }
    }

    /// Borrows `screen` as a [`Dashboard`] that skips unchanged lines.
    pub const fn dashboard<'a, T: TextScreen>(
        &'a mut self,
        screen: &'a mut T,
    ) -> ScreenDashboard<'a, T> {
        ScreenDashboard {
            screen,
            shown: &mut self.shown,
        }
    }

    /// Forgets what is on the screen, so the next publish rewrites every line.
    pub fn invalidate(&mut self) {
        self.shown = Default::default();
    }
}

/// A [`Dashboard`] writing [`Telemetry::lines`] to a [`TextScreen`].
#[derive(Debug)]
pub struct ScreenDashboard<'a, T> {
    screen: &'a mut T,
    shown: &'a mut [String; 2],
}

impl<T: TextScreen> Dashboard for ScreenDashboard<'_, T> {
    fn publish(&mut self, telemetry: &Telemetry) -> Result<(), HardwareError> {
        let lines = telemetry.lines().into_iter().zip(self.shown.iter_mut());
        for (line, (text, shown)) in lines.enumerate() {
            if text == *shown {
                continue;
            }

            // Pad so that a shorter line fully covers the previous one.
            let padded = format!("{text:<width$}", width = Telemetry::LINE_WIDTH);
            if let Err(error) = self.screen.write_line(line, &padded) {
                // Nothing on this line can be trusted after a failed write.
                shown.clear();
                return Err(error);
            }
            *shown = text;
        }

        Ok(())
    }
}

/// Fires once every `every` loop periods.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RefreshDivider {
    every: u32,
    ticks: u32,
}

impl RefreshDivider {
    /// Creates a divider firing every `every` periods. Zero fires every period.
    #[must_use]
    pub const fn new(every: u32) -> Self {
        Self {
            every: if every == 0 { 1 } else { every },
            ticks: 0,
        }
    }

    /// Counts one period, returning `true` if a refresh is due.
    pub const fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks >= self.every {
            self.ticks = 0;
            true
        } else {
            false
        }
    }
}

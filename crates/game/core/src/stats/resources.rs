//! Resource meters (fight points, breath).
//!
//! Meters clamp instead of failing: damage below zero floors at zero and
//! restoration above the maximum caps at the maximum.

/// A bounded resource with a current and a maximum value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    /// Create a meter, clamping `current` to `maximum`.
    pub const fn new(current: u32, maximum: u32) -> Self {
        let current = if current > maximum { maximum } else { current };
        Self { current, maximum }
    }

    /// A full meter.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Remove up to `amount`. Returns how much was actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Add up to `amount` without exceeding the maximum. Returns how much was added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum - self.current);
        self.current += added;
        added
    }

    /// Remove exactly `amount` if available. Returns false (and changes
    /// nothing) when the meter holds less.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    /// Empty the meter.
    pub fn drain(&mut self) {
        self.current = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deplete_floors_at_zero() {
        let mut meter = ResourceMeter::full(10);
        assert_eq!(meter.deplete(25), 10);
        assert!(meter.is_empty());
    }

    #[test]
    fn restore_caps_at_maximum() {
        let mut meter = ResourceMeter::new(8, 10);
        assert_eq!(meter.restore(5), 2);
        assert_eq!(meter.current, 10);
    }

    #[test]
    fn try_spend_is_all_or_nothing() {
        let mut meter = ResourceMeter::new(1, 6);
        assert!(!meter.try_spend(3));
        assert_eq!(meter.current, 1);
        assert!(meter.try_spend(1));
        assert_eq!(meter.current, 0);
    }

    #[test]
    fn new_clamps_current() {
        assert_eq!(ResourceMeter::new(50, 20).current, 20);
    }
}

/// Output options.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Feature {
    /// Colorize messages by severity.
    Color = 1 << 0,
    /// Prefix messages with the time elapsed since the first timestamped message.
    Time = 1 << 1,
}

impl Feature {

    #[inline(always)]
    pub fn bit(self) -> u8 {
        self as u8
    }
}

/// A set of [`Feature`]s packed into a single byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Features(u8);

impl Features {

    pub const NONE: Self = Self(0);

    #[inline(always)]
    pub fn contains(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, feature: Feature) {
        self.0 |= feature.bit();
    }

    #[inline(always)]
    pub fn remove(&mut self, feature: Feature) {
        self.0 &= !feature.bit();
    }
}

impl Default for Features {

    fn default() -> Self {
        Self(Feature::Color.bit())
    }
}

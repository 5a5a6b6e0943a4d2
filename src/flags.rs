use {
    itertools::Itertools,
    std::{fmt, ops::BitOr},
};

/// A single encoding option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFlag {
    /// Render numeric zero values (integers, unsigned integers and floats) as `"0"`
    /// instead of the empty string.
    UseNumbersZeroValues,
}

impl EncodingFlag {
    pub const ALL: &'static [EncodingFlag] = &[EncodingFlag::UseNumbersZeroValues];

    const fn bit(self) -> u32 {
        match self {
            EncodingFlag::UseNumbersZeroValues => 1 << 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EncodingFlag::UseNumbersZeroValues => "UseNumbersZeroValues",
        }
    }
}

impl fmt::Display for EncodingFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of [`EncodingFlag`]s. The default is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EncodingFlags(u32);

impl EncodingFlags {
    pub const NONE: EncodingFlags = EncodingFlags(0);

    pub const fn with(self, flag: EncodingFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    pub const fn has(self, flag: EncodingFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = EncodingFlag> {
        EncodingFlag::ALL.iter().copied().filter(move |flag| self.has(*flag))
    }
}

impl From<EncodingFlag> for EncodingFlags {
    fn from(flag: EncodingFlag) -> Self {
        EncodingFlags::NONE.with(flag)
    }
}

impl BitOr<EncodingFlag> for EncodingFlags {
    type Output = EncodingFlags;

    fn bitor(self, rhs: EncodingFlag) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOr for EncodingFlags {
    type Output = EncodingFlags;

    fn bitor(self, rhs: EncodingFlags) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr for EncodingFlag {
    type Output = EncodingFlags;

    fn bitor(self, rhs: EncodingFlag) -> Self::Output {
        EncodingFlags::from(self).with(rhs)
    }
}

impl FromIterator<EncodingFlag> for EncodingFlags {
    fn from_iter<I: IntoIterator<Item = EncodingFlag>>(iter: I) -> Self {
        iter.into_iter().fold(EncodingFlags::NONE, EncodingFlags::with)
    }
}

impl fmt::Display for EncodingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_empty() {
            true => f.write_str("none"),
            false => write!(f, "{}", self.iter().join("|")),
        }
    }
}

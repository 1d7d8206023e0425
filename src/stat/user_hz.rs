use std::{
    iter::Sum,
    ops::{Add, Sub},
    str::FromStr,
};

/// a cumulative tick count, in units of `USER_HZ`.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct UserHz(u64);

// === impl UserHz ===

impl UserHz {
    pub const ZERO: Self = Self(0);

    pub const fn new(ticks: u64) -> Self {
        Self(ticks)
    }
}

impl FromStr for UserHz {
    type Err = <u64 as FromStr>::Err;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Add for UserHz {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        let (Self(lhs), Self(rhs)) = (self, rhs);
        Self(lhs.saturating_add(rhs))
    }
}

impl Sum for UserHz {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// subtracting two tick counts yields a signed delta.
///
/// counters are monotonic in practice, but a regression must not panic.
impl Sub for UserHz {
    type Output = i128;
    fn sub(self, rhs: Self) -> Self::Output {
        let (Self(lhs), Self(rhs)) = (self, rhs);
        i128::from(lhs) - i128::from(rhs)
    }
}

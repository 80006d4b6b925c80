use std::fmt::Debug;
use std::ops::{Add, AddAssign, Sub};

/// Per round payoff of a seat. Rewards are summed into cumulative and episode totals,
/// compared in tests and reports, and defaulted to zero for seats that were not scored.
pub trait Reward: Debug + Clone + Default + PartialEq + PartialOrd + Send + Sync
    + Add<Output = Self> + for<'a> Add<&'a Self, Output = Self>
    + Sub<Output = Self> + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
{
    /// Value leaving a score unchanged.
    fn neutral() -> Self;
}

macro_rules! reward_for {
    ($zero:expr => $($t:ty),+ $(,)?) => {
        $(impl Reward for $t { fn neutral() -> Self { $zero } })+
    };
}

reward_for!(0 => u8, u16, u32, u64, i8, i16, i32, i64);
reward_for!(0.0 => f32, f64);

use std::fmt;
use std::hash::Hash;

use enum_traits_common::ReprType;

/// Integer types usable as an enum's `#[repr]`.
pub trait Underlying: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + 'static {
    const TYPE: ReprType;

    fn to_i128(self) -> i128;
}

macro_rules! impl_underlying {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl Underlying for $ty {
                const TYPE: ReprType = ReprType::$kind;

                fn to_i128(self) -> i128 {
                    self as i128
                }
            }
        )+
    };
}

impl_underlying! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    isize => Isize,
    usize => Usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_matches_range() {
        assert_eq!(<u8 as Underlying>::TYPE.range().max, u8::MAX as i128);
        assert_eq!(<i64 as Underlying>::TYPE.range().min, i64::MIN as i128);
        assert_eq!(u64::MAX.to_i128(), u64::MAX as i128);
    }
}

//! Enums declared without the macro. Their impls come from the build script.

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dogs {
    Bulldog,
    Poodle,
    Rottweiler,
    Husky = 255,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hamsters {
    MyHamster = 10,
    Stranger = -10,
}

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Countries {
    Germany = -1000,
    Czechia = 1000,
}

include!(concat!(env!("OUT_DIR"), "/legacy_traits.rs"));

//! The same enums reflected two ways: through `enum_traits!` and through
//! `enum-traits-gen` running in `build.rs`.

use enum_traits::enum_traits;

pub mod legacy;

/// Definitions and impls generated from `include/zoo.hpp`.
pub mod zoo {
    include!(concat!(env!("OUT_DIR"), "/zoo.rs"));
}

enum_traits! {
    pub enum MacroDogs: u8 {
        Bulldog,
        Poodle,
        Rottweiler,
        Husky = 255,
    }
}

enum_traits! {
    pub enum MacroHamsters {
        MyHamster = 10,
        Stranger = -10,
    }
}

enum_traits! {
    pub enum MacroPlanet: i16 {
        Mercury = 1,
        Neptune = 8,
        Pluto = 0x200,
    }
}

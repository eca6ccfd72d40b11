//! Generated impls must agree with what the macro computes.

use enum_traits::{EnumBounds, EnumTraits, Underlying};
use enum_traits_demo::legacy::{Countries, Dogs, Hamsters};
use enum_traits_demo::zoo::{Access, Color, Level, Planet};
use enum_traits_demo::{MacroDogs, MacroHamsters, MacroPlanet};

fn names<E: EnumTraits>() -> Vec<&'static str> {
    E::names().iter().map(|name| name.as_str()).collect()
}

fn reprs<E: EnumTraits>() -> Vec<i128> {
    E::values()
        .iter()
        .map(|value| value.to_repr().to_i128())
        .collect()
}

#[test]
fn generated_rust_enums_match_macro() {
    assert_eq!(Dogs::MIN, MacroDogs::MIN);
    assert_eq!(Dogs::MAX, MacroDogs::MAX);
    assert_eq!(Dogs::COUNT, MacroDogs::COUNT);
    assert_eq!(names::<Dogs>(), names::<MacroDogs>());
    assert_eq!(reprs::<Dogs>(), reprs::<MacroDogs>());

    assert_eq!(names::<Hamsters>(), vec!["Stranger", "MyHamster"]);
    assert_eq!(names::<Hamsters>(), names::<MacroHamsters>());
    assert_eq!(reprs::<Hamsters>(), reprs::<MacroHamsters>());

    assert_eq!(reprs::<Planet>(), reprs::<MacroPlanet>());
    assert_eq!(names::<Planet>(), names::<MacroPlanet>());
}

#[test]
fn generated_lookups() {
    assert_eq!(Dogs::MAX, 2);
    assert_eq!(Dogs::Husky.name(), "");
    assert_eq!(Dogs::Poodle.name(), "Poodle");
    assert_eq!(Dogs::from_str("Rottweiler"), 2);
    assert_eq!(Dogs::from_str("Beagle"), Dogs::INVALID);
    assert_eq!(Dogs::from_repr(1), Some(Dogs::Poodle));
    assert_eq!(Dogs::from_repr(255), None);
    assert_eq!(Hamsters::from_name("MyHamster"), Some(Hamsters::MyHamster));
}

#[test]
fn empty_window_keeps_inverted_bounds() {
    assert_eq!(Countries::MIN, 127);
    assert_eq!(Countries::MAX, -128);
    assert_eq!(Countries::COUNT, 0);
}

#[test]
fn header_aliases_resolve_to_first_name() {
    assert_eq!(Access::Default, Access::Read);
    assert_eq!(Access::Default.name(), "Read");
    assert_eq!(Access::values(), &[Access::Read, Access::Write, Access::Everything]);
    assert_eq!(Access::from_str("Default"), Access::INVALID);
    assert_eq!(Access::INVALID, u8::MAX);
    assert_eq!(Access::Everything.to_string(), "Everything");
}

#[test]
fn header_types_and_values() {
    assert_eq!(names::<Color>(), vec!["BLUE", "GREEN", "RED"]);
    assert_eq!(Color::GREEN as i32, 'g' as i32);

    assert_eq!(reprs::<Level>(), vec![-2, -1, 0, 1, 2]);
    assert_eq!(Level::Warn.to_string(), "Warn");

    assert_eq!(Planet::MAX, 8);
    assert_eq!(Planet::Pluto.name(), "");
    assert_eq!(Planet::Pluto.to_string(), "");
    assert_eq!(std::mem::size_of::<Planet>(), 2);
}

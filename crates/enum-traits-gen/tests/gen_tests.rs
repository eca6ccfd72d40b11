//! End-to-end tests for the generator: files on disk in, Rust source out.

use std::fs;
use std::path::Path;

use enum_traits_common::{ReprType, ScanWindow};
use enum_traits_core::range::{bounds, count};
use enum_traits_core::{Declaration, SignatureDialect};
use enum_traits_gen::{
    Builder, DeclOrigin, GenConfig, GenError, Source, SourceSyntax, generate, generate_sources,
    read_signature_dump, reflect, reflect_sources,
};
use tempfile::TempDir;

const RUST_SOURCE: &str = r#"
/// Fruits with gaps.
#[repr(i32)]
pub enum Fruits {
    Apples = 2,
    Oranges = 5,
    Pears = 8,
    Bananas = 11,
}

#[derive(Clone, Copy)]
#[repr(i8)]
pub enum Cities {
    Lagos = -128,
    Lima = 127,
}

#[repr(u8)]
pub enum Dogs {
    Bulldog,
    Poodle,
    Rottweiler,
    Husky = 255,
}

pub enum Hamsters {
    MyHamster = 10,
    Stranger = -10,
}

pub enum Message {
    Quit,
    Move { x: i32, y: i32 },
}
"#;

const CPP_SOURCE: &str = r#"
#pragma once
#include <cstdint>

namespace zoo {

enum class Access : std::uint8_t {
    Write = 1 << 1,
    Read = 1,
    Default = Read,
    Everything = Read | Write,
};

// Unscoped, no base: widened to fit.
enum Countries {
    Germany = -1000,
    Czechia = 1000,
};

typedef enum {
    RED = 'r',
    GREEN = 'g',
} Color;

enum class Opaque : int;

}  // namespace zoo
"#;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

// =====================================================================
// Multi-file generation
// =====================================================================

#[test]
fn generates_from_mixed_sources_in_input_order() {
    let dir = TempDir::new().expect("temp dir");
    let rust = write(dir.path(), "animals.rs", RUST_SOURCE);
    let cpp = write(dir.path(), "zoo.hpp", CPP_SOURCE);

    let items = reflect_sources(
        &[Source::new(&rust), Source::new(&cpp)],
        &GenConfig::default(),
    )
    .expect("reflects");
    let names: Vec<_> = items.iter().map(|item| item.decl.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Fruits", "Cities", "Dogs", "Hamsters", "Access", "Countries", "Color"]
    );

    let hamsters = &items[3].table;
    assert_eq!(hamsters.values().collect::<Vec<_>>(), vec![-10, 10]);
    assert_eq!(
        hamsters.names().collect::<Vec<_>>(),
        vec!["Stranger", "MyHamster"]
    );

    let cities = &items[1].table;
    assert_eq!((cities.min, cities.max, cities.count), (-128, 127, 2));

    let dogs = &items[2].table;
    assert_eq!((dogs.min, dogs.max), (0, 2));
    assert_eq!(dogs.name(255), "");

    let access = &items[4];
    assert_eq!(access.decl.repr, ReprType::U8);
    assert_eq!(access.decl.origin, DeclOrigin::Cpp);
    assert_eq!(access.table.values().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(access.table.name(1), "Read");
    assert_eq!(access.table.aliases.len(), 1);
    assert_eq!(access.table.aliases[0].name, "Default");

    let countries = &items[5].table;
    assert_eq!((countries.min, countries.max, countries.count), (127, -128, 0));
    assert_eq!(countries.out_of_window.len(), 2);

    let color = &items[6].table;
    assert_eq!(color.values().collect::<Vec<_>>(), vec![103, 114]);
}

#[test]
fn output_is_identical_across_runs() {
    let dir = TempDir::new().expect("temp dir");
    let sources = [
        Source::new(write(dir.path(), "animals.rs", RUST_SOURCE)),
        Source::new(write(dir.path(), "zoo.hpp", CPP_SOURCE)),
    ];
    let config = GenConfig {
        emit_definitions: true,
        ..GenConfig::default()
    };
    let first = generate_sources(&sources, &config).expect("generates");
    for _ in 0..4 {
        assert_eq!(generate_sources(&sources, &config).expect("generates"), first);
    }
    assert!(first.contains("pub enum Access {"));
    assert!(first.contains("pub const Default: Access = Access::Read;"));
    assert!(!first.contains("pub enum Fruits"));
    assert!(!first.contains("EnumTraits for Countries"));
    assert!(first.contains("EnumBounds for Countries"));
}

#[test]
fn errors_name_the_file_and_line() {
    let dir = TempDir::new().expect("temp dir");
    let bad = write(
        dir.path(),
        "bad.rs",
        "#[repr(u8)]\nenum Tiny {\n    A = 1,\n    B = 256,\n}\n",
    );
    let err = generate_sources(&[Source::new(&bad)], &GenConfig::default()).unwrap_err();
    assert_eq!(err.line(), Some(4));
    let message = err.to_string();
    assert!(message.contains("bad.rs"), "{message}");

    let missing = dir.path().join("missing.rs");
    let err = generate_sources(&[Source::new(&missing)], &GenConfig::default()).unwrap_err();
    assert!(matches!(err, GenError::Io { .. }));
}

#[test]
fn only_selects_and_rejects_unknown_names() {
    let dir = TempDir::new().expect("temp dir");
    let source = Source::new(write(dir.path(), "animals.rs", RUST_SOURCE));

    let config = GenConfig {
        only: vec!["Dogs".to_string()],
        ..GenConfig::default()
    };
    let out = generate_sources(std::slice::from_ref(&source), &config).expect("generates");
    assert!(out.contains("for Dogs"));
    assert!(!out.contains("for Fruits"));

    let config = GenConfig {
        only: vec!["Cats".to_string()],
        ..GenConfig::default()
    };
    assert!(matches!(
        generate_sources(&[source], &config),
        Err(GenError::UnknownEnum(name)) if name == "Cats"
    ));
}

#[test]
fn wider_window_reveals_more_values() {
    let dir = TempDir::new().expect("temp dir");
    let source = Source::new(write(dir.path(), "zoo.hpp", CPP_SOURCE));
    let config = GenConfig {
        min_enum_value: -1000,
        max_enum_value: 1000,
        only: vec!["Countries".to_string()],
        ..GenConfig::default()
    };
    let items = reflect_sources(&[source], &config).expect("reflects");
    let table = &items[0].table;
    assert_eq!((table.min, table.max, table.count), (-1000, 1000, 2));
    assert_eq!(table.window, ScanWindow::new(-1000, 1000));
}

#[test]
fn window_outside_the_type_leaves_only_bounds() {
    let config = GenConfig {
        min_enum_value: -100,
        max_enum_value: -1,
        ..GenConfig::default()
    };
    let out = generate("#[repr(u8)] enum E { Zero = 0 }", SourceSyntax::Rust, &config)
        .expect("generates");
    assert!(out.contains("const MIN: u8 = 255;"), "{out}");
    assert!(out.contains("const MAX: u8 = 0;"), "{out}");
    assert!(out.contains("const COUNT: usize = 0;"));
    assert!(!out.contains("EnumTraits for E"));
    assert!(!out.contains("E::Zero"));
}

#[test]
fn nested_rust_enums_are_not_reflected() {
    let source = "mod inner { pub enum X { A } }\n\
                  pub enum Top { B }\n\
                  #[cfg(test)] mod tests { enum T { C } }\n";
    let out = generate(source, SourceSyntax::Rust, &GenConfig::default()).expect("generates");
    assert!(out.contains("EnumBounds for Top {"));
    assert!(!out.contains("for X {"));
    assert!(!out.contains("for T {"));
}

// =====================================================================
// Agreement with the const engine
// =====================================================================

#[test]
fn tables_match_const_engine() {
    let decls = enum_traits_gen::parse_source(RUST_SOURCE, SourceSyntax::Rust).expect("parses");
    let items = reflect(decls, &GenConfig::default()).expect("reflects");
    for item in &items {
        let enumerators = item.decl.engine_enumerators();
        let decl = Declaration::new(&item.decl.name, item.decl.repr.range(), &enumerators);
        let expected = bounds(&decl, ScanWindow::CONFIGURED);
        assert_eq!(item.table.min, expected.min, "{}", item.decl.name);
        assert_eq!(item.table.max, expected.max, "{}", item.decl.name);
        assert_eq!(
            item.table.count,
            count(&decl, ScanWindow::CONFIGURED),
            "{}",
            item.decl.name
        );
    }
}

// =====================================================================
// Builder
// =====================================================================

#[test]
fn builder_writes_only_on_change() {
    let dir = TempDir::new().expect("temp dir");
    let header = write(dir.path(), "zoo.hpp", CPP_SOURCE);
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).expect("out dir");

    let build = || {
        Builder::new()
            .source(&header)
            .emit_definitions(true)
            .out_dir(&out_dir)
            .out_file("zoo.rs")
            .generate()
            .expect("generates")
    };
    let path = build();
    assert_eq!(path, out_dir.join("zoo.rs"));
    let first = fs::read_to_string(&path).expect("read output");
    assert!(first.starts_with(enum_traits_gen::emit::HEADER));
    let modified = fs::metadata(&path).and_then(|m| m.modified()).expect("mtime");

    assert_eq!(build(), path);
    assert_eq!(fs::read_to_string(&path).expect("read output"), first);
    assert_eq!(
        fs::metadata(&path).and_then(|m| m.modified()).expect("mtime"),
        modified
    );
}

#[test]
fn builder_uses_explicit_syntax() {
    let dir = TempDir::new().expect("temp dir");
    let header = write(dir.path(), "flags.def", "enum Flags : short { A = -1, B = 1 };");
    let path = Builder::new()
        .source_with_syntax(&header, SourceSyntax::Cpp)
        .out_dir(dir.path())
        .generate()
        .expect("generates");
    let out = fs::read_to_string(path).expect("read output");
    assert!(out.contains("type Repr = i16;"));
    assert!(out.contains("const MIN: i16 = -1;"));

    let err = Builder::new()
        .source(&header)
        .out_dir(dir.path())
        .generate()
        .unwrap_err();
    assert!(matches!(err, GenError::UnknownSyntax(_)));
}

// =====================================================================
// Configuration files and signature dumps
// =====================================================================

#[test]
fn config_file_round_trips_through_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        enum_traits_gen::CONFIG_FILE_NAME,
        r#"{ "minEnumValue": -16, "maxEnumValue": 16, "emitDefinitions": true }"#,
    );
    let config = GenConfig::load(&path).expect("loads");
    assert_eq!(config.window(), ScanWindow::new(-16, 16));
    assert!(config.emit_definitions);
    assert_eq!(config.crate_path, "::enum_traits");

    let bad = write(dir.path(), "bad.json", r#"{ "minValue": 1 }"#);
    assert!(matches!(
        GenConfig::load(&bad),
        Err(GenError::ConfigFile { .. })
    ));
}

#[test]
fn dumps_from_each_dialect_reflect_the_same_enum() {
    let dumps = [
        (
            SignatureDialect::Clang,
            "2\tbool etraits::detail::validateEnum() [T = Fruits, TValue = Fruits::Apples]\n\
             3\tbool etraits::detail::validateEnum() [T = Fruits, TValue = 3]\n\
             5\tbool etraits::detail::validateEnum() [T = Fruits, TValue = Fruits::Oranges]\n",
        ),
        (
            SignatureDialect::Gcc,
            "2\tconstexpr bool etraits::detail::validateEnum() [with T = Fruits; T TValue = Fruits::Apples]\n\
             3\tconstexpr bool etraits::detail::validateEnum() [with T = Fruits; T TValue = (Fruits)3]\n\
             5\tconstexpr bool etraits::detail::validateEnum() [with T = Fruits; T TValue = Fruits::Oranges]\n",
        ),
        (
            SignatureDialect::Msvc,
            "2\tbool __cdecl etraits::detail::validateEnum<enum Fruits,Fruits::Apples>(void) noexcept\n\
             3\tbool __cdecl etraits::detail::validateEnum<enum Fruits,(enum Fruits)0x3>(void) noexcept\n\
             5\tbool __cdecl etraits::detail::validateEnum<enum Fruits,Fruits::Oranges>(void) noexcept\n",
        ),
    ];

    let mut outputs = Vec::new();
    for (dialect, text) in dumps {
        let dump = read_signature_dump(text, None, "Fruits", ReprType::I32).expect("reads");
        assert_eq!(dump.dialect, dialect);
        assert_eq!(dump.invalid.len(), 1);
        let items = reflect(vec![dump.decl], &GenConfig::default()).expect("reflects");
        assert_eq!(items[0].table.values().collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(
            items[0].table.names().collect::<Vec<_>>(),
            vec!["Apples", "Oranges"]
        );
        outputs.push(enum_traits_gen::emit(&items, &GenConfig::default()));
    }
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
}

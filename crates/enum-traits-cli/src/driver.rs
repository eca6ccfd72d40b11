use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use enum_traits_gen::{
    CONFIG_FILE_NAME, GenConfig, Reflected, Source, SourceSyntax, derive_table, emit,
    read_signature_dump, reflect_sources,
};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::args::{
    CliArgs, Command, ConfigArgs, DumpFormat, GenerateArgs, InspectArgs, InspectFormat,
    SignaturesArgs, SourceArgs,
};
use crate::report::{Reporter, dump_json, tables_json};

/// Run one parsed command line. Reports go to `out`; generated code goes to
/// `out` too unless an output file was requested.
pub fn run(args: &CliArgs, cwd: &Path, color: bool, out: &mut dyn Write) -> Result<()> {
    match &args.command {
        Command::Generate(generate) => run_generate(generate, cwd, out),
        Command::Inspect(inspect) => run_inspect(inspect, cwd, color, out),
        Command::Signatures(signatures) => run_signatures(signatures, cwd, color, out),
    }
}

fn run_generate(args: &GenerateArgs, cwd: &Path, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(&args.config, cwd)?;
    let sources = collect_sources(&args.inputs, &args.sources, cwd)?;
    let items = reflect_sources(&sources, &config)?;
    let generated = emit(&items, &config);

    match &args.output {
        Some(path) => {
            let path = cwd.join(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(&path, &generated)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), enums = items.len(), "wrote generated impls");
        }
        None => out.write_all(generated.as_bytes())?,
    }
    Ok(())
}

fn run_inspect(args: &InspectArgs, cwd: &Path, color: bool, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(&args.config, cwd)?;
    let sources = collect_sources(&args.inputs, &args.sources, cwd)?;
    let items = reflect_sources(&sources, &config)?;

    let rendered = match args.format {
        InspectFormat::Text => Reporter::new(color).render(&items),
        InspectFormat::Json => tables_json(&items)? + "\n",
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

fn run_signatures(args: &SignaturesArgs, cwd: &Path, color: bool, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(&args.config, cwd)?;
    config.validate()?;
    let path = cwd.join(&args.dump);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let dump = read_signature_dump(&text, args.dialect, &args.type_name, args.repr)
        .with_context(|| format!("in {}", path.display()))?;

    let decl = dump.decl.clone();
    let table = derive_table(&decl, &config)?;
    let item = Reflected { decl, table };

    let rendered = match args.format {
        DumpFormat::Text => Reporter::new(color).render_dump(&dump, &item),
        DumpFormat::Json => dump_json(&dump, &item)? + "\n",
        DumpFormat::Rust => emit(std::slice::from_ref(&item), &config),
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Configuration file (explicit, or `etraits.json` in `cwd` when present)
/// with command-line overrides applied on top.
pub fn resolve_config(args: &ConfigArgs, cwd: &Path) -> Result<GenConfig> {
    let mut config = match &args.config {
        Some(path) => GenConfig::load(&cwd.join(path))?,
        None => {
            let default = cwd.join(CONFIG_FILE_NAME);
            if default.is_file() {
                debug!(path = %default.display(), "using configuration file");
                GenConfig::load(&default)?
            } else {
                GenConfig::default()
            }
        }
    };

    if let Some(min) = args.min {
        config.min_enum_value = min;
    }
    if let Some(max) = args.max {
        config.max_enum_value = max;
    }
    if let Some(length) = args.max_name_length {
        config.max_name_length = length;
    }
    if let Some(crate_path) = &args.crate_path {
        config.crate_path = crate_path.clone();
    }
    if args.emit_definitions {
        config.emit_definitions = true;
    }
    if !args.only.is_empty() {
        config.only = args.only.clone();
    }
    Ok(config)
}

/// Expand the inputs into sources. Directories contribute every file whose
/// extension names a known syntax (the `--syntax` one, when given), sorted
/// by path.
pub fn collect_sources(inputs: &[PathBuf], args: &SourceArgs, cwd: &Path) -> Result<Vec<Source>> {
    let mut sources = Vec::new();
    for input in inputs {
        let path = cwd.join(input);
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(&path).follow_links(true) {
                let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(syntax) = SourceSyntax::from_path(entry.path()) else {
                    continue;
                };
                if args.syntax.is_some_and(|wanted| wanted != syntax) {
                    continue;
                }
                found.push(entry.into_path());
            }
            found.sort();
            debug!(dir = %path.display(), files = found.len(), "expanded directory");
            sources.extend(found.into_iter().map(Source::new));
        } else if path.exists() {
            sources.push(match args.syntax {
                Some(syntax) => Source::with_syntax(path, syntax),
                None => Source::new(path),
            });
        } else {
            bail!("{} does not exist", path.display());
        }
    }
    if sources.is_empty() {
        bail!("no Rust or C/C++ sources found in the given inputs");
    }
    Ok(sources)
}

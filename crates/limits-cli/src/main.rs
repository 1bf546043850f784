use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use limits_core::{PluginConfig, DEFAULT_MOD_DIR};
use limits_gate::{VersionGate, BASELINE_BUILD};
use limits_override::{ConstraintOverrideEngine, FeatureToggleRegistry, OverrideReport};
use limits_reference::ReferenceSchemaLoader;
use limits_schema::{Namespace, Schema};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("limits")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Relax and restore level editor property limits")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("gate")
                .about("Decide whether a host build may activate the plugin")
                .arg(
                    Arg::new("build")
                        .long("build")
                        .value_parser(value_parser!(i64))
                        .help("Host build number (omit for an unknown build)"),
                )
                .arg(
                    Arg::new("mod-dir")
                        .long("mod-dir")
                        .default_value(DEFAULT_MOD_DIR)
                        .value_parser(value_parser!(PathBuf))
                        .help("Plugin directory holding Version.txt"),
                )
                .arg(
                    Arg::new("override-file")
                        .long("override-file")
                        .value_parser(value_parser!(PathBuf))
                        .conflicts_with("mod-dir")
                        .help("Read the rule from this file instead"),
                )
                .arg(
                    Arg::new("baseline")
                        .long("baseline")
                        .value_parser(value_parser!(i64))
                        .help("Build accepted when no usable override exists [default: 76]"),
                ),
        )
        .subcommand(
            Command::new("relax")
                .about("Widen every bound of a live-schema snapshot")
                .arg(live_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("restore")
                .about("Copy original bounds from a reference dataset into a snapshot")
                .arg(live_arg())
                .arg(reference_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a reference dataset and print its shape")
                .arg(reference_arg()),
        )
}

fn live_arg() -> Arg {
    Arg::new("live")
        .long("live")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Live-schema snapshot (YAML)")
}

fn reference_arg() -> Arg {
    Arg::new("reference")
        .long("reference")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Reference dataset (.json, .yaml or .yml)")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf))
        .help("Write the result here instead of stdout")
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("gate", args)) => {
            let activate = run_gate(args);
            std::process::exit(if activate { 0 } else { 1 });
        }
        Some(("relax", args)) => {
            let mut live = read_snapshot(path_arg(args, "live")?)?;
            let report = ConstraintOverrideEngine::new().relax(&mut live);
            print_report(&report);
            write_snapshot(&live, args.get_one::<PathBuf>("output"))
        }
        Some(("restore", args)) => {
            let mut live = read_snapshot(path_arg(args, "live")?)?;
            let reference = ReferenceSchemaLoader::load_path(path_arg(args, "reference")?)
                .context("failed to load reference dataset")?;
            let report = restore(&mut live, &reference)?;
            print_report(&report);
            write_snapshot(&live, args.get_one::<PathBuf>("output"))
        }
        Some(("check", args)) => {
            let path = path_arg(args, "reference")?;
            let schema = ReferenceSchemaLoader::load_path(path)
                .with_context(|| format!("{} is not a valid dataset", path.display()))?;
            tracing::info!("Dataset {} is valid", path.display());
            println!("{}", describe(&schema));
            Ok(())
        }
        _ => unreachable!("subcommand_required"),
    }
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    args.get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .with_context(|| format!("missing --{name}"))
}

fn run_gate(args: &ArgMatches) -> bool {
    let build = args.get_one::<i64>("build").copied();
    let baseline = args.get_one::<i64>("baseline").copied().unwrap_or(BASELINE_BUILD);

    let gate = match args.get_one::<PathBuf>("override-file") {
        Some(file) => VersionGate::from_override(
            std::fs::read_to_string(file).ok().as_deref(),
            baseline,
        ),
        None => {
            let mod_dir = args
                .get_one::<PathBuf>("mod-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MOD_DIR));
            let config = PluginConfig::new(mod_dir).with_baseline_build(baseline);
            VersionGate::from_mod_dir(config.mod_dir(), config.baseline_build)
        }
    };

    tracing::info!(build = ?build, rule = %gate.rule(), "Evaluating host build");
    match gate.check(&build) {
        Ok(build) => {
            println!("activate: host build {} satisfies {}", build, gate.rule());
            true
        }
        Err(e) => {
            println!("refuse: {e}");
            false
        }
    }
}

fn restore(live: &mut Schema, reference: &Schema) -> Result<OverrideReport> {
    let engine = ConstraintOverrideEngine::new()
        .with_synthetic(FeatureToggleRegistry::new().synthetic_paths());
    Ok(engine.restore(live, reference)?)
}

fn read_snapshot(path: &Path) -> Result<Schema> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("{} is not a schema snapshot", path.display()))
}

fn write_snapshot(schema: &Schema, output: Option<&PathBuf>) -> Result<()> {
    let yaml = serde_yaml::to_string(schema)?;
    match output {
        Some(path) => {
            std::fs::write(path, yaml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Snapshot written to {}", path.display());
            Ok(())
        }
        None => {
            print!("{yaml}");
            Ok(())
        }
    }
}

fn print_report(report: &OverrideReport) {
    eprintln!(
        "{}: {} properties visited, {} changed",
        report.mode, report.visited, report.changed
    );
}

fn describe(schema: &Schema) -> String {
    let mut out = String::new();
    for namespace in Namespace::ALL {
        let groups = schema.groups(namespace);
        let properties: usize = groups.values().map(|g| g.len()).sum();
        out.push_str(&format!(
            "{namespace}: {} groups, {properties} properties\n",
            groups.len()
        ));
    }
    out.push_str(&format!("total: {} properties", schema.property_count()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use limits_test_utils::{live_schema, reference_schema, REFERENCE_DATASET};

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn gate_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Version.txt");
        std::fs::write(&file, ">=70").unwrap();
        let file = file.to_str().unwrap();

        let accept = cli().get_matches_from(["limits", "gate", "--build", "76", "--override-file", file]);
        assert!(run_gate(accept.subcommand_matches("gate").unwrap()));

        let refuse = cli().get_matches_from(["limits", "gate", "--build", "69", "--override-file", file]);
        assert!(!run_gate(refuse.subcommand_matches("gate").unwrap()));
    }

    #[test]
    fn gate_without_override_uses_baseline() {
        let dir = tempfile::tempdir().unwrap();
        let mod_dir = dir.path().to_str().unwrap();

        let matches = cli().get_matches_from(["limits", "gate", "--build", "76", "--mod-dir", mod_dir]);
        assert!(run_gate(matches.subcommand_matches("gate").unwrap()));

        let unknown = cli().get_matches_from(["limits", "gate", "--mod-dir", mod_dir]);
        assert!(!run_gate(unknown.subcommand_matches("gate").unwrap()));
    }

    #[test]
    fn snapshot_relax_restore_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("live.yaml");

        let mut live = live_schema();
        ConstraintOverrideEngine::new().relax(&mut live);
        write_snapshot(&live, Some(&path)).unwrap();

        let mut read = read_snapshot(&path).unwrap();
        assert_eq!(read, live);

        restore(&mut read, &reference_schema()).unwrap();
        assert_eq!(read, reference_schema());
    }

    #[test]
    fn describe_counts_properties() {
        let schema = ReferenceSchemaLoader::default().load(REFERENCE_DATASET).unwrap();
        let text = describe(&schema);
        assert!(text.contains("levelEvents: 2 groups, 6 properties"));
        assert!(text.ends_with("total: 10 properties"));
    }
}

//! Command-line interface for hcl-edge-gen
//! Reads the DNAT, SNAT and firewall CSV tables and writes dnat.tf, snat.tf and firewall.tf
//! for the vCloud Director Terraform provider.
//!
//! Usage:
//!   hcl-edge-gen [-d `<csv>`] [-s `<csv>`] [-f `<csv>`] [-o `<dir>`]   - Generate the .tf files
//!   hcl-edge-gen --dry-run                                          - Print instead of writing
//!   hcl-edge-gen --list-kinds                                       - List rule kinds

mod logging;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use edge_babel::{publish_from_path, PublishArtifact, PublishResult, RuleRegistry};
use edge_config::{EdgeConfig, Loader};
use std::path::Path;
use tracing::warn;

/// Project-level config picked up when `--config` is not given
const PROJECT_CONFIG: &str = "hcl-edge-gen.toml";

const LONG_ABOUT: &str = "\
Generate Terraform configuration files for the vCloud Director provider. \
It generates NAT and firewall .tf files based on CSV files.

Each CSV file starts with a label row, which is skipped. Columns are read by position:

  DNAT      edge_gateway, external_ip, port, internal_ip, translated_port
  SNAT      edge_gateway, external_ip, internal_ip
  FIREWALL  edge_gateway, description, policy, protocol,
            destination_port, destination_ip, source_port, source_ip

A missing or empty CSV file is skipped. Existing .tf files are replaced.";

fn build_cli() -> Command {
    Command::new("hcl-edge-gen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create Terraform HCL files for the vCD provider (NAT/Firewall)")
        .long_about(LONG_ABOUT)
        .arg(
            Arg::new("dnat")
                .long("dnat")
                .short('d')
                .value_name("F")
                .help("CSV file containing the DNAT table [default: datadnat.csv]"),
        )
        .arg(
            Arg::new("snat")
                .long("snat")
                .short('s')
                .value_name("F")
                .help("CSV file containing the SNAT table [default: datasnat.csv]"),
        )
        .arg(
            Arg::new("firewall")
                .long("firewall")
                .short('f')
                .value_name("F")
                .help("CSV file containing the FIREWALL table [default: datafw.csv]"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .help("Directory receiving dnat.tf, snat.tf and firewall.tf [default: .]"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (error, warn, info, debug, trace); RUST_LOG takes precedence"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Print the generated files to stdout instead of writing them")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-kinds")
                .long("list-kinds")
                .help("List the supported rule kinds")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().try_get_matches().unwrap_or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            let _ = err.print();
            eprintln!("\n{}", build_cli().render_long_help());
            std::process::exit(2);
        }
    });

    if matches.get_flag("list-kinds") {
        handle_list_kinds_command();
        return;
    }

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("error: invalid configuration: {}", e);
        std::process::exit(1);
    });
    logging::init(&config.logging.level);

    let failures = handle_generate_command(&config, matches.get_flag("dry-run"));
    if !failures.is_empty() {
        for message in &failures {
            eprintln!("error: {}", message);
        }
        std::process::exit(1);
    }
}

/// Embedded defaults, then the config file, then flags
fn load_config(matches: &ArgMatches) -> Result<EdgeConfig, edge_config::ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(PROJECT_CONFIG),
    };

    for (flag, key) in [
        ("dnat", "inputs.dnat"),
        ("snat", "inputs.snat"),
        ("firewall", "inputs.firewall"),
        ("output-dir", "output.directory"),
        ("log-level", "logging.level"),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }

    loader.build()
}

/// Run every registered kind in order and collect one message per failed kind.
///
/// A failing kind leaves its own output untouched and does not stop the kinds after it.
fn handle_generate_command(config: &EdgeConfig, dry_run: bool) -> Vec<String> {
    let registry = RuleRegistry::with_defaults();
    let output_dir: &Path = &config.output.directory;
    let mut failures = Vec::new();

    for format in registry.iter() {
        let Some(input) = config.inputs.for_kind(format.name()) else {
            warn!(kind = format.name(), "no input configured, skipping");
            continue;
        };

        match publish_from_path(format, input, output_dir, dry_run) {
            Ok(Some(PublishResult {
                artifact: PublishArtifact::InMemory(text),
                ..
            })) => {
                println!("# {}", format.output_file());
                print!("{}", text);
            }
            Ok(_) => {}
            Err(e) => failures.push(format!("{} ({}): {}", format.name(), input.display(), e)),
        }
    }

    failures
}

/// Handle the list-kinds command
fn handle_list_kinds_command() {
    let registry = RuleRegistry::with_defaults();
    println!("Available rule kinds:\n");

    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        println!("  {} -> {}", format.name(), format.output_file());
        println!("    {}", format.description());
        println!();
    }
}

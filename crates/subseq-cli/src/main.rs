//! `subseq` binary: runs submission-annotation actions over JSON files.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;
use std::path::PathBuf;
use subseq_cli::commands::{self, default_registry};
use subseq_cli::{logging, Settings};
use subseq_core::{Action, ActionRegistry};

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn action_arg() -> Arg {
    Arg::new("action")
        .long("action")
        .default_value("transcript")
        .help("Action identifier")
}

fn cli() -> Command {
    Command::new("subseq")
        .version(subseq_cli::VERSION)
        .about("Submission annotation actions")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML settings file"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("params")
                .about("Discover action parameters from a form definition")
                .arg(action_arg())
                .arg(path_arg("form", "Form definition JSON")),
        )
        .subcommand(
            Command::new("schema")
                .about("Extend a JSON schema with the action's data shape")
                .arg(action_arg())
                .arg(path_arg("params", "Stored action parameters"))
                .arg(path_arg("schema", "JSON schema to extend")),
        )
        .subcommand(
            Command::new("check")
                .about("Report which submissions still need the action")
                .arg(action_arg())
                .arg(path_arg("params", "Stored action parameters"))
                .arg(path_arg("submissions", "Submission or array of submissions")),
        )
        .subcommand(
            Command::new("run")
                .about("Advance statuses on submissions and print the result")
                .arg(action_arg())
                .arg(path_arg("params", "Stored action parameters"))
                .arg(path_arg("submissions", "Submission or array of submissions")),
        )
        .subcommand(
            Command::new("engines")
                .about("List engines and derived columns")
                .arg(action_arg())
                .arg(path_arg("params", "Stored action parameters")),
        )
}

fn path<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing --{name}"))
}

fn action_id(args: &ArgMatches) -> &str {
    args.get_one::<String>("action").map_or("transcript", String::as_str)
}

fn load_action(registry: &ActionRegistry, args: &ArgMatches) -> anyhow::Result<Box<dyn Action>> {
    let params = commands::read_json(path(args, "params")?)?;
    registry
        .load(action_id(args), &params)
        .context("loading action parameters")
}

fn execute(registry: &ActionRegistry, matches: &ArgMatches) -> anyhow::Result<Value> {
    match matches.subcommand() {
        Some(("params", args)) => {
            let form = commands::read_json(path(args, "form")?)?;
            commands::build_params(registry, action_id(args), form)
        }
        Some(("schema", args)) => {
            let action = load_action(registry, args)?;
            let schema = commands::read_json(path(args, "schema")?)?;
            commands::augment_schema(action.as_ref(), schema)
        }
        Some(("check", args)) => {
            let action = load_action(registry, args)?;
            let batch = commands::submissions_from(commands::read_json(path(args, "submissions")?)?);
            Ok(serde_json::to_value(commands::check(action.as_ref(), batch))?)
        }
        Some(("run", args)) => {
            let action = load_action(registry, args)?;
            let batch = commands::submissions_from(commands::read_json(path(args, "submissions")?)?);
            Ok(serde_json::to_value(commands::run(action.as_ref(), batch))?)
        }
        Some(("engines", args)) => {
            let action = load_action(registry, args)?;
            commands::capabilities(action.as_ref())
        }
        _ => anyhow::bail!("no subcommand given"),
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let settings = Settings::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    logging::init(&settings.logging, matches.get_flag("json-logs"));

    let registry = default_registry(settings.actions);
    let output = execute(&registry, &matches)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use indexmap::IndexMap;
use plume_rdf::{Metagraph, Term};
use plume_widgetkey::{KeyId, WidgetTree};
use plume_widgetsdict::{DictConfig, Mode, StaticSchema, Template, WidgetsDict, WidgetsDictBuilder};
use tracing_subscriber::EnvFilter;

fn input_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("schema")
                .long("schema")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Property schema, JSON or YAML"),
        )
        .arg(
            Arg::new("graph")
                .long("graph")
                .value_parser(value_parser!(PathBuf))
                .help("Metagraph of the record, as JSON triples"),
        )
        .arg(
            Arg::new("template")
                .long("template")
                .value_parser(value_parser!(PathBuf))
                .help("Form template, JSON or YAML"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Form configuration, JSON, YAML or TOML"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .value_parser(value_parser!(PathBuf))
                .help("Override values, JSON map from N3 path to terms"),
        )
        .arg(
            Arg::new("read")
                .long("read")
                .action(ArgAction::SetTrue)
                .help("Build the read-only form"),
        )
}

fn cli() -> Command {
    Command::new("plume")
        .version(plume_widgetsdict::VERSION)
        .about("Build metadata forms from a property schema")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log as JSON lines"),
        )
        .subcommand_required(true)
        .subcommand(input_args(
            Command::new("build").about("Print the widget hints of the form as JSON"),
        ))
        .subcommand(input_args(
            Command::new("inspect").about("Print the widget-key tree of the form"),
        ))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_dict(args: &ArgMatches) -> anyhow::Result<WidgetsDict> {
    let Some(schema_path) = args.get_one::<PathBuf>("schema") else {
        bail!("--schema is required");
    };
    let text = read(schema_path)?;
    let schema = if is_yaml(schema_path) {
        StaticSchema::from_yaml(&text)
    } else {
        StaticSchema::from_json(&text)
    }
    .with_context(|| format!("loading schema {}", schema_path.display()))?;

    let graph = args
        .get_one::<PathBuf>("graph")
        .map(|path| {
            Metagraph::from_json(&read(path)?)
                .with_context(|| format!("loading metagraph {}", path.display()))
        })
        .transpose()?;

    let template = args
        .get_one::<PathBuf>("template")
        .map(|path| {
            let text = read(path)?;
            let template = if is_yaml(path) {
                Template::from_yaml(&text)
            } else {
                Template::from_json(&text)
            };
            template.with_context(|| format!("loading template {}", path.display()))
        })
        .transpose()?;

    let mut config = args
        .get_one::<PathBuf>("config")
        .map(|path| {
            DictConfig::from_path(path).with_context(|| format!("loading config {}", path.display()))
        })
        .transpose()?
        .unwrap_or_default();
    if args.get_flag("read") {
        config.mode = Mode::Read;
    }

    let data: IndexMap<String, Vec<Term>> = args
        .get_one::<PathBuf>("data")
        .map(|path| {
            serde_json::from_str(&read(path)?)
                .with_context(|| format!("loading data {}", path.display()))
        })
        .transpose()?
        .unwrap_or_default();

    let mut builder = WidgetsDictBuilder::new(&schema)
        .with_config(config)
        .with_data(data);
    if let Some(graph) = graph.as_ref() {
        builder = builder.with_metagraph(graph);
    }
    if let Some(template) = template.as_ref() {
        builder = builder.with_template(template);
    }
    Ok(builder.build()?)
}

fn describe(dict: &WidgetsDict, tree: &WidgetTree, id: KeyId, depth: usize, out: &mut String) {
    let Ok(view) = tree.key(id) else {
        return;
    };
    if !view.is_real() {
        return;
    }
    let _ = write!(out, "{:indent$}{}", "", view.key_object(), indent = depth * 2);
    if let Some(label) = view.label() {
        let _ = write!(out, " {label:?}");
    }
    if let Some(hints) = dict.get(id) {
        if let Some(value) = &hints.value {
            let _ = write!(out, " = {value:?}");
        }
        if hints.hidden {
            out.push_str(" (hidden)");
        }
    }
    if let Some(row) = view.row() {
        let _ = write!(out, " @{row}");
    }
    out.push('\n');
    for child in view.children().iter().copied().chain(view.button()) {
        describe(dict, tree, child, depth + 1, out);
    }
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("build", args)) => {
            let dict = load_dict(args)?;
            println!("{}", dict.to_json()?);
        }
        Some(("inspect", args)) => {
            let dict = load_dict(args)?;
            let mut out = String::new();
            let _ = writeln!(out, "dataset {}", dict.datasetid());
            describe(&dict, dict.tree(), dict.root(), 0, &mut out);
            print!("{out}");
        }
        _ => unreachable!("a subcommand is required"),
    }
    Ok(())
}

use clap::{value_parser, Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

use qtags::language::{Schema, Solutions};
use qtags::{output, parsing};

mod problem;

use problem::Present;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("qtags")
        .version(VERSION)
        .propagate_version(true)
        .about("Check and combine tagged LaTeX solutions and their grading schemas.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Report progress while parsing."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Report everything the parsers find, item by item."),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a solution document, and its grading schema if there is one")
                .arg(
                    Arg::new("schema")
                        .short('s')
                        .long("schema")
                        .value_parser(value_parser!(PathBuf))
                        .help("The grading schema to reconcile against. Defaults to grade_schema.xml beside the solution document, if present."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The LaTeX file containing the tagged questions and their solutions."),
                ),
        )
        .subcommand(
            Command::new("merge")
                .about("Combine a solution document with its grading schema into JSON")
                .arg(
                    Arg::new("schema")
                        .short('s')
                        .long("schema")
                        .value_parser(value_parser!(PathBuf))
                        .help("The grading schema. Defaults to grade_schema.xml beside the solution document."),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Where to write the JSON. Defaults to the solution document's name with a .json extension; use - for standard output."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The LaTeX file containing the tagged questions and their solutions."),
                ),
        )
        .subcommand(
            Command::new("strip")
                .about("Print the solution document with solutions and grading notes removed")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("The LaTeX file to produce a question sheet from."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else if matches.get_flag("verbose") {
        Level::INFO
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            if let Some(filename) = submatches.get_one::<PathBuf>("filename") {
                let schema = submatches
                    .get_one::<PathBuf>("schema")
                    .cloned();
                check(filename, schema);
            }
        }
        Some(("merge", submatches)) => {
            if let Some(filename) = submatches.get_one::<PathBuf>("filename") {
                let schema = submatches
                    .get_one::<PathBuf>("schema")
                    .cloned()
                    .unwrap_or_else(|| parsing::schema_beside(filename));
                let target = submatches
                    .get_one::<PathBuf>("output")
                    .cloned()
                    .unwrap_or_else(|| filename.with_extension("json"));
                merge(filename, &schema, &target);
            }
        }
        Some(("strip", submatches)) => {
            if let Some(filename) = submatches.get_one::<PathBuf>("filename") {
                strip(filename);
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: qtags [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn check(filename: &Path, schema: Option<PathBuf>) {
    let content = read(filename);
    let solutions = parse_solutions(filename, &content);

    let schema = schema.or_else(|| {
        let beside = parsing::schema_beside(filename);
        if beside.exists() {
            Some(beside)
        } else {
            debug!("No schema found at {}", beside.display());
            None
        }
    });

    let schema = match schema {
        Some(path) => {
            let text = read(&path);
            let schema = parse_schema(&path, &text);
            reconcile(filename, &content, &solutions, &schema);
            Some(schema)
        }
        None => None,
    };

    match output::summary(filename, &solutions, schema.as_ref()) {
        Ok(text) => print!("{}", text),
        Err(error) => fail(plain(format!("Unable to render summary: {}", error))),
    }
}

fn merge(filename: &Path, schema: &Path, target: &Path) {
    let content = read(filename);
    let solutions = parse_solutions(filename, &content);

    let text = read(schema);
    let schema = parse_schema(schema, &text);

    let merged = match output::merge(&solutions, &schema) {
        Ok(merged) => merged,
        Err(error) => fail(
            error
                .present(filename, &content)
                .full_details(),
        ),
    };

    let json = match output::to_json(&merged) {
        Ok(json) => json,
        Err(error) => fail(plain(format!("Unable to serialize output: {}", error))),
    };

    if target.to_str() == Some("-") {
        println!("{}", json);
        return;
    }

    info!("Writing output to {}", target.display());
    if let Err(error) = std::fs::write(target, json + "\n") {
        fail(plain(format!("Unable to write {}: {}", target.display(), error)));
    }
}

fn strip(filename: &Path) {
    let content = read(filename);

    match parsing::strip_environments(&content, &parsing::ANSWER_ENVIRONMENTS) {
        Ok(text) => print!("{}", text),
        Err(error) => fail(
            error
                .present(filename, &content)
                .full_details(),
        ),
    }
}

fn read(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => fail(plain(error.to_string())),
    }
}

fn parse_solutions(filename: &Path, content: &str) -> Solutions {
    match parsing::parse_latex_soln(content) {
        Ok(solutions) => {
            info!(
                "Found {} question{} in {}",
                solutions.len(),
                if solutions.len() == 1 { "" } else { "s" },
                filename.display()
            );
            solutions
        }
        Err(error) => fail(
            error
                .present(filename, content)
                .full_details(),
        ),
    }
}

fn parse_schema(filename: &Path, content: &str) -> Schema {
    match parsing::parse_grade_schema(content) {
        Ok(schema) => schema,
        Err(error) => fail(
            error
                .present(filename, content)
                .full_details(),
        ),
    }
}

fn reconcile(filename: &Path, content: &str, solutions: &Solutions, schema: &Schema) {
    if let Err(error) = parsing::compare_qtags(solutions, schema) {
        fail(
            error
                .present(filename, content)
                .full_details(),
        );
    }
}

fn plain(message: String) -> String {
    format!("{}: {}", "error".bright_red(), message)
}

fn fail(message: String) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

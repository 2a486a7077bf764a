use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mentor_cli::{
    logging, run_questions, run_save, run_setup_defaults, run_uploads, CliConfig, FixtureApi,
    QuestionsArgs,
};
use mentor_core::{AccessToken, Answer, Mentor, MentorConfig, Question};
use mentor_store::FailureScope;
use mentor_upload::UploadTask;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

fn cli() -> Command {
    let fixture = Arg::new("fixture")
        .long("fixture")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON array of questions served as the remote API");
    let offline = Arg::new("offline")
        .long("offline")
        .action(ArgAction::SetTrue)
        .help("Fail every remote request");
    let json = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");

    Command::new("mentor-studio")
        .version(mentor_cli::VERSION)
        .about("Mentor Studio entity cache and upload status driver")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("questions")
                .about("Load questions by id and print the cache")
                .arg(fixture.clone())
                .arg(
                    Arg::new("ids")
                        .long("ids")
                        .required(true)
                        .value_delimiter(',')
                        .help("Comma-separated question ids"),
                )
                .arg(
                    Arg::new("preload")
                        .long("preload")
                        .value_delimiter(',')
                        .help("Ids loaded first to seed the cache"),
                )
                .arg(
                    Arg::new("reload")
                        .long("reload")
                        .action(ArgAction::SetTrue)
                        .help("Fetch ids even if already loaded"),
                )
                .arg(
                    Arg::new("overlay")
                        .long("overlay")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON mentor config applied after loading"),
                )
                .arg(
                    Arg::new("failure-scope")
                        .long("failure-scope")
                        .value_parser(["requested", "fetched"])
                        .help("Ids marked failed when the fetch fails"),
                )
                .arg(offline.clone())
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("save")
                .about("Save a question and print the cache")
                .arg(fixture.clone())
                .arg(
                    Arg::new("question")
                        .long("question")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON question to save"),
                )
                .arg(
                    Arg::new("token")
                        .long("token")
                        .help("Access token; falls back to MENTOR_ACCESS_TOKEN"),
                )
                .arg(offline)
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("uploads")
                .about("Evaluate upload tasks")
                .arg(fixture)
                .arg(
                    Arg::new("tasks")
                        .long("tasks")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of upload tasks"),
                )
                .arg(
                    Arg::new("answers")
                        .long("answers")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of answers"),
                )
                .arg(json.clone()),
        )
        .subcommand(
            Command::new("setup-defaults")
                .about("Print the defaults the setup wizard fills in")
                .arg(
                    Arg::new("mentor")
                        .long("mentor")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON mentor"),
                )
                .arg(
                    Arg::new("user-name")
                        .long("user-name")
                        .required(true)
                        .help("Name of the signed-in user"),
                ),
        )
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn path_arg<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing --{name}"))
}

fn strings(args: &ArgMatches, name: &str) -> Vec<String> {
    args.get_many::<String>(name)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn fixture_api(args: &ArgMatches) -> anyhow::Result<FixtureApi> {
    let api = FixtureApi::from_file(path_arg(args, "fixture")?)?;
    let offline = args
        .try_get_one::<bool>("offline")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false);
    Ok(api.offline(offline))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let mut config =
        CliConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log.level = level.clone();
    }
    if matches.get_flag("log-json") {
        config.log.json = true;
    }
    logging::init(&config.log);

    match matches.subcommand() {
        Some(("questions", args)) => {
            if let Some(scope) = args.get_one::<String>("failure-scope") {
                config.store.failure_scope = match scope.as_str() {
                    "fetched" => FailureScope::Fetched,
                    _ => FailureScope::Requested,
                };
            }
            let overlay = args
                .get_one::<PathBuf>("overlay")
                .map(|p| read_json::<MentorConfig>(p))
                .transpose()?;
            let request = QuestionsArgs {
                ids: strings(args, "ids"),
                reload: args.get_flag("reload"),
                overlay,
                preload: strings(args, "preload"),
            };

            let report = run_questions(fixture_api(args)?, config.store, request).await;
            if args.get_flag("json") {
                print_json(&report)?;
            } else {
                print!("{}", report.render_text());
            }
        }
        Some(("save", args)) => {
            let question: Question = read_json(path_arg(args, "question")?)?;
            let token = args
                .get_one::<String>("token")
                .cloned()
                .or_else(|| std::env::var("MENTOR_ACCESS_TOKEN").ok())
                .map(AccessToken::new);

            let (saved, report) =
                run_save(fixture_api(args)?, config.store, question, token).await?;
            if args.get_flag("json") {
                print_json(&report)?;
            } else {
                println!("saved as {}", saved.id);
                print!("{}", report.render_text());
            }
        }
        Some(("uploads", args)) => {
            let tasks: Vec<UploadTask> = read_json(path_arg(args, "tasks")?)?;
            let answers: Vec<Answer> = args
                .get_one::<PathBuf>("answers")
                .map(|p| read_json(p))
                .transpose()?
                .unwrap_or_default();

            let rows = run_uploads(fixture_api(args)?, &tasks, answers).await;
            if args.get_flag("json") {
                print_json(&rows)?;
            } else {
                for row in rows {
                    println!(
                        "{:<12} {:<10} {}{}",
                        row.question,
                        format!("{:?}", row.phase),
                        row.title,
                        if row.needs_attention { " (needs attention)" } else { "" }
                    );
                }
            }
        }
        Some(("setup-defaults", args)) => {
            let mentor: Mentor = read_json(path_arg(args, "mentor")?)?;
            let user_name = args
                .get_one::<String>("user-name")
                .context("missing --user-name")?;
            match run_setup_defaults(&mentor, user_name) {
                Some(edits) => print_json(&edits)?,
                None => println!("nothing to fill in"),
            }
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}

use quizmaker::config::Preferences;
use quizmaker::console::Console;
use quizmaker::error::QuizError;
use quizmaker::loader::load_records;
use quizmaker::session::Session;

use clap::Parser;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

/// Quiz yourself on a term,definition csv file. Put one pair per line, term first.
#[derive(Parser, Debug)]
#[clap(long_about = None)]
struct Args {
    /// Directory holding the csv files to choose from.
    #[clap(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Use this file instead of choosing from the data directory.
    #[clap(short, long)]
    file: Option<PathBuf>,

    /// Yaml file with the question counts, skips asking for them.
    #[clap(short, long)]
    preferences: Option<PathBuf>,

    /// Seed for the random generator, for a reproducible quiz.
    #[clap(short, long)]
    seed: Option<u64>,
}

fn run(args: Args) -> Result<(), QuizError> {
    let mut console = Console::new(std::io::stdin().lock(), std::io::stdout());
    console.say("Welcome to the Test Maker!")?;
    console.say(&"=".repeat(50))?;

    let path = console.select_file(&args.data_dir, args.file.as_deref())?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    console.say(&format!("\nSelected: {name}"))?;

    let pool = load_records(&path)?;
    let preferences = match &args.preferences {
        Some(p) => Preferences::from_yaml(p, pool.len())?,
        None => console.collect_preferences(pool.len())?,
    };

    let mut rng = match args.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_entropy(),
    };

    Session::new(&pool).run(&preferences, &mut rng, &mut console)?;
    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

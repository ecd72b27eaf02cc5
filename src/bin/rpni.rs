use std::process::ExitCode;

use rpni::prelude::*;

use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::{filter, prelude::*};

use clap::{Arg, ArgAction, ArgMatches, Command};

fn cli() -> Command {
    Command::new("rpni")
        .about("Learns a DFA from positive and negative example words and reports its accuracy on a dev set")
        .arg(Arg::new("pos_train").required(true).help("positive training words, one per line"))
        .arg(Arg::new("neg_train").required(true).help("negative training words, one per line"))
        .arg(Arg::new("pos_dev").required(true).help("positive dev words, one per line"))
        .arg(Arg::new("neg_dev").required(true).help("negative dev words, one per line"))
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .action(ArgAction::SetTrue)
                .help("print every intermediate hypothesis in the DOT format to stderr"),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .action(ArgAction::SetTrue)
                .help("print the learned automaton as a table"),
        )
        .arg(
            Arg::new("render")
                .long("render")
                .value_name("FILE")
                .help("render the learned automaton to a PNG file using graphviz"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn path_arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

fn run(matches: &ArgMatches) -> Result<(), SampleError> {
    let train = Sample::from_files(
        path_arg(matches, "pos_train"),
        path_arg(matches, "neg_train"),
    )?;
    let dev = Sample::from_files(path_arg(matches, "pos_dev"), path_arg(matches, "neg_dev"))?;
    debug!(
        "read {} positive and {} negative training words",
        train.positive.len(),
        train.negative.len()
    );

    let conflicting = train.conflicting_words();
    if !conflicting.is_empty() {
        warn!(
            "{} words are both positive and negative, e.g. \"{}\"",
            conflicting.len(),
            conflicting[0]
        );
    }

    let tree = prefix_tree(train.positive_words());
    info!("prefix tree has {} states", tree.size());

    let mut learner = Rpni::new(train.negative_words());
    if matches.get_flag("dot") {
        learner = learner.with_observer(|hypothesis| eprintln!("{}", hypothesis.dot_representation()));
    }

    let start = std::time::Instant::now();
    let learned = learner.infer(tree);
    info!(
        "learning took {}ms, learned automaton has {} states",
        start.elapsed().as_millis(),
        learned.size()
    );

    if matches.get_flag("show") {
        println!("{learned}");
    }

    if let Some(filename) = matches.get_one::<String>("render") {
        render(&learned, filename);
    }

    let evaluation = dev.evaluate(&learned);
    debug!("{evaluation:?}");
    match evaluation.accuracy() {
        Some(accuracy) => println!("Dev accuracy: {accuracy:.2}"),
        None => {
            warn!("dev set is empty");
            println!("Dev accuracy: n/a");
        }
    }
    Ok(())
}

#[cfg(feature = "graphviz")]
fn render(aut: &Automaton, filename: &str) {
    if let Err(e) = aut.render_to_file_name(filename) {
        error!("could not render automaton to {filename}: {e}");
    }
}

#[cfg(not(feature = "graphviz"))]
fn render(_aut: &Automaton, filename: &str) {
    error!("cannot render to {filename}, the graphviz feature is disabled");
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::cli;

    #[test]
    fn requires_four_paths() {
        assert!(cli().try_get_matches_from(["rpni", "a", "b", "c"]).is_err());
        assert!(cli()
            .try_get_matches_from(["rpni", "a", "b", "c", "d", "e"])
            .is_err());

        let matches = cli()
            .try_get_matches_from(["rpni", "a", "b", "c", "d", "--dot", "--verbosity=debug"])
            .unwrap();
        assert!(matches.get_flag("dot"));
        assert!(!matches.get_flag("show"));
        assert_eq!(super::path_arg(&matches, "neg_dev"), "d");
    }
}

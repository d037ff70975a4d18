//! Parsing command-line arguments.

use anyhow::{bail, Context, Result};
use clap::{command, value_parser, Arg, ArgAction, ArgMatches};
use rlife_lib::{Config, PatternSource};
use std::{fs::File, io::BufReader, path::Path, time::Duration};

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) delay: Duration,
    pub(crate) dump: bool,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

impl Args {
    /// Parses the command-line arguments.
    ///
    /// Usage errors make the process exit. Errors when reading the
    /// config file or the pattern file are returned.
    pub(crate) fn parse() -> Result<Self> {
        let mut app = command!()
            .long_about(
                "Simulates Life-like cellular automata on a bounded grid\n\
                 \n\
                 Cells outside the grid are always dead. The initial pattern is read \
                 from an RLE file, or chosen randomly if no file is given.\n\
                 \n\
                 The rule is written as B<digits>/S<digits>, e.g. B3/S23 for \
                 Conway's Game of Life, or B36/S23 for HighLife.",
            )
            .arg(
                Arg::new("WIDTH")
                    .help("Width of the world [default: 70]")
                    .index(1)
                    .value_parser(value_parser!(i64).range(1..)),
            )
            .arg(
                Arg::new("HEIGHT")
                    .help("Height of the world [default: 40]")
                    .index(2)
                    .value_parser(value_parser!(i64).range(1..)),
            )
            .arg(
                Arg::new("RULE")
                    .help("Rule of the cellular automaton [default: B3/S23]")
                    .long_help(
                        "Rule of the cellular automaton [default: B3/S23]\n\
                         Digits after B are the neighbor counts for a birth, \
                         digits after S are the neighbor counts for survival. \
                         Other characters are ignored.",
                    )
                    .short('r')
                    .long("rule"),
            )
            .arg(
                Arg::new("PATTERN")
                    .help("RLE file of the initial pattern")
                    .long_help(
                        "RLE file of the initial pattern\n\
                         The size in the header is ignored; the pattern is placed at \
                         the top left corner of the world, and cells that do not fit \
                         are dropped. Without a file the world is filled randomly.",
                    )
                    .short('p')
                    .long("pattern"),
            )
            .arg(
                Arg::new("DENSITY")
                    .help("Probability for a cell to be alive in a random pattern [default: 0.1]")
                    .short('d')
                    .long("density")
                    .value_parser(|s: &str| -> Result<f64, String> {
                        match s.parse::<f64>() {
                            Ok(d) if (0.0..=1.0).contains(&d) => Ok(d),
                            _ => Err(String::from("density must be a number between 0 and 1")),
                        }
                    }),
            )
            .arg(
                Arg::new("SEED")
                    .help("Seed of the random number generator")
                    .long("seed")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("GENERATIONS")
                    .help("Stops after this number of generations")
                    .long_help(
                        "Stops after this number of generations\n\
                         If this value is set to 0, it means there is no limitation.",
                    )
                    .short('g')
                    .long("generations")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("DELAY")
                    .help("Milliseconds between two generations")
                    .long("delay")
                    .default_value("1000")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("CONFIG")
                    .help("Config file in JSON, YAML or TOML format")
                    .long_help(
                        "Config file in JSON, YAML or TOML format\n\
                         The format is chosen by the file extension. \
                         Command-line arguments override the values in the file.",
                    )
                    .short('c')
                    .long("config"),
            )
            .arg(
                Arg::new("DUMP")
                    .help("Prints the last generation in RLE format and exits")
                    .long_help(
                        "Prints the last generation in RLE format and exits\n\
                         The last generation is the one given by --generations, \
                         or generation 0 if there is no limitation.",
                    )
                    .long("dump")
                    .action(ArgAction::SetTrue),
            );

        #[cfg(feature = "tui")]
        {
            app = app.arg(
                Arg::new("NOTUI")
                    .help("Prints every generation as plain text, without the TUI")
                    .short('n')
                    .long("no-tui")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("DUMP"),
            );
        }

        let matches = app.get_matches();

        let config = match matches.get_one::<String>("CONFIG") {
            Some(path) => read_config(Path::new(path))?,
            None => Config::default(),
        };
        let config = apply_matches(config, &matches)?;
        let delay = Duration::from_millis(*matches.get_one::<u64>("DELAY").unwrap());

        Ok(Args {
            config,
            delay,
            dump: matches.get_flag("DUMP"),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}

/// Overrides the values in the config by the command-line arguments.
fn apply_matches(mut config: Config, matches: &ArgMatches) -> Result<Config> {
    if let Some(&width) = matches.get_one::<i64>("WIDTH") {
        config.width = width as isize;
    }
    if let Some(&height) = matches.get_one::<i64>("HEIGHT") {
        config.height = height as isize;
    }
    if let Some(rule_string) = matches.get_one::<String>("RULE") {
        config = config.set_rule_string(rule_string);
    }
    if let Some(path) = matches.get_one::<String>("PATTERN") {
        config = config.set_pattern(read_pattern(Path::new(path))?);
    }
    if let Some(&density) = matches.get_one::<f64>("DENSITY") {
        config = config.set_density(density);
    }
    if let Some(&seed) = matches.get_one::<u64>("SEED") {
        config = config.set_seed(seed);
    }
    if let Some(&max_gen) = matches.get_one::<u64>("GENERATIONS") {
        config = config.set_max_gen(match max_gen {
            0 => None,
            i => Some(i),
        });
    }
    Ok(config)
}

/// Reads an RLE file.
fn read_pattern(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("cannot open pattern file {}", path.display()))?;
    match PatternSource::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot read pattern file {}", path.display()))?
    {
        PatternSource::Rle(text) => Ok(text),
        PatternSource::Random { .. } => bail!("{} is not an RLE file", path.display()),
    }
}

/// Reads a config file. The format is chosen by the extension.
fn read_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let config: Config = match ext.as_deref() {
        Some("json") => serde_json::from_str(&text)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
        Some("toml") => toml::from_str(&text)?,
        _ => bail!(
            "unknown config format of {}, expected .json, .yaml or .toml",
            path.display()
        ),
    };
    Ok(config)
}

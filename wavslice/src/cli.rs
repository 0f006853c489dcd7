use std::path::PathBuf;

use clap::{builder::ValueParser, value_parser, Arg, ArgAction, Command};

/// Parse the `COUNT` argument into a positive frame or segment count.
///
/// Plain decimal digits only; zero is rejected because neither a zero-frame
/// window nor a zero-way subdivision is meaningful.
pub fn parse_count(value: &str) -> Result<u64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("count cannot be empty".into());
    }

    let count: u64 = trimmed
        .parse()
        .map_err(|_| format!("invalid count '{value}'"))?;

    if count == 0 {
        return Err("count must be greater than zero".into());
    }

    Ok(count)
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Split a WAV file into fixed-size chunks or near-equal subdivisions")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file_path")
                .value_name("FILE_PATH")
                .help("Path to the input WAV file")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("count")
                .value_name("COUNT")
                .help("Chunk size in frames, or the segment count with --subdivide")
                .required(true)
                .value_parser(ValueParser::new(parse_count)),
        )
        .arg(
            Arg::new("prefix")
                .value_name("PREFIX")
                .help("Prefix for the generated file names, directory part included")
                .required(true),
        )
        .arg(
            Arg::new("subdivide")
                .short('s')
                .long("subdivide")
                .help("Split into COUNT near-equal segments instead of COUNT-frame chunks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Preview the generated files without writing them")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_accepts_positive_integers() {
        assert_eq!(parse_count("1").unwrap(), 1);
        assert_eq!(parse_count("300").unwrap(), 300);
        assert_eq!(parse_count(" 44100 ").unwrap(), 44_100);
    }

    #[test]
    fn parse_count_rejects_zero() {
        assert!(parse_count("0").is_err());
    }

    #[test]
    fn parse_count_rejects_non_numeric_input() {
        assert!(parse_count("").is_err());
        assert!(parse_count("300ms").is_err());
        assert!(parse_count("-3").is_err());
    }

    #[test]
    fn cli_requires_all_three_positional_arguments() {
        let result = build_cli().try_get_matches_from(["wavslice", "in.wav", "300"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_flags_and_positionals() {
        let matches = build_cli()
            .try_get_matches_from(["wavslice", "in.wav", "3", "out_", "--subdivide", "--dry-run"])
            .unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("file_path").unwrap(),
            &PathBuf::from("in.wav")
        );
        assert_eq!(*matches.get_one::<u64>("count").unwrap(), 3);
        assert_eq!(matches.get_one::<String>("prefix").unwrap(), "out_");
        assert!(matches.get_flag("subdivide"));
        assert!(matches.get_flag("dry-run"));
    }

    #[test]
    fn cli_defaults_to_slice_mode() {
        let matches = build_cli()
            .try_get_matches_from(["wavslice", "in.wav", "300", "out_"])
            .unwrap();
        assert!(!matches.get_flag("subdivide"));
        assert!(!matches.get_flag("dry-run"));
    }
}

use std::ffi::OsString;

use clap::Parser;

/// Options recognized anywhere on the command line
const FLAGS: &[&str] = &[
    "--no-timestamps",
    "--list-langs",
    "-v",
    "--verbose",
    "-h",
    "--help",
    "-V",
    "--version",
];

/// Options whose value is the following argument
const VALUE_FLAGS: &[&str] = &["-l", "--lang"];

#[derive(Parser)]
#[command(
    name = "ytextract",
    about = "YouTube transcript extractor",
    version,
    override_usage = "ytextract [OPTIONS] <URL|ID> [OUTPUT]\n       ytextract [OPTIONS] <OUTPUT.txt> <URL|ID> <URL|ID>..."
)]
pub struct Cli {
    /// Video URL or ID, optionally followed by an output file;
    /// or an output .txt file followed by several videos
    #[arg(required = true, value_name = "ARGS")]
    pub args: Vec<String>,

    /// Omit timestamps from output
    #[arg(long)]
    pub no_timestamps: bool,

    /// Preferred caption language code (default: en)
    #[arg(short, long, value_name = "CODE")]
    pub lang: Option<String>,

    /// List available transcript languages for the first video and exit
    #[arg(long)]
    pub list_langs: bool,

    /// Show config and extraction details
    #[arg(short, long)]
    pub verbose: bool,
}

/// Move the known options ahead of a `--`, so every other argument is
/// positional. Video IDs may start with '-' (`-abcdefghij`).
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut options: Vec<OsString> = iter.next().into_iter().collect();
    let mut positionals = Vec::new();

    while let Some(arg) = iter.next() {
        match arg.to_str() {
            Some("--") => positionals.extend(iter.by_ref()),
            Some(s) if FLAGS.contains(&s) || s.starts_with("--lang=") => options.push(arg),
            Some(s) if VALUE_FLAGS.contains(&s) => {
                options.push(arg);
                options.extend(iter.next());
            }
            _ => positionals.push(arg),
        }
    }

    options.push("--".into());
    options.extend(positionals);
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse(&["ytextract", "--no-timestamps", "--lang=fr", "dQw4w9WgXcQ", "out.txt"]).unwrap();
        assert!(cli.no_timestamps);
        assert_eq!(cli.lang.as_deref(), Some("fr"));
        assert_eq!(cli.args, vec!["dQw4w9WgXcQ", "out.txt"]);
        assert!(!cli.list_langs);
    }

    #[test]
    fn test_flags_after_positionals() {
        let cli = parse(&["ytextract", "all.txt", "AAAAAAAAAAA", "BBBBBBBBBBB", "--list-langs"]).unwrap();
        assert!(cli.list_langs);
        assert_eq!(cli.args.len(), 3);
        assert!(cli.lang.is_none());
    }

    #[test]
    fn test_missing_input_is_error() {
        assert!(parse(&["ytextract"]).is_err());
        assert!(parse(&["ytextract", "--no-timestamps"]).is_err());
    }

    #[test]
    fn test_bare_id_with_leading_hyphen() {
        assert!(ytextract::resolve("-abcdefghij").is_some());

        let cli = parse(&["ytextract", "-abcdefghij"]).unwrap();
        assert_eq!(cli.args, vec!["-abcdefghij"]);
        assert!(!cli.no_timestamps);
    }

    #[test]
    fn test_hyphen_id_between_flags() {
        let cli = parse(&["ytextract", "--lang=fr", "-abcdefghij", "out.txt"]).unwrap();
        assert_eq!(cli.lang.as_deref(), Some("fr"));
        assert_eq!(cli.args, vec!["-abcdefghij", "out.txt"]);

        let cli = parse(&["ytextract", "-abcdefghij", "--no-timestamps", "--list-langs", "--lang", "de", "-v"]).unwrap();
        assert_eq!(cli.args, vec!["-abcdefghij"]);
        assert!(cli.no_timestamps);
        assert!(cli.list_langs);
        assert!(cli.verbose);
        assert_eq!(cli.lang.as_deref(), Some("de"));
    }

    #[test]
    fn test_unknown_option_is_an_input() {
        let cli = parse(&["ytextract", "--bogus", "dQw4w9WgXcQ"]).unwrap();
        assert_eq!(cli.args, vec!["--bogus", "dQw4w9WgXcQ"]);
        assert!(ytextract::resolve("--bogus").is_none());
    }

    #[test]
    fn test_explicit_separator() {
        let cli = parse(&["ytextract", "--", "--list-langs", "-l"]).unwrap();
        assert_eq!(cli.args, vec!["--list-langs", "-l"]);
        assert!(!cli.list_langs);
    }

    #[test]
    fn test_normalize_args_order() {
        let args: Vec<String> = normalize_args(["ytextract", "-xyzxyzxyzx", "-l", "ja", "out.txt"])
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect();
        assert_eq!(args, vec!["ytextract", "-l", "ja", "--", "-xyzxyzxyzx", "out.txt"]);
    }
}

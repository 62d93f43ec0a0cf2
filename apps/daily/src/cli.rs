use std::path::PathBuf;

use chrono::NaiveDate;

use crate::errors::AppError;

pub const USAGE: &str = "usage: daily [--preview] [--save PATH] [--date YYYY-MM-DD] [--no-ai]";

/// Parsed command line. With neither `--preview` nor `--save` the page is printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub preview: bool,
    pub save: Option<PathBuf>,
    pub date: Option<NaiveDate>,
    pub no_ai: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--preview" => parsed.preview = true,
                "--no-ai" => parsed.no_ai = true,
                "-h" | "--help" => parsed.help = true,
                "--save" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::Usage("--save requires a path".into()))?;
                    parsed.save = Some(PathBuf::from(path));
                }
                "--date" => {
                    let value = args
                        .next()
                        .ok_or_else(|| AppError::Usage("--date requires YYYY-MM-DD".into()))?;
                    parsed.date = Some(parse_date(&value)?);
                }
                other => {
                    return Err(AppError::Usage(format!("unrecognised argument '{other}'")));
                }
            }
        }

        Ok(parsed)
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::parse(std::env::args().skip(1))
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Usage(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, AppError> {
        CliArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_arguments_means_print_today() {
        assert_eq!(parse(&[]).expect("parses"), CliArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["--preview", "--save", "out.pdf", "--date", "2025-12-31", "--no-ai"])
            .expect("parses");
        assert!(args.preview);
        assert!(args.no_ai);
        assert_eq!(args.save, Some(PathBuf::from("out.pdf")));
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 12, 31));
    }

    #[test]
    fn test_invalid_date_is_usage_error() {
        let err = parse(&["--date", "31/12/2025"]).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
        assert!(err.to_string().contains("31/12/2025"));
    }

    #[test]
    fn test_missing_values() {
        assert!(matches!(parse(&["--save"]), Err(AppError::Usage(_))));
        assert!(matches!(parse(&["--date"]), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(matches!(parse(&["--colour"]), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_help_flag() {
        assert!(parse(&["--help"]).expect("parses").help);
    }
}

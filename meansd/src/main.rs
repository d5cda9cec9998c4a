//! # meansd
//!
//! A CLI tool for building "Mean (SD)" summary tables from spreadsheets.
//!
//! ## Overview
//!
//! meansd is built on top of meansdlib. It reads a workbook containing a
//! sheet of means and a sheet of standard deviations, reconciles category
//! and metric labels against the canonical lists, and prints (or saves) a
//! table where every cell reads `mean (SD)`.
//!
//! ## Features
//!
//! - **Sheet selection**: Pick mean/SD sheets with `--mean` / `--sd`
//!   (repeatable; defaults to the first and second sheet)
//! - **Fuzzy matching**: Tolerate spelling drift in category names with `--fuzzy`
//! - **Precision**: `--decimals 0|1|2`
//! - **Multiple output formats**: Table (default), JSON via `--output json`,
//!   CSV via `--csv`, and xlsx via `--write`
//!
//! ## Usage
//!
//! ```bash
//! # Build the table from the first two sheets
//! meansd stats.xlsx
//!
//! # Pick sheets explicitly, combine two mean sheets, one decimal place
//! meansd stats.xlsx --mean "Mean 2022" --mean "Mean 2023" --sd SD --decimals 1
//!
//! # Save the table as a workbook
//! meansd stats.xlsx --write Mean_SD_Table.xlsx
//!
//! # List sheets, preview one
//! meansd sheets stats.xlsx
//! meansd preview stats.xlsx Mean --rows 5
//! ```

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use meansdlib::{
    build_summary, normalize_table, save_xlsx, BuildOptions, MatchMode, Notice, NumberStyle,
    WorkbookSource, XlsxWorkbook,
};
use outstanding::cli::{App, CommandContext, HandlerResult, Output, RunResult};
use render::{
    create_theme, preview_context, summary_context, SheetsContext, PREVIEW_TEMPLATE,
    SHEETS_TEMPLATE, SUMMARY_TABLE_TEMPLATE,
};
use tracing_subscriber::EnvFilter;

/// Arguments shared by the root command and `build`
fn build_args() -> Vec<Arg> {
    vec![
        Arg::new("workbook")
            .help("Workbook to read (xlsx, xls, xlsb, ods)")
            .value_parser(value_parser!(PathBuf)),
        Arg::new("mean")
            .short('m')
            .long("mean")
            .action(ArgAction::Append)
            .help("Sheet with mean values (can be specified multiple times)"),
        Arg::new("sd")
            .short('s')
            .long("sd")
            .action(ArgAction::Append)
            .help("Sheet with SD values (can be specified multiple times)"),
        Arg::new("decimals")
            .short('d')
            .long("decimals")
            .value_parser(value_parser!(u8).range(0..=2))
            .help("Decimal places for numbers (0, 1 or 2)"),
        Arg::new("match")
            .long("match")
            .value_parser(["exact", "fuzzy"])
            .help("Category matching mode"),
        Arg::new("fuzzy")
            .long("fuzzy")
            .action(ArgAction::SetTrue)
            .conflicts_with("match")
            .help("Shortcut for --match fuzzy"),
        Arg::new("number-style")
            .long("number-style")
            .value_parser(["auto", "collapse-integers", "fixed-point"])
            .help("How integral values are printed"),
        Arg::new("config")
            .short('c')
            .long("config")
            .value_parser(value_parser!(PathBuf))
            .help("JSON options file (flags override it)"),
        Arg::new("csv")
            .long("csv")
            .action(ArgAction::SetTrue)
            .help("Print the table as CSV"),
        Arg::new("write")
            .short('w')
            .long("write")
            .value_parser(value_parser!(PathBuf))
            .help("Also save the table as an xlsx workbook"),
    ]
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("meansd")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Build a canonical \"Mean (SD)\" summary table from Mean and SD sheets")
        .arg_required_else_help(true)
        .args(build_args())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log matching decisions to stderr"),
        )
        .subcommand(
            Command::new("build")
                .about("Build the summary table (default command)")
                .args(build_args()),
        )
        .subcommand(
            Command::new("sheets")
                .about("List the sheets in a workbook")
                .arg(
                    Arg::new("workbook")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Workbook to read"),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Show the first rows of a sheet after normalization")
                .arg(
                    Arg::new("workbook")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Workbook to read"),
                )
                .arg(Arg::new("sheet").required(true).help("Sheet to preview"))
                .arg(
                    Arg::new("rows")
                        .short('n')
                        .long("rows")
                        .value_parser(value_parser!(usize))
                        .default_value("10")
                        .help("Number of rows to show"),
                ),
        )
}

/// Install the stderr log subscriber (once per process)
fn init_logging(matches: &ArgMatches) {
    let verbose = matches.try_get_one::<bool>("verbose").ok().flatten() == Some(&true);
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_workbook(path: &Path) -> Result<XlsxWorkbook, anyhow::Error> {
    XlsxWorkbook::open(path)
        .with_context(|| format!("failed to open workbook '{}'", path.display()))
}

/// Build options from an optional config file plus flags
fn build_options(matches: &ArgMatches, sheet_names: &[String]) -> Result<BuildOptions, anyhow::Error> {
    let mut options = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str::<BuildOptions>(&text)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => BuildOptions::new(),
    };

    if let Some(sheets) = matches.get_many::<String>("mean") {
        options = options.mean_sources(sheets.cloned().collect());
    }
    if let Some(sheets) = matches.get_many::<String>("sd") {
        options = options.sd_sources(sheets.cloned().collect());
    }
    if let Some(places) = matches.get_one::<u8>("decimals") {
        options = options.decimal_places(*places);
    }
    if matches.get_flag("fuzzy") {
        options = options.match_mode(MatchMode::Fuzzy);
    } else if let Some(mode) = matches.get_one::<String>("match") {
        options = options.match_mode(mode.parse::<MatchMode>().map_err(anyhow::Error::msg)?);
    }
    if let Some(style) = matches.get_one::<String>("number-style") {
        options = options.number_style(style.parse::<NumberStyle>().map_err(anyhow::Error::msg)?);
    }

    Ok(options.with_default_sources(sheet_names))
}

fn report_notices(notices: &[Notice]) {
    for notice in notices {
        if notice.is_warning() {
            eprintln!("warning: {notice}");
        } else {
            eprintln!("note: {notice}");
        }
    }
}

/// Handler for the build command
fn build_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let Some(path) = matches.get_one::<PathBuf>("workbook") else {
        bail!("no workbook given (see --help)");
    };
    let mut workbook = open_workbook(path)?;
    let options = build_options(matches, &workbook.sheet_names())?;
    tracing::debug!(?options, "resolved options");

    let result = build_summary(&mut workbook, &options)?;

    if let Some(out) = matches.get_one::<PathBuf>("write") {
        save_xlsx(&result.table, out)
            .with_context(|| format!("failed to write '{}'", out.display()))?;
        eprintln!("Wrote {}", out.display());
    }

    // For JSON mode, return raw data (notices included)
    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&result)?));
    }

    report_notices(&result.notices);

    if matches.get_flag("csv") {
        print!("{}", result.table.to_csv()?);
        return Ok(Output::Silent);
    }

    Ok(Output::Render(serde_json::to_value(summary_context(
        &result.table,
    ))?))
}

/// Handler for the sheets command
fn sheets_handler(matches: &ArgMatches, _ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let Some(path) = matches.get_one::<PathBuf>("workbook") else {
        bail!("no workbook given");
    };
    let workbook = open_workbook(path)?;
    let context = SheetsContext {
        sheets: workbook.sheet_names(),
    };
    Ok(Output::Render(serde_json::to_value(&context)?))
}

/// Handler for the preview command
fn preview_handler(matches: &ArgMatches, ctx: &CommandContext) -> HandlerResult<serde_json::Value> {
    init_logging(matches);
    let (Some(path), Some(sheet)) = (
        matches.get_one::<PathBuf>("workbook"),
        matches.get_one::<String>("sheet"),
    ) else {
        bail!("preview needs a workbook and a sheet");
    };
    let rows = matches.get_one::<usize>("rows").copied().unwrap_or(10);

    let mut workbook = open_workbook(path)?;
    let raw = workbook.read_sheet(sheet)?;
    let (table, notices) = normalize_table(sheet, &raw)?;
    let head = table.head(rows);

    if ctx.output_mode.is_structured() {
        return Ok(Output::Render(serde_json::to_value(&head)?));
    }

    report_notices(&notices);
    Ok(Output::Render(serde_json::to_value(preview_context(&head))?))
}

/// Map outstanding's `_output_mode` argument to an OutputMode
fn output_mode(matches: &ArgMatches) -> outstanding::OutputMode {
    matches
        .try_get_one::<String>("_output_mode")
        .ok()
        .flatten()
        .map(|s| match s.as_str() {
            "json" => outstanding::OutputMode::Json,
            "text" => outstanding::OutputMode::Text,
            "term-debug" => outstanding::OutputMode::TermDebug,
            "term" => outstanding::OutputMode::Term,
            _ => outstanding::OutputMode::Auto,
        })
        .unwrap_or(outstanding::OutputMode::Auto)
}

fn main() -> ExitCode {
    let cmd = build_command();

    // Build the outstanding app with command handlers and run
    let result = App::builder()
        .theme(create_theme())
        .command("build", build_handler, SUMMARY_TABLE_TEMPLATE)
        .command("sheets", sheets_handler, SHEETS_TEMPLATE)
        .command("preview", preview_handler, PREVIEW_TEMPLATE)
        .run_to_string(cmd, std::env::args());

    match result {
        RunResult::Handled(output) => {
            if !output.is_empty() {
                // Check if it's an error message from handler
                if output.starts_with("Error:") {
                    eprintln!("{}", output);
                    return ExitCode::FAILURE;
                }
                print!("{}", output);
            }
            ExitCode::SUCCESS
        }
        RunResult::Binary(_, _) => ExitCode::SUCCESS,
        RunResult::NoMatch(matches) => {
            // Root command (no subcommand) is treated as build
            let output_mode = output_mode(&matches);
            let ctx = CommandContext {
                output_mode,
                command_path: vec![],
            };

            match build_handler(&matches, &ctx) {
                Ok(Output::Render(value)) => {
                    if output_mode.is_structured() {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&value).unwrap_or_default()
                        );
                        return ExitCode::SUCCESS;
                    }
                    match render::render_value(SUMMARY_TABLE_TEMPLATE, &value, output_mode) {
                        Ok(output) => {
                            print!("{}", output);
                            ExitCode::SUCCESS
                        }
                        Err(e) => {
                            eprintln!("Error: {e}");
                            ExitCode::FAILURE
                        }
                    }
                }
                Ok(Output::Silent) => ExitCode::SUCCESS,
                Ok(Output::Binary { .. }) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_options_from_flags() {
        let matches = build_command().get_matches_from([
            "meansd", "book.xlsx", "-m", "M1", "-m", "M2", "--sd", "S", "-d", "1", "--fuzzy",
        ]);
        let options = build_options(&matches, &names(&["M1", "M2", "S"])).unwrap();
        assert_eq!(options.mean_sources, names(&["M1", "M2"]));
        assert_eq!(options.sd_sources, names(&["S"]));
        assert_eq!(options.decimal_places, 1);
        assert_eq!(options.match_mode, MatchMode::Fuzzy);
    }

    #[test]
    fn test_options_default_sheets() {
        let matches = build_command().get_matches_from(["meansd", "book.xlsx"]);
        let options = build_options(&matches, &names(&["Mean", "SD"])).unwrap();
        assert_eq!(options.mean_sources, names(&["Mean"]));
        assert_eq!(options.sd_sources, names(&["SD"]));
        assert_eq!(options.match_mode, MatchMode::Exact);
    }

    #[test]
    fn test_decimals_out_of_range_rejected() {
        let result = build_command().try_get_matches_from(["meansd", "book.xlsx", "-d", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_mode_defaults_to_auto() {
        let matches = build_command().get_matches_from(["meansd", "book.xlsx"]);
        assert!(matches!(output_mode(&matches), outstanding::OutputMode::Auto));
    }

    #[test]
    fn test_subcommands_parse() {
        let matches = build_command().get_matches_from(["meansd", "sheets", "book.xlsx"]);
        assert_eq!(matches.subcommand_name(), Some("sheets"));

        let matches =
            build_command().get_matches_from(["meansd", "preview", "book.xlsx", "Mean", "-n", "3"]);
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<usize>("rows"), Some(&3));
    }
}

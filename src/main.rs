mod debug_report;
mod logger;

use chrono::NaiveDate;
use medscan::{Context, DecodeVerbose, Matching, MedicineData, Options, ReminderDraft, decode_verbose_with};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use tracing::{debug, warn};

const GS: char = '\u{1d}';

/// Typeable spellings of the Group Separator accepted with `--escapes`.
const GS_ESCAPES: &[&str] = &["\\x1d", "\\x1D", "\\u001d", "\\u001D", "<GS>", "^]"];

const EXIT_NOT_RECOGNIZED: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(EXIT_USAGE);
        }
    };

    logger::init(config.verbose);

    let outcome = run(&config);
    if let Err(err) = &outcome {
        eprintln!("{err}");
    }
    std::process::exit(exit_code(&outcome));
}

/// 0 when at least one payload was a medicine label, 1 otherwise.
fn exit_code(outcome: &Result<usize, String>) -> i32 {
    match outcome {
        Ok(recognized) if *recognized > 0 => 0,
        _ => EXIT_NOT_RECOGNIZED,
    }
}

struct CliConfig {
    payloads: Vec<String>,
    context: Context,
    options: Options,
    json: bool,
    reminder: bool,
    escapes: bool,
    color: bool,
    verbose: bool,
}

/// Decode every payload and count the medicine labels among them.
fn run(config: &CliConfig) -> Result<usize, String> {
    let mut recognized = 0;

    for raw in &config.payloads {
        let payload = prepare_payload(raw, config.escapes);
        let res = decode_verbose_with(&payload, &config.context, &config.options);

        match res.data.pc.as_option() {
            None => warn!("invalid data matrix: no product code found"),
            Some(pc) => {
                recognized += 1;
                if !res.data.product_code_is_valid() {
                    warn!(pc = %pc, "product code check digit does not match");
                }
            }
        }

        let reminder = config.reminder.then(|| ReminderDraft::from_medicine(&res.data, &config.context));

        if config.json {
            println!("{}", json_line(&res, &config.context, reminder.as_ref())?);
        } else {
            debug_report::print_run(&payload, &res, reminder.as_ref(), config.color);
        }
    }

    debug!(payloads = config.payloads.len(), recognized, "finished");
    Ok(recognized)
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    data: &'a MedicineData,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminder: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reminder_error: Option<String>,
}

fn json_line(
    res: &DecodeVerbose,
    context: &Context,
    reminder: Option<&medscan::Result<ReminderDraft>>,
) -> Result<String, String> {
    let record = JsonRecord {
        data: &res.data,
        expires: res.data.exp.as_option().map(|exp| exp.label(context)),
        reminder: reminder.and_then(|r| r.as_ref().ok()).map(ReminderDraft::to_calendar_event),
        reminder_error: reminder.and_then(|r| r.as_ref().err()).map(ToString::to_string),
    };
    serde_json::to_string(&record).map_err(|err| format!("error: failed to encode JSON: {err}"))
}

/// Strip line endings and a byte order mark, and optionally turn typed
/// separator escapes into the real Group Separator.
fn prepare_payload(raw: &str, escapes: bool) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);
    if !escapes {
        return trimmed.to_string();
    }
    GS_ESCAPES.iter().fold(trimmed.to_string(), |acc, escape| acc.replace(escape, &GS.to_string()))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliConfig, String> {
    let mut payloads: Vec<String> = Vec::new();
    let mut context = Context::default();
    let mut options = Options::default();
    let mut json = false;
    let mut reminder = false;
    let mut escapes = false;
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("medscan {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--reminder" => reminder = true,
            "--strict" => options.matching = Matching::Strict,
            "-e" | "--escapes" => escapes = true,
            "-v" | "--verbose" => verbose = true,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                context.reference_date = parse_reference(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                payloads.push(value);
            }
            "--" => {
                payloads.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--reference=") => {
                let value = arg.trim_start_matches("--reference=");
                context.reference_date = parse_reference(value)?;
            }
            _ if arg.starts_with("--input=") => {
                payloads.push(arg.trim_start_matches("--input=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => payloads.push(arg),
        }
    }

    if payloads.is_empty() {
        payloads = read_stdin_payloads()?;
    }

    if payloads.iter().all(|p| p.trim().is_empty()) {
        return Err(format!("error: no payload provided\n\n{}", help_text()));
    }

    Ok(CliConfig { payloads, context, options, json, reminder, escapes, color, verbose })
}

/// One payload per non-empty line.
fn read_stdin_payloads() -> Result<Vec<String>, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.lines().filter(|line| !line.trim().is_empty()).map(str::to_string).collect())
}

fn parse_reference(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DD)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "medscan {version}

Decode GS1 DataMatrix payloads from medicine packs.

Usage:
  medscan [OPTIONS] [--] <payload...>
  medscan [OPTIONS] --input <payload>
  scanner-output | medscan [OPTIONS]      (one payload per line)

Options:
  -i, --input <payload>      Payload to decode. May be repeated. Without any
                             payload arguments, stdin is read.
  --reference <date>         Date two-digit years are resolved against, in
                             YYYY-MM-DD. Default: today.
  --strict                   Tokenize as a GS1 element string instead of
                             searching each field independently.
  -e, --escapes              Accept \\x1d, \\u001d, <GS> or ^] for the Group
                             Separator.
  --json                     Print one JSON record per payload.
  --reminder                 Also build a calendar reminder draft.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Debug logging (RUST_LOG overrides).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  At least one payload had a product code.
  1  No payload had a product code, or output failed.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use medscan::Field;

    #[test]
    fn escapes_become_group_separators() {
        let payload = prepare_payload("\\x1d0100012345678905<GS>172608^]21X\\u001D", true);
        assert_eq!(payload, "\u{1d}0100012345678905\u{1d}172608\u{1d}21X\u{1d}");
    }

    #[test]
    fn escapes_are_left_alone_unless_requested() {
        assert_eq!(prepare_payload("<GS>01\r\n", false), "<GS>01");
        assert_eq!(prepare_payload("\u{feff}\u{1d}01", false), "\u{1d}01");
    }

    #[test]
    fn json_line_carries_record_and_reminder() {
        let context = Context { reference_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() };
        let res = decode_verbose_with("\u{1d}0100012345678905\u{1d}172608", &context, &Options::default());
        assert!(res.data.pc.is_found());

        let reminder = ReminderDraft::from_medicine(&res.data, &context);
        let line = json_line(&res, &context, Some(&reminder)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["PC"], "00012345678905");
        assert_eq!(value["SN"], serde_json::Value::Null);
        assert_eq!(value["EXP"]["year"], "26");
        assert_eq!(value["expires"], "08/2026");
        assert_eq!(value["reminder"]["start"]["date"], "2026-08-01");
        assert!(value.get("reminder_error").is_none());
    }

    #[test]
    fn json_line_reports_reminder_error() {
        let context = Context { reference_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() };
        let res = decode_verbose_with("\u{1d}0100012345678905", &context, &Options::default());
        assert_eq!(res.data.exp, Field::Absent);

        let reminder = ReminderDraft::from_medicine(&res.data, &context);
        let value: serde_json::Value =
            serde_json::from_str(&json_line(&res, &context, Some(&reminder)).unwrap()).unwrap();
        assert_eq!(value["reminder_error"], "medicine data has no expiration date");
        assert!(value.get("expires").is_none());
    }

    fn config(payloads: &[&str]) -> CliConfig {
        let args = ["--json", "--reference", "2025-01-01"].into_iter().chain(payloads.iter().copied());
        parse_args(args.map(str::to_string)).unwrap()
    }

    #[test]
    fn exit_code_follows_recognized_labels() {
        let labels = config(&["not a label", "\u{1d}0100012345678905\u{1d}172608"]);
        assert_eq!(run(&labels), Ok(1));
        assert_eq!(exit_code(&run(&labels)), 0);

        let noise = config(&["not a label", "21ABCDEFGHIJKLMN"]);
        assert_eq!(run(&noise), Ok(0));
        assert_eq!(exit_code(&run(&noise)), EXIT_NOT_RECOGNIZED);

        assert_eq!(exit_code(&Err("error: failed to encode JSON".to_string())), EXIT_NOT_RECOGNIZED);
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let parse = |args: &[&str]| parse_args(args.iter().map(|a| a.to_string()));
        assert!(parse(&["--bogus", "x"]).is_err());
        assert!(parse(&["--reference", "2025", "x"]).is_err());
        assert!(parse(&["x", "--input"]).is_err());

        let parsed = parse(&["--strict", "--reference=2030-02-01", "-i", "x"]).unwrap();
        assert_eq!(parsed.options.matching, Matching::Strict);
        assert_eq!(parsed.context.reference_date, NaiveDate::from_ymd_opt(2030, 2, 1).unwrap());
        assert_eq!(parsed.payloads, vec!["x".to_string()]);
    }

    #[test]
    fn reference_dates_parse() {
        assert_eq!(parse_reference("2030-02-01"), Ok(NaiveDate::from_ymd_opt(2030, 2, 1).unwrap()));
        assert!(parse_reference("2030").is_err());
    }
}

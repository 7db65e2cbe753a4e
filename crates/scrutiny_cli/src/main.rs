//! CLI demo entry point.
//!
//! # Responsibility
//! - Verify `scrutiny_core` linkage (`ping`/version).
//! - Annotate a text file (or a built-in sample) from `CODE=needle` pairs and
//!   print the resulting segment partition.
//!
//! Usage: `scrutiny_cli [FILE] [CODE=needle ...]`. `SCRUTINY_CONFIG` may
//! point at a JSON config file.

use log::info;
use scrutiny_core::{
    find_code, AnnotationSession, CoreConfig, Segment, SelectionInput, SelectionOutcome,
};
use std::process::ExitCode;

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. \
Tidal power is the most reliable renewable source ever discovered.";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    path: Option<String>,
    marks: Vec<(String, String)>,
}

/// Splits arguments into an optional file path and `CODE=needle` marks.
///
/// An argument is a mark only when the text before `=` is a known code, so
/// paths containing `=` still read as paths.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    for arg in args {
        let mark = arg
            .split_once('=')
            .filter(|(code, _)| find_code(code).is_some());
        match mark {
            Some((code, needle)) => parsed
                .marks
                .push((code.trim().to_string(), needle.to_string())),
            None if parsed.path.is_none() => parsed.path = Some(arg),
            None => return Err(format!("unexpected argument `{arg}`")),
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("scrutiny_core ping={}", scrutiny_core::ping());
    println!("scrutiny_core version={}", scrutiny_core::core_version());

    let config = load_config()?;
    scrutiny_core::init_from_config(&config.logging).map_err(|err| err.to_string())?;
    println!(
        "provider model={} api_key_env={} api_key_configured={}",
        config.provider.model,
        config.provider.api_key_env,
        config.provider.api_key().is_some()
    );

    let CliArgs { path, mut marks } = parse_args(std::env::args().skip(1))?;
    let source = match path.as_deref() {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{path}`: {err}"))?,
        None => SAMPLE.to_string(),
    };
    if marks.is_empty() && path.is_none() {
        marks.push(("FLOW".to_string(), "quick".to_string()));
        marks.push(("HYPER".to_string(), "most reliable".to_string()));
    }

    let mut session = AnnotationSession::new(source, &config.viewer);
    for (code, needle) in &marks {
        session.select_code(code);
        match session.complete_selection(&SelectionInput::Text(needle.clone())) {
            SelectionOutcome::Created(id) => println!("mark {code} {needle:?} id={id}"),
            SelectionOutcome::Unresolved => println!("skip {code}: {needle:?} not found"),
            SelectionOutcome::Rejected(rejection) => println!("skip {code}: {rejection}"),
            SelectionOutcome::NoPendingCode => {}
        }
    }
    info!(
        "event=cli_annotate module=cli status=ok annotations={}",
        session.store().len()
    );

    for (index, segment) in session.segments().enumerate() {
        match segment {
            Segment::Plain { range, text } => println!("{index:>3} {range} plain {text:?}"),
            Segment::Highlighted { annotation, text } => println!(
                "{index:>3} {} {} {} {text:?}",
                annotation.range, annotation.code, annotation.color
            ),
        }
    }
    Ok(())
}

fn load_config() -> Result<CoreConfig, String> {
    let Ok(path) = std::env::var("SCRUTINY_CONFIG") else {
        return Ok(CoreConfig::default());
    };
    let raw = std::fs::read_to_string(path.as_str())
        .map_err(|err| format!("failed to read config `{path}`: {err}"))?;
    CoreConfig::from_json_str(raw.as_str()).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_args;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn known_code_prefix_is_a_mark() {
        let parsed = parse_args(args(&["essay.txt", "FLOW=quick brown", "FACT=a=b"]))
            .expect("valid args");
        assert_eq!(parsed.path.as_deref(), Some("essay.txt"));
        assert_eq!(
            parsed.marks,
            vec![
                ("FLOW".to_string(), "quick brown".to_string()),
                ("FACT".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn path_containing_equals_stays_a_path() {
        let parsed = parse_args(args(&["drafts/v=2.txt", "TONE=fox"])).expect("valid args");
        assert_eq!(parsed.path.as_deref(), Some("drafts/v=2.txt"));
        assert_eq!(parsed.marks.len(), 1);
    }

    #[test]
    fn second_path_is_rejected() {
        let err = parse_args(args(&["a.txt", "b=c.txt"])).expect_err("two paths");
        assert!(err.contains("b=c.txt"));
    }
}

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phishing_detector::config::{Config, DEFAULT_CONFIG_FILE};
use phishing_detector::report::format_analysis_report;
use phishing_detector::{DetectorError, KeywordRepository, PhishingDetector};
use std::io::Read;
use std::process;

const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;

fn main() {
    let matches = Command::new("phishing-detector")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing risk scoring for email text")
        .long_about(
            "Scores email content for phishing risk using weighted keyword categories\n\
             and URL heuristics (shorteners, raw IP hosts, hyphen-heavy and overlong\n\
             domains). Reports a risk tier (ALTO, MEDIO, BAJO) with recommendations.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value(DEFAULT_CONFIG_FILE),
        )
        .arg(
            Arg::new("keywords")
                .short('k')
                .long("keywords")
                .value_name("FILE")
                .help("Keyword file path (overrides keywords_file from the configuration)"),
        )
        .arg(
            Arg::new("analyze")
                .short('a')
                .long("analyze")
                .value_name("FILE")
                .help("Analyze an email body read from FILE ('-' for stdin)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print structured JSON instead of the text report")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Show keyword counts per category")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("add-keyword")
                .long("add-keyword")
                .value_names(["CATEGORY", "KEYWORD"])
                .num_args(2)
                .help("Add a keyword to a category and save the keyword file"),
        )
        .arg(
            Arg::new("remove-keyword")
                .long("remove-keyword")
                .value_names(["CATEGORY", "KEYWORD"])
                .num_args(2)
                .help("Remove a keyword from a category and save the keyword file"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging of every keyword and URL match")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        init_logging(&matches, LevelFilter::Info);
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG_FILE);

    let (config, found) = match load_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(EXIT_FAILURE);
        }
    };

    init_logging(&matches, config.log_level());

    if !found {
        log::warn!("Configuration file '{config_path}' not found, using default configuration");
    }

    let keywords_file = matches
        .get_one::<String>("keywords")
        .cloned()
        .unwrap_or_else(|| config.keywords_file.clone());
    let detector = PhishingDetector::with_repository(KeywordRepository::new(keywords_file));
    let json = matches.get_flag("json");

    let outcome = if matches.get_flag("stats") {
        show_statistics(&detector, json)
    } else if let Some(args) = pair_arg(&matches, "add-keyword") {
        edit_keyword(&detector, args, true)
    } else if let Some(args) = pair_arg(&matches, "remove-keyword") {
        edit_keyword(&detector, args, false)
    } else {
        let source = matches
            .get_one::<String>("analyze")
            .map(String::as_str)
            .unwrap_or("-");
        analyze(&detector, source, json)
    };

    if let Err(e) = outcome {
        let code = match e.downcast_ref::<DetectorError>() {
            Some(DetectorError::InvalidInput(_)) => EXIT_INVALID_INPUT,
            _ => EXIT_FAILURE,
        };

        if json {
            println!("{}", serde_json::json!({ "error": format!("{e:#}") }));
        } else {
            eprintln!("❌ {e:#}");
        }
        process::exit(code);
    }
}

fn init_logging(matches: &ArgMatches, configured: LevelFilter) {
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        configured
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();
}

/// Returns the configuration and whether the file existed. The logger is not
/// installed yet, so the caller reports a missing file.
fn load_config(path: &str) -> anyhow::Result<(Config, bool)> {
    if std::path::Path::new(path).exists() {
        let config = Config::from_file(path)
            .with_context(|| format!("Invalid configuration file '{path}'"))?;
        Ok((config, true))
    } else {
        Ok((Config::default(), false))
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(EXIT_FAILURE);
        }
    }
}

fn pair_arg<'a>(matches: &'a ArgMatches, name: &str) -> Option<(&'a str, &'a str)> {
    let mut values = matches.get_many::<String>(name)?;
    match (values.next(), values.next()) {
        (Some(first), Some(second)) => Some((first.as_str(), second.as_str())),
        _ => None,
    }
}

fn read_email(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read email from stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read email file '{source}'"))
    }
}

fn analyze(detector: &PhishingDetector, source: &str, json: bool) -> anyhow::Result<()> {
    let content = read_email(source)?;
    let result = detector.analyze_email(&content)?;

    if json {
        let payload = serde_json::json!({ "success": true, "analysis": result });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", format_analysis_report(&result));
    }
    Ok(())
}

fn show_statistics(detector: &PhishingDetector, json: bool) -> anyhow::Result<()> {
    let stats = detector.statistics()?;

    if json {
        let payload = serde_json::json!({ "success": true, "statistics": stats });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("📊 Keyword Statistics");
    println!("═══════════════════════════════════════");
    for entry in &stats.categories {
        println!("  {:<30} {:>6}", entry.category, entry.count);
    }
    println!("───────────────────────────────────────");
    println!("  {:<30} {:>6}", "total", stats.total);
    Ok(())
}

fn edit_keyword(
    detector: &PhishingDetector,
    (category, keyword): (&str, &str),
    add: bool,
) -> anyhow::Result<()> {
    if add {
        if detector.add_keyword(category, keyword)? {
            println!("✅ Added '{keyword}' to '{category}'");
        } else {
            println!("ℹ️  '{keyword}' already exists in '{category}'");
        }
    } else if detector.remove_keyword(category, keyword)? {
        println!("✅ Removed '{keyword}' from '{category}'");
    } else {
        println!("ℹ️  '{keyword}' not found in '{category}'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let (config, found) = load_config(path.to_str().unwrap()).unwrap();
        assert!(!found);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phishing-detector.yaml");
        std::fs::write(&path, "keywords_file: custom.json\n").unwrap();

        let (config, found) = load_config(path.to_str().unwrap()).unwrap();
        assert!(found);
        assert_eq!(config.keywords_file, "custom.json");
    }

    #[test]
    fn test_load_config_rejects_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "keywords_file: [unterminated\n").unwrap();

        assert!(load_config(path.to_str().unwrap()).is_err());
    }
}

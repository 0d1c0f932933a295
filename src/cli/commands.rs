//! Command implementations for the docindex CLI.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::collection::IndexCollection;
use crate::config::{DocIndexConfig, LoaderConfig};
use crate::error::{DocIndexError, Result};
use crate::loader::IndexLoader;
use crate::writer;

/// Execute a CLI command.
pub fn execute_command(args: DocIndexArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Validate(validate_args) => validate_index(validate_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args),
        Command::List(list_args) => list_records(list_args, &config, &args),
        Command::Convert(convert_args) => convert_index(convert_args, &config, &args),
    }
}

/// Read the configuration file named on the command line, if any.
fn load_config(args: &DocIndexArgs) -> Result<DocIndexConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            DocIndexConfig::from_file(path)
        }
        None => Ok(DocIndexConfig::default()),
    }
}

fn open_index(path: &Path, loader_config: &LoaderConfig) -> Result<IndexCollection> {
    let loader = IndexLoader::new(loader_config.clone())?;
    let collection = loader.load_file(path)?;
    info!("Loaded {} records from {}", collection.len(), path.display());
    Ok(collection)
}

/// Validate an index file.
///
/// A malformed index is reported through the output format and then returned
/// as the command's error, so the process exits non-zero.
fn validate_index(args: &ValidateArgs, config: &DocIndexConfig, cli_args: &DocIndexArgs) -> Result<()> {
    let loader_config = if args.strict {
        LoaderConfig::strict()
    } else {
        config.loader.clone()
    };

    let path = args.index_file.to_string_lossy().to_string();
    match open_index(&args.index_file, &loader_config) {
        Ok(collection) => output_result(
            "Index is valid",
            &ValidationResult {
                path,
                valid: true,
                records: collection.len(),
                error: None,
            },
            cli_args,
        ),
        Err(e) if e.is_malformed() => {
            output_result(
                "Index is malformed",
                &ValidationResult {
                    path,
                    valid: false,
                    records: 0,
                    error: Some(e.to_string()),
                },
                cli_args,
            )?;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Show index statistics.
fn show_stats(args: &StatsArgs, config: &DocIndexConfig, cli_args: &DocIndexArgs) -> Result<()> {
    let collection = open_index(&args.index_file, &config.loader)?;

    output_result(
        &format!("Statistics for {}", args.index_file.display()),
        &StatsResult::new(
            args.index_file.to_string_lossy().to_string(),
            collection.stats(),
            args.detailed,
        ),
        cli_args,
    )
}

/// List index records, optionally filtered by category and page.
fn list_records(args: &ListArgs, config: &DocIndexConfig, cli_args: &DocIndexArgs) -> Result<()> {
    if args.limit == Some(0) {
        return Err(DocIndexError::invalid_argument("--limit must be at least 1"));
    }

    let collection = open_index(&args.index_file, &config.loader)?;

    let matching: Vec<_> = collection
        .iter()
        .filter(|r| args.category.as_deref().is_none_or(|c| r.category == c))
        .filter(|r| args.page.as_deref().is_none_or(|p| r.page == p))
        .collect();

    let records = matching
        .iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(|r| (*r).clone())
        .collect();

    output_result(
        &format!("Records in {}", args.index_file.display()),
        &RecordList {
            matched: matching.len(),
            records,
        },
        cli_args,
    )
}

/// Re-serialize an index to stdout or a file.
fn convert_index(args: &ConvertArgs, config: &DocIndexConfig, cli_args: &DocIndexArgs) -> Result<()> {
    let collection = open_index(&args.index_file, &config.loader)?;

    let mut writer_config = config.writer.clone();
    if let Some(name) = &args.variable_name {
        writer_config.variable_name = name.clone();
    }

    let output = writer::write(&collection, args.index_format(cli_args.pretty), &writer_config)?;

    match &args.output {
        Some(out_path) => {
            fs::write(out_path, &output)?;
            output_result(
                "Index converted",
                &ConversionResult {
                    input: args.index_file.to_string_lossy().to_string(),
                    output: out_path.to_string_lossy().to_string(),
                    records: collection.len(),
                    bytes_written: output.len() as u64,
                },
                cli_args,
            )
        }
        None => {
            print!("{output}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const INDEX: &str = concat!(
        "var documenterSearchIndex = {\"docs\":\n",
        "[{\"location\":\"api/#API\",\"page\":\"API\",\"title\":\"API\",\"text\":\"\",\"category\":\"section\"},",
        "{\"location\":\"api/\",\"page\":\"API\",\"title\":\"API\",\"text\":\"Depth = 5\",\"category\":\"page\"}]\n",
        "}\n",
    );

    fn parse(argv: &[&str]) -> DocIndexArgs {
        let mut full = vec!["docindex", "--quiet", "--format", "json"];
        full.extend_from_slice(argv);
        DocIndexArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_validate_reports_malformed_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_index.js");
        fs::write(&path, "var documenterSearchIndex = {\"docs\": [{\"location\": \"\"}]}").unwrap();

        let args = parse(&["validate", path.to_str().unwrap()]);
        let err = execute_command(args).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_validate_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_index.js");
        fs::write(&path, INDEX).unwrap();

        execute_command(parse(&["validate", "--strict", path.to_str().unwrap()])).unwrap();
        execute_command(parse(&["stats", "--detailed", path.to_str().unwrap()])).unwrap();
        execute_command(parse(&["list", "--category", "page", path.to_str().unwrap()])).unwrap();
    }

    #[test]
    fn test_list_rejects_zero_limit() {
        let args = parse(&["list", "--limit", "0", "missing.js"]);
        assert!(matches!(
            execute_command(args),
            Err(DocIndexError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.js");
        let args = parse(&["stats", path.to_str().unwrap()]);
        assert!(matches!(execute_command(args), Err(DocIndexError::Io(_))));
    }

    #[test]
    fn test_convert_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("search_index.js");
        let output = dir.path().join("search_index.json");
        fs::write(&input, INDEX).unwrap();

        execute_command(parse(&[
            "convert",
            input.to_str().unwrap(),
            "--to",
            "json",
            "-o",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        let json = fs::read_to_string(&output).unwrap();
        assert!(json.starts_with("{\"docs\":["));
        let reloaded = crate::loader::load(&json).unwrap();
        assert_eq!(reloaded, crate::loader::load(INDEX).unwrap());

        // And back to the generator layout.
        let back = dir.path().join("back.js");
        execute_command(parse(&[
            "convert",
            output.to_str().unwrap(),
            "-o",
            back.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(fs::read_to_string(&back).unwrap(), INDEX);
    }

    #[test]
    fn test_config_file_applies_to_loader() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("search_index.js");
        let config = dir.path().join("docindex.json");
        fs::write(&index, INDEX).unwrap();
        fs::write(&config, r#"{"loader": {"variable_name": "otherIndex"}}"#).unwrap();

        let args = DocIndexArgs::try_parse_from([
            "docindex",
            "--quiet",
            "--config",
            config.to_str().unwrap(),
            "stats",
            index.to_str().unwrap(),
        ])
        .unwrap();
        let err = execute_command(args).unwrap_err();
        assert!(err.is_malformed());
    }
}

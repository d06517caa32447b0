use super::defaults::{DefaultsConfig, MAX_THRESHOLD, MIN_THRESHOLD};
use super::file::FileConfig;
use super::models::{AppConfig, StructureSettings};
use crate::cli::ScoringArgs;
use crate::error::{CliError, Result};
use episcan::core::io::report::ReportFormat;
use episcan::engine::config::PredictionConfigBuilder;
use std::path::Path;
use std::time::Duration;

/// Merges command-line values, the optional TOML file and `-S` overrides on
/// top of the built-in defaults. Command-line flags win over the file.
pub fn build_config(
    config_path: Option<&Path>,
    args: &ScoringArgs,
    skip_known_epitopes: bool,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let scoring_file = file_config.scoring.take().unwrap_or_default();
    let window = args
        .window
        .or(scoring_file.window)
        .unwrap_or(defaults.window);
    let threshold = args
        .threshold
        .or(scoring_file.threshold)
        .unwrap_or(defaults.threshold);
    if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        return Err(CliError::Argument(format!(
            "Threshold must be between {} and {} (got {}).",
            MIN_THRESHOLD, MAX_THRESHOLD, threshold
        )));
    }
    let locate_known_epitopes = !skip_known_epitopes
        && scoring_file
            .locate_known_epitopes
            .unwrap_or(defaults.locate_known_epitopes);

    let overlay = file_config.viewer.take().unwrap_or_default().into_style();

    let prediction = PredictionConfigBuilder::new()
        .window(window)
        .threshold(threshold)
        .overlay(overlay)
        .locate_known_epitopes(locate_known_epitopes)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let structure_file = file_config.structure.take().unwrap_or_default();
    let timeout_secs = structure_file
        .timeout_secs
        .unwrap_or(defaults.structure_timeout_secs);
    if timeout_secs == 0 {
        return Err(CliError::Config(
            "structure.timeout-secs must be at least 1.".to_string(),
        ));
    }
    let structure = StructureSettings {
        base_url: structure_file
            .base_url
            .unwrap_or(defaults.structure_base_url),
        timeout: Duration::from_secs(timeout_secs),
        cache_dir: structure_file.cache_dir,
    };

    let format = match (args.format, file_config.output.and_then(|o| o.format)) {
        (Some(format), _) => format.into(),
        (None, Some(name)) => name
            .parse::<ReportFormat>()
            .map_err(CliError::Config)?,
        (None, None) => defaults.format,
    };

    Ok(AppConfig {
        prediction,
        structure,
        format,
        output: args.output.clone(),
    })
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "scoring.window" => {
                config.scoring.get_or_insert_with(Default::default).window =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "scoring.threshold" => {
                config.scoring.get_or_insert_with(Default::default).threshold =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.locate-known-epitopes" => {
                config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .locate_known_epitopes = Some(parse_value(key, value_str, "boolean")?);
            }
            "structure.base-url" => {
                config.structure.get_or_insert_with(Default::default).base_url =
                    Some(value_str.to_string());
            }
            "structure.timeout-secs" => {
                config
                    .structure
                    .get_or_insert_with(Default::default)
                    .timeout_secs = Some(parse_value(key, value_str, "integer")?);
            }
            "structure.cache-dir" => {
                config.structure.get_or_insert_with(Default::default).cache_dir =
                    Some(value_str.into());
            }
            "viewer.width" => {
                config.viewer.get_or_insert_with(Default::default).width =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "viewer.height" => {
                config.viewer.get_or_insert_with(Default::default).height =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "viewer.backbone-color" => {
                config
                    .viewer
                    .get_or_insert_with(Default::default)
                    .backbone_color = Some(value_str.to_string());
            }
            "viewer.highlight-scheme" => {
                config
                    .viewer
                    .get_or_insert_with(Default::default)
                    .highlight_scheme = Some(value_str.to_string());
            }
            "viewer.script-url" => {
                config.viewer.get_or_insert_with(Default::default).script_url =
                    Some(value_str.to_string());
            }
            "output.format" => {
                config.output.get_or_insert_with(Default::default).format =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

use crate::cli::{DiffOutput, OutputType};
use anyhow::Context;
use std::path::{Path, PathBuf};
use userjs::{
    configuration_to_user_js, diff, load_file_with_config, merge_files, query_preferences,
    to_user_js, LoaderConfig, MergeConfig, PreferenceSet,
};

/// Print the preferences of a single file
pub fn load(
    file: &Path,
    query_patterns: &[String],
    output: OutputType,
    loader: &LoaderConfig,
) -> anyhow::Result<()> {
    let preferences = load_set(file, loader)?;

    let preferences = if query_patterns.is_empty() {
        preferences
    } else {
        let patterns: Vec<&str> = query_patterns.iter().map(String::as_str).collect();
        query_preferences(&preferences, &patterns).context("Failed to apply query")?
    };

    let rendered = match output {
        OutputType::JsonObject => serde_json::to_string_pretty(&preferences)?,
        OutputType::JsonArray => serde_json::to_string_pretty(preferences.entries())?,
        OutputType::UserJs => to_user_js(&preferences),
    };
    print_output(&rendered);
    Ok(())
}

/// Print the effective configuration after applying `files` in order
pub fn merge(
    files: &[PathBuf],
    continue_on_error: bool,
    output: OutputType,
    loader: &LoaderConfig,
) -> anyhow::Result<()> {
    let config = MergeConfig {
        loader: loader.clone(),
        continue_on_error,
    };
    let merged = merge_files(files, &config).context("Failed to merge preference files")?;

    for warning in &merged.warnings {
        eprintln!("Warning: {}", warning);
    }

    let rendered = match output {
        OutputType::JsonObject => serde_json::to_string_pretty(&merged.config)?,
        OutputType::JsonArray => serde_json::to_string_pretty(merged.config.entries())?,
        OutputType::UserJs => configuration_to_user_js(&merged.config),
    };
    print_output(&rendered);
    Ok(())
}

/// Print the differences between two files
pub fn diff_files(
    old: &Path,
    new: &Path,
    output: DiffOutput,
    loader: &LoaderConfig,
) -> anyhow::Result<()> {
    let old_set = load_set(old, loader)?;
    let new_set = load_set(new, loader)?;
    let report = diff(&old_set, &new_set);

    match output {
        DiffOutput::Text => print!("{}", report),
        DiffOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn load_set(path: &Path, loader: &LoaderConfig) -> anyhow::Result<PreferenceSet> {
    load_file_with_config(path, loader)
        .with_context(|| format!("Failed to load preferences from {}", path.display()))
}

/// user.js output already ends with a newline, JSON does not
fn print_output(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}

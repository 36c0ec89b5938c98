#![deny(missing_docs)]

//! # Run Command
//!
//! Applies one recipe to every matching source file under a root directory.
//!
//! Failures are isolated twice over: a file that cannot be read or parsed is
//! skipped with a warning, and a declaration whose patch fails is kept
//! verbatim while the rest of its file still goes through.

use crate::error::{CliError, CliResult};
use repatch_core::{recipes, render_unit, Recipe, RecipeConfig, SourceParser};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Arguments for the run command.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Root directory (or single file) to process.
    #[clap(default_value = ".")]
    pub root: PathBuf,

    /// Path to a recipe file (YAML, or JSON by extension).
    #[clap(long, conflicts_with = "stock")]
    pub recipe: Option<PathBuf>,

    /// Name of a stock recipe (see `repatch list`).
    #[clap(long)]
    pub stock: Option<String>,

    /// Fully qualified name of the class to patch (with --stock).
    #[clap(long)]
    pub target: Option<String>,

    /// Extra recipe arguments: role prefix, model type, or property names.
    #[clap(long = "arg")]
    pub args: Vec<String>,

    /// Report what would change without writing any file.
    #[clap(long)]
    pub dry_run: bool,

    /// File extension to process.
    #[clap(long, default_value = "java")]
    pub extension: String,
}

/// Executes the run command.
pub fn execute(args: &RunArgs) -> CliResult<()> {
    let config = load_config(args)?;
    let recipe = Recipe::new(config)?;
    let parser = SourceParser::new();

    println!(
        "Applying recipe '{}' to {:?} (target {})...",
        recipe.config().name,
        args.root,
        recipe.config().target_fqn
    );

    let mut scanned = 0usize;
    let mut patched_files = 0usize;
    let mut failures = 0usize;

    for entry in WalkDir::new(&args.root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || path.extension() != Some(OsStr::new(args.extension.as_str())) {
            continue;
        }
        scanned += 1;
        match process_file(path, &recipe, &parser, args.dry_run) {
            Ok(report) => {
                if report.changed {
                    patched_files += 1;
                }
                failures += report.failures;
            }
            Err(e) => {
                // One broken file must not stop the batch.
                eprintln!("Warning: skipping {:?}: {}", path, e);
                failures += 1;
            }
        }
    }

    println!(
        "Done: {} file(s) scanned, {} patched, {} failure(s).",
        scanned, patched_files, failures
    );
    Ok(())
}

struct FileReport {
    changed: bool,
    failures: usize,
}

fn process_file(
    path: &Path,
    recipe: &Recipe,
    parser: &SourceParser,
    dry_run: bool,
) -> CliResult<FileReport> {
    let content = fs::read_to_string(path)?;
    let unit = parser.parse_unit(&content)?;

    let outcome = recipe.apply_to_unit(&unit, parser);
    for failure in &outcome.failures {
        eprintln!(
            "Warning: could not patch '{}' in {:?}: {}",
            failure.declaration, path, failure.error
        );
    }

    let mut changed = false;
    if outcome.changed() {
        let new_content = render_unit(&outcome.unit);
        if dry_run {
            println!("Would patch {:?}", path);
            changed = true;
        } else if new_content != content {
            fs::write(path, new_content)?;
            println!("Patched {:?}", path);
            changed = true;
        }
    }

    Ok(FileReport {
        changed,
        failures: outcome.failures.len(),
    })
}

fn load_config(args: &RunArgs) -> CliResult<RecipeConfig> {
    if let Some(path) = &args.recipe {
        let text = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text).map_err(|e| {
                CliError::General(format!("Invalid recipe file {:?}: {}", path, e))
            })?,
            _ => serde_yaml::from_str(&text).map_err(|e| {
                CliError::General(format!("Invalid recipe file {:?}: {}", path, e))
            })?,
        };
        Ok(config)
    } else if let Some(name) = &args.stock {
        let target = args.target.as_deref().ok_or_else(|| {
            CliError::General("--target is required with --stock".into())
        })?;
        Ok(recipes::stock(name, target, &args.args)?)
    } else {
        Err(CliError::General(
            "Provide --recipe <file> or --stock <name>".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn run_args(root: PathBuf) -> RunArgs {
        RunArgs {
            root,
            recipe: None,
            stock: Some("web-client-factory".into()),
            target: Some("com.acme.Bar".into()),
            args: vec![],
            dry_run: false,
            extension: "java".into(),
        }
    }

    fn write_file(path: &Path, content: &str) {
        File::create(path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }

    const TARGET_SOURCE: &str = "package com.acme;\n\npublic class Bar {\n\n    private String stale;\n}\n";

    #[test]
    fn test_run_patches_target_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Bar.java");
        write_file(&file_path, TARGET_SOURCE);

        execute(&run_args(dir.path().to_path_buf())).unwrap();

        let new_code = fs::read_to_string(&file_path).unwrap();
        assert!(new_code.contains("@Configuration"));
        assert!(new_code.contains("private final FalconWebClientFactory falconWebClientFactory;"));
        assert!(!new_code.contains("stale"));
    }

    #[test]
    fn test_run_leaves_non_target_untouched() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Other.java");
        let source = "package com.acme;\n\npublic class Other {\n}\n";
        write_file(&file_path, source);

        execute(&run_args(dir.path().to_path_buf())).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), source);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Bar.java");
        write_file(&file_path, TARGET_SOURCE);

        let mut args = run_args(dir.path().to_path_buf());
        args.dry_run = true;
        execute(&args).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), TARGET_SOURCE);
    }

    #[test]
    fn test_unparseable_file_is_skipped() {
        let dir = tempdir().unwrap();
        write_file(&dir.path().join("Bad.java"), "this is not a class");
        let file_path = dir.path().join("Bar.java");
        write_file(&file_path, TARGET_SOURCE);

        // The broken file must not prevent the good one from being patched.
        execute(&run_args(dir.path().to_path_buf())).unwrap();
        assert!(fs::read_to_string(&file_path)
            .unwrap()
            .contains("@Configuration"));
    }

    #[test]
    fn test_load_config_from_yaml() {
        let dir = tempdir().unwrap();
        let recipe_path = dir.path().join("recipe.yaml");
        write_file(
            &recipe_path,
            r#"name: custom
target_fqn: com.acme.Foo
marker_fields: [usersPath]
template: |
  @Getter
  private String usersPath;
annotations:
  - name: Configuration
imports:
  - org.springframework.context.annotation.Configuration
"#,
        );

        let mut args = run_args(dir.path().to_path_buf());
        args.stock = None;
        args.target = None;
        args.recipe = Some(recipe_path);

        let config = load_config(&args).unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.target_fqn, "com.acme.Foo");
        assert_eq!(config.marker_fields, vec!["usersPath"]);
        assert!(config.prune_fields);
        assert_eq!(config.annotations[0].name, "Configuration");
    }

    #[test]
    fn test_missing_recipe_selection_is_an_error() {
        let mut args = run_args(PathBuf::from("."));
        args.stock = None;
        assert!(execute(&args).is_err());
    }

    #[test]
    fn test_stock_requires_target() {
        let mut args = run_args(PathBuf::from("."));
        args.target = None;
        assert!(execute(&args).is_err());
    }
}

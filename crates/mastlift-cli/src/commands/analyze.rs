use mastlift_core::error::MastliftError;
use mastlift_core::model::{EquipmentComparison, SiteContext};
use mastlift_core::rules::schema::KeywordTable;
use mastlift_core::rules::{self, builtin};
use mastlift_core::source::DocumentSource;
use mastlift_core::summary::AnalysisResult;
use mastlift_core::Analyzer;
use std::path::Path;
use tracing::info;

use crate::output;
use crate::AnalyzeArgs;

pub fn run(args: AnalyzeArgs) -> Result<(), MastliftError> {
    let ctx = site_context(&args)?;

    let structure = keyword_table(
        args.structure_preset.as_deref(),
        args.structure_keywords.as_deref(),
        "structure",
    )?;
    let environment = keyword_table(
        args.environment_preset.as_deref(),
        args.environment_keywords.as_deref(),
        "environment",
    )?;
    let policy = match args.policy {
        Some(ref path) => rules::load_policy(path)?,
        None => builtin::default_policy()?,
    };
    let comparison = match args.comparison {
        Some(ref path) => load_comparison(path)?,
        None => EquipmentComparison::default(),
    };

    let analyzer = Analyzer::new(&structure, &environment, policy)?;
    info!(
        files = args.input_files.len(),
        structure_table = %structure.name,
        environment_table = %environment.name,
        "starting analysis"
    );

    // Each document is independent; one analyzer serves every worker.
    let format = args.format.as_deref();
    let outcomes: Vec<Result<AnalysisResult, MastliftError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = args
            .input_files
            .iter()
            .map(|path| {
                let analyzer = &analyzer;
                let ctx = &ctx;
                let comparison = comparison.clone();
                scope.spawn(move || -> Result<AnalysisResult, MastliftError> {
                    let source = DocumentSource::from_file(path, format)?;
                    analyzer.analyze_with_comparison(&source, ctx, comparison)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join().unwrap_or_else(|_| {
                    Err(MastliftError::ExtractionFailure {
                        source_id: "worker".into(),
                        reason: "analysis thread panicked".into(),
                    })
                })
            })
            .collect()
    });

    let mut results = Vec::new();
    let mut first_error = None;
    for outcome in outcomes {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    if let Some(ref path) = args.out {
        // Always write JSON when saving to file
        output::json::write(&results, path)?;
        eprintln!("Analyzed {} document(s), written to {}", results.len(), path.display());
    } else {
        match args.output.as_str() {
            "json" => output::json::print(&results)?,
            _ => {
                for (i, result) in results.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    output::table::print(result, args.show_lines);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Site context from the optional JSON file, then the command-line flags.
fn site_context(args: &AnalyzeArgs) -> Result<SiteContext, MastliftError> {
    let mut ctx = match args.site {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        }
        None => SiteContext::default(),
    };

    if args.no_climbing_access {
        ctx.has_climbing_access = false;
    }
    if args.force_skylift {
        ctx.force_skylift = true;
    }
    if args.force_crane {
        ctx.force_crane = true;
    }
    if let Some(setback) = args.setback_m {
        ctx.setback_m = setback;
    }
    if let Some(elevation) = args.rooftop_elevation_m {
        ctx.rooftop_elevation_m = elevation;
    }

    Ok(ctx)
}

/// A custom table file wins over a preset name; neither means `default`.
fn keyword_table(
    preset: Option<&str>,
    file: Option<&Path>,
    default: &str,
) -> Result<KeywordTable, MastliftError> {
    match (file, preset) {
        (Some(path), _) => rules::load_table(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::load_preset(default),
    }
}

fn load_comparison(path: &Path) -> Result<EquipmentComparison, MastliftError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

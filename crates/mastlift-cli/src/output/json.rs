use mastlift_core::error::MastliftError;
use mastlift_core::summary::AnalysisResult;
use std::path::Path;

/// A single analysis prints as an object, several as an array.
fn render(results: &[AnalysisResult]) -> Result<String, MastliftError> {
    let json = match results {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(results)?,
    };
    Ok(json)
}

pub fn print(results: &[AnalysisResult]) -> Result<(), MastliftError> {
    println!("{}", render(results)?);
    Ok(())
}

pub fn write(results: &[AnalysisResult], path: &Path) -> Result<(), MastliftError> {
    std::fs::write(path, render(results)?)?;
    Ok(())
}

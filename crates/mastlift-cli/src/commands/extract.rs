use mastlift_core::error::MastliftError;
use mastlift_core::source::{self, DefaultExtractor, DocumentSource};
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    format: Option<&str>,
    output_format: &str,
) -> Result<(), MastliftError> {
    let source = DocumentSource::from_file(&input_file, format)?;
    let document = source::read_document(&source, &DefaultExtractor::new())?;

    match output_format {
        "json" => println!("{}", serde_json::to_string_pretty(&document)?),
        _ => {
            for line in document.lines() {
                println!("{line}");
            }
        }
    }

    eprintln!(
        "{}: {} line(s) from {} {} unit(s)",
        document.source_id,
        document.lines().len(),
        document.unit_count,
        source.format
    );
    Ok(())
}

use mastlift_core::numeric::WeightSource;
use mastlift_core::summary::{AnalysisResult, SectionSummary};

pub fn print(result: &AnalysisResult, show_lines: bool) {
    println!("=== Technical Proposal Analysis: {} ===\n", result.source);

    print_section(&result.structure, show_lines);
    print_section(&result.environment, show_lines);

    println!("Derived values:");
    println!("  Structure type: {}", result.structure_type);
    match result.max_agl {
        Some(agl) => println!("  Max AGL: {agl} m"),
        None => println!("  Max AGL: not found"),
    }
    let weight_origin = match result.numeric.weights.source {
        WeightSource::Document => "from document",
        WeightSource::Fallback => "typical equipment weights",
    };
    println!(
        "  Heaviest item: {} kg ({})",
        result.heaviest_item_kg, weight_origin
    );
    println!();

    println!("Recommendations:");
    for advisory in &result.recommendations {
        println!("  - {advisory}");
    }
    println!();

    if !result.estimates.is_empty() {
        println!("Estimates:");
        let width = result.estimates.keys().map(|k| k.len()).max().unwrap_or(10);
        for (name, value) in &result.estimates {
            println!("  {:<width$}  {}", name, value, width = width);
        }
        println!();
    }

    if let Some(ref comparison) = result.comparison {
        if !comparison.equipment_counts.is_empty() {
            println!("Equipment Comparison:");
            for row in &comparison.equipment_counts {
                println!(
                    "  {}: Before={} After={}",
                    row.category, row.before, row.after
                );
            }
            println!();
        }
        if !comparison.tower_load.is_empty() {
            println!("Tower Load Comparison:");
            for row in &comparison.tower_load {
                println!("  {}: {} kg", row.condition, row.load_kg);
            }
            println!();
        }
    }
}

fn print_section(section: &SectionSummary, show_lines: bool) {
    println!("{}:", section.title);
    let width = section
        .summaries
        .iter()
        .map(|s| s.category.len())
        .max()
        .unwrap_or(10);

    for summary in &section.summaries {
        println!(
            "  {:<width$}  {}",
            summary.category,
            summary.text,
            width = width
        );
        if show_lines {
            if let Some(lines) = section.buckets.get(&summary.category) {
                for line in lines {
                    println!("    | {}", line.trim());
                }
            }
        }
    }
    println!("  Overview: {}\n", section.overview);
}

use mastlift_core::error::MastliftError;
use mastlift_core::rules::builtin;
use mastlift_core::rules::schema::{KeywordTable, MatchStrategy};
use std::path::Path;

pub fn list() -> Result<(), MastliftError> {
    println!("Available keyword tables:\n");
    for name in builtin::PRESETS {
        let table = builtin::load_preset(name)?;
        println!("  {:<12} {} (v{})", name, table.name, table.version);
        if let Some(ref desc) = table.description {
            println!("               {}", desc);
        }
        println!(
            "               categories: {}",
            table.category_names().collect::<Vec<_>>().join(", ")
        );
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), MastliftError> {
    let table = builtin::load_preset(preset)?;
    print_table(&table);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), MastliftError> {
    let table = mastlift_core::rules::load_table(file)?;

    println!("Keyword table '{}' (v{}) is valid.", table.name, table.version);
    println!(
        "  Categories: {}",
        table.category_names().collect::<Vec<_>>().join(", ")
    );

    // Overlaps are allowed but usually unintended
    let mut warnings = Vec::new();
    for (i, a) in table.categories.iter().enumerate() {
        for b in &table.categories[i + 1..] {
            for kw in &a.keywords {
                if b.keywords.iter().any(|k| k.eq_ignore_ascii_case(kw)) {
                    warnings.push(format!(
                        "keyword '{}' appears in both '{}' and '{}'",
                        kw, a.name, b.name
                    ));
                }
            }
        }
    }
    if table.matching == MatchStrategy::Substring {
        for category in &table.categories {
            for kw in category.keywords.iter().filter(|k| k.trim().len() <= 2) {
                warnings.push(format!(
                    "short keyword '{}' in '{}' will match inside longer words",
                    kw, category.name
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn print_table(table: &KeywordTable) {
    println!("{} (version {})\n", table.name, table.version);
    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    let matching = match table.matching {
        MatchStrategy::Substring => "substring",
        MatchStrategy::Word => "whole word",
        MatchStrategy::Regex => "regular expression",
    };
    let overlap = if table.exclusive {
        "each line goes to the first matching category"
    } else {
        "a line may land in several categories"
    };
    println!("Matching: {matching}, {overlap}.\n");

    for category in &table.categories {
        print!("  {}", category.name);
        match category.description {
            Some(ref desc) => println!(" -- {}", desc),
            None => println!(),
        }
        println!("    {}", category.keywords.join(", "));
        println!();
    }
}

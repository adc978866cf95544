use mastlift_core::error::MastliftError;
use mastlift_core::rules::schema::LiftingPolicy;
use mastlift_core::rules::{builtin, load_policy};
use std::path::Path;

pub fn show() -> Result<(), MastliftError> {
    print_policy(&builtin::default_policy()?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), MastliftError> {
    let policy = load_policy(file)?;
    println!("Lifting policy '{}' (v{}) is valid.\n", policy.name, policy.version);
    print_policy(&policy);
    Ok(())
}

fn print_policy(policy: &LiftingPolicy) {
    println!("{} (version {})\n", policy.name, policy.version);
    println!(
        "Heights kept between {} and {} m; working height adds {} m clearance.",
        policy.height_min_m, policy.height_max_m, policy.clearance_m
    );
    let fallback: Vec<String> = policy
        .fallback_weights_kg
        .iter()
        .map(|w| w.to_string())
        .collect();
    println!("Typical weights when none are stated: {} kg\n", fallback.join(", "));

    println!("Crane classes (first that fits):");
    for band in &policy.tonnage_bands {
        let elevation = match band.max_elevation_m {
            Some(e) => format!(", elevation <= {} m", e),
            None => String::new(),
        };
        println!(
            "  {:>3} t  load <= {} kg, radius <= {} m{}",
            band.tons, band.max_load_kg, band.max_radius_m, elevation
        );
    }
    println!("  {:>3} t  otherwise", policy.fallback_tons);
}

pub mod estimate;

pub use estimate::{CraneEstimate, EstimateValue, Estimates};

use crate::model::{SiteContext, StructureType};
use crate::rules::schema::LiftingPolicy;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Advisory text plus the quantities behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub advisories: Vec<String>,
    pub estimates: Estimates,
}

/// Derive the lifting recommendation for one site.
///
/// Overrides in the site context replace the structure-based advice. When
/// any override is set, the overrides alone decide which estimates appear.
pub fn recommend(
    structure: StructureType,
    max_agl: Option<u32>,
    heaviest_kg: Decimal,
    ctx: &SiteContext,
    policy: &LiftingPolicy,
) -> Recommendation {
    let mut advisories = Vec::new();
    let height = estimate::working_height(max_agl, policy);
    let crane = estimate::size_crane(heaviest_kg, ctx.setback_m, ctx.rooftop_elevation_m, policy);
    let overridden = ctx.force_crane || ctx.force_skylift;

    if ctx.force_crane {
        advisories.push(format!(
            "Override: mobile crane requested for this site; {}",
            describe_crane(&crane)
        ));
    }
    if ctx.force_skylift {
        advisories.push(format!(
            "Override: skylift/boom lift requested for this site; {}",
            describe_height(&height, max_agl, policy)
        ));
    }

    if !overridden {
        advisories.push(structure_advice(structure, ctx, &height, &crane, max_agl, policy));
    }

    let skylift_driven = if overridden {
        ctx.force_skylift
    } else {
        structure == StructureType::Lampole
            || (structure.is_monopole_family() && !ctx.has_climbing_access)
    };
    let crane_driven = if overridden {
        ctx.force_crane
    } else {
        structure == StructureType::Rooftop
    };

    let estimates = Estimates {
        working_height: skylift_driven.then_some(height),
        crane: crane_driven.then_some(crane),
    };
    debug!(%structure, skylift_driven, crane_driven, "recommendation derived");

    Recommendation {
        advisories,
        estimates,
    }
}

fn structure_advice(
    structure: StructureType,
    ctx: &SiteContext,
    height: &EstimateValue,
    crane: &CraneEstimate,
    max_agl: Option<u32>,
    policy: &LiftingPolicy,
) -> String {
    match structure {
        s if s.is_monopole_family() && ctx.has_climbing_access => format!(
            "Climbing access available on the {s}: hoist equipment with rope and chain-block rigging; no lift equipment needed."
        ),
        s if s.is_monopole_family() => format!(
            "No climbing access on the {s}: use a boom lift; {}",
            describe_height(height, max_agl, policy)
        ),
        StructureType::Lampole => format!(
            "Lampoles have no climbing provisions: use a skylift/boom lift; {}",
            describe_height(height, max_agl, policy)
        ),
        StructureType::Rooftop => format!("Rooftop site: use a mobile crane; {}", describe_crane(crane)),
        _ => "Structure type unclear: choose tools per the site access policy and avoid cranes unless the site is confirmed rooftop or a heavy lift.".to_string(),
    }
}

fn describe_height(height: &EstimateValue, max_agl: Option<u32>, policy: &LiftingPolicy) -> String {
    match (height, max_agl) {
        (EstimateValue::Number(h), Some(agl)) => format!(
            "working height {h} m (max AGL {agl} m + {} m clearance).",
            policy.clearance_m
        ),
        _ => format!("working height {height} m (no installation height found in the document)."),
    }
}

fn describe_crane(crane: &CraneEstimate) -> String {
    format!(
        "estimated {} t class for {} kg at {} m radius and {} m elevation.",
        crane.tonnage_t, crane.load_kg, crane.radius_m, crane.elevation_m
    )
}

//! Closed-form solution chemistry: pH/pOH, buffer composition by
//! Henderson-Hasselbalch, and dilution by C1V1 = C2V2. Pure functions over
//! their numeric inputs; invalid numbers come back as `Domain` errors, never
//! as NaN leaking out of a logarithm.
use crate::errors::ChemEngineError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhResult {
    pub ph: f64,
    pub poh: f64,
    pub concentration: f64,
    pub kind: String,
    pub is_acidic: bool,
    pub is_basic: bool,
    pub is_neutral: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferComposition {
    pub target_ph: f64,
    pub pka: f64,
    pub acid_concentration: f64,
    pub base_concentration: f64,
    pub total_concentration: f64,
    pub acid_base_ratio: f64,
    /// "optimal" when the conjugate ratio lies within a decade of 1
    pub buffer_capacity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DilutionResult {
    pub initial_concentration: f64,
    pub initial_volume: f64,
    pub final_concentration: f64,
    pub final_volume: f64,
    /// negative when the "dilution" actually concentrates
    pub solvent_to_add: f64,
}

fn require_positive(name: &str, value: f64) -> Result<(), ChemEngineError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChemEngineError::Domain(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn require_finite(name: &str, value: f64) -> Result<(), ChemEngineError> {
    if !value.is_finite() {
        return Err(ChemEngineError::Domain(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}

/// pH and pOH of a solution of the given concentration (mol/L).
///
/// `kind` selects the branch: `strong_acid`, `strong_base`, `weak_acid` and
/// `weak_base` (the weak branches need `pka` and use the
/// Henderson-Hasselbalch approximation). Any other kind is taken as neutral
/// water, pH 7, without error.
pub fn calculate_ph(
    concentration: f64,
    kind: &str,
    pka: Option<f64>,
) -> Result<PhResult, ChemEngineError> {
    require_positive("concentration", concentration)?;
    let need_pka = || -> Result<f64, ChemEngineError> {
        let pka = pka.ok_or_else(|| {
            ChemEngineError::Domain(format!("kind '{}' requires a pKa value", kind))
        })?;
        require_finite("pKa", pka)?;
        Ok(pka)
    };

    let ph = match kind {
        "strong_acid" => -concentration.log10(),
        "strong_base" => {
            let poh = -concentration.log10();
            14.0 - poh
        }
        "weak_acid" => need_pka()? - concentration.log10(),
        "weak_base" => {
            let pkb = 14.0 - need_pka()?;
            let poh = pkb - concentration.log10();
            14.0 - poh
        }
        _ => 7.0,
    };

    Ok(PhResult {
        ph,
        poh: 14.0 - ph,
        concentration,
        kind: kind.to_string(),
        is_acidic: ph < 7.0,
        is_basic: ph > 7.0,
        is_neutral: 6.5 < ph && ph < 7.5,
    })
}

/// Composition of a buffer hitting `target_ph` with an acid of the given
/// `pka` at `total_concentration` mol/L. Henderson-Hasselbalch:
/// `ratio = [A-]/[HA] = 10^(pH - pKa)`, then the two concentrations split
/// the total so they sum to it exactly.
pub fn buffer_composition(
    target_ph: f64,
    pka: f64,
    total_concentration: f64,
) -> Result<BufferComposition, ChemEngineError> {
    require_finite("target pH", target_ph)?;
    require_finite("pKa", pka)?;
    require_positive("total concentration", total_concentration)?;

    let ratio = 10f64.powf(target_ph - pka);
    let acid_concentration = total_concentration / (1.0 + ratio);
    let base_concentration = total_concentration - acid_concentration;
    let buffer_capacity = if 0.1 < ratio && ratio < 10.0 {
        "optimal"
    } else {
        "suboptimal"
    };

    Ok(BufferComposition {
        target_ph,
        pka,
        acid_concentration,
        base_concentration,
        total_concentration,
        acid_base_ratio: ratio,
        buffer_capacity: buffer_capacity.to_string(),
    })
}

/// Dilution by C1V1 = C2V2. Exactly one of `final_concentration` /
/// `final_volume` must be supplied; the other is derived.
/// `solvent_to_add` is reported as-is even when negative - that signals the
/// target is more concentrated than the starting solution.
pub fn dilution(
    initial_concentration: f64,
    initial_volume: f64,
    final_concentration: Option<f64>,
    final_volume: Option<f64>,
) -> Result<DilutionResult, ChemEngineError> {
    require_positive("initial concentration", initial_concentration)?;
    require_positive("initial volume", initial_volume)?;

    let (c2, v2) = match (final_concentration, final_volume) {
        (Some(c2), None) => {
            require_positive("final concentration", c2)?;
            (c2, initial_concentration * initial_volume / c2)
        }
        (None, Some(v2)) => {
            require_positive("final volume", v2)?;
            (initial_concentration * initial_volume / v2, v2)
        }
        (Some(_), Some(_)) => {
            return Err(ChemEngineError::Domain(
                "supply either final concentration or final volume, not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(ChemEngineError::Domain(
                "supply final concentration or final volume".to_string(),
            ));
        }
    };

    Ok(DilutionResult {
        initial_concentration,
        initial_volume,
        final_concentration: c2,
        final_volume: v2,
        solvent_to_add: v2 - initial_volume,
    })
}

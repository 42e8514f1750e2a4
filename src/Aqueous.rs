/// Closed-form solution chemistry: pH/pOH, Henderson-Hasselbalch buffers,
/// dilution by C1V1 = C2V2
///
///  # Examples
/// ```
/// use StoiChem::Aqueous::solution_chemistry::{calculate_ph, dilution};
/// let result = calculate_ph(0.01, "strong_acid", None).unwrap();
/// assert!((result.ph - 2.0).abs() < 1e-12);
/// let result = dilution(10.0, 1.0, Some(1.0), None).unwrap();
/// assert!((result.solvent_to_add - 9.0).abs() < 1e-12);
/// ```
pub mod solution_chemistry;

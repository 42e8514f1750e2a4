//! THE STRUCT ReactionEngine IS THE API OF THE WHOLE CRATE: it owns the
//! bounded balance cache and the molar mass capability, both chosen once
//! from `EngineSettings`, and exposes the five engine operations:
//!
//! 1) balancing a chemical equation
//! 2) stoichiometric amount conversion between two species of an equation
//! 3) pH/pOH of a solution
//! 4) buffer composition for a target pH
//! 5) dilution by C1V1 = C2V2
//!
//! Every operation is a pure function of its inputs (the cache only
//! memoizes), returns a serializable result record or a `ChemEngineError`,
//! and is safe to call from concurrent threads.
use crate::Aqueous::solution_chemistry::{
    BufferComposition, DilutionResult, PhResult, buffer_composition, calculate_ph, dilution,
};
use crate::Balancer::equation_balancer::{
    BalancedEquation, balance_equation, canonicalize_equation,
};
use crate::Balancer::stoichiometry::{StoichiometryResult, stoichiometric_amount};
use crate::errors::ChemEngineError;
use crate::molar_mass_api::{MolarMassEnum, create_molar_mass_provider};
use crate::result_cache::BalanceCache;
use crate::settings::EngineSettings;

pub struct ReactionEngine {
    settings: EngineSettings,
    cache: BalanceCache,
    molar_masses: MolarMassEnum,
}

impl ReactionEngine {
    pub fn new(settings: EngineSettings) -> Self {
        let cache = BalanceCache::new(settings.cache_capacity);
        let molar_masses = create_molar_mass_provider(&settings.molar_mass_mode);
        Self {
            settings,
            cache,
            molar_masses,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Balance an equation, through the cache.
    pub fn balance_equation(&self, equation: &str) -> Result<BalancedEquation, ChemEngineError> {
        let key = canonicalize_equation(equation);
        self.cache.get_or_compute(&key, || balance_equation(equation))
    }

    /// Balance `equation`, then convert `given_amount` of `given_species`
    /// into the amount of `target_species` in `unit` ("mol", "g" or "L").
    pub fn calculate_stoichiometry(
        &self,
        equation: &str,
        given_species: &str,
        given_amount: f64,
        target_species: &str,
        unit: &str,
    ) -> Result<StoichiometryResult, ChemEngineError> {
        let balanced = self.balance_equation(equation)?;
        stoichiometric_amount(
            &balanced,
            given_species,
            given_amount,
            target_species,
            unit,
            &self.molar_masses,
        )
    }

    pub fn calculate_ph(
        &self,
        concentration: f64,
        kind: &str,
        pka: Option<f64>,
    ) -> Result<PhResult, ChemEngineError> {
        calculate_ph(concentration, kind, pka)
    }

    pub fn buffer_calculator(
        &self,
        target_ph: f64,
        pka: f64,
        total_concentration: f64,
    ) -> Result<BufferComposition, ChemEngineError> {
        buffer_composition(target_ph, pka, total_concentration)
    }

    pub fn dilution_calculator(
        &self,
        initial_concentration: f64,
        initial_volume: f64,
        final_concentration: Option<f64>,
        final_volume: Option<f64>,
    ) -> Result<DilutionResult, ChemEngineError> {
        dilution(
            initial_concentration,
            initial_volume,
            final_concentration,
            final_volume,
        )
    }
}

impl Default for ReactionEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

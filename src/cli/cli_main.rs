use crate::Examples::engine_examples::engine_examples;
use crate::engine_api::ReactionEngine;
use crate::errors::ChemEngineError;
use crate::settings::EngineSettings;
use log::warn;
use std::io::{self, Write};

pub const SETTINGS_FILE: &str = "stoichem_settings.json";

pub fn run_interactive_menu() {
    let settings = EngineSettings::from_json_file(SETTINGS_FILE).unwrap_or_else(|e| {
        warn!("settings file is malformed ({}), using defaults", e);
        EngineSettings::default()
    });
    let engine = ReactionEngine::new(settings);

    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => balance_menu(&engine),
            "2" => stoichiometry_menu(&engine),
            "3" => ph_menu(&engine),
            "4" => buffer_menu(&engine),
            "5" => dilution_menu(&engine),
            "6" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n Wellcome to StoiChem: chemical equation balancing,\n
    stoichiometry and solution chemistry \n \x1b[0m"
    );
    println!("\x1b[33m1. Balance a chemical equation\x1b[0m");
    println!("\x1b[33m2. Stoichiometric amounts\x1b[0m");
    println!("\x1b[33m3. pH of a solution\x1b[0m");
    println!("\x1b[33m4. Buffer composition\x1b[0m");
    println!("\x1b[33m5. Dilution\x1b[0m");
    println!("\x1b[33m6. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}

fn prompt(label: &str) -> String {
    print!("\x1b[36m{}: \x1b[0m", label);
    io::stdout().flush().unwrap();
    get_user_input().trim().to_string()
}

fn prompt_f64(label: &str) -> Option<f64> {
    let text = prompt(label);
    match text.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("'{}' is not a number", text);
            None
        }
    }
}

// empty input means "not supplied"
fn prompt_optional_f64(label: &str) -> Option<f64> {
    let text = prompt(label);
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

fn report_error(error: &ChemEngineError) {
    println!("\x1b[31m{}\x1b[0m", error);
}

fn balance_menu(engine: &ReactionEngine) {
    let equation = prompt("Equation, e.g. H2 + O2 = H2O");
    match engine.balance_equation(&equation) {
        Ok(balanced) => println!("{}", balanced.balanced),
        Err(e) => report_error(&e),
    }
}

fn stoichiometry_menu(engine: &ReactionEngine) {
    let equation = prompt("Equation");
    let given_species = prompt("Given species");
    let Some(given_amount) = prompt_f64("Given amount") else {
        return;
    };
    let target_species = prompt("Target species");
    let unit = prompt("Unit (mol/g/L)");
    match engine.calculate_stoichiometry(&equation, &given_species, given_amount, &target_species, &unit)
    {
        Ok(result) => {
            println!(
                "{} {} of {} -> {} {} of {} (molar ratio {})",
                result.given_amount,
                result.unit,
                result.given_species,
                result.target_amount,
                result.unit,
                result.target_species,
                result.molar_ratio
            );
            if result.approximate {
                println!("(mol-based approximation, molar masses unavailable)");
            }
        }
        Err(e) => report_error(&e),
    }
}

fn ph_menu(engine: &ReactionEngine) {
    let Some(concentration) = prompt_f64("Concentration, mol/L") else {
        return;
    };
    let kind = prompt("Kind (strong_acid/strong_base/weak_acid/weak_base)");
    let pka = if kind.starts_with("weak") {
        prompt_optional_f64("pKa")
    } else {
        None
    };
    match engine.calculate_ph(concentration, &kind, pka) {
        Ok(result) => println!("pH = {:.2}, pOH = {:.2}", result.ph, result.poh),
        Err(e) => report_error(&e),
    }
}

fn buffer_menu(engine: &ReactionEngine) {
    let Some(target_ph) = prompt_f64("Target pH") else {
        return;
    };
    let Some(pka) = prompt_f64("pKa") else { return };
    let Some(total) = prompt_f64("Total concentration, mol/L") else {
        return;
    };
    match engine.buffer_calculator(target_ph, pka, total) {
        Ok(buffer) => println!(
            "acid {:.4} M, conjugate base {:.4} M, ratio {:.4} ({})",
            buffer.acid_concentration,
            buffer.base_concentration,
            buffer.acid_base_ratio,
            buffer.buffer_capacity
        ),
        Err(e) => report_error(&e),
    }
}

fn dilution_menu(engine: &ReactionEngine) {
    let Some(c1) = prompt_f64("Initial concentration") else {
        return;
    };
    let Some(v1) = prompt_f64("Initial volume") else { return };
    let c2 = prompt_optional_f64("Final concentration (empty to derive)");
    let v2 = prompt_optional_f64("Final volume (empty to derive)");
    match engine.dilution_calculator(c1, v1, c2, v2) {
        Ok(result) => println!(
            "C2 = {:.4}, V2 = {:.4}, solvent to add = {:.4}",
            result.final_concentration, result.final_volume, result.solvent_to_add
        ),
        Err(e) => report_error(&e),
    }
}

fn examples_menu() {
    let text = prompt("Example task number (0..3)");
    match text.parse() {
        Ok(task) => engine_examples(task),
        Err(_) => println!("'{}' is not a task number", text),
    }
}

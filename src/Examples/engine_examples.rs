pub fn engine_examples(task: usize) {
    //

    match task {
        0 => {
            // EQUATION BALANCING
            use crate::Balancer::equation_balancer::balance_equation;
            use prettytable::{Cell, Row, Table};
            let equations = vec![
                "H2 + O2 = H2O",
                "C3H8 + O2 = CO2 + H2O",
                "Fe + O2 = Fe2O3",
                "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
                "Ca(OH)2 + HCl = CaCl2 + H2O",
            ];
            let mut table = Table::new();
            table.add_row(Row::new(vec![Cell::new("original"), Cell::new("balanced")]));
            for equation in equations {
                let balanced = balance_equation(equation).unwrap();
                table.add_row(Row::new(vec![
                    Cell::new(equation),
                    Cell::new(&balanced.balanced),
                ]));
            }
            table.printstd();
        }
        1 => {
            // STOICHIOMETRIC AMOUNTS
            use crate::engine_api::ReactionEngine;
            let engine = ReactionEngine::default();
            let result = engine
                .calculate_stoichiometry("C3H8 + O2 = CO2 + H2O", "C3H8", 2.0, "CO2", "mol")
                .unwrap();
            println!(
                "{} mol of {} yields {} mol of {} (molar ratio {})",
                result.given_amount,
                result.given_species,
                result.target_amount,
                result.target_species,
                result.molar_ratio
            );
            assert_eq!(result.target_amount, 6.0);

            let result = engine
                .calculate_stoichiometry("H2 + O2 = H2O", "H2", 4.0, "O2", "g")
                .unwrap();
            println!(
                "{} g of {} needs {} g of {}",
                result.given_amount, result.given_species, result.target_amount, result.target_species
            );
        }
        2 => {
            // SOLUTION CHEMISTRY: pH, BUFFER, DILUTION
            use crate::Aqueous::solution_chemistry::{buffer_composition, calculate_ph, dilution};
            let ph = calculate_ph(0.01, "strong_acid", None).unwrap();
            println!("0.01 M strong acid: pH {}, pOH {}", ph.ph, ph.poh);

            let ph = calculate_ph(0.1, "weak_acid", Some(4.76)).unwrap();
            println!("0.1 M acetic acid: pH {}", ph.ph);

            let buffer = buffer_composition(4.76, 4.76, 0.1).unwrap();
            println!(
                "acetate buffer at pH 4.76: acid {} M, base {} M ({})",
                buffer.acid_concentration, buffer.base_concentration, buffer.buffer_capacity
            );

            let dil = dilution(10.0, 1.0, Some(1.0), None).unwrap();
            println!(
                "10 M x 1 L to 1 M: final volume {} L, add {} L of solvent",
                dil.final_volume, dil.solvent_to_add
            );
        }
        3 => {
            // MOLAR MASSES AND ATOMIC COMPOSITION
            use crate::Balancer::parse_formula::parse_formula;
            let formulae = vec!["H2O", "NaCl", "C6H8O6", "Ca(NO3)2", "K3[Fe(CN)6]"];
            for text in formulae {
                let formula = parse_formula(text).unwrap();
                println!(
                    "{}: composition {:?}, molar mass {:.3} g/mol",
                    text,
                    formula.counts(),
                    formula.molar_mass()
                );
            }
        }
        _ => println!("no such example task: {}", task),
    }
}

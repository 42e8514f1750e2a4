/// Module to parse a chemical formula and return its atomic composition
///
///  # Examples
/// ```
/// use StoiChem::Balancer::parse_formula::parse_formula;
/// let formula = parse_formula("Ca(OH)2").unwrap();
/// println!("element counts: {:?}", formula.counts());
/// println!("molar mass: {} g/mol", formula.molar_mass());
/// ```
pub mod parse_formula;
/// The module takes parsed reactant and product formulas and produces the
/// signed element composition matrix: one row per element, one column per
/// species, negated entries on the product side
pub mod stoich_matrix;
/// Balancing of chemical equations by exact-fraction null space computation
///
///  # Examples
/// ```
/// use StoiChem::Balancer::equation_balancer::balance_equation;
/// let balanced = balance_equation("H2 + O2 = H2O").unwrap();
/// assert_eq!(balanced.balanced, "2H2 + O2 → 2H2O");
/// assert_eq!(balanced.coefficient_of("O2"), Some(1));
/// ```
pub mod equation_balancer;
/// Amount conversion between two species of a balanced equation
pub mod stoichiometry;
/// tests
pub mod balancer_tests;

use std::path::PathBuf;
use ndarray as nd;
use lib::{ mkdir, write_npz, sub, bar_chart, color, Curve, LineChart };
use qmech::{
    grid::Grid,
    oscillator::{ Eigenstate, Oscillator },
    perturbation::{ self, LevelShift, Perturbation },
};

// natural units
const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const OMEGA: f64 = 1.0;

const X_MIN: f64 = -5.0;
const X_MAX: f64 = 5.0;
const NPOINTS: usize = 1000;
const MAX_N: usize = 3;

const LAMBDA_4: f64 = 0.1; // x⁴ strength
const LAMBDA_3: f64 = 0.1; // x³ strength
const E_FIELD: f64 = 0.1; // uniform field strength

fn main() -> anyhow::Result<()> {
    let osc = Oscillator::new(HBAR, MASS, OMEGA)?;
    let grid = Grid::new(X_MIN, X_MAX, NPOINTS)?;
    let x = grid.x();
    let v = osc.potential_on(&grid);
    let states: Vec<Eigenstate> = osc.eigenstates(MAX_N, &grid);
    for n in 0..=MAX_N {
        println!(
            "n = {}: probability outside [{}, {}] = {:.2e}",
            n, X_MIN, X_MAX, perturbation::truncation_weight(&osc, &grid, n),
        );
    }

    let outdir = PathBuf::from("output");
    mkdir!(outdir);

    // unperturbed potential, energies, and probability densities
    let densities
        = states.iter()
        .fold(
            LineChart::new(
                "Quantum Harmonic Oscillator: Potential and Probability Densities",
                "x",
                "Energy",
            )
            .curve(Curve::new("Potential", x, &v, lib::COLORS[7])),
            |chart, state| {
                let shown = state.density() + state.e;
                let label = format!("|ψ{}(x)|²", sub(state.n));
                chart
                    .curve(Curve::new(&label, x, &shown, color(state.n)))
                    .curve(Curve::hline(state.e, (X_MIN, X_MAX), lib::COLORS[7]))
            },
        );
    densities.render(outdir.join("perturbation_densities.svg"))?;

    let perturbations: [(Perturbation, &str); 3] = [
        (
            Perturbation::Quartic(LAMBDA_4),
            "Anharmonic Oscillator (x⁴ Perturbation)",
        ),
        (
            Perturbation::Cubic(LAMBDA_3),
            "Anharmonic Oscillator (x³ Perturbation)",
        ),
        (
            Perturbation::Field { mass: MASS, field: E_FIELD },
            "Oscillator in an Electric Field",
        ),
    ];
    let labels: Vec<String> = (0..=MAX_N).map(|n| format!("n={}", n)).collect();
    let mut corrections: Vec<nd::Array1<f64>> = Vec::new();
    for (pert, title) in perturbations.iter() {
        let shifts: Vec<LevelShift> = pert.compare_with_exact(&osc, &grid, MAX_N)?;
        println!("{}:", title);
        for shift in shifts.iter() {
            match shift.exact {
                Some(exact) => println!(
                    "  n = {}: ΔE (first order) = {:+.6}, ΔE (numerical) = {:+.6}",
                    shift.n, shift.first_order, exact,
                ),
                None => println!(
                    "  n = {}: ΔE (first order) = {:+.6}",
                    shift.n, shift.first_order,
                ),
            }
        }
        let de: Vec<f64> = shifts.iter().map(|shift| shift.first_order).collect();
        bar_chart(
            outdir.join(format!("perturbation_{}.svg", pert.name())),
            &format!("Energy Corrections: {}", title),
            "State (n)",
            "Energy Correction",
            &labels,
            &de,
        )?;
        corrections.push(nd::Array1::from(de));
    }

    // comparison of the full perturbed potentials
    let potentials
        = perturbations.iter().enumerate()
        .fold(
            LineChart::new("Comparison of Potentials", "x", "Potential Energy")
                .curve(Curve::new("Harmonic Potential", x, &v, color(0))),
            |chart, (k, (pert, _))| {
                let label
                    = match pert {
                        Perturbation::Quartic(_) => "Anharmonic x⁴ Potential",
                        Perturbation::Cubic(_) => "Anharmonic x³ Potential",
                        Perturbation::Field { .. } => "Electric Field Potential",
                    };
                let total = pert.total_potential_on(&osc, &grid);
                chart.curve(Curve::new(label, x, &total, color(k + 1)))
            },
        );
    potentials.render(outdir.join("perturbation_potentials.svg"))?;

    let energies: nd::Array1<f64> = states.iter().map(|state| state.e).collect();
    let wfs: nd::Array2<f64>
        = nd::stack(
            nd::Axis(0),
            &states.iter().map(|state| state.wf.view()).collect::<Vec<_>>(),
        )?;
    // rows ordered as quartic, cubic, field
    let de: nd::Array2<f64>
        = nd::stack(
            nd::Axis(0),
            &corrections.iter().map(|den| den.view()).collect::<Vec<_>>(),
        )?;
    write_npz!(
        outdir.join("perturbation.npz"),
        arrays: {
            "x" => x,
            "v" => &v,
            "e" => &energies,
            "wf" => &wfs,
            "de" => &de,
        }
    );
    println!("wrote output to {}", outdir.display());
    Ok(())
}

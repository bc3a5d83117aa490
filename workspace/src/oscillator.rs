use std::path::PathBuf;
use ndarray as nd;
use lib::{ mkdir, write_npz, sub, color, Curve, LineChart };
use qmech::{ grid::{ Grid, wf_norm }, oscillator::{ Eigenstate, Oscillator } };

// natural units
const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;
const OMEGA: f64 = 1.0;

const X_MIN: f64 = -4.5;
const X_MAX: f64 = 4.5;
const NPOINTS: usize = 1000; // sampling resolution

const MAX_N_LEVELS: usize = 3; // levels drawn over the potential
const MAX_N_WF: usize = 4; // eigenfunctions drawn on their own

fn main() -> anyhow::Result<()> {
    let osc = Oscillator::new(HBAR, MASS, OMEGA)?;
    let grid = Grid::new(X_MIN, X_MAX, NPOINTS)?;
    let x = grid.x();
    let v = osc.potential_on(&grid);
    let states: Vec<Eigenstate> = osc.eigenstates(MAX_N_WF, &grid);
    for state in states.iter() {
        println!(
            "n = {}: E = {:.1} ħω, ∫|ψ|² dx = {:.6}",
            state.n, state.e / osc.quantum(), wf_norm(&state.wf, grid.dx()),
        );
    }

    let outdir = PathBuf::from("output");
    mkdir!(outdir);

    // energies and probability densities superimposed on the potential
    let mut levels
        = LineChart::new(
            "Quantum Harmonic Oscillator: Energies and Probability Densities",
            "x",
            "Energy / Probability Density",
        )
        .xlim((X_MIN, X_MAX))
        .ylim((-0.5, osc.energy(MAX_N_LEVELS) + 1.0))
        .curve(Curve::new("Potential V(x)", x, &v, lib::COLORS[7]));
    for state in states.iter().take(MAX_N_LEVELS + 1) {
        let density = state.density();
        let peak = density.iter().copied().fold(1.0, f64::max);
        let scale = 0.5 * (X_MAX - X_MIN) / peak;
        let shown = density.mapv(|p| scale * p + state.e);
        let label = format!("|ψ{}(x)|²", sub(state.n));
        levels = levels
            .curve(Curve::new(&label, x, &shown, color(state.n)))
            .curve(Curve::hline(state.e, (X_MIN, X_MAX), lib::COLORS[7]))
            .annotate(
                &format!("E{} = {:.1} ħω", sub(state.n), state.e / osc.quantum()),
                (X_MIN + 0.1, state.e + 0.15),
            );
    }
    levels.render(outdir.join("oscillator_levels.svg"))?;

    // normalized eigenfunctions
    let wavefunctions
        = states.iter()
        .fold(
            LineChart::new(
                "Normalized Eigenfunctions of the Quantum Harmonic Oscillator",
                "x",
                "ψₙ(x)",
            )
            .xlim((X_MIN, X_MAX)),
            |chart, state| {
                let label = format!("ψ{}(x)", sub(state.n));
                chart.curve(Curve::new(&label, x, &state.wf, color(state.n)))
            },
        );
    wavefunctions.render(outdir.join("oscillator_wavefunctions.svg"))?;

    let energies: nd::Array1<f64> = states.iter().map(|state| state.e).collect();
    let wfs: nd::Array2<f64>
        = nd::stack(
            nd::Axis(0),
            &states.iter().map(|state| state.wf.view()).collect::<Vec<_>>(),
        )?;
    write_npz!(
        outdir.join("oscillator.npz"),
        arrays: {
            "x" => x,
            "v" => &v,
            "e" => &energies,
            "wf" => &wfs,
        }
    );
    println!("wrote output to {}", outdir.display());
    Ok(())
}

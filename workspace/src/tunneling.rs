use std::path::PathBuf;
use ndarray as nd;
use lib::{ mkdir, write_npz, color, Curve, LineChart };
use qmech::tunneling::{ self, Barrier, TransmissionCurve };

// natural units
const HBAR: f64 = 1.0;
const MASS: f64 = 1.0;

const V0: f64 = 1.0; // barrier height
const WIDTHS: [f64; 5] = [0.2, 0.5, 1.0, 1.5, 2.0]; // barrier widths to compare
const E_MIN: f64 = 0.01;
const E_MAX: f64 = 2.0;
const NPOINTS: usize = 400;

fn main() -> anyhow::Result<()> {
    let e: nd::Array1<f64> = nd::Array1::linspace(E_MIN, E_MAX, NPOINTS);
    let curves: Vec<TransmissionCurve>
        = tunneling::transmission_sweep(V0, &WIDTHS, &e, MASS, HBAR)?;
    for a in WIDTHS {
        let barrier = Barrier::new(V0, a, MASS, HBAR)?;
        let first_res
            = barrier.resonances(1).first().copied().unwrap_or(f64::NAN);
        println!(
            "a = {:.1}: T(V0) = {:.4}, T(V0/2) = {:.4e}, first resonance at E = {:.3}",
            a,
            barrier.limit_at_height(),
            barrier.transmission(V0 / 2.0)?,
            first_res,
        );
    }

    let outdir = PathBuf::from("output");
    mkdir!(outdir);

    let chart
        = curves.iter().enumerate()
        .fold(
            LineChart::new(
                "Quantum Tunneling: Transmission vs Energy",
                "Energy E (arbitrary units)",
                "Transmission Probability T(E)",
            )
            .xlim((0.0, E_MAX))
            .ylim((0.0, 1.05)),
            |chart, (k, curve)| {
                let label = format!("a = {}", curve.width);
                chart.curve(Curve::new(&label, &curve.e, &curve.t, color(k)))
            },
        );
    chart.render(outdir.join("tunneling_transmission.svg"))?;

    let widths: nd::Array1<f64> = WIDTHS.iter().copied().collect();
    let t: nd::Array2<f64>
        = nd::stack(
            nd::Axis(0),
            &curves.iter().map(|curve| curve.t.view()).collect::<Vec<_>>(),
        )?;
    write_npz!(
        outdir.join("tunneling.npz"),
        arrays: {
            "e" => &e,
            "a" => &widths,
            "v0" => &nd::array![V0],
            "t" => &t,
        }
    );
    println!("wrote output to {}", outdir.display());
    Ok(())
}

use qmech::{
    grid::Grid,
    numerov,
    oscillator::Oscillator,
    perturbation::Perturbation,
};

// compare first-order and numerically exact ground state shifts for a range of
// quartic perturbation strengths

fn main() {
    let osc = Oscillator::natural();
    let grid = Grid::symmetric(6.0, 2001).unwrap();

    // unperturbed level on the same grid, so that discretization error cancels
    let v0 = osc.potential_on(&grid);
    let e0
        = numerov::solve_level_in(&grid, &v0, osc.mass(), osc.hbar(), 0)
        .unwrap();
    println!("E₀ (numerical): {:.8}", e0);
    println!("E₀ (expected):  {:.8}", osc.energy(0));

    println!("{:>8} {:>12} {:>12} {:>10}", "λ", "first order", "numerical", "ratio");
    for k in 1..=10 {
        let lambda = 0.02 * k as f64;
        let pert = Perturbation::Quartic(lambda);
        let first = pert.first_order(&osc, &grid, 0);
        let v = pert.total_potential_on(&osc, &grid);
        let e
            = numerov::solve_level_in(&grid, &v, osc.mass(), osc.hbar(), 0)
            .unwrap();
        println!(
            "{:>8.2} {:>12.6} {:>12.6} {:>10.4}",
            lambda, first, e - e0, (e - e0) / first,
        );
    }
}

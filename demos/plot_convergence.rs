// Example: plot_convergence.rs
// Prices the same contract on lattices of increasing depth and plots the
// binomial call price against the closed-form value.
//
// Usage:
//     cargo run --example plot_convergence -- [MAX_STEPS]
//
// The output image will be written to convergence.svg in the working directory.

use std::env;
use std::error::Error;

use plotters::prelude::*;
use vanilla_lib::{convergence_study, BlackScholesPricer, EuropeanPricer, OptionInputs};

fn main() -> Result<(), Box<dyn Error>> {
    let max_steps: usize = env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(200);
    if max_steps < 2 {
        return Err(format!("MAX_STEPS must be at least 2, got {max_steps}").into());
    }

    let inputs = OptionInputs::new(15600.0, 15700.0, 0.25, 0.065, 0.1846)?;
    let steps: Vec<usize> = (1..=max_steps).collect();
    let points = convergence_study(&inputs, &steps)?;

    let closed_form = BlackScholesPricer.price(&inputs)?.call;
    let lattice: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.steps as f64, p.binomial_call))
        .collect();

    let (y_min, y_max) = lattice
        .iter()
        .fold((closed_form, closed_form), |(lo, hi), &(_, c)| {
            (lo.min(c), hi.max(c))
        });
    let padding = (y_max - y_min) * 0.05 + 1e-6;

    let root = SVGBackend::new("convergence.svg", (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!(
                "Binomial call vs Black-Scholes | S0={} K={} T={}y",
                inputs.s0, inputs.k, inputs.t
            ),
            ("sans-serif", 30),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(1.0..max_steps as f64, (y_min - padding)..(y_max + padding))?;

    chart
        .configure_mesh()
        .x_desc("Steps (n)")
        .y_desc("Call price")
        .draw()?;

    chart.draw_series(
        lattice
            .iter()
            .map(|pt| Circle::new(*pt, 2, BLUE.filled())),
    )?;
    chart.draw_series(vec![PathElement::new(lattice.clone(), BLUE.stroke_width(1))])?;

    // Closed-form level
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(1.0, closed_form), (max_steps as f64, closed_form)],
        RED,
    )))?;

    root.present()?;
    println!(
        "Closed form {:.4}, {} steps {:.4}",
        closed_form,
        max_steps,
        lattice.last().map(|p| p.1).unwrap_or(f64::NAN)
    );
    println!("Chart saved to convergence.svg");
    Ok(())
}

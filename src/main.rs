use std::{process::ExitCode, time::Instant};

use log::{error, info};

use courier_route_core::{DispatchOptions, Result, emit_plan, load_graph, logging, plan_dispatch};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let now = Instant::now();
    let options = DispatchOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let graph = load_graph(&options)?;
    let plan = plan_dispatch(&graph, &options)?;

    emit_plan(&plan, options.output_path())?;

    let (hops, longest) = plan
        .clusters
        .iter()
        .map(|cluster| cluster.route.metrics())
        .fold((0, 0.0_f64), |(hops, longest), m| {
            (hops + m.hops, longest.max(m.longest))
        });
    info!(
        "output: clusters={} total_cost={:.3} hops={hops} longest_leg={longest:.3} time={:.2}s",
        plan.k(),
        plan.total_cost(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}

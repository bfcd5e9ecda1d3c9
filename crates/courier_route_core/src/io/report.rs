use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Result, dispatch::DispatchPlan};

/// Writes the plan to `path`, or stdout when `None`.
pub fn emit_plan(plan: &DispatchPlan, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_plan(plan, &mut out)?;
            out.flush()?;
            log::info!("report: written path={}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_plan(plan, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn write_plan<W: Write>(plan: &DispatchPlan, out: &mut W) -> Result<()> {
    writeln!(out, "couriers (k) = {}", plan.k())?;
    for cluster in &plan.clusters {
        writeln!(out)?;
        writeln!(out, "cluster {}: stops [{}]", cluster.id, cluster.stops.join(", "))?;
        writeln!(out, "order: [{}]", cluster.route.order.join(", "))?;
        writeln!(out, "route: [{}]", cluster.route.path.join(" -> "))?;
        writeln!(out, "cost: {:.3}", cluster.route.cost)?;
    }
    writeln!(out)?;
    writeln!(out, "total cost: {:.3}", plan.total_cost())?;
    Ok(())
}

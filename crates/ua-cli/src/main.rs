//! `usim2asim`: convert UrbanSim land-use outputs and BEAM skims into
//! ActivitySim inputs.

mod cli;
mod log;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    cli::run_cli()
}

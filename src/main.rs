use rtwship::{default_config_dir, init_logging, run, RunOptions};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let options = RunOptions::from_args(std::env::args().skip(1), default_config_dir());
    run(&options)?;

    Ok(())
}

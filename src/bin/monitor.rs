use clap::Parser;
use sensorpipe::app::cli::MonitorArgs;
use sensorpipe::app::startup;

fn main() {
    let args = MonitorArgs::parse();
    std::process::exit(startup::monitor(args));
}

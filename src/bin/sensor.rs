use clap::Parser;
use sensorpipe::app::cli::SensorArgs;
use sensorpipe::app::startup;

fn main() {
    let args = SensorArgs::parse();
    std::process::exit(startup::sensor(args));
}

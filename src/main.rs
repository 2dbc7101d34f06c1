use clap::Parser;
use std::error::Error;
use std::io::Write;

mod cache;
mod capabilities;
mod driver;
mod extract;
mod installed;
mod license_checker;
mod package;
mod pypi_api;
mod report;

use cache::CacheHandle;
use capabilities::Capabilities;
use driver::Driver;
use pypi_api::PyPiClient;

/// Show installed python packages with version and license info.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn main() {
    let _args = Args::parse();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let caps = Capabilities::detect();

    let installed = installed::list_installed()?;
    let cache = CacheHandle::open(&caps)?;
    let registry = PyPiClient::new()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    Driver::new(&registry, &mut out, caps).run(&installed, cache)?;
    out.flush()?;

    Ok(())
}

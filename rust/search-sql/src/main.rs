use clap::Parser;
use search_sql::{telemetry, Cli};

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    search_sql::run(Cli::parse())
}

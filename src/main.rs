use clap::Parser;
use fx_bar::app::bootstrap;
use fx_bar::cli::Cli;
use log::error;

#[tokio::main]
async fn main() {
    init_logger();

    let cli = Cli::parse();
    match bootstrap::run(cli.config.as_deref()).await {
        Ok(markup) => print!("{markup}"),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = cli::Options::parse(std::env::args().skip(1))?;
    cli::run(&options)
}

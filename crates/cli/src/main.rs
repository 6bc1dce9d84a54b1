fn main() {
    env_logger::Builder::from_default_env().init();

    if let Err(error) = leafturn_cli::run(std::env::args_os()) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

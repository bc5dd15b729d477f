use fsh::{Config, Interpreter, logging};

fn main() {
    let config = Config::from_env();
    logging::init(&config);

    if let Err(e) = Interpreter::with_config(config).run() {
        eprintln!("fsh: {:#}", e);
        std::process::exit(1);
    }
}

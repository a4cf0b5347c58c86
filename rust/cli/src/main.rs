use std::io;

fn main() {
    hucfr_cli::logging::init_logging();
    let code = hucfr_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}

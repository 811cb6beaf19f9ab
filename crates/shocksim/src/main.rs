#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = shocksim::run_from_env() {
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code());
    }
}

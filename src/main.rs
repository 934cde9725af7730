fn main() {
    if let Err(e) = nhlhosts::cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

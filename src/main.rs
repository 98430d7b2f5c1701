fn main() {
    if let Err(e) = cms_stats::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    if let Err(err) = steam_insights::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

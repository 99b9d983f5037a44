fn main() {
    if let Err(err) = nodemap::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

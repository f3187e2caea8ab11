fn main() {
    if let Err(err) = organogram_connectors::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn main() {
    if let Err(err) = jsonl_scrub::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

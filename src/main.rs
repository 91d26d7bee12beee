fn main() {
    if let Err(err) = plugchat::cli::main() {
        eprintln!("❌ Error: {err}");
        std::process::exit(1);
    }
}

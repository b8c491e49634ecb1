use a11y_keys::cli;

fn main() {
    if let Err(e) = cli::process_cli() {
        eprintln!("a11y-keys: error: {e:#}");
        log::logger().flush();
        // No state to tear down, so exit directly with a non-zero code
        std::process::exit(1);
    }
    log::logger().flush();
}

//! Surfacer binary entry point.

fn main() {
    if let Err(err) = surfacer::cli::run() {
        surfacer::ui::output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}

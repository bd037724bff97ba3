//! The `waveportal` binary entry point.

fn main() {
    if let Err(err) = waveportal::args::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

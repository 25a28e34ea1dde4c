use pmm_configurator::cli;

pub fn main() {
    if let Err(err) = cli::process_command() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

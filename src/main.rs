fn main() {
    if let Err(error) = glimmer::run() {
        log::error!("{error}");
        std::process::exit(1);
    }
}

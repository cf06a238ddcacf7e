fn main() {
    intelsiem::app::cli::run();
}

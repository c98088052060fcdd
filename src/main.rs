fn main() {
    funcpipe::app::cli::run();
}

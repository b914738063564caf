fn main() -> Result<(), eframe::Error> {
    safebites_frontend::run_frontend()
}

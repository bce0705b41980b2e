fn main() -> Result<(), Box<dyn std::error::Error>> {
    capcheck_cli::run()
}

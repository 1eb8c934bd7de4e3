fn main() -> Result<(), Box<dyn std::error::Error>> {
    genyx::cli::main()
}

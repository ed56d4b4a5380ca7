fn main() -> anyhow::Result<()> {
    benchstat_cli::run()
}

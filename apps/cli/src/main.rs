fn main() -> anyhow::Result<()> {
    askme_cli::run()
}

fn main() -> anyhow::Result<()> {
    scrawl::run()?;
    Ok(())
}

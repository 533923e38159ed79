pub fn run() -> anyhow::Result<()> {
    println!("tracegraph {}", env!("CARGO_PKG_VERSION"));
    println!("Decision-trace extraction and projection for agent sessions");
    Ok(())
}

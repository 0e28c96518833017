use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("vend {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

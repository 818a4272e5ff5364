use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    plane_mcp::cli::run().await?;
    Ok(())
}

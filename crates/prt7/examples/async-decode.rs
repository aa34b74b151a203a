//! Decode a transmission from stdin on a tokio runtime.
//!
//! Usage:
//!   printf 'M,2\nL,H\nL,Space\n' | cargo run -p prt7 --features async --example async-decode

use prt7::frame::{DecodeSession, LineConfig, StopPolicy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = prt7::transport::stdin()?.into_async();
    let mut session = DecodeSession::new();

    let reason = session
        .run_async(source, LineConfig::default(), &StopPolicy::max_lines(50), || true)
        .await?;

    println!("stopped: {}", reason.as_str());
    println!("message: {}", session.message());
    Ok(())
}

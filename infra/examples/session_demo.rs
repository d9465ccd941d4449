//! Example: revocable sessions on top of Redis
//!
//! Signs a registry-governed token, verifies it, slides its expiry and
//! finally revokes it.
//!
//! Run with: cargo run --example session_demo -p jr_infra

use jr_core::{Claims, SigningKeys};
use jr_infra::{init_tracing, initialize, settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = settings::load(None)?;
    init_tracing(&config.logging)?;

    let manager = initialize(&config).await?;
    let keys = SigningKeys::from_config(&config.jwt)?;

    let payload = Claims::new().with("userId", "42").with("role", "admin");
    let options = keys.sign_options().with_expires_key_in("15 minutes");
    let token = manager.sign(&payload, keys.signing(), &options).await?;
    println!("Issued token: {}", token);

    let claims = manager
        .verify(&token, keys.verifying(), &keys.verify_options())
        .await?;
    println!("Verified claims: {}", serde_json::to_string_pretty(claims.as_map())?);

    if manager.touch(&token).await? {
        println!("Session expiry refreshed");
    }

    manager.destroy(&token).await?;
    match manager
        .verify(&token, keys.verifying(), &keys.verify_options())
        .await
    {
        Err(err) if err.is_token_expired() => println!("Token revoked: {}", err),
        other => anyhow::bail!("expected a revoked token, got {:?}", other),
    }

    Ok(())
}

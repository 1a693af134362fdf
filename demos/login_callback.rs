//! Exchanges a callback code for tokens and resolves the canonical profile.
//!
//! Expects `OKTA_AUDIENCE`, `OKTA_CLIENT_ID`, `OKTA_CLIENT_SECRET`, `OKTA_CALLBACK_URL`,
//! and `OKTA_CODE` in the environment; `OKTA_CODE` is the `code` query parameter Okta
//! appended to your callback URL.

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use okta_strategy::{config::OktaConfig, strategy::OktaStrategy};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = OktaConfig::new(
		env::var("OKTA_AUDIENCE")?,
		env::var("OKTA_CLIENT_ID")?,
		env::var("OKTA_CLIENT_SECRET")?,
		env::var("OKTA_CALLBACK_URL")?,
	)
	.with_scope(["openid", "email", "profile"]);
	let strategy = OktaStrategy::new(&config)?;
	let login = strategy.authenticate(&env::var("OKTA_CODE")?).await?;

	println!("Authenticated subject {:?}.", login.profile.id);
	println!("Display name: {:?}.", login.profile.display_name);
	println!("Email: {:?} (verified: {:?}).", login.profile.email, login.profile.email_verified);
	println!("Refresh token issued: {}.", login.tokens.refresh_token.is_some());
	println!("Extra token fields: {:?}.", login.tokens.extra);

	Ok(())
}

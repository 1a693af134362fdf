//! Walks through building the Okta authorization redirect and stashing the CSRF state for
//! the callback handler to validate later.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
// self
use okta_strategy::{config::OktaConfig, strategy::OktaStrategy};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = OktaConfig::new(
		"https://acme.okta.com",
		"demo-client",
		"demo-secret",
		"https://app.example.com/api/okta/callback",
	)
	.with_scope(["openid", "email", "profile"])
	.with_identity_provider("0oa1b2c3d4e5f6g7h8i9");
	let strategy = OktaStrategy::new(&config)?;
	let redirect = strategy.start_authorization();

	println!("Send your user to {}.", redirect.url());

	let mut pending: HashMap<String, _> = HashMap::new();

	pending.insert(redirect.state().to_owned(), redirect.clone());

	// Simulate the callback handler looking up the stashed redirect by `state`.
	let returned_state = redirect.state().to_owned();

	if let Some(stashed) = pending.remove(&returned_state) {
		stashed.validate_state(&returned_state)?;
		println!("Validated state; exchange the callback code with OktaStrategy::authenticate.");
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}

//! auth command - store or remove the access token

use std::io::{self, Write};

use anyhow::{bail, Context as _, Result};

use crate::cli::Context;
use crate::config::GlobalConfig;

/// Store a personal access token in the config file, or remove it.
///
/// With `--set-token` the token is taken from the argument; otherwise it is
/// read interactively with masked input.
pub fn auth(ctx: &Context, token_arg: Option<&str>, logout: bool) -> Result<()> {
    let mut config = GlobalConfig::load().context("Failed to load configuration")?;

    if logout {
        if config.token.take().is_none() {
            bail!("No token stored.");
        }
        let path = config.save().context("Failed to update configuration")?;
        if !ctx.quiet {
            println!("Token removed from {}.", path.display());
        }
        return Ok(());
    }

    let token = get_token(ctx, token_arg)?;
    validate_token(&token)?;

    config.token = Some(token);
    let path = config.save().context("Failed to write configuration")?;

    if !ctx.quiet {
        println!("Token stored in {}.", path.display());
    }

    Ok(())
}

/// Get token from argument or interactive prompt.
fn get_token(ctx: &Context, token_arg: Option<&str>) -> Result<String> {
    if let Some(t) = token_arg {
        return Ok(t.to_string());
    }

    if ctx.quiet {
        bail!("Token required. Use --set-token <TOKEN> or run interactively.");
    }

    print!("GitHub Personal Access Token: ");
    io::stdout().flush()?;

    let token = rpassword::read_password().context("Failed to read token")?;

    if token.is_empty() {
        bail!("Token cannot be empty.");
    }

    Ok(token)
}

/// Validate token format (basic checks).
///
/// No network validation here; just catches obvious paste mistakes.
fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        bail!("Token cannot be empty.");
    }
    if token.len() < 10 {
        bail!("Token appears to be too short.");
    }
    if token.contains(' ') || token.contains('\n') {
        bail!("Token contains whitespace; check for a copy/paste error.");
    }
    Ok(())
}

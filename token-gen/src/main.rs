use anyhow::{Context, Result, bail};
use bearer_gate::services::auth::issuer::{TokenIssuer, generate_secret};
use chrono::{DateTime, Utc};
use clap::Parser;

/// Generate an HS256 bearer token accepted by the service in `jwt`/`hybrid` mode.
///
/// - Signs `{sub, iat, exp, iss, jti}` with the shared key (JWT_SECRET_KEY)
/// - Without a key, generates a fresh one and prints it so it can be stored as a secret
///   (`--quiet` requires an explicit key)
/// - Lifetime: --days / --hours, else JWT_DEFAULT_TTL_SECONDS, else one hour
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Shared signing key. A new one is generated when omitted.
    #[arg(long, env = "JWT_SECRET_KEY", hide_env_values = true)]
    secret: Option<String>,

    /// Lifetime in days
    #[arg(long, conflicts_with = "hours")]
    days: Option<i64>,

    /// Lifetime in hours
    #[arg(long)]
    hours: Option<i64>,

    /// Lifetime used when neither --days nor --hours is given
    #[arg(long, env = "JWT_DEFAULT_TTL_SECONDS", default_value_t = 3600)]
    default_ttl_seconds: i64,

    /// `sub` claim
    #[arg(long, default_value = "cloud-run-service")]
    subject: String,

    /// `iss` claim
    #[arg(long, env = "JWT_ISSUER", default_value = "gcp-bearer-auth-service")]
    issuer: String,

    /// Only print a new signing key
    #[arg(long, default_value_t = false)]
    generate_secret: bool,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

impl Args {
    fn ttl_seconds(&self) -> Result<i64> {
        let ttl = match (self.days, self.hours) {
            (Some(days), _) => days.checked_mul(86_400),
            (None, Some(hours)) => hours.checked_mul(3_600),
            (None, None) => Some(self.default_ttl_seconds),
        };
        match ttl {
            Some(ttl) if ttl > 0 => Ok(ttl),
            _ => bail!("token lifetime must be a positive number of seconds"),
        }
    }

    /// Signing key to use, and whether it was generated for this run.
    fn signing_secret(&self) -> Result<(String, bool)> {
        match self.secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => Ok((secret.to_string(), false)),
            // A generated key is only printed in verbose output.
            _ if self.quiet => bail!("--quiet needs --secret or JWT_SECRET_KEY"),
            _ => Ok((generate_secret()?, true)),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_secret {
        println!("{}", generate_secret()?);
        return Ok(());
    }

    let (secret, generated) = args.signing_secret()?;

    let issued = TokenIssuer::new(secret.as_bytes(), Some(args.issuer.clone()))
        .issue(&args.subject, args.ttl_seconds()?)
        .context("failed to issue token")?;

    if args.quiet {
        println!("{}", issued.token);
        return Ok(());
    }

    if generated {
        println!("Generated signing key (store it as JWT_SECRET_KEY):");
        println!("  {}", secret);
        println!();
    }

    let expires_at = DateTime::<Utc>::from_timestamp(issued.expires_at, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| issued.expires_at.to_string());

    println!("token: {}", issued.token);
    println!("sub: {}", args.subject);
    println!("iss: {}", args.issuer);
    println!("expires: {}", expires_at);
    println!();
    println!(
        "curl -H \"Authorization: Bearer {}\" https://<service-url>/api/secure",
        issued.token
    );

    Ok(())
}

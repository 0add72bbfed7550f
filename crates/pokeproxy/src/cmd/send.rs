//! Send command - post a signed sample Pokemon to a running proxy
//!
//! # Usage
//!
//! ```bash
//! # Pikachu by default
//! pokeproxy send --secret c2VjcmV0
//!
//! # Presets
//! pokeproxy send --legendary
//! pokeproxy send --powerful
//!
//! # Custom stats
//! pokeproxy send --name Bulbasaur --number 1 --attack 49 --hp 45
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use pokeproxy_auth::{SIGNATURE_HEADER, Secret, SignatureVerifier};
use pokeproxy_config::ENV_SECRET;
use pokeproxy_protocol::{PROTOBUF_CONTENT_TYPE, Pokemon, encode_protobuf};

/// Default proxy URL
const DEFAULT_PROXY_URL: &str = "http://localhost:8000";

/// Request timeout
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Pokemon name
    #[arg(long, default_value = "Pikachu")]
    name: String,

    /// Pokedex number
    #[arg(long, default_value_t = 25)]
    number: u64,

    /// Attack stat
    #[arg(long, default_value_t = 55)]
    attack: u32,

    /// Hit points
    #[arg(long, default_value_t = 35)]
    hp: u32,

    /// Send Mewtwo (legendary)
    #[arg(long, conflicts_with = "powerful")]
    legendary: bool,

    /// Send Dragonite (attack > 100, hp > 50)
    #[arg(long)]
    powerful: bool,

    /// Proxy base URL
    #[arg(long, default_value = DEFAULT_PROXY_URL)]
    proxy_url: String,

    /// Base64 secret
    #[arg(long, env = ENV_SECRET, hide_env_values = true)]
    secret: Option<String>,
}

pub async fn run(args: SendArgs) -> Result<()> {
    let Some(encoded) = args.secret.as_deref() else {
        anyhow::bail!("no secret: pass --secret or set {ENV_SECRET}");
    };
    let secret = Secret::from_base64(encoded).context("invalid secret")?;
    let verifier = SignatureVerifier::new(&secret).context("invalid secret")?;

    let pokemon = sample_pokemon(&args);
    let body = encode_protobuf(&pokemon);
    let signature = verifier.sign(&body);

    println!("Sending: {}", pokemon.label());
    if pokemon.type_two.is_empty() {
        println!("  Type: {}", pokemon.type_one);
    } else {
        println!("  Type: {}/{}", pokemon.type_one, pokemon.type_two);
    }
    println!("  Attack: {}, HP: {}", pokemon.attack, pokemon.hit_points);
    println!(
        "  Legendary: {}",
        if pokemon.legendary { "yes" } else { "no" }
    );

    let url = stream_url(&args.proxy_url);
    let client = reqwest::Client::builder()
        .timeout(SEND_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let response = client
        .post(&url)
        .header("content-type", PROTOBUF_CONTENT_TYPE)
        .header(SIGNATURE_HEADER, signature)
        .body(body)
        .send()
        .await
        .with_context(|| format!("failed to reach proxy at {url} (is it running?)"))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .context("failed to read response body")?;

    println!("\nResponse ({status}):");
    println!("  {text}");

    Ok(())
}

/// Build the Pokemon selected by the flags
fn sample_pokemon(args: &SendArgs) -> Pokemon {
    if args.legendary {
        Pokemon {
            number: 150,
            name: "Mewtwo".into(),
            type_one: "Psychic".into(),
            hit_points: 106,
            attack: 110,
            defense: 40,
            speed: 90,
            generation: 1,
            legendary: true,
            ..Default::default()
        }
    } else if args.powerful {
        Pokemon {
            number: 149,
            name: "Dragonite".into(),
            type_one: "Dragon".into(),
            type_two: "Flying".into(),
            hit_points: 91,
            attack: 134,
            defense: 40,
            speed: 90,
            generation: 1,
            ..Default::default()
        }
    } else {
        Pokemon {
            number: args.number,
            name: args.name.clone(),
            type_one: "Electric".into(),
            hit_points: args.hp,
            attack: args.attack,
            defense: 40,
            speed: 90,
            generation: 1,
            ..Default::default()
        }
    }
}

/// `<proxy>/stream`, tolerating a trailing slash
fn stream_url(proxy_url: &str) -> String {
    format!("{}/stream", proxy_url.trim_end_matches('/'))
}

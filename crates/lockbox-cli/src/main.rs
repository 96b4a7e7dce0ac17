//! Lockbox command-line codec.
//!
//! Binary inputs (shared secret, public key, envelope fields) are passed as
//! hex. Results go to stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Encode
//! lockbox encode --shared-secret 00..00 --public-key 01..01 --text "hello"
//!
//! # Decode the four printed fields
//! lockbox decode --shared-secret 00..00 --iv .. --public-key .. --mac .. --cipher-text ..
//! ```

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use lockbox_codec::{AesCbcHmacCodec, AgreementKeys, Codec, CodecConfig, EncryptionPayload, MacLayout};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Lockbox envelope codec
#[derive(Parser, Debug)]
#[command(name = "lockbox")]
#[command(about = "Encode and decode AES-256-CBC + HMAC-SHA256 envelopes")]
#[command(version)]
struct Args {
    /// Prefix each MAC input field with its length (both peers must agree)
    #[arg(long, global = true)]
    length_prefixed_mac: bool,

    /// Reject an empty shared secret
    #[arg(long, global = true)]
    reject_empty_secret: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt and authenticate text
    Encode {
        /// Shared secret from key agreement (hex)
        #[arg(long, value_parser = parse_hex)]
        shared_secret: HexBytes,

        /// Sender's ephemeral public key (hex)
        #[arg(long, value_parser = parse_hex)]
        public_key: HexBytes,

        /// Plaintext to encode
        #[arg(long)]
        text: String,
    },

    /// Authenticate and decrypt an envelope
    Decode {
        /// Shared secret from key agreement (hex)
        #[arg(long, value_parser = parse_hex)]
        shared_secret: HexBytes,

        /// Envelope IV (hex)
        #[arg(long, value_parser = parse_hex)]
        iv: HexBytes,

        /// Envelope public key (hex)
        #[arg(long, value_parser = parse_hex)]
        public_key: HexBytes,

        /// Envelope MAC (hex)
        #[arg(long, value_parser = parse_hex)]
        mac: HexBytes,

        /// Envelope ciphertext (hex)
        #[arg(long, value_parser = parse_hex)]
        cipher_text: HexBytes,
    },
}

/// Bytes parsed from a hex argument.
#[derive(Debug, Clone)]
struct HexBytes(Vec<u8>);

fn parse_hex(s: &str) -> Result<HexBytes, hex::FromHexError> {
    hex::decode(s).map(HexBytes)
}

impl Args {
    fn config(&self) -> CodecConfig {
        let mac_layout = if self.length_prefixed_mac {
            MacLayout::LengthPrefixed
        } else {
            MacLayout::Concatenated
        };
        CodecConfig { mac_layout, reject_empty_secret: self.reject_empty_secret }
    }
}

fn run(args: Args, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let codec = AesCbcHmacCodec::with_config(args.config());

    match args.command {
        Command::Encode { shared_secret, public_key, text } => {
            let keys = AgreementKeys::new(shared_secret.0, public_key.0);
            let payload = codec.encode(&text, &keys)?;

            writeln!(out, "iv: {}", hex::encode(payload.iv()))?;
            writeln!(out, "public_key: {}", hex::encode(payload.public_key()))?;
            writeln!(out, "mac: {}", hex::encode(payload.mac()))?;
            writeln!(out, "cipher_text: {}", hex::encode(payload.cipher_text()))?;
        },
        Command::Decode { shared_secret, iv, public_key, mac, cipher_text } => {
            let payload = EncryptionPayload::from_parts(iv.0, public_key.0, mac.0, cipher_text.0);
            let text = codec.decode(&payload, &shared_secret.0)?;

            writeln!(out, "{text}")?;
        },
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    tracing::debug!(config = ?args.config(), "lockbox starting");

    run(args, &mut io::stdout().lock())
}

use base64::{engine::general_purpose, Engine as _};
use clap::Subcommand;
use seedkit_core::codec::{self, fragment};
use seedkit_core::{Result, SeedkitError};

#[derive(Subcommand)]
pub enum CodecCommands {
    /// Encode hex bytes as base-85 text
    Encode {
        /// Hex-encoded input bytes
        data: String,
    },
    /// Decode base-85 text back to hex bytes
    Decode {
        /// Base-85 text
        text: String,
    },
    /// Split a base64 PSBT into animated-QR fragments
    Split {
        /// Base64 PSBT payload
        psbt: String,
        /// Characters per fragment
        #[arg(short, long, default_value = "200")]
        size: usize,
    },
    /// Reassemble fragments back into a base64 PSBT
    Join {
        /// Fragment strings, any order, duplicates allowed
        fragments: Vec<String>,
    },
}

pub fn handle_codec_command(cmd: CodecCommands) -> Result<()> {
    match cmd {
        CodecCommands::Encode { data } => {
            let bytes = hex::decode(data.trim())
                .map_err(|e| SeedkitError::config(format!("Invalid hex input: {}", e)))?;
            println!("{}", codec::encode(&bytes));
        }

        CodecCommands::Decode { text } => {
            let bytes = codec::decode(text.trim())?;
            println!("{}", hex::encode(bytes));
        }

        CodecCommands::Split { psbt, size } => {
            let fragments = fragment::fragments_from_base64(&psbt, size)?;
            let fragments = fragment::dedup_fragments(&fragments);
            for frag in &fragments {
                println!("{}", frag);
            }
            tracing::debug!(count = fragments.len(), "fragments produced");
        }

        CodecCommands::Join { fragments } => {
            let payload = fragment::reassemble(&fragments)?;
            println!("{}", general_purpose::STANDARD.encode(payload));
        }
    }

    Ok(())
}

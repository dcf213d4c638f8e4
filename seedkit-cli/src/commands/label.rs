use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use seedkit_core::label::{self, bip329};
use seedkit_core::{LabelRecord, Result};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum LabelCommands {
    /// Parse a raw label into text and tags
    Parse {
        /// Raw label, e.g. "rent payment #kyc"
        raw: String,
    },
    /// Format text and tags back into a raw label
    Format {
        /// Label text (may be empty)
        text: String,
        /// Tags, in order
        #[arg(short, long)]
        tags: Vec<String>,
    },
    /// Convert a JSON array of labels to a BIP-329 NDJSON file
    Export {
        /// Input JSON array file
        input: PathBuf,
        /// Output NDJSON file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Import a BIP-329 NDJSON file and show its labels
    Import {
        /// Input NDJSON file
        input: PathBuf,
    },
}

pub async fn handle_label_command(cmd: LabelCommands) -> Result<()> {
    match cmd {
        LabelCommands::Parse { raw } => {
            let record = label::parse(&raw);
            println!("Text: {}", record.text);
            println!(
                "Tags: {}",
                if record.tags.is_empty() {
                    "(none)".to_string()
                } else {
                    record.tags.join(", ")
                }
            );
        }

        LabelCommands::Format { text, tags } => {
            let record = LabelRecord::new(text, tags);
            println!("{}", label::format(&record));
        }

        LabelCommands::Export { input, output } => {
            let raw = tokio::fs::read_to_string(&input).await?;
            let labels: Vec<bip329::Bip329Label> = serde_json::from_str(&raw)?;
            let ndjson = bip329::export(&labels)?;
            tokio::fs::write(&output, ndjson).await?;
            println!("Exported {} labels to {}", labels.len(), output.display());
        }

        LabelCommands::Import { input } => {
            let raw = tokio::fs::read_to_string(&input).await?;
            let labels = bip329::parse_import(&raw)?;

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Type", "Ref", "Text", "Tags"]);
            for item in &labels {
                let record = item.record();
                table.add_row(vec![
                    serde_json::to_value(item.kind)?
                        .as_str()
                        .unwrap_or_default()
                        .to_string(),
                    item.reference.clone(),
                    record.text,
                    record.tags.join(", "),
                ]);
            }
            println!("{table}");
            println!("{} labels imported", labels.len());
        }
    }

    Ok(())
}

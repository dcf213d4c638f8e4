use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use seedkit_core::wordlist::{self, ALL_LANGUAGES};
use seedkit_core::{Result, SeedkitError};

#[derive(Subcommand)]
pub enum MnemonicCommands {
    /// Convert a mnemonic between wordlist languages
    Convert {
        /// Source language (name or code, e.g. english, ja)
        #[arg(long)]
        from: String,
        /// Target language
        #[arg(long)]
        to: String,
        /// Mnemonic words
        words: Vec<String>,
    },
    /// List supported wordlist languages
    Languages,
}

pub fn handle_mnemonic_command(cmd: MnemonicCommands) -> Result<()> {
    match cmd {
        MnemonicCommands::Convert { from, to, words } => {
            let from = wordlist::parse_language(&from)
                .ok_or_else(|| SeedkitError::config(format!("Unknown language: {}", from)))?;
            let to = wordlist::parse_language(&to)
                .ok_or_else(|| SeedkitError::config(format!("Unknown language: {}", to)))?;

            if words.is_empty() {
                return Err(SeedkitError::config("No mnemonic words given"));
            }

            let converted =
                wordlist::convert(&words, wordlist::wordlist(from), wordlist::wordlist(to))?;
            println!("{}", converted.join(" "));
        }

        MnemonicCommands::Languages => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Language", "Words"]);
            for &language in &ALL_LANGUAGES {
                table.add_row(vec![
                    format!("{:?}", language),
                    wordlist::WORDLIST_SIZE.to_string(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}

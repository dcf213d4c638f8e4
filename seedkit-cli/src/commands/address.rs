use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use seedkit_core::{classify, Result, SeedkitError};

#[derive(Subcommand)]
pub enum AddressCommands {
    /// Classify addresses by the script type they imply
    Classify {
        /// Address strings
        addresses: Vec<String>,
    },
}

pub fn handle_address_command(cmd: AddressCommands) -> Result<()> {
    match cmd {
        AddressCommands::Classify { addresses } => {
            if addresses.is_empty() {
                return Err(SeedkitError::config("No addresses given"));
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Address", "Script"]);
            for address in &addresses {
                table.add_row(vec![address.clone(), classify(address).to_string()]);
            }
            println!("{table}");
        }
    }

    Ok(())
}

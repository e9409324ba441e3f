use std::path::PathBuf;
use clap::Parser;
use color_eyre::eyre::eyre;
use address_clean::record::CleanOptions;

/// Split the address column and repair the zip column of a CSV file
#[derive(Debug, Parser)]
#[command(name = "address-clean", version, about)]
pub struct Cli {
    /// CSV file to read
    #[arg(short, long, env = "ADDRESS_CLEAN_INPUT")]
    pub input: PathBuf,

    /// Where to write the cleaned CSV
    #[arg(short, long, env = "ADDRESS_CLEAN_OUTPUT", default_value = "result/addresses.csv")]
    pub output: PathBuf,

    /// Header of the free-text address column
    #[arg(long, env = "ADDRESS_CLEAN_ADDRESS_COLUMN", default_value = "address")]
    pub address_column: String,

    /// Header of the zip code column
    #[arg(long, env = "ADDRESS_CLEAN_ZIP_COLUMN", default_value = "zip")]
    pub zip_column: String,

    /// Only keep rows with a Massachusetts zip code
    #[arg(long, env = "ADDRESS_CLEAN_MASSACHUSETTS_ONLY")]
    pub massachusetts_only: bool,

    /// Field delimiter, a single ASCII character
    #[arg(short, long, env = "ADDRESS_CLEAN_DELIMITER", default_value_t = ',')]
    pub delimiter: char,
}

impl Cli {
    pub fn options(&self) -> color_eyre::Result<CleanOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| eyre!("delimiter must be an ASCII character, got [{}]", self.delimiter))?;
        Ok(
            CleanOptions {
                address_column: self.address_column.clone(),
                zip_column: self.zip_column.clone(),
                massachusetts_only: self.massachusetts_only,
                delimiter,
            }
        )
    }
}

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use mmfw::MmfwReader;

#[derive(Parser)]
#[command(name = "mmex", about = "MMFW resource extractor", version)]
struct Cli {
    /// A compatible MMFW or Vector file.
    input: PathBuf,

    /// Hex offset of the 16-bit resource count, e.g. --offset 1A.
    /// Ignored when the signature matches a known title, or for Vector
    /// files (which fix the table at 0x17).
    #[arg(short, long, value_parser = parse_hex_offset, value_name = "HEX")]
    offset: Option<u32>,

    /// Dump resources to disk with the given filename prefix,
    /// e.g. --dump output_folder/
    #[arg(short, long, value_name = "PREFIX")]
    dump: Option<String>,

    /// When dumping, use resource names as filenames.
    #[arg(long)]
    usenames: bool,

    /// When dumping, use the specified file extension, e.g. --ext .cgm
    #[arg(short, long, value_name = "EXT")]
    ext: Option<String>,

    /// Print the resource index as JSON instead of the listing.
    #[arg(long)]
    json: bool,
}

fn parse_hex_offset(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex offset '{s}': {e}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut reader = MmfwReader::with_table_offset(File::open(&cli.input)?, cli.offset)?;

    if cli.json {
        println!("{}", reader.index.to_json()?);
    } else {
        println!("File header:   {}", reader.header.display_name());
        println!("MMFW version:  {}", reader.header.version);
        match reader.known {
            Some(entry) => println!(
                "Recognised as: {} (signature {})",
                entry.title,
                hex::encode(reader.header.signature())
            ),
            None => println!(
                "Signature:     {} (not in registry)",
                hex::encode(reader.header.signature())
            ),
        }
        println!("Table offset:  0x{:X}", reader.table_offset);
        println!("Has names:     {}", reader.has_names);
        println!("Resources:     {}", reader.resources().len());
    }

    let ext = cli.ext.unwrap_or_else(|| reader.extension().to_owned());

    for desc in reader.resources().to_vec() {
        if !cli.json {
            let label = desc.name.map(|n| n.to_string()).unwrap_or_default();
            println!(
                "block {:05} offset 0x{:08X} size 0x{:08X} label '{}'",
                desc.index, desc.offset, desc.size, label
            );
        }
        if let Some(prefix) = &cli.dump {
            let filename = match desc.name {
                Some(name) if cli.usenames => format!("{prefix}{name}"),
                _ => format!("{prefix}{:05}{ext}", desc.index),
            };
            let mut out = File::create(&filename)?;
            reader.extract(&desc, &mut out)?;
            if !cli.json {
                println!("  dumped to '{filename}'");
            }
        }
    }

    Ok(())
}

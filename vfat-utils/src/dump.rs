use std::io;

use pretty_hex::pretty_hex;
use vfat::error::Error;
use vfat::io::std::FileIO;
use vfat::io::IO;

pub fn dump(mut io: FileIO, sector: u32, count: usize) -> Result<(), Error<io::Error>> {
    let bytes = io.read_sectors(sector.into(), count).map_err(Error::IO)?;
    println!("{}", pretty_hex(&bytes));
    Ok(())
}

use std::io;

use vfat::error::Error;
use vfat::io::std::FileIO;
use vfat::Volume;

pub fn partitions(mut io: FileIO) -> Result<(), Error<io::Error>> {
    let table = Volume::partition_table(&mut io)?;
    println!("# boot type     start     count variant");
    for (index, entry) in table.0.iter().enumerate() {
        if entry.is_empty() {
            continue;
        }
        print!("{} {:4}", index, if entry.bootable { "*" } else { "" });
        let start = u32::from(entry.start_sector);
        print!(" 0x{:02X} {:9} {:9}", u8::from(entry.partition_type), start, entry.sector_count);
        match entry.partition_type.variant() {
            Ok(variant) => println!(" {}", variant),
            Err(_) => println!(" unsupported"),
        }
    }
    Ok(())
}

use std::io;

use chrono::NaiveDateTime;
use vfat::error::Error;
use vfat::io::std::FileIO;
use vfat::Volume;

pub fn list(io: FileIO, partition: usize, cluster: u32) -> Result<(), Error<io::Error>> {
    let mut volume = Volume::open_partition(io, partition)?;
    let directory = volume.read_directory(cluster.into())?;
    if let Some(label) = directory.volume_label() {
        println!("Volume {}", label);
    }
    for entry in directory.entries() {
        let attrs = entry.short_entry.attributes;
        print!("{}", if attrs.directory() > 0 { "d" } else { "-" });
        print!("{}", if attrs.read_only() > 0 { "r" } else { "-" });
        print!("{}", if attrs.system() > 0 { "s" } else { "-" });
        print!("{}", if attrs.hidden() > 0 { "h" } else { "-" });
        print!("{}", if attrs.archive() > 0 { "a" } else { "-" });
        print!(" {:10}", entry.short_entry.size);
        match NaiveDateTime::try_from(entry.short_entry.last_modified) {
            Ok(datetime) => print!(" {}", datetime.format("%Y-%m-%d %H:%M:%S")),
            Err(_) => print!(" {:19}", "-"),
        }
        print!(" {:>8}", u32::from(entry.short_entry.first_cluster));
        print!(" {:12}", entry.short_entry.name.display().as_str());
        if entry.is_directory() {
            println!(" {}/", entry.name());
        } else {
            println!(" {}", entry.name());
        }
    }
    Ok(())
}

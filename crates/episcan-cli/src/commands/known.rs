use crate::error::Result;
use episcan::core::reference::known_epitopes;

pub fn run() -> Result<()> {
    println!("Known Disease-Causing Epitopes");
    for epitope in known_epitopes() {
        println!();
        println!("{} (recognized by {} antibody)", epitope.name, epitope.antibody);
        println!("  Sequence: {}", epitope.sequence);
        println!("  Location: {}", epitope.location);
        println!("  Disease significance: {}", epitope.significance);
    }
    Ok(())
}

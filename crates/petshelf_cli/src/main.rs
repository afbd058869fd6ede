//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `petshelf_core` linkage.
//! - Run one insert/query round-trip against an in-memory store.

use petshelf_core::{
    ChangeNotifier, Gender, Locator, PetProvider, PetQuery, PetStore, PetValues,
};

const AUTHORITY: &str = "shelter.example";

fn main() {
    println!("petshelf_core version={}", petshelf_core::core_version());

    let store = PetStore::in_memory();
    let provider = PetProvider::new(&store, AUTHORITY, ChangeNotifier::new());
    let collection = Locator::collection(AUTHORITY);

    let values = PetValues::new()
        .name("Toto")
        .breed("Terrier")
        .gender(Gender::Male)
        .weight(7);

    let result = provider
        .insert(&collection, &values)
        .and_then(|item| provider.query(&item, &PetQuery::default()));
    match result {
        Ok(rows) => {
            for pet in rows.into_iter().filter_map(|row| row.into_pet()) {
                println!(
                    "pet id={} name={} breed={} weight={}",
                    pet.id, pet.name, pet.breed, pet.weight
                );
            }
        }
        Err(err) => {
            eprintln!("smoke round-trip failed: {err}");
            std::process::exit(1);
        }
    }
}

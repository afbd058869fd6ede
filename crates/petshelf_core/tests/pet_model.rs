use petshelf_core::{Gender, Pet, PetValues};

#[test]
fn pet_serde_round_trip() {
    let pet = Pet {
        id: 1,
        name: "Toto".to_string(),
        breed: "Terrier".to_string(),
        gender: Gender::Male,
        weight: 7,
    };

    let json = serde_json::to_string(&pet).unwrap();
    assert!(json.contains("\"male\""));

    let back: Pet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pet);
}

#[test]
fn payload_serde_keeps_absent_fields_absent() {
    let values: PetValues = serde_json::from_str(r#"{"name":"Toto","weight":7}"#).unwrap();

    assert_eq!(values.name.as_deref(), Some("Toto"));
    assert_eq!(values.weight, Some(7));
    assert_eq!(values.breed, None);
    assert_eq!(values.gender, None);
}

#[test]
fn payload_builder_marks_only_set_fields_present() {
    let values = PetValues::new().breed("").gender(Gender::Female);

    assert!(values.name.is_none());
    assert_eq!(values.breed.as_deref(), Some(""));
    assert_eq!(values.gender, Some(Gender::Female.code()));
    assert!(!values.is_empty());
    assert!(PetValues::new().is_empty());
}

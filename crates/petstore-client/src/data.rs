// Test-data generators for the pet endpoints

use rand::Rng;
use serde_json::json;

use crate::model::{Category, Pet, Status, Tag};

/// Fixed pet id used by the CRUD flow.
pub const CRUD_PET_ID: i64 = 999_999;

/// Random id in the range the suite reserves for disposable pets.
pub fn random_pet_id() -> i64 {
    rand::thread_rng().gen_range(100_000..=999_999)
}

/// Fully-populated valid pet.
pub fn valid_pet(pet_id: i64) -> Pet {
    let mut rng = rand::thread_rng();
    Pet {
        id: pet_id,
        category: Some(Category {
            id: rng.gen_range(1..=10),
            name: "Dogs".to_string(),
        }),
        name: format!("TestDog{pet_id}"),
        photo_urls: vec!["https://example.com/photo1.jpg".to_string()],
        tags: Some(vec![Tag {
            id: rng.gen_range(1..=100),
            name: "test-tag".to_string(),
        }]),
        status: Some(Status::Available),
    }
}

/// Pet with only the required fields.
pub fn minimal_pet(pet_id: i64) -> Pet {
    Pet {
        id: pet_id,
        category: None,
        name: format!("MinimalPet{pet_id}"),
        photo_urls: Vec::new(),
        tags: None,
        status: None,
    }
}

/// Wire-level payload missing the required name and photoUrls fields.
pub fn pet_missing_required_fields() -> serde_json::Value {
    json!({
        "id": random_pet_id(),
        "category": { "id": 1, "name": "Dogs" }
    })
}

/// Wire-level payload with wrong types in every field.
pub fn pet_with_wrong_types() -> serde_json::Value {
    json!({
        "id": "not_a_number",
        "name": 12345,
        "photoUrls": "not_an_array",
        "status": 123
    })
}

/// Wire-level payload with a status outside the accepted set.
pub fn pet_with_invalid_status() -> serde_json::Value {
    json!({
        "id": random_pet_id(),
        "name": "InvalidStatusPet",
        "photoUrls": [],
        "status": "invalid_status"
    })
}

use serde::{Deserialize, Serialize};

/// A reference to a location embedded in a character record
/// (the `origin` and `location` fields of the API response).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A single character record from the catalog.
///
/// `id`, `name` and `species` drive lookup, sorting and filtering; the
/// remaining fields are carried through unmodified for the detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub character_type: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub origin: LocationRef,
    #[serde(default)]
    pub location: LocationRef,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created: String,
}

impl Character {
    /// Species with the sub-type appended when the API provides one,
    /// e.g. "Alien (Parasite)".
    pub fn species_display(&self) -> String {
        if self.character_type.is_empty() {
            self.species.clone()
        } else {
            format!("{} ({})", self.species, self.character_type)
        }
    }

    /// Number of episodes this character appears in.
    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_character_json() {
        let json = r#"{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1"},
            "location": {"name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3"},
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": ["https://rickandmortyapi.com/api/episode/1"],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        }"#;

        let character: Character = serde_json::from_str(json).expect("Failed to parse character JSON");
        assert_eq!(character.id, 1);
        assert_eq!(character.name, "Rick Sanchez");
        assert_eq!(character.species, "Human");
        assert_eq!(character.origin.name, "Earth (C-137)");
        assert_eq!(character.episode_count(), 1);
    }

    #[test]
    fn test_species_display_with_subtype() {
        let character = Character {
            species: "Alien".to_string(),
            character_type: "Parasite".to_string(),
            ..Default::default()
        };
        assert_eq!(character.species_display(), "Alien (Parasite)");

        let plain = Character {
            species: "Human".to_string(),
            ..Default::default()
        };
        assert_eq!(plain.species_display(), "Human");
    }
}

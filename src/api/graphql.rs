//! Batched catalog query against the GraphQL endpoint.
//!
//! A single request returns every species with its Korean name, type tags,
//! and generation, which the listing fallback cannot do. Response rows are
//! normalized into [`CatalogEntry`] values here.

use serde::Deserialize;

use crate::models::CatalogEntry;

/// Upstream language id for Korean species names.
pub const KO_LANGUAGE_ID: u32 = 3;

/// One query for the whole catalog. Aliases keep the response keys short.
pub const CATALOG_QUERY: &str = r#"
query CatalogSpecies {
  species: pokemon_v2_pokemonspecies(order_by: { id: asc }) {
    id
    name
    generation_id
    names: pokemon_v2_pokemonspeciesnames(where: { language_id: { _eq: 3 } }) {
      name
      language_id
    }
    pokemon: pokemon_v2_pokemons(where: { is_default: { _eq: true } }) {
      types: pokemon_v2_pokemontypes {
        type: pokemon_v2_type {
          name
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// Joined error messages, empty when the response carried none.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub species: Vec<SpeciesRow>,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesRow {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub generation_id: Option<u32>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub pokemon: Vec<DefaultPokemon>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct DefaultPokemon {
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: Option<TypeName>,
}

#[derive(Debug, Deserialize)]
pub struct TypeName {
    pub name: String,
}

/// Normalize query rows into catalog entries sorted by id.
///
/// A row with no usable name gets a `species-{id}` placeholder so search
/// and display never see an empty string.
pub fn entries_from_rows(rows: Vec<SpeciesRow>) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = rows
        .into_iter()
        .map(|row| {
            let name = if row.name.trim().is_empty() {
                format!("species-{}", row.id)
            } else {
                row.name.to_lowercase()
            };
            let local_name = row
                .names
                .iter()
                .find(|n| n.language_id == KO_LANGUAGE_ID)
                .map(|n| n.name.clone());
            let types = row
                .pokemon
                .first()
                .map(|p| {
                    p.types
                        .iter()
                        .filter_map(|slot| slot.kind.as_ref().map(|k| k.name.clone()))
                        .collect()
                })
                .unwrap_or_default();
            CatalogEntry {
                id: row.id,
                name,
                local_name,
                types,
                generation: row.generation_id,
            }
        })
        .collect();
    entries.sort_by_key(|e| e.id);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": {
            "species": [
                {
                    "id": 4,
                    "name": "Charmander",
                    "generation_id": 1,
                    "names": [{"name": "파이리", "language_id": 3}],
                    "pokemon": [{"types": [{"type": {"name": "fire"}}]}]
                },
                {
                    "id": 1,
                    "name": "bulbasaur",
                    "generation_id": 1,
                    "names": [],
                    "pokemon": [{"types": [
                        {"type": {"name": "grass"}},
                        {"type": {"name": "poison"}}
                    ]}]
                }
            ]
        }
    }"#;

    #[test]
    fn test_response_deserializes() {
        let parsed: GraphQlResponse<CatalogData> = serde_json::from_str(SAMPLE).unwrap();
        assert!(parsed.errors.is_empty());
        let data = parsed.data.unwrap();
        assert_eq!(data.species.len(), 2);
        assert_eq!(data.species[0].names[0].language_id, KO_LANGUAGE_ID);
    }

    #[test]
    fn test_entries_normalized_and_sorted() {
        let parsed: GraphQlResponse<CatalogData> = serde_json::from_str(SAMPLE).unwrap();
        let entries = entries_from_rows(parsed.data.unwrap().species);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].types, vec!["grass", "poison"]);
        assert!(entries[0].local_name.is_none());
        assert_eq!(entries[1].id, 4);
        assert_eq!(entries[1].name, "charmander");
        assert_eq!(entries[1].local_name.as_deref(), Some("파이리"));
        assert_eq!(entries[1].generation, Some(1));
    }

    #[test]
    fn test_missing_name_gets_placeholder() {
        let rows = vec![SpeciesRow {
            id: 9001,
            name: String::new(),
            generation_id: None,
            names: vec![],
            pokemon: vec![],
        }];
        let entries = entries_from_rows(rows);
        assert_eq!(entries[0].name, "species-9001");
        assert!(entries[0].types.is_empty());
    }

    #[test]
    fn test_error_summary_joins_messages() {
        let json = r#"{"data": null, "errors": [{"message": "a"}, {"message": "b"}]}"#;
        let parsed: GraphQlResponse<CatalogData> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error_summary(), "a; b");
        assert!(parsed.data.is_none());
    }
}

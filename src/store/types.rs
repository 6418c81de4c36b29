use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::Resource;

/// Word category paired with an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  /// Follows the animal: "otter rocket"
  Noun,
  /// Precedes the animal: "purple otter"
  Adjective,
}

impl Category {
  /// Every category the generator draws from, in selection order.
  pub const ALL: [Category; 2] = [Category::Noun, Category::Adjective];

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Noun => "noun",
      Category::Adjective => "adjective",
    }
  }
}

/// A player's personal word lists, keyed by category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordBook {
  categories: BTreeMap<String, Vec<String>>,
}

impl WordBook {
  /// Build a word book from `(category, words)` pairs.
  #[cfg(test)]
  pub fn from_pairs<'a, I, W>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (&'a str, W)>,
    W: IntoIterator<Item = &'a str>,
  {
    let categories = pairs
      .into_iter()
      .map(|(category, words)| {
        (
          category.to_string(),
          words.into_iter().map(String::from).collect(),
        )
      })
      .collect();
    Self { categories }
  }

  /// Words for `category`, empty if the category is absent.
  pub fn words(&self, category: Category) -> &[String] {
    self
      .categories
      .get(category.as_str())
      .map(Vec::as_slice)
      .unwrap_or(&[])
  }
}

impl Resource for WordBook {
  fn validate(&self) -> Result<(), String> {
    for category in Category::ALL {
      if self.words(category).is_empty() {
        return Err(format!("missing or empty '{}' list", category.as_str()));
      }
    }
    Ok(())
  }

  fn kind() -> &'static str {
    "words"
  }
}

/// Accepted on-disk shapes for the shared animal list.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnimalListRepr {
  Bare(Vec<String>),
  Keyed { animals: Vec<String> },
}

/// The shared list of animals every nickname is built around.
///
/// Deserializes from either a bare sequence or an `animals:` mapping, and
/// always serializes as the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AnimalListRepr")]
pub struct AnimalList {
  animals: Vec<String>,
}

impl From<AnimalListRepr> for AnimalList {
  fn from(repr: AnimalListRepr) -> Self {
    match repr {
      AnimalListRepr::Bare(animals) | AnimalListRepr::Keyed { animals } => Self { animals },
    }
  }
}

impl AnimalList {
  #[cfg(test)]
  pub fn new<I, S>(animals: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      animals: animals.into_iter().map(Into::into).collect(),
    }
  }

  pub fn as_slice(&self) -> &[String] {
    &self.animals
  }
}

impl Resource for AnimalList {
  fn validate(&self) -> Result<(), String> {
    if self.animals.is_empty() {
      return Err("animal list is empty".to_string());
    }
    Ok(())
  }

  fn kind() -> &'static str {
    "animals"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_word_book_parses_category_mapping() {
    let yaml = "noun:\n  - rocket\n  - tuba\nadjective:\n  - purple\nverb:\n  - run\n";
    let book: WordBook = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(book.words(Category::Noun), ["rocket", "tuba"]);
    assert_eq!(book.words(Category::Adjective), ["purple"]);
    assert!(book.validate().is_ok());
  }

  #[test]
  fn test_word_book_requires_both_categories() {
    let book = WordBook::from_pairs([("noun", vec!["rocket"]), ("adjective", vec![])]);
    let err = book.validate().unwrap_err();
    assert!(err.contains("adjective"));

    let book = WordBook::from_pairs([("adjective", vec!["purple"])]);
    assert!(book.validate().unwrap_err().contains("noun"));
  }

  #[test]
  fn test_animal_list_accepts_bare_sequence() {
    let list: AnimalList = serde_yaml::from_str("- otter\n- sea_lion\n").unwrap();
    assert_eq!(list.as_slice(), ["otter", "sea_lion"]);
  }

  #[test]
  fn test_animal_list_accepts_keyed_mapping() {
    let list: AnimalList = serde_yaml::from_str("animals:\n  - otter\n").unwrap();
    assert_eq!(list, AnimalList::new(["otter"]));
  }

  #[test]
  fn test_animal_list_serializes_as_mapping() {
    let yaml = serde_yaml::to_string(&AnimalList::new(["otter"])).unwrap();
    let back: AnimalList = serde_yaml::from_str(&yaml).unwrap();
    assert!(yaml.starts_with("animals:"));
    assert_eq!(back, AnimalList::new(["otter"]));
  }

  #[test]
  fn test_empty_animal_list_is_invalid() {
    assert!(AnimalList::new(Vec::<String>::new()).validate().is_err());
  }
}

//! Nickname generation.

use rand::Rng;

use crate::store::types::{Category, WordBook};

/// Source of uniform random choices.
///
/// Every `rand::Rng` is a source; tests substitute scripted sequences to get
/// exact pairings and nicknames.
pub trait RandomSource {
  /// Uniform index in `0..len`. `len` is never zero.
  fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
  fn pick(&mut self, len: usize) -> usize {
    self.gen_range(0..len)
  }
}

fn choose<'a, T>(items: &'a [T], rng: &mut impl RandomSource) -> Option<&'a T> {
  if items.is_empty() {
    return None;
  }
  items.get(rng.pick(items.len()))
}

/// Generate one nickname: `"<animal> <noun>"` or `"<adjective> <animal>"`.
///
/// Returns `None` if the animal list or the chosen category is empty, which
/// validated resources rule out.
pub fn generate(animals: &[String], words: &WordBook, rng: &mut impl RandomSource) -> Option<String> {
  let animal = choose(animals, rng)?;
  let category = *choose(&Category::ALL[..], rng)?;
  let word = choose(words.words(category), rng)?;

  let nickname = match category {
    Category::Noun => format!("{} {}", animal, word),
    Category::Adjective => format!("{} {}", word, animal),
  };
  Some(nickname.replace('_', " "))
}

/// Generate `count` independent nicknames. Repeats are allowed.
pub fn batch(
  animals: &[String],
  words: &WordBook,
  count: usize,
  rng: &mut impl RandomSource,
) -> Option<Vec<String>> {
  (0..count).map(|_| generate(animals, words, rng)).collect()
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};
  use std::collections::VecDeque;

  /// Replays a fixed list of picks.
  pub(crate) struct Scripted(pub(crate) VecDeque<usize>);

  impl Scripted {
    pub(crate) fn new(picks: impl IntoIterator<Item = usize>) -> Self {
      Self(picks.into_iter().collect())
    }
  }

  impl RandomSource for Scripted {
    fn pick(&mut self, len: usize) -> usize {
      let next = self.0.pop_front().expect("scripted picks exhausted");
      assert!(next < len, "scripted pick {} out of range 0..{}", next, len);
      next
    }
  }

  fn otter() -> (Vec<String>, WordBook) {
    (
      vec!["otter".to_string()],
      WordBook::from_pairs([("noun", vec!["rocket"]), ("adjective", vec!["purple"])]),
    )
  }

  #[test]
  fn test_noun_follows_animal() {
    let (animals, words) = otter();
    let name = generate(&animals, &words, &mut Scripted::new([0, 0, 0])).unwrap();
    assert_eq!(name, "otter rocket");
  }

  #[test]
  fn test_adjective_precedes_animal() {
    let (animals, words) = otter();
    let name = generate(&animals, &words, &mut Scripted::new([0, 1, 0])).unwrap();
    assert_eq!(name, "purple otter");
  }

  #[test]
  fn test_underscores_become_spaces() {
    let animals = vec!["sea_lion".to_string()];
    let words = WordBook::from_pairs([("noun", vec!["hot_dog"]), ("adjective", vec!["extra_spicy"])]);

    let noun = generate(&animals, &words, &mut Scripted::new([0, 0, 0])).unwrap();
    let adjective = generate(&animals, &words, &mut Scripted::new([0, 1, 0])).unwrap();
    assert_eq!(noun, "sea lion hot dog");
    assert_eq!(adjective, "extra spicy sea lion");
  }

  #[test]
  fn test_random_output_is_one_of_two_orderings() {
    let (animals, words) = otter();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
      let name = generate(&animals, &words, &mut rng).unwrap();
      assert!(name == "otter rocket" || name == "purple otter", "got {}", name);
      assert!(!name.contains('_'));
    }
  }

  #[test]
  fn test_batch_has_requested_size() {
    let animals = vec!["otter".to_string(), "gnu".to_string()];
    let words = WordBook::from_pairs([
      ("noun", vec!["rocket", "tuba"]),
      ("adjective", vec!["purple"]),
    ]);
    let names = batch(&animals, &words, 5, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(names.len(), 5);
  }

  #[test]
  fn test_empty_inputs_yield_none() {
    let (_, words) = otter();
    assert!(generate(&[], &words, &mut StdRng::seed_from_u64(1)).is_none());
  }
}

//! Yahtzee scoring rules on a single roll.
//!
//! Everything here is a pure function of the dice. Rules that depend on the
//! scorecard (the Joker rule and the Yahtzee bonus) live in
//! [`crate::scorecard`] and are layered on top of these.
//!
//! A category *qualifies* when the roll has its shape; a roll recorded into a
//! non-qualifying category scores 0.

use crate::constants::*;
use crate::dice_mechanics::{count_faces, dice_sum, is_yahtzee, longest_run};
use crate::types::{Category, CategorySet, Dice};

/// Categories the roll qualifies for by its own shape.
///
/// Four of a kind implies three of a kind; a Yahtzee implies both.
pub fn qualifying_categories(dice: &Dice) -> CategorySet {
    let face_count = count_faces(dice);
    let count_max = face_count.iter().copied().max().unwrap_or(0);
    let run = longest_run(dice);

    let mut set = CategorySet::empty();
    for cat in Category::UPPER {
        if let Some(pip) = cat.pip() {
            if face_count[pip as usize] > 0 {
                set.insert(cat);
            }
        }
    }
    if count_max >= 3 {
        set.insert(Category::ThreeOfAKind);
    }
    if count_max >= 4 {
        set.insert(Category::FourOfAKind);
    }
    if is_full_house(&face_count) {
        set.insert(Category::FullHouse);
    }
    if run.len >= 4 {
        set.insert(Category::SmallStraight);
    }
    if run.len >= 5 {
        set.insert(Category::LargeStraight);
    }
    if count_max == 5 {
        set.insert(Category::Yahtzee);
    }
    set.insert(Category::Chance);
    set
}

/// Counts are exactly {2, 3}.
fn is_full_house(face_count: &[u8; 7]) -> bool {
    let mut has_three = false;
    let mut has_two = false;
    for &n in &face_count[1..] {
        match n {
            3 => has_three = true,
            2 => has_two = true,
            _ => {}
        }
    }
    has_three && has_two
}

/// Score a qualifying roll earns in a category, ignoring the shape check.
///
/// Upper boxes sum the matching pips; 3K, 4K and Chance sum all dice; the
/// remaining boxes are fixed.
pub fn box_value(dice: &Dice, category: Category) -> i32 {
    match category {
        Category::Aces
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let pip = category.index() as u8 + 1;
            dice.iter().filter(|&&d| d == pip).count() as i32 * pip as i32
        }
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => dice_sum(dice),
        Category::FullHouse => FULL_HOUSE_SCORE,
        Category::SmallStraight => SMALL_STRAIGHT_SCORE,
        Category::LargeStraight => LARGE_STRAIGHT_SCORE,
        Category::Yahtzee => YAHTZEE_SCORE,
    }
}

/// Static score for placing a roll in a category: its box value if it
/// qualifies, else 0.
pub fn calculate_category_score(dice: &Dice, category: Category) -> i32 {
    if qualifying_categories(dice).contains(category) {
        box_value(dice, category)
    } else {
        0
    }
}

/// Lower-section boxes a Joker roll may take regardless of shape.
pub fn joker_categories() -> CategorySet {
    CategorySet::empty()
        .with(Category::ThreeOfAKind)
        .with(Category::FourOfAKind)
        .with(Category::FullHouse)
        .with(Category::SmallStraight)
        .with(Category::LargeStraight)
}

/// Qualifying categories and their scores, with the Joker boxes unlocked
/// when `joker` is set and the roll is a Yahtzee.
pub fn score_candidates(dice: &Dice, joker: bool) -> Vec<(Category, i32)> {
    let mut set = qualifying_categories(dice);
    if joker && is_yahtzee(dice) {
        for cat in joker_categories().iter() {
            set.insert(cat);
        }
    }
    set.iter().map(|c| (c, box_value(dice, c))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(dice: Dice) -> Vec<Category> {
        qualifying_categories(&dice).iter().collect()
    }

    #[test]
    fn test_qualifying_small_roll() {
        assert_eq!(
            cats([1, 2, 3, 1, 2]),
            vec![
                Category::Aces,
                Category::Twos,
                Category::Threes,
                Category::Chance
            ]
        );
    }

    #[test]
    fn test_qualifying_yahtzee() {
        assert_eq!(
            cats([6, 6, 6, 6, 6]),
            vec![
                Category::Sixes,
                Category::ThreeOfAKind,
                Category::FourOfAKind,
                Category::Yahtzee,
                Category::Chance
            ]
        );
    }

    #[test]
    fn test_upper_section() {
        assert_eq!(calculate_category_score(&[1, 1, 1, 1, 1], Category::Aces), 5);
        assert_eq!(calculate_category_score(&[6, 6, 6, 6, 6], Category::Sixes), 30);
        assert_eq!(calculate_category_score(&[1, 2, 3, 4, 5], Category::Twos), 2);
        assert_eq!(calculate_category_score(&[3, 3, 4, 5, 6], Category::Threes), 6);
        assert_eq!(calculate_category_score(&[5, 5, 5, 1, 2], Category::Fives), 15);
        assert_eq!(calculate_category_score(&[1, 2, 3, 4, 5], Category::Sixes), 0);
    }

    #[test]
    fn test_n_of_a_kind() {
        assert_eq!(
            calculate_category_score(&[2, 2, 2, 4, 5], Category::ThreeOfAKind),
            15
        );
        assert_eq!(
            calculate_category_score(&[4, 4, 4, 4, 2], Category::FourOfAKind),
            18
        );
        assert_eq!(
            calculate_category_score(&[4, 4, 4, 4, 2], Category::ThreeOfAKind),
            18
        );
        assert_eq!(
            calculate_category_score(&[3, 3, 3, 4, 5], Category::FourOfAKind),
            0
        );
        assert_eq!(
            calculate_category_score(&[1, 2, 3, 4, 5], Category::ThreeOfAKind),
            0
        );
    }

    #[test]
    fn test_full_house() {
        assert_eq!(
            calculate_category_score(&[2, 3, 2, 3, 3], Category::FullHouse),
            25
        );
        assert_eq!(
            calculate_category_score(&[5, 5, 5, 5, 5], Category::FullHouse),
            0
        );
        assert_eq!(
            calculate_category_score(&[1, 1, 2, 2, 3], Category::FullHouse),
            0
        );
    }

    #[test]
    fn test_straights() {
        assert_eq!(
            calculate_category_score(&[1, 2, 3, 4, 6], Category::SmallStraight),
            30
        );
        assert_eq!(
            calculate_category_score(&[3, 4, 5, 6, 6], Category::SmallStraight),
            30
        );
        assert_eq!(
            calculate_category_score(&[1, 2, 3, 4, 6], Category::LargeStraight),
            0
        );
        assert_eq!(
            calculate_category_score(&[6, 5, 4, 3, 2], Category::LargeStraight),
            40
        );
        assert_eq!(
            calculate_category_score(&[6, 5, 4, 3, 2], Category::SmallStraight),
            30
        );
        assert_eq!(
            calculate_category_score(&[1, 2, 3, 5, 6], Category::SmallStraight),
            0
        );
    }

    #[test]
    fn test_yahtzee_and_chance() {
        assert_eq!(calculate_category_score(&[4, 4, 4, 4, 4], Category::Yahtzee), 50);
        assert_eq!(calculate_category_score(&[4, 4, 4, 4, 3], Category::Yahtzee), 0);
        assert_eq!(calculate_category_score(&[3, 4, 1, 5, 6], Category::Chance), 19);
    }

    #[test]
    fn test_score_candidates_joker() {
        let plain = score_candidates(&[3, 3, 3, 3, 3], false);
        assert!(!plain.iter().any(|&(c, _)| c == Category::FullHouse));

        let joker = score_candidates(&[3, 3, 3, 3, 3], true);
        let get = |cat| joker.iter().find(|&&(c, _)| c == cat).map(|&(_, s)| s);
        assert_eq!(get(Category::FullHouse), Some(25));
        assert_eq!(get(Category::SmallStraight), Some(30));
        assert_eq!(get(Category::LargeStraight), Some(40));
        assert_eq!(get(Category::ThreeOfAKind), Some(15));
        assert_eq!(get(Category::Threes), Some(15));
        assert_eq!(get(Category::Aces), None);

        // Joker flag has no effect on a non-Yahtzee roll.
        assert_eq!(
            score_candidates(&[1, 1, 2, 2, 2], true),
            score_candidates(&[1, 1, 2, 2, 2], false)
        );
    }
}

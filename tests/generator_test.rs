//! Property and case tests for tree generation and step mapping

use proptest::prelude::*;
use rstest::rstest;

use timberman::domain::{
    build_sequence, generate_tree_string, AssetNames, DomainError, FrameNaming, SequenceGenerator,
    Side, Symbol, TreePattern, TreeString,
};

fn pattern_strategy() -> impl Strategy<Value = TreePattern> {
    prop_oneof![Just(TreePattern::Uniform), Just(TreePattern::Alternating)]
}

proptest! {
    // 1. Trees start and end with N and have the requested length
    #[test]
    fn tree_boundaries_are_no_branch(seed in any::<u64>(), length in 2usize..200, pattern in pattern_strategy()) {
        let tree = SequenceGenerator::seeded(seed, pattern).generate_tree_string(length).unwrap();
        let symbols = tree.symbols();
        prop_assert_eq!(symbols.len(), length);
        prop_assert_eq!(symbols[0], Symbol::NoBranch);
        prop_assert_eq!(symbols[length - 1], Symbol::NoBranch);
    }

    // 2. No two branches are ever adjacent
    #[test]
    fn tree_has_no_adjacent_branches(seed in any::<u64>(), length in 2usize..200, pattern in pattern_strategy()) {
        let tree = SequenceGenerator::seeded(seed, pattern).generate_tree_string(length).unwrap();
        for pair in tree.symbols().windows(2) {
            prop_assert!(!(pair[0].is_branch() && pair[1].is_branch()), "tree={}", tree);
        }
    }

    // 3. Generated trees survive re-validation through the parser
    #[test]
    fn tree_round_trips_through_parser(seed in any::<u64>(), length in 2usize..100) {
        let tree = SequenceGenerator::seeded(seed, TreePattern::Uniform).generate_tree_string(length).unwrap();
        let parsed: TreeString = tree.to_string().parse().unwrap();
        prop_assert_eq!(parsed, tree);
    }

    // 4. A tree of N symbols yields N - 1 steps indexed in order
    #[test]
    fn sequence_has_one_step_per_non_final_symbol(seed in any::<u64>(), length in 2usize..200) {
        let tree = SequenceGenerator::seeded(seed, TreePattern::Uniform).generate_tree_string(length).unwrap();
        let sequence = build_sequence(&tree, &AssetNames::default());
        prop_assert_eq!(sequence.len(), length - 1);
        for (i, step) in sequence.iter().enumerate() {
            prop_assert_eq!(step.index, i);
            prop_assert_eq!(step.symbol, tree.symbols()[i]);
        }
    }

    // 5. Correct and wrong always sit on opposite sides; branches pick their own side
    #[test]
    fn branch_steps_use_opposite_sides(seed in any::<u64>(), length in 2usize..200) {
        let assets = AssetNames::default();
        let tree = SequenceGenerator::seeded(seed, TreePattern::Alternating).generate_tree_string(length).unwrap();
        for step in build_sequence(&tree, &assets).iter() {
            prop_assert_eq!(step.wrong.button, step.correct.button.opposite());
            match step.symbol {
                Symbol::BranchLeft => {
                    prop_assert_eq!(step.correct.button, Side::Left);
                    prop_assert_eq!(&step.correct.gif, &assets.main_left);
                    prop_assert_eq!(&step.wrong.gif, &assets.death_right);
                }
                Symbol::BranchRight => {
                    prop_assert_eq!(step.correct.button, Side::Right);
                    prop_assert_eq!(&step.correct.gif, &assets.main_right);
                    prop_assert_eq!(&step.wrong.gif, &assets.death_left);
                }
                Symbol::NoBranch => {
                    prop_assert_eq!(step.correct.button, Side::Left);
                    prop_assert_eq!(&step.correct.gif, &assets.main_neutral);
                    prop_assert_eq!(&step.wrong.gif, &assets.death_right);
                }
            }
        }
    }

    // 6. Seeding makes generation reproducible
    #[test]
    fn same_seed_same_tree(seed in any::<u64>(), length in 2usize..100, pattern in pattern_strategy()) {
        let a = SequenceGenerator::seeded(seed, pattern).generate_tree_string(length).unwrap();
        let b = SequenceGenerator::seeded(seed, pattern).generate_tree_string(length).unwrap();
        prop_assert_eq!(a, b);
    }
}

#[rstest]
#[case(0)]
#[case(1)]
fn given_length_below_two_when_generating_then_invalid_length(#[case] length: usize) {
    let mut rng = rand::rng();
    let err = generate_tree_string(length, TreePattern::Uniform, &mut rng).unwrap_err();
    assert_eq!(err, DomainError::InvalidLength { length });
}

#[rstest]
#[case(TreePattern::Uniform)]
#[case(TreePattern::Alternating)]
fn given_length_two_when_generating_then_single_neutral_step(#[case] pattern: TreePattern) {
    let tree = SequenceGenerator::seeded(1, pattern)
        .generate_tree_string(2)
        .unwrap();
    assert_eq!(tree.to_string(), "NN");

    let sequence = build_sequence(&tree, &AssetNames::default());
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence.steps()[0].symbol, Symbol::NoBranch);
    assert_eq!(sequence.steps()[0].correct.button, Side::Left);
}

#[rstest]
#[case("NLNRN", &[(Side::Left, "NEUTRAL"), (Side::Left, "LEFT"), (Side::Left, "NEUTRAL"), (Side::Right, "RIGHT")])]
#[case("NRNNLN", &[(Side::Left, "NEUTRAL"), (Side::Right, "RIGHT"), (Side::Left, "NEUTRAL"), (Side::Left, "NEUTRAL"), (Side::Left, "LEFT")])]
#[case("NNN", &[(Side::Left, "NEUTRAL"), (Side::Left, "NEUTRAL")])]
fn given_tree_when_building_sequence_then_correct_choices_match(
    #[case] tree: &str,
    #[case] expected: &[(Side, &str)],
) {
    let tree: TreeString = tree.parse().unwrap();
    let sequence = build_sequence(&tree, &AssetNames::default());

    let actual: Vec<(Side, &str)> = sequence
        .iter()
        .map(|s| (s.correct.button, s.correct.gif.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn given_custom_asset_names_when_building_then_uses_them() {
    let assets = AssetNames {
        main_left: "NLN".into(),
        death_right: "NLN_DEATH".into(),
        ..AssetNames::default()
    };
    let tree: TreeString = "NLN".parse().unwrap();
    let sequence = build_sequence(&tree, &assets);

    assert_eq!(sequence.steps()[1].correct.gif, "NLN");
    assert_eq!(sequence.steps()[1].wrong.gif, "NLN_DEATH");
    assert_eq!(sequence.steps()[1].frame_file_name(), "NLN_1.gif");
}

#[test]
fn given_many_uniform_trees_when_generating_then_all_symbols_appear() {
    let mut generator = SequenceGenerator::seeded(99, TreePattern::Uniform);
    let tree = generator.generate_tree_string(200).unwrap();
    let symbols = tree.symbols();
    assert!(symbols.contains(&Symbol::BranchLeft));
    assert!(symbols.contains(&Symbol::BranchRight));
    // uniform allows N after N, alternating never does
    assert!(symbols[..symbols.len() - 1]
        .windows(2)
        .any(|pair| pair == [Symbol::NoBranch, Symbol::NoBranch]));
}

fn window_assets() -> AssetNames {
    AssetNames {
        naming: FrameNaming::Window,
        ..AssetNames::default()
    }
}

#[rstest]
#[case("NLNRN", &[("NLN", "NLN_DEATH"), ("LNR", "LN_DEATH"), ("NRN", "NRN_DEATH"), ("RNL", "RN_DEATH")])]
#[case("NRNLN", &[("NRN", "NRN_DEATH"), ("RNL", "RN_DEATH"), ("NLN", "NLN_DEATH"), ("LNL", "LN_DEATH")])]
#[case("NLNLNRN", &[("NLN", "NLN_DEATH"), ("LNL", "LN_DEATH"), ("NLN", "NLN_DEATH"), ("LNR", "LN_DEATH"), ("NRN", "NRN_DEATH"), ("RNL", "RN_DEATH")])]
#[case("NNRN", &[("NNR", "NNR_DEATH"), ("NRN", "NRN_DEATH"), ("RNL", "RN_DEATH")])]
#[case("NN", &[("NNL", "NNL_DEATH")])]
fn given_window_naming_when_building_sequence_then_gifs_follow_three_symbol_window(
    #[case] tree: &str,
    #[case] expected: &[(&str, &str)],
) {
    let tree: TreeString = tree.parse().unwrap();
    let sequence = build_sequence(&tree, &window_assets());

    let actual: Vec<(&str, &str)> = sequence
        .iter()
        .map(|s| (s.correct.gif.as_str(), s.wrong.gif.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn given_window_naming_when_building_then_copied_frame_carries_window_name() {
    let tree: TreeString = "NRNLN".parse().unwrap();
    let sequence = build_sequence(&tree, &window_assets());

    assert_eq!(sequence.steps()[1].frame_file_name(), "RNL_1.gif");
    assert_eq!(sequence.steps()[3].frame_file_name(), "LNL_3.gif");
}

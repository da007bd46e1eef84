use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use poker_rules::{
    Action, CardArena, HandRanking, PokerHand,
    functional::{argmax, eval},
    parse_cards, presets,
};
use std::hint::black_box;

/// Benchmark standard evaluation of a 7-card hand
fn bench_eval_7_cards(c: &mut Criterion) {
    let cards = parse_cards("AsKsQsJsTs 9d2c").unwrap();
    c.bench_function("eval_7_cards", |b| {
        b.iter(|| eval(black_box(&cards)));
    });
}

/// Benchmark each ranking on a hold'em-sized or Omaha-sized input
fn bench_rankings(c: &mut Criterion) {
    let mut group = c.benchmark_group("rankings");
    let hole = parse_cards("Ah2d3c4s").unwrap();
    let board = parse_cards("5h9cKdQs7s").unwrap();

    for ranking in [
        HandRanking::StandardHigh,
        HandRanking::AceToFiveLow,
        HandRanking::DeuceToSevenLow,
        HandRanking::EightOrBetterLow,
        HandRanking::OmahaHigh,
        HandRanking::OmahaEightOrBetterLow,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(ranking), &ranking, |b, &ranking| {
            b.iter(|| ranking.evaluate(black_box(&hole), black_box(&board)));
        });
    }

    group.finish();
}

/// Benchmark picking winners among 4 hands
fn bench_hand_comparison(c: &mut Criterion) {
    let hands = [
        eval(&parse_cards("AsAh KdQc9s 7h2d").unwrap()),
        eval(&parse_cards("KsKh KdQc9s 7h2d").unwrap()),
        eval(&parse_cards("Ts9h KdQc9s 7h2d").unwrap()),
        eval(&parse_cards("JsTh KdQc9s 7h2d").unwrap()),
    ];
    c.bench_function("hand_comparison_4_hands", |b| {
        b.iter(|| argmax(black_box(&hands)));
    });
}

/// Benchmark a full checked-down hold'em hand with different seat counts
fn bench_full_hand(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_hand");

    for seats in [2, 6, 9] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{seats}_seats")),
            &seats,
            |b, &seats| {
                let definition = presets::no_limit_texas_holdem(1, 2, &vec![200; seats]).unwrap();
                b.iter(|| {
                    let mut hand = PokerHand::new(definition.clone(), CardArena::standard()).unwrap();
                    while let Some(seat) = hand.actor() {
                        let action = match hand.legal_actions() {
                            Some(choices) if choices.contains(&Action::Check) => Action::Check,
                            _ => Action::Call,
                        };
                        hand.act(seat, action).unwrap();
                    }
                    hand
                });
            },
        );
    }

    group.finish();
}

/// Benchmark table snapshots mid-hand
fn bench_snapshot(c: &mut Criterion) {
    let definition = presets::no_limit_texas_holdem(1, 2, &[200; 9]).unwrap();
    let hand = PokerHand::new(definition, CardArena::standard()).unwrap();
    c.bench_function("snapshot_9_seats", |b| {
        b.iter(|| hand.snapshot());
    });
}

criterion_group!(hand_evaluation, bench_eval_7_cards, bench_rankings, bench_hand_comparison);

criterion_group!(hand_play, bench_full_hand, bench_snapshot);

criterion_main!(hand_evaluation, hand_play);

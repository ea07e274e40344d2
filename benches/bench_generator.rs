use criterion::{criterion_group, criterion_main, Criterion};
use scrabble_analyzer::{Board, Evaluator, Generator, Lexicon, Rack, TileBag};

// TODO bench against a full CSW word list once one ships with the repo
const WORDS: &[&str] = &[
    "AT", "TA", "AS", "RE", "ER", "IN", "ON", "AN", "EN", "ES", "CAT", "CATS", "SCAT", "CAST",
    "ACT", "ACTS", "ARC", "ARCS", "CAR", "CARS", "CART", "CARTS", "RAT", "RATS", "TAR", "TARS",
    "STAR", "TSAR", "ART", "ARTS", "EAR", "EARS", "ERA", "ERAS", "SEA", "SEAR", "SEAT", "EAST",
    "EATS", "TEAS", "TEA", "SET", "NET", "NETS", "NEST", "RENT", "RENTS", "STERN", "TERN",
    "TERNS", "EARN", "EARNS", "SNARE", "NEAR", "NEARS", "SANER", "RAIN", "RAINS", "TRAIN",
    "TRAINS", "STRAIN", "RETINA", "RETAINS", "NASTIER", "RETSINA", "STAINER",
];

const TEST_STATE: &[&str] = &[
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "......CAT......",
    "......A........",
    "......RENTS....",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
];

fn bench_moves(c: &mut Criterion, name: &str, letters: &str) {
    let lexicon = Lexicon::from_words(WORDS).unwrap();
    let board = Board::new().with_rows(TEST_STATE).unwrap();
    let rack = Rack::from_letters(letters).unwrap();

    c.bench_function(&format!("generator.{}", name), |b| {
        b.iter(|| {
            let generator = Generator::new(&lexicon, &board);
            let moves = generator.moves(&rack);
            Evaluator::new(TileBag::standard()).top_moves(moves, &rack.tiles(), 10)
        })
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_moves(c, "1", "retains");
}

fn slow_benchmarks(c: &mut Criterion) {
    bench_moves(c, "2", "retain?");
    bench_moves(c, "3", "resin??");
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(60);
    targets = criterion_benchmark
}

criterion_group! {
    name = slow;
    config = Criterion::default()
        .sample_size(10);
    targets = slow_benchmarks
}

criterion_main!(benches, slow);

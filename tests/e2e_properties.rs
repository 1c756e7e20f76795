//! Property tests for network and recommendation invariants.

use std::collections::HashSet;

use book_network::{
    build, recommend, BuildStrategy, Book, ColorBand, NetworkConfig, RecommendOptions,
    SharedSubjectCount,
};
use book_network::catalog::{read_catalog, write_catalog};
use proptest::prelude::*;

const TAG: &str = "tag";

fn arb_book(index: usize) -> impl Strategy<Value = Book> {
    (
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "e", TAG]), 0..5),
        prop::option::of((0u32..500).prop_map(|n| f64::from(n) / 100.0)),
        prop::option::of(0u64..1000),
    )
        .prop_map(move |(subjects, rating, count)| {
            let mut book = Book::new(format!("Book {index}")).with_subjects(subjects);
            book.ratings_average = rating;
            book.readinglog_count = count;
            book
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Book>> {
    (0usize..12).prop_flat_map(|n| (0..n).map(arb_book).collect::<Vec<_>>())
}

fn shared(a: &Book, b: &Book, excluded: Option<&str>) -> usize {
    a.subject_set(excluded).intersection(&b.subject_set(excluded)).count()
}

proptest! {
    #[test]
    fn edge_iff_shared_subject(books in arb_catalog()) {
        let net = build(books.clone(), &NetworkConfig::default().with_excluded_tag(TAG));
        for (i, a) in books.iter().enumerate() {
            for b in books.iter().skip(i + 1) {
                let ia = net.node_by_title(&a.title).unwrap().id;
                let ib = net.node_by_title(&b.title).unwrap().id;
                let expected = shared(a, b, Some(TAG));
                match net.edge_between(ia, ib) {
                    Some(rel) => { prop_assert_eq!(rel.weight, expected); }
                    None => { prop_assert_eq!(expected, 0); }
                }
            }
        }
    }

    #[test]
    fn edges_unique_without_self_loops(books in arb_catalog()) {
        let net = build(books, &NetworkConfig::default().with_excluded_tag(TAG));
        let mut pairs = HashSet::new();
        for rel in net.edges() {
            prop_assert_ne!(rel.src, rel.dst);
            let key = (rel.src.min(rel.dst), rel.src.max(rel.dst));
            prop_assert!(pairs.insert(key));
            prop_assert!(rel.weight >= 1);
        }
    }

    #[test]
    fn strategies_agree(books in arb_catalog()) {
        let cfg = NetworkConfig::default().with_excluded_tag(TAG);
        let a = build(books.clone(), &cfg);
        let b = build(books, &cfg.clone().with_strategy(BuildStrategy::InvertedIndex));
        prop_assert_eq!(a.edges().cloned().collect::<Vec<_>>(), b.edges().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn color_band_is_pure(rating in prop::option::of(-1.0f64..6.0)) {
        prop_assert_eq!(ColorBand::from_rating(rating), ColorBand::from_rating(rating));
        if rating.is_none() {
            prop_assert_eq!(ColorBand::from_rating(rating), ColorBand::Unknown);
        }
    }

    #[test]
    fn recommendations_respect_filters(
        books in arb_catalog(),
        min_shared in 0usize..4,
        high in any::<bool>(),
        raw in any::<bool>(),
    ) {
        prop_assume!(!books.is_empty());
        let net = build(books.clone(), &NetworkConfig::default().with_excluded_tag(TAG));
        let mode = if raw { SharedSubjectCount::Raw } else { SharedSubjectCount::ExcludingTag };
        let opts = RecommendOptions::default()
            .with_min_shared_subjects(min_shared)
            .with_high_rating(high)
            .with_shared_count(mode);

        let seed = &books[0];
        let recs = recommend(&net, &seed.title, &opts).unwrap();
        let excluded = if raw { None } else { Some(TAG) };

        for rec in &recs {
            let other = net.node_by_title(&rec.title).unwrap();
            prop_assert!(shared(seed, &other.book, excluded) >= min_shared);
            if high {
                prop_assert!(rec.ratings_average.is_some_and(|r| r >= 4.0));
            }
        }
        for pair in recs.windows(2) {
            prop_assert!(pair[0].readinglog_count.unwrap_or(0) >= pair[1].readinglog_count.unwrap_or(0));
        }
    }

    #[test]
    fn catalog_roundtrip(books in arb_catalog()) {
        let mut buf = Vec::new();
        write_catalog(&mut buf, &books).unwrap();
        prop_assert_eq!(read_catalog(buf.as_slice()).unwrap(), books);
    }
}

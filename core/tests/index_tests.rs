use searchlite_core::InvertedIndex;

#[test]
fn upsert_tracks_counts() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "apple banana");
    idx.upsert(2, "B", "apple apple banana");
    assert_eq!(idx.doc_count(), 2);
    assert_eq!(idx.document_frequency("apple"), 2);
    assert_eq!(idx.document_frequency("banana"), 2);
}

#[test]
fn remove_purges_postings() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "apple banana");
    idx.upsert(2, "B", "apple apple banana");
    assert!(idx.remove(1));
    assert_eq!(idx.doc_count(), 1);
    assert!(!idx.contains(1));
    assert_eq!(idx.document_frequency("apple"), 1);
    // both terms still live via doc 2
    assert_eq!(idx.term_count(), 2);
}

#[test]
fn remove_absent_is_noop() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "apple");
    assert!(!idx.remove(42));
    assert_eq!(idx.doc_count(), 1);
    assert_eq!(idx.term_count(), 1);
}

#[test]
fn remove_drops_dead_terms() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "unique shared");
    idx.upsert(2, "B", "shared");
    idx.remove(1);
    assert_eq!(idx.document_frequency("unique"), 0);
    assert_eq!(idx.term_count(), 1);
}

#[test]
fn reupsert_leaves_no_residue() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "obsolete wording here");
    idx.upsert(1, "A v2", "fresh wording here");
    assert_eq!(idx.doc_count(), 1);
    assert_eq!(idx.document_frequency("obsolete"), 0);
    assert!(idx.search("obsolete", 10).is_empty());
    let hits = idx.search("fresh", 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
    assert_eq!(hits[0].title, "A v2");
}

#[test]
fn ranking_prefers_higher_tf() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "Doc1", "apple banana");
    idx.upsert(2, "Doc2", "apple apple banana");
    idx.upsert(3, "Doc3", "banana banana banana");
    let results = idx.search("apple", 3);
    assert_eq!(results[0].id, 2);
    assert_eq!(results[1].id, 1);
    // Doc3 has no apples: absent, or trailing if ever scored.
    let ids: Vec<u64> = results.iter().map(|h| h.id).collect();
    assert!(!ids.contains(&3) || *ids.last().unwrap() == 3);
}

#[test]
fn ubiquitous_term_still_scores_positive() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "common");
    idx.upsert(2, "B", "common");
    idx.upsert(3, "C", "common");
    let results = idx.search("common", 10);
    assert_eq!(results.len(), 3);
    for hit in results {
        assert!(hit.score > 0.0);
    }
}

#[test]
fn multi_term_scores_accumulate() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "apple banana");
    idx.upsert(2, "B", "apple cherry");
    let results = idx.search("apple banana", 10);
    assert_eq!(results[0].id, 1);
    assert_eq!(results.len(), 2);
}

#[test]
fn empty_query_and_empty_index() {
    let mut idx = InvertedIndex::new();
    assert!(idx.search("anything", 10).is_empty());
    idx.upsert(1, "A", "apple");
    assert!(idx.search("", 10).is_empty());
    assert!(idx.search("12345 !!!", 10).is_empty());
}

#[test]
fn unknown_terms_contribute_nothing() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "A", "apple");
    let results = idx.search("apple zzzz", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 1);
}

#[test]
fn k_truncates_results() {
    let mut idx = InvertedIndex::new();
    for id in 0..5 {
        idx.upsert(id, "doc", "apple");
    }
    assert_eq!(idx.search("apple", 3).len(), 3);
    assert_eq!(idx.search("apple", 100).len(), 5);
    assert!(idx.search("apple", 0).is_empty());
}

#[test]
fn empty_document_is_indexed_but_unsearchable() {
    let mut idx = InvertedIndex::new();
    idx.upsert(1, "Empty", "");
    assert_eq!(idx.doc_count(), 1);
    assert_eq!(idx.term_count(), 0);
    assert!(idx.search("anything", 10).is_empty());
    assert!(idx.remove(1));
    assert_eq!(idx.doc_count(), 0);
}

use crate::tokenizer::tokenize;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type DocId = u64;

/// Document payload as handed in by the caller; owned by the index once
/// upserted and returned to the allocator on remove or replace.
#[derive(Debug, Clone)]
pub struct StoredDoc {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: DocId,
    pub title: String,
    pub score: f32,
}

/// In-memory inverted index with TF-IDF ranking.
///
/// Postings map each term to `doc_id -> raw frequency`. A doc id appears in a
/// term's postings iff the term occurs in that document's current text, and a
/// term with no remaining postings is dropped outright, so `term_count` stays
/// meaningful as a live-vocabulary statistic.
///
/// Not synchronized: callers exposing this behind a concurrent boundary must
/// serialize mutations against reads externally.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, HashMap<DocId, u32>>,
    docs: HashMap<DocId, StoredDoc>,
    doc_len: HashMap<DocId, usize>,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, replacing any previous version under the same id.
    /// Replacement is remove-then-insert so no postings from the old text
    /// survive. Empty text is accepted and indexes zero terms.
    pub fn upsert(&mut self, doc_id: DocId, title: &str, text: &str) {
        if self.docs.contains_key(&doc_id) {
            self.remove(doc_id);
        }
        let tokens = tokenize(text);
        let mut freq: HashMap<String, u32> = HashMap::new();
        for t in &tokens {
            *freq.entry(t.clone()).or_insert(0) += 1;
        }
        tracing::debug!(doc_id, tokens = tokens.len(), terms = freq.len(), "indexing document");
        self.doc_len.insert(doc_id, tokens.len());
        self.docs.insert(
            doc_id,
            StoredDoc { title: title.to_string(), text: text.to_string() },
        );
        for (term, f) in freq {
            self.postings.entry(term).or_default().insert(doc_id, f);
        }
        self.num_docs += 1;
    }

    /// Remove a document. Returns `false` without touching anything if the id
    /// is not indexed. The stored text is re-tokenized to recover the term
    /// set, so no separate per-document term list is kept.
    pub fn remove(&mut self, doc_id: DocId) -> bool {
        let Some(doc) = self.docs.remove(&doc_id) else {
            return false;
        };
        let terms: HashSet<String> = tokenize(&doc.text).into_iter().collect();
        for term in &terms {
            if let Some(plist) = self.postings.get_mut(term) {
                plist.remove(&doc_id);
                if plist.is_empty() {
                    self.postings.remove(term);
                }
            }
        }
        self.doc_len.remove(&doc_id);
        self.num_docs -= 1;
        tracing::debug!(doc_id, terms = terms.len(), "removed document");
        true
    }

    /// Rank documents against `query` and return at most `k` hits, best
    /// first. Out-of-vocabulary query terms contribute nothing; documents
    /// matching no term are absent from the result. Equal-score hits have no
    /// guaranteed relative order.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        let tokens = tokenize(query);
        if tokens.is_empty() || self.num_docs == 0 {
            return Vec::new();
        }
        let terms: HashSet<&String> = tokens.iter().collect();

        let mut scores: HashMap<DocId, f32> = HashMap::new();
        for term in terms {
            let Some(plist) = self.postings.get(term.as_str()) else {
                continue;
            };
            let df = plist.len();
            // Smoothed IDF: strictly positive even when a term is in every doc.
            let idf = ((self.num_docs as f32 + 1.0) / (df as f32 + 1.0)).ln() + 1.0;
            for (&doc_id, &freq) in plist {
                let len = self.doc_len.get(&doc_id).copied().unwrap_or(0).max(1);
                let tf = freq as f32 / len as f32;
                *scores.entry(doc_id).or_insert(0.0) += tf * idf;
            }
        }

        let mut ranked: Vec<(DocId, f32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);
        ranked
            .into_iter()
            .filter_map(|(id, score)| {
                self.docs
                    .get(&id)
                    .map(|doc| SearchHit { id, title: doc.title.clone(), score })
            })
            .collect()
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.docs.contains_key(&doc_id)
    }

    /// Number of currently indexed documents.
    pub fn doc_count(&self) -> usize {
        self.num_docs
    }

    /// Number of distinct terms with at least one posting.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of documents whose current text contains `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, HashMap::len)
    }
}

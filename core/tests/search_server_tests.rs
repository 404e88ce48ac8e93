use wordrank_core::{
    DocumentId, DocumentStatus, ExecutionMode, SearchError, SearchServer, MAX_RESULT_DOCUMENT_COUNT,
};

const BOTH_MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

fn server_with_stop_words() -> SearchServer {
    SearchServer::from_stop_words_text("in the").unwrap()
}

fn add(server: &mut SearchServer, id: DocumentId, text: &str, ratings: &[i32]) {
    server
        .add_document(id, text, DocumentStatus::Actual, ratings)
        .unwrap();
}

#[test]
fn add_document_increments_count() {
    let mut server = server_with_stop_words();
    assert_eq!(server.document_count(), 0);
    add(&mut server, 1, "cat in the city", &[1, 2, 3]);
    assert_eq!(server.document_count(), 1);
    add(&mut server, 2, "cat in the home", &[]);
    assert_eq!(server.document_count(), 2);
}

#[test]
fn duplicate_and_negative_ids_are_rejected() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat", &[]);

    let err = server
        .add_document(1, "dog", DocumentStatus::Actual, &[])
        .unwrap_err();
    assert_eq!(err, SearchError::InvalidDocumentId(1));

    let err = server
        .add_document(-3, "dog", DocumentStatus::Actual, &[])
        .unwrap_err();
    assert_eq!(err, SearchError::InvalidDocumentId(-3));

    // failed insertions leave state unchanged
    assert_eq!(server.document_count(), 1);
    assert!(server.get_word_frequencies(1).contains_key("cat"));
    assert!(!server.get_word_frequencies(1).contains_key("dog"));
}

#[test]
fn control_characters_fail_insertion_without_partial_postings() {
    let mut server = server_with_stop_words();
    let err = server
        .add_document(1, "big cat sma\x0cll dog", DocumentStatus::Actual, &[])
        .unwrap_err();
    assert_eq!(err, SearchError::InvalidWord("sma\x0cll".to_string()));
    assert_eq!(server.document_count(), 0);
    assert!(server.get_word_frequencies(1).is_empty());
}

#[test]
fn term_frequencies_sum_to_one_per_document() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat in the city cat", &[]);
    let freqs = server.get_word_frequencies(1);
    // stop words never enter the index
    assert!(!freqs.contains_key("in"));
    assert!(!freqs.contains_key("the"));
    let total: f64 = freqs.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn all_stop_word_document_is_valid_with_no_postings() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "in the in", &[]);
    assert_eq!(server.document_count(), 1);
    assert!(server.get_word_frequencies(1).is_empty());
    for mode in BOTH_MODES {
        assert!(server.find_top_documents(mode, "in").unwrap().is_empty());
    }
}

#[test]
fn minus_word_excludes_document() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat in the city", &[1]);
    add(&mut server, 2, "cat in the home", &[2]);

    for mode in BOTH_MODES {
        let found = server.find_top_documents(mode, "cat -city").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }
}

#[test]
fn ranking_is_by_decreasing_relevance() {
    let mut server = SearchServer::from_stop_words_text("and in on").unwrap();
    add(&mut server, 1, "white cat and fancy collar", &[8, -3]);
    add(&mut server, 2, "fluffy cat fluffy tail", &[7, 2, 7]);
    add(&mut server, 3, "groomed dog expressive eyes", &[5, -12, 2, 1]);

    for mode in BOTH_MODES {
        let found = server.find_top_documents(mode, "fluffy groomed cat").unwrap();
        assert_eq!(found.len(), 3);
        let ids: Vec<DocumentId> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(found[0].relevance > found[1].relevance + 1e-6);
        assert!(found[1].relevance > found[2].relevance + 1e-6);
        assert_eq!(
            found.iter().map(|d| d.rating).collect::<Vec<_>>(),
            vec![5, -1, 2]
        );
    }
}

#[test]
fn near_ties_order_by_rating_descending() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat", &[1]);
    add(&mut server, 2, "cat", &[9]);
    add(&mut server, 3, "cat", &[5]);

    for mode in BOTH_MODES {
        let found = server.find_top_documents(mode, "cat").unwrap();
        let ids: Vec<DocumentId> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}

#[test]
fn result_size_never_exceeds_limit() {
    let mut server = server_with_stop_words();
    for id in 0..9 {
        add(&mut server, id, "cat", &[id]);
    }
    for mode in BOTH_MODES {
        let found = server.find_top_documents(mode, "cat").unwrap();
        assert_eq!(found.len(), MAX_RESULT_DOCUMENT_COUNT);
        // tied relevance, so the five best-rated documents win
        assert_eq!(
            found.iter().map(|d| d.rating).collect::<Vec<_>>(),
            vec![8, 7, 6, 5, 4]
        );
    }
}

#[test]
fn status_and_predicate_filters_apply() {
    let mut server = server_with_stop_words();
    server
        .add_document(1, "cat dog", DocumentStatus::Actual, &[1])
        .unwrap();
    server
        .add_document(2, "cat dog", DocumentStatus::Banned, &[2])
        .unwrap();
    server
        .add_document(3, "cat dog", DocumentStatus::Actual, &[3])
        .unwrap();

    for mode in BOTH_MODES {
        let banned = server
            .find_top_documents_with_status(mode, "cat", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(banned.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);

        let odd_ids = server
            .find_top_documents_by(mode, "cat", |id, _, _| id % 2 == 1)
            .unwrap();
        assert_eq!(odd_ids.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 1]);
    }
}

#[test]
fn default_search_is_over_actual_documents() {
    let mut server = server_with_stop_words();
    server
        .add_document(1, "cat", DocumentStatus::Irrelevant, &[])
        .unwrap();
    server
        .add_document(2, "cat", DocumentStatus::Actual, &[])
        .unwrap();
    let found = server
        .find_top_documents(ExecutionMode::Sequential, "cat")
        .unwrap();
    assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn average_rating_is_truncating_division() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat", &[-1, -2]);
    add(&mut server, 2, "dog", &[1, 2]);
    let found = server
        .find_top_documents(ExecutionMode::Sequential, "cat dog")
        .unwrap();
    let rating_of = |id: DocumentId| found.iter().find(|d| d.id == id).unwrap().rating;
    assert_eq!(rating_of(1), -1);
    assert_eq!(rating_of(2), 1);
}

#[test]
fn remove_document_erases_every_trace() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat in the city", &[1]);
    add(&mut server, 2, "cat in the home", &[2]);

    server.remove_document(1);
    assert_eq!(server.document_count(), 1);
    assert!(server.get_word_frequencies(1).is_empty());
    assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![2]);
    for mode in BOTH_MODES {
        let found = server.find_top_documents(mode, "cat city").unwrap();
        assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);
    }

    // removing a non-live id is a safe no-op
    server.remove_document(1);
    server.remove_document(77);
    assert_eq!(server.document_count(), 1);
}

#[test]
fn match_document_reports_plus_word_hits() {
    let mut server = server_with_stop_words();
    server
        .add_document(2, "cat in the home", DocumentStatus::Banned, &[])
        .unwrap();

    for mode in BOTH_MODES {
        let (words, status) = server.match_document(mode, "home cat rat", 2).unwrap();
        assert_eq!(words, vec!["cat".to_string(), "home".to_string()]);
        assert_eq!(status, DocumentStatus::Banned);
    }
}

#[test]
fn match_document_is_empty_on_minus_word_hit() {
    let mut server = server_with_stop_words();
    server
        .add_document(2, "cat in the home", DocumentStatus::Actual, &[])
        .unwrap();

    for mode in BOTH_MODES {
        let (words, status) = server.match_document(mode, "cat -home", 2).unwrap();
        assert!(words.is_empty());
        assert_eq!(status, DocumentStatus::Actual);
    }
}

#[test]
fn match_document_rejects_unknown_ids() {
    let server = server_with_stop_words();
    for mode in BOTH_MODES {
        let err = server.match_document(mode, "cat", 5).unwrap_err();
        assert_eq!(err, SearchError::UnknownDocumentId(5));
    }
}

#[test]
fn malformed_queries_fail_retrieval_and_matching() {
    let mut server = server_with_stop_words();
    add(&mut server, 1, "cat", &[]);

    for mode in BOTH_MODES {
        assert_eq!(
            server.find_top_documents(mode, "cat - dog").unwrap_err(),
            SearchError::EmptyQueryWord
        );
        assert_eq!(
            server.find_top_documents(mode, "--cat").unwrap_err(),
            SearchError::InvalidQueryWord("--cat".to_string())
        );
        assert_eq!(
            server.find_top_documents(mode, "ca\x1ft").unwrap_err(),
            SearchError::InvalidQueryWord("ca\x1ft".to_string())
        );
        assert_eq!(
            server.match_document(mode, "-", 1).unwrap_err(),
            SearchError::EmptyQueryWord
        );
    }
}

#[test]
fn sequential_and_parallel_results_are_identical() {
    let mut server = SearchServer::from_stop_words_text("a the of").unwrap();
    let pool = [
        "cat", "dog", "bird", "city", "home", "tree", "river", "stone", "cloud", "grass",
    ];
    for id in 0..40 {
        let id = id as DocumentId;
        let text = format!(
            "{} {} {} the {} of {}",
            pool[(id as usize * 3) % pool.len()],
            pool[(id as usize * 5 + 1) % pool.len()],
            pool[(id as usize * 7 + 2) % pool.len()],
            pool[(id as usize + 4) % pool.len()],
            pool[(id as usize * 2 + 6) % pool.len()],
        );
        let status = if id % 4 == 0 {
            DocumentStatus::Banned
        } else {
            DocumentStatus::Actual
        };
        server
            .add_document(id, &text, status, &[id % 7 - 3, id % 5])
            .unwrap();
    }

    for query in ["cat city -stone", "river cloud grass -dog", "tree", "home -home"] {
        let sequential = server
            .find_top_documents_by(ExecutionMode::Sequential, query, |id, _, rating| {
                id % 2 == 0 || rating > 0
            })
            .unwrap();
        let parallel = server
            .find_top_documents_by(ExecutionMode::Parallel, query, |id, _, rating| {
                id % 2 == 0 || rating > 0
            })
            .unwrap();

        assert_eq!(
            sequential.iter().map(|d| d.id).collect::<Vec<_>>(),
            parallel.iter().map(|d| d.id).collect::<Vec<_>>()
        );
        for (s, p) in sequential.iter().zip(&parallel) {
            assert!((s.relevance - p.relevance).abs() < 1e-6);
            assert_eq!(s.rating, p.rating);
        }
    }
}
